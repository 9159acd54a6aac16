//! Leptos DragDrop Utilities
//!
//! Single-session drag-and-drop for Leptos using native HTML5 drag events.
//! At most one drag session exists at a time; every drop consumes it.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Node};

/// An in-flight drag: where it started and what is being carried.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<S, T> {
    pub source: S,
    pub payload: T,
}

/// Holds at most one [`DragSession`].
///
/// Idle when `session` is `None`, Dragging otherwise. Starting a new drag
/// while one is held replaces it (last writer wins).
#[derive(Clone, Debug, PartialEq)]
pub struct DragTracker<S, T> {
    session: Option<DragSession<S, T>>,
}

impl<S, T> Default for DragTracker<S, T> {
    fn default() -> Self {
        Self { session: None }
    }
}

/// What a drop on `target` resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum DropResolution<S, T> {
    /// Nothing was being dragged.
    NoSession,
    /// Dropped back onto the column it came from.
    SameSource(DragSession<S, T>),
    /// Dropped onto a different target.
    Transfer { session: DragSession<S, T>, target: S },
}

impl<S, T> DragTracker<S, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter Dragging. Returns the session that was overwritten, if any.
    pub fn start(&mut self, source: S, payload: T) -> Option<DragSession<S, T>> {
        self.session.replace(DragSession { source, payload })
    }

    /// Take the session, leaving the tracker Idle.
    pub fn take(&mut self) -> Option<DragSession<S, T>> {
        self.session.take()
    }

    pub fn session(&self) -> Option<&DragSession<S, T>> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}

impl<S: PartialEq, T> DragTracker<S, T> {
    /// Resolve a drop on `target`.
    ///
    /// The session is cleared unconditionally, whatever the outcome.
    pub fn resolve_drop(&mut self, target: S) -> DropResolution<S, T> {
        match self.session.take() {
            None => DropResolution::NoSession,
            Some(session) if session.source == target => DropResolution::SameSource(session),
            Some(session) => DropResolution::Transfer { session, target },
        }
    }
}

/// DnD state signals
pub struct DndSignals<S, T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub tracker: RwSignal<DragTracker<S, T>>,
    /// Drop target currently under the pointer (for highlighting)
    pub hover_target: RwSignal<Option<S>>,
}

impl<S, T> Clone for DndSignals<S, T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for DndSignals<S, T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
}

pub fn create_dnd_signals<S, T>() -> DndSignals<S, T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    DndSignals {
        tracker: RwSignal::new(DragTracker::new()),
        hover_target: RwSignal::new(None),
    }
}

impl<S, T> DndSignals<S, T>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn start(&self, source: S, payload: T) {
        self.tracker.update(|tracker| {
            tracker.start(source, payload);
        });
    }

    /// Resolve a drop and clear both the session and the hover highlight.
    pub fn resolve_drop(&self, target: S) -> DropResolution<S, T> {
        self.hover_target.set(None);
        let mut resolution = DropResolution::NoSession;
        self.tracker.update(|tracker| resolution = tracker.resolve_drop(target));
        resolution
    }

    /// Pointer left `target`. Ignored while it is still over one of the
    /// target's children, since `dragleave` fires for those too.
    pub fn leave(&self, target: &S, still_inside: bool) {
        if still_inside {
            return;
        }
        if self.hover_target.with_untracked(|hover| hover.as_ref() == Some(target)) {
            self.hover_target.set(None);
        }
    }

    /// End drag operation without a drop
    pub fn end_drag(&self) {
        self.hover_target.set(None);
        if self.tracker.with_untracked(DragTracker::is_dragging) {
            self.tracker.update(|tracker| {
                tracker.take();
            });
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.with(DragTracker::is_dragging)
    }

    pub fn is_hovering(&self, target: &S) -> bool {
        self.hover_target.with(|hover| hover.as_ref() == Some(target))
    }
}

/// Create dragstart handler for a draggable element.
///
/// `label` is written to the data transfer as `text/plain`; some browsers
/// refuse to start a drag without data.
pub fn make_on_dragstart<S, T>(
    dnd: DndSignals<S, T>,
    source: S,
    payload: T,
    label: String,
) -> impl Fn(DragEvent) + Clone + 'static
where
    S: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |ev: DragEvent| {
        if let Some(transfer) = ev.data_transfer() {
            transfer.set_effect_allowed("move");
            let _ = transfer.set_data("text/plain", &label);
        }
        dnd.start(source.clone(), payload.clone());
    }
}

/// Create dragover handler for a drop target. Marks the target as droppable.
pub fn make_on_dragover<S, T>(dnd: DndSignals<S, T>, target: S) -> impl Fn(DragEvent) + Clone + 'static
where
    S: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        if !dnd.hover_target.with_untracked(|hover| hover.as_ref() == Some(&target)) {
            dnd.hover_target.set(Some(target.clone()));
        }
    }
}

/// Create dragleave handler for a drop target
pub fn make_on_dragleave<S, T>(dnd: DndSignals<S, T>, target: S) -> impl Fn(DragEvent) + Clone + 'static
where
    S: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |ev: DragEvent| {
        let current = ev.current_target().and_then(|t| t.dyn_into::<Node>().ok());
        let entered = ev.related_target().and_then(|t| t.dyn_into::<Node>().ok());
        let still_inside = match (current, entered) {
            (Some(current), Some(entered)) => current.contains(Some(&entered)),
            _ => false,
        };
        dnd.leave(&target, still_inside);
    }
}

/// Create dragend handler. Discards an abandoned session.
///
/// `dragend` fires after `drop`, so a dropped session is already gone.
pub fn make_on_dragend<S, T>(dnd: DndSignals<S, T>) -> impl Fn(DragEvent) + Copy + 'static
where
    S: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_ev: DragEvent| dnd.end_drag()
}

/// Create drop handler for a drop target
pub fn make_on_drop<S, T, F>(dnd: DndSignals<S, T>, target: S, on_drop: F) -> impl Fn(DragEvent) + Clone + 'static
where
    S: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(DropResolution<S, T>) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        on_drop(dnd.resolve_drop(target.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_starts_idle() {
        let tracker = DragTracker::<&str, u32>::new();
        assert!(!tracker.is_dragging());
        assert!(tracker.session().is_none());
    }

    #[test]
    fn test_start_overwrites_previous_session() {
        let mut tracker = DragTracker::new();
        assert!(tracker.start("todo", 1).is_none());

        let replaced = tracker.start("done", 2);
        assert_eq!(replaced, Some(DragSession { source: "todo", payload: 1 }));
        assert_eq!(tracker.session(), Some(&DragSession { source: "done", payload: 2 }));
    }

    #[test]
    fn test_drop_without_session() {
        let mut tracker = DragTracker::<&str, u32>::new();
        assert_eq!(tracker.resolve_drop("done"), DropResolution::NoSession);
    }

    #[test]
    fn test_drop_on_source_clears_session() {
        let mut tracker = DragTracker::new();
        tracker.start("todo", 7);

        let resolution = tracker.resolve_drop("todo");
        assert_eq!(
            resolution,
            DropResolution::SameSource(DragSession { source: "todo", payload: 7 })
        );
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_drop_on_other_target_transfers() {
        let mut tracker = DragTracker::new();
        tracker.start("todo", 7);

        let resolution = tracker.resolve_drop("done");
        assert_eq!(
            resolution,
            DropResolution::Transfer {
                session: DragSession { source: "todo", payload: 7 },
                target: "done",
            }
        );
        assert!(!tracker.is_dragging());
        // A second drop never sees the consumed session
        assert_eq!(tracker.resolve_drop("done"), DropResolution::NoSession);
    }

    #[test]
    fn test_leave_into_child_keeps_hover() {
        let dnd = create_dnd_signals::<&'static str, u32>();
        dnd.hover_target.set(Some("done"));

        dnd.leave(&"done", true);
        assert!(dnd.is_hovering(&"done"));

        dnd.leave(&"todo", false);
        assert!(dnd.is_hovering(&"done"));

        dnd.leave(&"done", false);
        assert!(dnd.hover_target.get_untracked().is_none());
    }

    #[test]
    fn test_signals_resolve_and_end() {
        let dnd = create_dnd_signals::<&'static str, u32>();
        dnd.start("todo", 3);
        dnd.hover_target.set(Some("done"));
        assert!(dnd.is_hovering(&"done"));

        dnd.end_drag();
        assert!(!dnd.tracker.get_untracked().is_dragging());
        assert!(dnd.hover_target.get_untracked().is_none());

        dnd.start("todo", 3);
        assert!(matches!(dnd.resolve_drop("done"), DropResolution::Transfer { .. }));
        assert!(!dnd.tracker.get_untracked().is_dragging());
    }
}
