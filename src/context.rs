//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::controller::BoardController;
use crate::gateway::HttpTaskGateway;

pub type AppController = BoardController<HttpTaskGateway>;

/// App-wide handle provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The controller holds an `Rc`, so it lives in local storage
    controller: StoredValue<AppController, LocalStorage>,
}

impl AppContext {
    pub fn new(controller: AppController) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
        }
    }

    /// Owned handle for use inside async tasks
    pub fn controller(&self) -> AppController {
        self.controller.get_value()
    }

    pub fn with_controller<R>(&self, f: impl FnOnce(&AppController) -> R) -> R {
        self.controller.with_value(f)
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
