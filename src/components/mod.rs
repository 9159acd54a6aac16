//! UI Components
//!
//! Leptos components for the board page.

mod board_column;
mod new_task_form;
mod notice_banner;
mod task_card;

pub use board_column::BoardColumn;
pub use new_task_form::NewTaskForm;
pub use notice_banner::NoticeBanner;
pub use task_card::TaskCard;
