//! Calendar-based todo list.
//!
//! Todos live in memory, bucketed by day. The [`app`] module holds the whole
//! session state and its transitions; [`calendar`] and [`overview`] derive
//! the month grid and the upcoming list from it. [`ui`] is the terminal
//! front-end.

pub mod app;
pub mod calendar;
pub mod config;
pub mod date_key;
pub mod error;
pub mod logging;
pub mod overview;
pub mod todo;
pub mod todo_store;
pub mod ui;

pub use app::{Action, AppState, View, ViewState};
pub use date_key::DateKey;
pub use error::{Error, Result};
pub use todo::{Todo, TodoId};
pub use todo_store::TodoStore;
