//! Event management tools.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::{CreateEventParams, CreateEventTool};
pub use delete::DeleteEventTool;
pub use get::{EventIdParams, GetEventTool};
pub use list::{ListEventsParams, ListEventsTool};
pub use update::{UpdateEventParams, UpdateEventTool};
