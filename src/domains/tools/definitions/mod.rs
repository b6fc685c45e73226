//! Tool definitions module.
//!
//! Each tool is defined in its own file: events, registrations, then the
//! notification and upload helpers.

pub mod events;
pub mod notify;
pub mod registrations;
pub mod upload;

pub use events::{
    CreateEventTool, DeleteEventTool, GetEventTool, ListEventsTool, UpdateEventTool,
};
pub use notify::{SendNotificationParams, SendNotificationTool};
pub use registrations::{ListRegistrationsTool, RegisterAttendeeTool, UnregisterAttendeeTool};
pub use upload::{UploadImageParams, UploadImageTool};
