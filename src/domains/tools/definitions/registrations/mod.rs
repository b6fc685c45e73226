//! Registration management tools.

mod list;
mod register;
mod unregister;

pub use list::{ListRegistrationsParams, ListRegistrationsTool};
pub use register::{RegisterAttendeeParams, RegisterAttendeeTool};
pub use unregister::{UnregisterAttendeeParams, UnregisterAttendeeTool};
