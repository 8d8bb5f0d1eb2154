pub mod screen;

pub use screen::{Notification, ServerTimestamp};
