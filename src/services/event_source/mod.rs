//! EventSource service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for connecting to the
//! display server, subscribing to screen change notifications and handing them
//! over one at a time. They MUST NOT decide whether a notification is a new
//! physical event; deduplication is done exclusively by the screen listener.

mod dry_event_source;
mod r#trait;
mod x11_event_source;

pub use self::r#trait::{create_event_source, EventSource};
