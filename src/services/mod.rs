pub mod debounce;
pub mod event_source;
pub mod launcher;
pub mod screen_listener;

pub use event_source::create_event_source;
pub use launcher::create_launcher;
pub use screen_listener::ScreenChangeListener;
