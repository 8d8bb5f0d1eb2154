use crate::config::Config;
use crate::error::Result;
use crate::events::Notification;

/// Trait for sources of display server notifications
#[async_trait::async_trait]
pub trait EventSource: Send {
    /// Wait for the next notification; `None` means the connection is closed
    async fn next_event(&mut self) -> Result<Option<Notification>>;

    /// Flush and release the underlying connection
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Factory function to create an appropriate event source based on the dry_run flag
pub fn create_event_source(
    config: &Config,
    dry_run: bool,
) -> Result<Box<dyn EventSource + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_event_source::DryRunEventSource::new()))
    } else {
        Ok(Box::new(super::x11_event_source::X11EventSource::connect(
            config.display.name.as_deref(),
        )?))
    }
}
