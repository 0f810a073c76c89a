use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;

/// Set when SIGINT, SIGTERM or SIGHUP arrives. The game loop polls it each tick.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route termination signals to a new flag instead of the default action,
    /// which would kill the process with the terminal still in raw mode.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Interrupt::new();
        let handler = interrupt.clone();
        ctrlc::set_handler(move || {
            warn!("Termination signal received");
            handler.raise();
        })?;
        Ok(interrupt)
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
