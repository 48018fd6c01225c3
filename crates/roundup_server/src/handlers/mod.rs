pub mod returns_handlers;
pub mod service_handlers;
pub mod transaction_handlers;

pub use returns_handlers::*;
pub use service_handlers::*;
pub use transaction_handlers::*;

use std::sync::Arc;
use std::time::Instant;

use roundup_core::{Calendar, SavingsConfig};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SavingsConfig>,
    pub calendar: Calendar,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: SavingsConfig, calendar: Calendar) -> Self {
        Self {
            config: Arc::new(config),
            calendar,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState::new(SavingsConfig::default(), Calendar::utc())
}
