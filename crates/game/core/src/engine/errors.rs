use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Invariant violations that stop the driver.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("schedule is empty while the player is alive")]
    EmptySchedule,

    #[error("schedule head {0} is not in the registry")]
    StaleScheduleEntry(EntityId),

    #[error("{entity} kept failing its turn after {attempts} attempts: {message}")]
    RetryLimitExceeded {
        entity: EntityId,
        attempts: u32,
        message: String,
    },
}

impl GameError for DriverError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            DriverError::EmptySchedule => "DRIVER_EMPTY_SCHEDULE",
            DriverError::StaleScheduleEntry(_) => "DRIVER_STALE_SCHEDULE_ENTRY",
            DriverError::RetryLimitExceeded { .. } => "DRIVER_RETRY_LIMIT_EXCEEDED",
        }
    }
}
