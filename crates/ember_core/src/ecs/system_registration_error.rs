use crate::ecs::SystemHandle;
use thiserror::Error;

/// Errors that can occur while registering a system with the scheduler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SystemRegistrationError {
    #[error("system '{name}' is already registered as {existing}")]
    DuplicateName {
        name: String,
        existing: SystemHandle,
    },
}
