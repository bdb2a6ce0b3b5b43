//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the state machine
//! trait that form the vocabulary of the clip pack domain.

mod command;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use command::RequestMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ChatId, ClipId, CorrelationId, MessageId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
