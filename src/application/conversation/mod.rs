//! Conversation flows: slash commands, per-state steps and the dispatcher
//! that ties them to the conversation store and the messaging gateway.

mod commands;
mod dispatcher;
mod transducer;
mod transition;

pub use commands::Command;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use transducer::transduce;
pub use transition::{ReplyShape, Transition};
