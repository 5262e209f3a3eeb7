//! Error taxonomy for the command cycle.
//!
//! Action faults never abort a cycle; they are reported through state
//! markers and queued wire messages. Only version negotiation failures are
//! fatal, and only to the offending connection.

use thiserror::Error;

use crate::play_mode::PlayMode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Malformed command text. Reported to the sender, no state change.
    #[error("illegal command form")]
    Protocol,

    /// Command not allowed in the current play mode.
    #[error("command not permitted in play mode {mode:?}")]
    RuleViolation { mode: PlayMode },

    /// Physically disallowed action. State change is limited to a fault
    /// marker, no force is applied.
    #[error("action fault: {0}")]
    ActionFault(&'static str),

    /// No serializer/sender pipeline exists for the negotiated version.
    /// Fatal to the agent's connection.
    #[error("no serializer available for protocol version {version}")]
    Configuration { version: f64 },
}

pub type Result<T> = std::result::Result<T, CommandError>;
