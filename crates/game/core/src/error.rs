//! Common error infrastructure for uno-core.
//!
//! Every rejection the engine produces is non-fatal: the acting client gets a
//! human-readable message and the room state is left untouched. This module
//! provides the classification shared by all error types so that the runtime
//! can log, count, and reply to them uniformly.
//!
//! Domain-specific errors (e.g. [`crate::engine::CommandError`]) live next to
//! the code that raises them and implement [`GameError`].

/// Category of a rejected intent.
///
/// The category decides nothing about recovery (every rejection is
/// recoverable); it exists for logging and for clients that want a
/// machine-readable reason next to the message.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The room is in the wrong phase (game not started, already started, full).
    PhasePrecondition,

    /// The sender lacks the privilege (not their turn, not the host).
    AuthorizationDenied,

    /// Referenced player or card does not exist.
    NotFound,

    /// The move breaks a game rule (illegal card, missing color, bad UNO call).
    RuleViolation,

    /// The inbound message could not be parsed.
    MalformedMessage,
}

/// Common trait for all errors surfaced to clients.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl; the Display
///   text is what the client sees
/// - Return a stable, upper-snake-case code from [`GameError::error_code`]
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
