use thiserror::Error;

/// User-facing validation failures. All are recoverable: the caller shows
/// the message inline and the underlying state stays untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task cannot be empty")]
    EmptyTask,
    #[error("Please enter a valid Spotify album or playlist link.")]
    InvalidSpotifyLink,
    #[error("No task ids left; remove a task with a very large id first")]
    IdsExhausted,
}
