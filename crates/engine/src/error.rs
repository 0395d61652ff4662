//! Typed errors for the engine operations.

use lar_api::ApiError;
use thiserror::Error;

/// Error raised by the interactive operations.
///
/// Propagation policy: nothing is retried or locally recovered except a user
/// declining to proceed (dismissing a picker or prompt), which surfaces as a
/// normal `Ok(None)`/early return rather than an error. Everything else is
/// reported to the user at the point of detection and then re-raised; the
/// top-level command handler logs it once without repeating the message.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Master key retrieval failed outright.
    #[error("master key retrieval failed")]
    Authorization(#[source] ApiError),

    /// The admin key endpoint answered 200 but carried no key value.
    #[error("master key retrieval failed: the response carried no key value")]
    MissingKeyValue,

    /// An expected entity was absent: empty workflow or run list, a callback
    /// response without a URL, or a callback with an unusable method.
    #[error("{0}")]
    NotFound(String),

    /// A management or callback call failed (non-200 status or transport).
    #[error(transparent)]
    Remote(#[from] ApiError),

    /// The user-supplied JSON body failed to parse.
    #[error("could not parse the supplied JSON body: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// The workflow's first trigger has a kind this tool cannot invoke.
    #[error("unsupported trigger kind '{kind}' on trigger '{trigger}' of workflow '{workflow}'")]
    UnsupportedTrigger {
        workflow: String,
        trigger: String,
        kind: String,
    },
}

impl EngineError {
    /// The remote system's structured error message, when this error wraps a
    /// failed call that carried one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote(api) | Self::Authorization(api) => api.remote_message(),
            _ => None,
        }
    }
}
