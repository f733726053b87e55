//! Router error types
//!
//! None of these are fatal to the page: fetch failures degrade to the
//! `404` view and the worst case is a stale view area plus a log line.

use thiserror::Error;

/// Errors raised while fetching a view fragment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Fragment {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The request never produced a response
    #[error("Transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// The fragment URL cannot be mapped onto the source
    #[error("Invalid fragment location: {0}")]
    InvalidLocation(String),
}

impl FetchError {
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        FetchError::Status {
            url: url.into(),
            status,
        }
    }

    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

/// Errors surfaced by a navigation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Neither the requested fragment nor the `404` fragment could be loaded
    #[error("View {view} unavailable: {source}")]
    FragmentUnavailable {
        view: String,
        #[source]
        source: FetchError,
    },

    /// Initializers kept redirecting
    #[error("Redirect limit reached while navigating to {0}")]
    RedirectLoop(String),
}

/// Errors raised while building a view registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("View registry has no 404 entry")]
    MissingNotFound,

    #[error("View {0} has an empty fragment path")]
    EmptyPath(String),
}

/// Result type alias for fragment fetches
pub type FetchResult<T> = Result<T, FetchError>;
