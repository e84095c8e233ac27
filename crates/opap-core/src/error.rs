//! Error types for the OPAP client
//!
//! Every failure is returned to the immediate caller with its context attached.
//! Errors raised after a response arrived carry that response's metadata,
//! so callers can still inspect the status code and headers.

use reqwest::{Method, StatusCode};
use thiserror::Error;

use crate::client::Response;

/// Error type for OPAP client operations
#[derive(Error, Debug)]
pub enum OpapError {
    /// The relative path or the resolved request could not be constructed.
    /// No network attempt was made.
    #[error("Malformed URL {url:?}: {reason}")]
    MalformedUrl {
        /// The offending reference, as supplied by the caller
        url: String,
        /// What made it unusable
        reason: String,
    },

    /// A string did not name a known game
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    /// Network-level failure before any response was received
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200..=299
    #[error("{method} {url}: {} {body}", .response.status.as_u16())]
    HttpStatus {
        /// Method of the failed request
        method: Method,
        /// Requested URL
        url: reqwest::Url,
        /// Full response body
        body: String,
        /// Metadata of the response, including the status code
        response: Response,
    },

    /// The response body could not be read after the status line arrived
    #[error("Reading response body: {source}")]
    BodyRead {
        /// Underlying transport error
        source: reqwest::Error,
        /// Metadata of the response
        response: Response,
    },

    /// A successful response whose body is not the expected JSON shape
    #[error("JSON decoding: {source} ({body})")]
    Decode {
        /// Underlying JSON error
        source: serde_json::Error,
        /// Raw body text
        body: String,
        /// Metadata of the response
        response: Response,
    },
}

impl OpapError {
    /// The response that accompanied this error, if one was received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            OpapError::HttpStatus { response, .. }
            | OpapError::BodyRead { response, .. }
            | OpapError::Decode { response, .. } => Some(response),
            OpapError::MalformedUrl { .. }
            | OpapError::UnknownGame(_)
            | OpapError::Transport(_) => None,
        }
    }

    /// Status code of the accompanying response, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }
}

/// Result type alias for OPAP client operations
pub type Result<T> = std::result::Result<T, OpapError>;
