// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the backend boundary.

use tablehold::CoreError;

/// A failure talking to an availability or hold backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, as text.
        body: String,
    },
    /// The response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Errors surfaced by the async booking driver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The guest command or hold request was not valid for the current state.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// The hold could not be submitted.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    /// The server refused the hold; the message is shown to the guest as is.
    #[error("hold rejected: {message}")]
    HoldRejected {
        /// The server's explanation.
        message: String,
    },
}
