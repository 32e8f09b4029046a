//! Error types for GPay portal operations.
//!
//! Every failure the portal can observe is modelled here, including the ones
//! that are never shown to the user (failed navigation, malformed bridge
//! messages). Those are reported to the host through
//! [`PortalHost::on_error`](crate::host::PortalHost::on_error).

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GPayErrorCode {
    /// Base endpoint or deep link could not be built
    InvalidUrl = 1000,
    /// Page failed to load
    NavigationFailed = 2000,
    /// Bridge message missing required fields
    MalformedBridgeMessage = 3000,
    /// Bridge message arrived on a channel the portal does not listen to
    UnknownChannel = 3001,
    /// Bridge message carried an event the portal does not handle
    UnsupportedEvent = 3002,
    /// Portal was already presented
    AlreadyPresented = 4000,
    /// Portal was already closed
    PortalClosed = 4001,
    /// Web surface rejected an operation
    Surface = 5000,
    /// Serialization error
    Serialization = 6000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for GPay portal operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GPayError {
    /// The URL could not be parsed or assembled.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending input
        url: String,
        /// Parser message
        reason: String,
    },

    /// The hosted page failed to load.
    #[error("navigation failed: {reason}")]
    NavigationFailed {
        /// URL being loaded, when known
        url: Option<String>,
        /// Error reported by the rendering engine
        reason: String,
    },

    /// A bridge message was not a well-formed event.
    #[error("malformed bridge message: {reason}")]
    MalformedBridgeMessage {
        /// What was wrong with the payload
        reason: String,
    },

    /// A bridge message arrived on an unexpected channel.
    #[error("unknown bridge channel: {0}")]
    UnknownChannel(String),

    /// A bridge message named an event the portal does not handle.
    #[error("unsupported bridge event: {0}")]
    UnsupportedEvent(String),

    /// `present` was called on a portal that is already on screen.
    #[error("portal is already presented")]
    AlreadyPresented,

    /// The portal was closed and accepts no further input.
    #[error("portal is closed")]
    PortalClosed,

    /// The web surface failed an operation.
    #[error("web surface error: {0}")]
    Surface(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal/unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GPayError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> GPayErrorCode {
        match self {
            Self::InvalidUrl { .. } => GPayErrorCode::InvalidUrl,
            Self::NavigationFailed { .. } => GPayErrorCode::NavigationFailed,
            Self::MalformedBridgeMessage { .. } => GPayErrorCode::MalformedBridgeMessage,
            Self::UnknownChannel(_) => GPayErrorCode::UnknownChannel,
            Self::UnsupportedEvent(_) => GPayErrorCode::UnsupportedEvent,
            Self::AlreadyPresented => GPayErrorCode::AlreadyPresented,
            Self::PortalClosed => GPayErrorCode::PortalClosed,
            Self::Surface(_) => GPayErrorCode::Surface,
            Self::Serialization(_) => GPayErrorCode::Serialization,
            Self::Internal(_) => GPayErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true for errors caused by input from the hosted page.
    pub fn is_bridge_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedBridgeMessage { .. }
                | Self::UnknownChannel(_)
                | Self::UnsupportedEvent(_)
        )
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a malformed bridge message error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBridgeMessage {
            reason: reason.into(),
        }
    }

    /// Create a missing-field bridge error.
    pub fn missing_field(field: &str) -> Self {
        Self::malformed(format!("missing field `{field}`"))
    }
}

impl From<serde_json::Error> for GPayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
