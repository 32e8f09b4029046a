//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use gpay_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Request and config: `PaymentRequest`, `PortalConfig`, `SdkEnvironment`
//! - Error types: `GPayError`, `GPayErrorCode`, `Result`
//! - Host traits: `PortalHost`, `WebSurface`, `PortalContext`
//! - Portal: `GPayPortal`, `NavigationEvent`, `NavigationState`
//! - Bridge: `BridgeEvent`, `MakePayment`

// Request and configuration
pub use crate::config::{DeepLinkConfig, PortalConfig, SdkEnvironment};
pub use crate::request::PaymentRequest;

// Error handling
pub use crate::errors::{GPayError, GPayErrorCode};
pub use crate::Result;

// Host traits
pub use crate::host::{PortalContext, PortalHost, WebSurface};

// Portal
pub use crate::navigation::{NavigationEvent, NavigationState};
pub use crate::portal::{GPayPortal, PortalPhase};

// Bridge
pub use crate::bridge::{BridgeEvent, MakePayment};
pub use crate::Url;
