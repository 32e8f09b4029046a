//! GPay portal library.
//!
//! Core of the GPay mobile SDK. It displays the hosted GPay payment page for a
//! merchant's payment request and hands the payment over to the GPay app.
//! The crate owns no UI: the web view, its modal container and app launching
//! are injected by the integrating app through trait-based dependency
//! injection ([`PortalHost`], [`WebSurface`]).
//!
//! # Features
//!
//! - **URL Composer**: builds the payment page URL from a [`PaymentRequest`]
//! - **Script Bridge**: decodes `confirmPayment` / `makePayment` messages
//!   posted by the page into [`BridgeEvent`]s
//! - **Deep Links**: builds the `lggpay://pay-request` hand-off URL
//! - **Portal Lifecycle**: navigation/busy state, foreground re-checks and
//!   exactly-once close notification ([`GPayPortal`])
//!
//! # Example
//!
//! ```
//! use gpay_lib::{decode_bridge_json, BridgeEvent, DeepLinkConfig};
//!
//! let event = decode_bridge_json(
//!     "iosListener",
//!     "iosListener",
//!     r#"{"event":"makePayment","amount":100,"requestId":"r1",
//!         "requestTimestamp":"t1","requesterUsername":"u1","appName":"a1"}"#,
//! )
//! .unwrap();
//!
//! if let BridgeEvent::MakePayment(payment) = event {
//!     let link = payment.deep_link(&DeepLinkConfig::default()).unwrap();
//!     assert!(link.as_str().starts_with("lggpay://pay-request?amount=100"));
//! }
//! ```

pub mod bridge;
pub mod composer;
pub mod config;
pub mod deep_link;
pub mod errors;
pub mod host;
pub mod navigation;
pub mod portal;
pub mod prelude;
pub mod request;

/// Test utilities for portal testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use bridge::{decode_bridge_json, decode_bridge_message, BridgeEvent, MakePayment};
pub use composer::{compose_portal_url, portal_url};
pub use config::{DeepLinkConfig, PortalConfig, SdkEnvironment};
pub use deep_link::build_deep_link;
pub use errors::{GPayError, GPayErrorCode};
pub use host::{PortalContext, PortalHost, WebSurface};
pub use navigation::{NavigationEvent, NavigationState, NavigationTracker};
pub use portal::{GPayPortal, PortalPhase, INVALID_URL_TEXT};
pub use request::{format_amount, PaymentRequest};

/// Re-exported so hosts can name the URL type used throughout the API.
pub use url::Url;

/// Common result alias for GPay operations.
pub type Result<T> = std::result::Result<T, GPayError>;
