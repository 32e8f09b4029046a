//! Test utilities for GPay portals.
//!
//! Recording implementations of [`PortalHost`] and [`WebSurface`] that keep
//! every call for later assertions, plus fixtures for common requests and
//! bridge messages.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gpay_lib::test_utils::{recording_portal, make_payment_body};
//!
//! let (portal, host, surface) = recording_portal(PortalConfig::production());
//! portal.present()?;
//! portal.handle_script_message("iosListener", &make_payment_body())?;
//! assert_eq!(host.opened_urls().len(), 1);
//! ```

mod fixtures;
mod recording;

pub use fixtures::{confirm_payment_body, make_payment_body, recording_portal, sample_request};
pub use recording::{HostCall, RecordingHost, RecordingSurface, SurfaceCall};
