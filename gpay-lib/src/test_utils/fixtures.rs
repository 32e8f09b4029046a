//! Fixtures for portal tests.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{RecordingHost, RecordingSurface};
use crate::config::PortalConfig;
use crate::portal::GPayPortal;
use crate::request::PaymentRequest;

/// A request for 100 from `u1`, id `r1`, time `t1`.
pub fn sample_request() -> PaymentRequest {
    PaymentRequest::new(100.0, "u1", "r1", "t1")
}

/// `{"event":"confirmPayment"}`
pub fn confirm_payment_body() -> Value {
    json!({ "event": "confirmPayment" })
}

/// A complete `makePayment` body for `sample_request`, sent by app `a1`.
pub fn make_payment_body() -> Value {
    json!({
        "event": "makePayment",
        "amount": 100,
        "requestId": "r1",
        "requestTimestamp": "t1",
        "requesterUsername": "u1",
        "appName": "a1"
    })
}

/// A portal for `sample_request` wired to fresh recorders.
pub fn recording_portal(
    config: PortalConfig,
) -> (GPayPortal, Arc<RecordingHost>, Arc<RecordingSurface>) {
    let host = Arc::new(RecordingHost::new());
    let surface = Arc::new(RecordingSurface::new());
    let portal = GPayPortal::new(config, sample_request(), host.clone(), surface.clone());
    (portal, host, surface)
}
