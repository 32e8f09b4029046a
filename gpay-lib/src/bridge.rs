//! Script bridge messages posted by the hosted payment page.
//!
//! The page calls `window.webkit.messageHandlers.<channel>.postMessage(body)`
//! where `body` is an object carrying a string `event`:
//!
//! ```text
//! { "event": "confirmPayment" }
//! { "event": "makePayment", "amount": 100, "requestId": "r1",
//!   "requestTimestamp": "t1", "requesterUsername": "u1", "appName": "a1" }
//! ```
//!
//! Decoding is strict: anything that is not one of these two shapes is
//! rejected with an error instead of being acted upon.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::DeepLinkConfig;
use crate::deep_link::build_deep_link;
use crate::{GPayError, Result};

/// Page asks the host to re-check the payment status.
pub const EVENT_CONFIRM_PAYMENT: &str = "confirmPayment";
/// Page asks the host to hand the payment over to the GPay app.
pub const EVENT_MAKE_PAYMENT: &str = "makePayment";

const FIELD_EVENT: &str = "event";
const FIELD_AMOUNT: &str = "amount";
const FIELD_REQUEST_ID: &str = "requestId";
const FIELD_REQUEST_TIMESTAMP: &str = "requestTimestamp";
const FIELD_REQUESTER_USERNAME: &str = "requesterUsername";
const FIELD_APP_NAME: &str = "appName";

/// A decoded bridge event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeEvent {
    /// `confirmPayment`: no payload.
    ConfirmPayment,
    /// `makePayment`: hand off to the companion app.
    MakePayment(MakePayment),
}

impl BridgeEvent {
    /// The event name as sent by the page.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfirmPayment => EVENT_CONFIRM_PAYMENT,
            Self::MakePayment(_) => EVENT_MAKE_PAYMENT,
        }
    }

    /// Decode an event from a message body.
    pub fn from_value(body: &Value) -> Result<Self> {
        let body = body
            .as_object()
            .ok_or_else(|| GPayError::malformed("body is not an object"))?;

        let event = match body.get(FIELD_EVENT) {
            Some(Value::String(event)) => event.as_str(),
            Some(_) => return Err(GPayError::malformed("`event` is not a string")),
            None => return Err(GPayError::missing_field(FIELD_EVENT)),
        };

        match event {
            EVENT_CONFIRM_PAYMENT => Ok(Self::ConfirmPayment),
            EVENT_MAKE_PAYMENT => MakePayment::from_body(body).map(Self::MakePayment),
            other => Err(GPayError::UnsupportedEvent(other.to_string())),
        }
    }
}

/// Payload of a `makePayment` event.
///
/// Values keep the page's rendering: strings verbatim, numbers as JSON
/// prints them (`100`, `12.5`), booleans as `true`/`false`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MakePayment {
    /// Amount to pay.
    pub amount: String,
    /// Request ID.
    pub request_id: String,
    /// Request timestamp.
    pub request_time: String,
    /// Requester's username.
    pub requester_username: String,
    /// Name (URL scheme) of the app that opened the portal.
    pub app_name: String,
}

impl MakePayment {
    fn from_body(body: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            amount: field_string(body, FIELD_AMOUNT)?,
            request_id: field_string(body, FIELD_REQUEST_ID)?,
            request_time: field_string(body, FIELD_REQUEST_TIMESTAMP)?,
            requester_username: field_string(body, FIELD_REQUESTER_USERNAME)?,
            app_name: field_string(body, FIELD_APP_NAME)?,
        })
    }

    /// Build the companion app deep link for this payment.
    pub fn deep_link(&self, config: &DeepLinkConfig) -> Result<Url> {
        build_deep_link(self, config)
    }
}

/// Render a required payload field as a string.
fn field_string(body: &Map<String, Value>, field: &str) -> Result<String> {
    match body.get(field) {
        None | Some(Value::Null) => Err(GPayError::missing_field(field)),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(Value::Bool(value)) => Ok(value.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => Err(GPayError::malformed(format!(
            "field `{field}` is not a scalar"
        ))),
    }
}

/// Decode a message received on `channel`.
///
/// # Errors
///
/// - [`GPayError::UnknownChannel`] if `channel` is not `expected_channel`
/// - [`GPayError::MalformedBridgeMessage`] for a bad body or missing field
/// - [`GPayError::UnsupportedEvent`] for an unknown `event`
pub fn decode_bridge_message(
    expected_channel: &str,
    channel: &str,
    body: &Value,
) -> Result<BridgeEvent> {
    if channel != expected_channel {
        return Err(GPayError::UnknownChannel(channel.to_string()));
    }
    BridgeEvent::from_value(body)
}

/// Decode a message whose body arrives as JSON text.
pub fn decode_bridge_json(
    expected_channel: &str,
    channel: &str,
    body_json: &str,
) -> Result<BridgeEvent> {
    if channel != expected_channel {
        return Err(GPayError::UnknownChannel(channel.to_string()));
    }
    let body: Value = serde_json::from_str(body_json)
        .map_err(|e| GPayError::malformed(format!("invalid JSON: {e}")))?;
    BridgeEvent::from_value(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CHANNEL: &str = "iosListener";

    #[test]
    fn test_decode_confirm_payment() {
        let event = decode_bridge_message(CHANNEL, CHANNEL, &json!({"event": "confirmPayment"}));
        assert_eq!(event, Ok(BridgeEvent::ConfirmPayment));
    }

    #[test]
    fn test_decode_make_payment() {
        let body = json!({
            "event": "makePayment",
            "amount": 100,
            "requestId": "r1",
            "requestTimestamp": "t1",
            "requesterUsername": "u1",
            "appName": "a1"
        });
        let event = BridgeEvent::from_value(&body).unwrap();
        assert_eq!(event.name(), "makePayment");
        assert_eq!(
            event,
            BridgeEvent::MakePayment(MakePayment {
                amount: "100".into(),
                request_id: "r1".into(),
                request_time: "t1".into(),
                requester_username: "u1".into(),
                app_name: "a1".into(),
            })
        );
    }

    #[test]
    fn test_numbers_keep_page_rendering() {
        let body = json!({
            "event": "makePayment",
            "amount": 12.5,
            "requestId": 7,
            "requestTimestamp": 1718186400,
            "requesterUsername": "u1",
            "appName": true
        });
        let BridgeEvent::MakePayment(payment) = BridgeEvent::from_value(&body).unwrap() else {
            panic!("expected makePayment");
        };
        assert_eq!(payment.amount, "12.5");
        assert_eq!(payment.request_id, "7");
        assert_eq!(payment.request_time, "1718186400");
        assert_eq!(payment.app_name, "true");
    }

    #[test]
    fn test_make_payment_missing_fields() {
        let err = BridgeEvent::from_value(&json!({"event": "makePayment", "amount": 100}))
            .unwrap_err();
        assert_eq!(err, GPayError::missing_field("requestId"));

        let err = BridgeEvent::from_value(&json!({
            "event": "makePayment",
            "amount": null,
            "requestId": "r1",
            "requestTimestamp": "t1",
            "requesterUsername": "u1",
            "appName": "a1"
        }))
        .unwrap_err();
        assert_eq!(err, GPayError::missing_field("amount"));
    }

    #[test]
    fn test_make_payment_rejects_nested_values() {
        let err = BridgeEvent::from_value(&json!({
            "event": "makePayment",
            "amount": {"value": 100},
            "requestId": "r1",
            "requestTimestamp": "t1",
            "requesterUsername": "u1",
            "appName": "a1"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("not a scalar"));
    }

    #[test]
    fn test_decode_rejects_bad_event() {
        assert_eq!(
            BridgeEvent::from_value(&json!({"amount": 1})),
            Err(GPayError::missing_field("event"))
        );
        assert!(matches!(
            BridgeEvent::from_value(&json!({"event": 3})),
            Err(GPayError::MalformedBridgeMessage { .. })
        ));
        assert!(matches!(
            BridgeEvent::from_value(&json!(["confirmPayment"])),
            Err(GPayError::MalformedBridgeMessage { .. })
        ));
        assert_eq!(
            BridgeEvent::from_value(&json!({"event": "cancelPayment"})),
            Err(GPayError::UnsupportedEvent("cancelPayment".into()))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_channel() {
        let err = decode_bridge_message(CHANNEL, "androidListener", &json!({"event": "confirmPayment"}))
            .unwrap_err();
        assert_eq!(err, GPayError::UnknownChannel("androidListener".into()));
    }

    #[test]
    fn test_decode_json() {
        assert_eq!(
            decode_bridge_json(CHANNEL, CHANNEL, r#"{"event":"confirmPayment"}"#),
            Ok(BridgeEvent::ConfirmPayment)
        );
        assert!(matches!(
            decode_bridge_json(CHANNEL, CHANNEL, "{event"),
            Err(GPayError::MalformedBridgeMessage { .. })
        ));
    }
}
