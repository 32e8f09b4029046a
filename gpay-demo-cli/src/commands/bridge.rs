//! Bridge command - decode a message posted by the payment page

use anyhow::Result;
use gpay_lib::{decode_bridge_json, BridgeEvent, DeepLinkConfig, Url};

use crate::ui;

/// Decode `body_json` as received on `channel` and, for `makePayment`,
/// build the companion app deep link.
pub fn decode(body_json: &str, channel: &str) -> gpay_lib::Result<(BridgeEvent, Option<Url>)> {
    let event = decode_bridge_json(gpay_lib::config::DEFAULT_CHANNEL_NAME, channel, body_json)?;
    let link = match &event {
        BridgeEvent::ConfirmPayment => None,
        BridgeEvent::MakePayment(payment) => Some(payment.deep_link(&DeepLinkConfig::default())?),
    };
    Ok((event, link))
}

pub fn run(body_json: &str, channel: &str) -> Result<()> {
    match decode(body_json, channel) {
        Ok((event, link)) => {
            ui::success(&format!("Decoded `{}`", event.name()));
            match (&event, link) {
                (BridgeEvent::MakePayment(payment), Some(link)) => {
                    ui::json(&serde_json::to_value(payment)?);
                    ui::key_value("Deep link", link.as_str());
                }
                _ => ui::info("The host would be asked to check the payment status"),
            }
            Ok(())
        }
        Err(err) => {
            ui::error(&format!("{} (code {})", err, err.code() as i32));
            ui::info("The portal would drop this message without any callback");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_confirm_payment() {
        let (event, link) = decode(r#"{"event":"confirmPayment"}"#, "iosListener").unwrap();
        assert_eq!(event, BridgeEvent::ConfirmPayment);
        assert!(link.is_none());
    }

    #[test]
    fn test_decode_make_payment() {
        let (_, link) = decode(
            r#"{"event":"makePayment","amount":100,"requestId":"r1","requestTimestamp":"t1","requesterUsername":"u1","appName":"a1"}"#,
            "iosListener",
        )
        .unwrap();
        assert_eq!(
            link.unwrap().as_str(),
            "lggpay://pay-request?amount=100&request_id=r1&request_time=t1&requester_username=u1&app_name=a1"
        );
    }

    #[test]
    fn test_decode_rejects_wrong_channel() {
        let err = decode(r#"{"event":"confirmPayment"}"#, "androidListener").unwrap_err();
        assert!(matches!(err, gpay_lib::GPayError::UnknownChannel(_)));
    }

    #[test]
    fn test_run_incomplete_payment_fails() {
        assert!(run(r#"{"event":"makePayment","amount":100}"#, "iosListener").is_err());
    }
}
