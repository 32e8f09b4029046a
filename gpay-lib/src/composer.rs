//! Payment page URL composition.
//!
//! The hosted page reads the payment request from its query string:
//!
//! ```text
//! <base>?amount=<v>&requester_username=<v>&request_id=<v>&request_time=<v>&app_name=<v>&platform=ios
//! ```

use url::Url;

use crate::config::PortalConfig;
use crate::request::PaymentRequest;
use crate::{GPayError, Result};

/// Query parameter carrying the amount.
pub const PARAM_AMOUNT: &str = "amount";
/// Query parameter carrying the requester's username.
pub const PARAM_REQUESTER_USERNAME: &str = "requester_username";
/// Query parameter carrying the request ID.
pub const PARAM_REQUEST_ID: &str = "request_id";
/// Query parameter carrying the request timestamp.
pub const PARAM_REQUEST_TIME: &str = "request_time";
/// Query parameter carrying the calling app's URL scheme.
pub const PARAM_APP_NAME: &str = "app_name";
/// Query parameter carrying the platform tag.
pub const PARAM_PLATFORM: &str = "platform";

/// Compose the payment page URL.
///
/// Any query already present on `base` is replaced. Values are
/// percent-encoded; nothing else is validated.
///
/// # Errors
///
/// Returns [`GPayError::InvalidUrl`] when `base` is not an absolute URL.
///
/// # Examples
///
/// ```
/// use gpay_lib::{compose_portal_url, PaymentRequest};
///
/// let request = PaymentRequest::new(100.0, "shop", "r1", "t1");
/// let url = compose_portal_url("https://gpay.ly/pay.jsp", &request, "myshop", "ios").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://gpay.ly/pay.jsp?amount=100.0&requester_username=shop&request_id=r1&request_time=t1&app_name=myshop&platform=ios"
/// );
///
/// assert!(compose_portal_url("not a url", &request, "", "ios").is_err());
/// ```
#[tracing::instrument(level = "debug", skip(request), fields(request_id = %request.request_id))]
pub fn compose_portal_url(
    base: &str,
    request: &PaymentRequest,
    app_name: &str,
    platform: &str,
) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|err| GPayError::invalid_url(base, err))?;

    let amount = request.amount_string();
    let query = encode_query(&[
        (PARAM_AMOUNT, amount.as_str()),
        (PARAM_REQUESTER_USERNAME, request.requester_username.as_str()),
        (PARAM_REQUEST_ID, request.request_id.as_str()),
        (PARAM_REQUEST_TIME, request.request_time.as_str()),
        (PARAM_APP_NAME, app_name),
        (PARAM_PLATFORM, platform),
    ]);
    url.set_query(Some(&query));

    Ok(url)
}

/// Compose the payment page URL for a portal configuration.
pub fn portal_url(config: &PortalConfig, request: &PaymentRequest) -> Result<Url> {
    compose_portal_url(
        config.base_url(),
        request,
        config.app_name(),
        &config.platform,
    )
}

/// Encode `key=value` pairs joined by `&`, keeping their order.
pub(crate) fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SdkEnvironment, PRODUCTION_URL};
    use std::collections::HashMap;

    fn request() -> PaymentRequest {
        PaymentRequest::new(250.5, "coffee shop", "req-42", "2025-06-12 10:00")
    }

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_compose_sets_all_parameters() {
        let url = compose_portal_url(PRODUCTION_URL, &request(), "myshop", "ios").unwrap();
        let params = params(&url);

        assert_eq!(params.len(), 6);
        assert_eq!(params["amount"], "250.5");
        assert_eq!(params["requester_username"], "coffee shop");
        assert_eq!(params["request_id"], "req-42");
        assert_eq!(params["request_time"], "2025-06-12 10:00");
        assert_eq!(params["app_name"], "myshop");
        assert_eq!(params["platform"], "ios");
    }

    #[test]
    fn test_compose_percent_encodes_values() {
        let url = compose_portal_url(PRODUCTION_URL, &request(), "", "ios").unwrap();
        assert!(url
            .as_str()
            .contains("requester_username=coffee%20shop&request_id=req-42"));
        assert!(url.as_str().contains("request_time=2025-06-12%2010%3A00"));
        assert!(url.as_str().contains("app_name=&platform=ios"));
    }

    #[test]
    fn test_compose_replaces_existing_query() {
        let url = compose_portal_url(
            "https://example.test/page.jsp?stale=1",
            &request(),
            "",
            "ios",
        )
        .unwrap();
        assert!(!params(&url).contains_key("stale"));
        assert_eq!(url.path(), "/page.jsp");
    }

    #[test]
    fn test_compose_rejects_unparsable_base() {
        let err = compose_portal_url("not a url", &request(), "", "ios").unwrap_err();
        assert!(matches!(err, GPayError::InvalidUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn test_portal_url_uses_config() {
        let config = PortalConfig::new(SdkEnvironment::Staging).with_app_scheme("shopapp");
        let url = portal_url(&config, &request()).unwrap();
        assert_eq!(url.host_str(), Some("192.168.0.111"));
        assert_eq!(url.port(), Some(8080));
        assert_eq!(params(&url)["app_name"], "shopapp");
    }

    #[test]
    fn test_encode_query_keeps_order() {
        assert_eq!(
            encode_query(&[("b", "2"), ("a", "x y")]),
            "b=2&a=x%20y"
        );
    }
}
