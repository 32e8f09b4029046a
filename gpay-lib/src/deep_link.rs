//! Companion app deep links.
//!
//! ```text
//! lggpay://pay-request?amount=<v>&request_id=<v>&request_time=<v>&requester_username=<v>&app_name=<v>
//! ```

use url::Url;

use crate::bridge::MakePayment;
use crate::composer::{
    encode_query, PARAM_AMOUNT, PARAM_APP_NAME, PARAM_REQUESTER_USERNAME, PARAM_REQUEST_ID,
    PARAM_REQUEST_TIME,
};
use crate::config::DeepLinkConfig;
use crate::{GPayError, Result};

/// Build the deep link that hands `payment` to the companion app.
///
/// # Examples
///
/// ```
/// use gpay_lib::{build_deep_link, DeepLinkConfig, MakePayment};
///
/// let payment = MakePayment {
///     amount: "100".into(),
///     request_id: "r1".into(),
///     request_time: "t1".into(),
///     requester_username: "u1".into(),
///     app_name: "a1".into(),
/// };
/// let link = build_deep_link(&payment, &DeepLinkConfig::default()).unwrap();
/// assert_eq!(
///     link.as_str(),
///     "lggpay://pay-request?amount=100&request_id=r1&request_time=t1&requester_username=u1&app_name=a1"
/// );
/// ```
pub fn build_deep_link(payment: &MakePayment, config: &DeepLinkConfig) -> Result<Url> {
    let target = format!("{}://{}", config.scheme, config.host);
    let mut url = Url::parse(&target).map_err(|err| GPayError::invalid_url(&target, err))?;

    let query = encode_query(&[
        (PARAM_AMOUNT, payment.amount.as_str()),
        (PARAM_REQUEST_ID, payment.request_id.as_str()),
        (PARAM_REQUEST_TIME, payment.request_time.as_str()),
        (PARAM_REQUESTER_USERNAME, payment.requester_username.as_str()),
        (PARAM_APP_NAME, payment.app_name.as_str()),
    ]);
    url.set_query(Some(&query));

    Ok(url)
}
