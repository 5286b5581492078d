#![allow(clippy::unwrap_used, clippy::expect_used)]

use common_utils::types::MinorUnit;
use masking::Secret;
use quickpay::{
    errors::GatewayError, settings::GatewaySettings, AuthorizeOrder, FlatMapping, PaymentOptions,
    QuickPay, RequestField, ResponseField,
};
use url::Url;

const AUTHORIZE_MD5CHECK: &str = "c9ad33e624aff881f3699d1714abdf0e";

fn gateway_settings(base_url: &str) -> GatewaySettings {
    GatewaySettings {
        merchant: "12345678".to_string(),
        secret: Secret::new("topsecret".to_string()),
        base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

fn bare_options() -> PaymentOptions {
    PaymentOptions {
        cardtypelock: String::new(),
        test_mode: String::new(),
        ..PaymentOptions::default()
    }
}

fn quickpay() -> QuickPay {
    QuickPay::new(gateway_settings(quickpay::consts::PAYMENT_WINDOW_URL), bare_options()).unwrap()
}

fn order() -> AuthorizeOrder {
    AuthorizeOrder {
        order_number: "ORDER1".to_string(),
        amount: MinorUnit::new(100),
        callback_url: Url::parse("https://example.com/cb").unwrap(),
        cancel_url: Url::parse("https://example.com/cancel").unwrap(),
        continue_url: Url::parse("https://example.com/ok").unwrap(),
    }
}

const CALLBACK_BODY: &[u8] = b"msgtype=authorize&ordernumber=ORDER1&amount=100&currency=DKK\
&time=240131120000&state=1&qpstat=000&qpstatmsg=OK&chstat=000&chstatmsg=OK&merchant=Shop\
&merchantemail=shop%40example.com&transaction=1234567&cardtype=visa-dk\
&cardnumber=XXXX+XXXX+XXXX+1234&splitpayment=0&md5check=0c12018b886a29f451a374944dc2915d";

#[test]
fn authorize_request_carries_order_and_merchant() {
    let request = quickpay().build_authorize_request(&order()).unwrap();

    assert_eq!(request.get(RequestField::Merchant), Some("12345678"));
    assert_eq!(request.get(RequestField::Ordernumber), Some("ORDER1"));
    assert_eq!(request.get(RequestField::Amount), Some("100"));
    assert_eq!(request.get(RequestField::Msgtype), Some("authorize"));
    assert_eq!(request.get(RequestField::Splitpayment), Some("0"));
    assert_eq!(request.get(RequestField::Callbackurl), Some("https://example.com/cb"));
    assert_eq!(request.md5check().unwrap(), AUTHORIZE_MD5CHECK);
}

#[test]
fn authorize_request_rejects_invalid_orders() {
    let mut order = order();
    order.order_number = "#1".to_string();

    let error = quickpay().build_authorize_request(&order).unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::InvalidOrder));

    let mut order = self::order();
    order.amount = MinorUnit::new(-100);

    let error = quickpay().build_authorize_request(&order).unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::InvalidOrder));
}

#[test]
fn major_unit_amounts_are_rounded_half_to_even() {
    let template = order();
    let order_for = |amount: f64| {
        AuthorizeOrder::from_major_unit(
            "ORDER1",
            amount,
            template.callback_url.clone(),
            template.cancel_url.clone(),
            template.continue_url.clone(),
        )
    };

    for (amount, expected) in [(12.345, "1234"), (12.355, "1236"), (1.0, "100"), (0.5, "50")] {
        let request = quickpay()
            .build_authorize_request(&order_for(amount).unwrap())
            .unwrap();
        assert_eq!(request.get(RequestField::Amount), Some(expected), "{amount}");
    }

    let error = order_for(f64::NAN).unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::InvalidOrder));
}

#[test]
fn authorize_http_request_is_a_form_post_without_the_secret() {
    let request = quickpay().build_authorize_http_request(&order()).unwrap();

    assert_eq!(request.method(), &reqwest::Method::POST);
    assert_eq!(request.url().as_str(), "https://secure.quickpay.dk/form/");
    assert_eq!(
        request
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/x-www-form-urlencoded")
    );

    let body = request
        .body()
        .and_then(|body| body.as_bytes())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap();
    assert!(body.starts_with("protocol=4&msgtype=authorize&merchant=12345678"));
    assert!(body.contains("continueurl=https%3A%2F%2Fexample.com%2Fok"));
    assert!(body.ends_with(&format!("splitpayment=0&md5check={AUTHORIZE_MD5CHECK}")));
    assert!(!body.contains("topsecret"));
    assert!(!body.contains("secret="));
}

#[tokio::test]
async fn authorize_reports_unreachable_payment_window() {
    let quickpay = QuickPay::new(gateway_settings("http://127.0.0.1:9/form/"), bare_options())
        .unwrap();

    let error = quickpay.authorize(&order()).await.unwrap_err();

    assert!(matches!(
        error.current_context(),
        GatewayError::RequestSendingFailed
    ));
}

#[test]
fn authentic_callback_is_accepted() {
    let response = quickpay()
        .callback(FlatMapping::from_form_urlencoded(CALLBACK_BODY))
        .unwrap();

    assert_eq!(response.get(ResponseField::Merchantemail), Some("shop@example.com"));
    assert_eq!(response.get(ResponseField::State), Some("1"));
}

#[test]
fn uppercase_md5check_is_accepted() {
    let mut fields = FlatMapping::from_form_urlencoded(CALLBACK_BODY);
    fields.insert("MD5CHECK", "0C12018B886A29F451A374944DC2915D");
    fields.insert("foo", "bar");

    assert!(quickpay().callback(fields).is_ok());
}

#[test]
fn tampered_callback_is_rejected() {
    let mut fields = FlatMapping::from_form_urlencoded(CALLBACK_BODY);
    fields.insert("amount", "1");

    let error = quickpay().callback(fields).unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::CallbackRejected));
}

#[test]
fn callback_without_md5check_is_rejected() {
    let fields: FlatMapping = FlatMapping::from_form_urlencoded(CALLBACK_BODY)
        .into_iter()
        .filter(|(name, _)| name != "md5check")
        .collect();

    let error = quickpay().callback(fields).unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::CallbackRejected));
}

#[test]
fn callback_signed_with_another_secret_is_rejected() {
    let mut settings = gateway_settings(quickpay::consts::PAYMENT_WINDOW_URL);
    settings.secret = Secret::new("othersecret".to_string());
    let quickpay = QuickPay::new(settings, bare_options()).unwrap();

    let error = quickpay
        .callback(FlatMapping::from_form_urlencoded(CALLBACK_BODY))
        .unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::CallbackRejected));
}

#[test]
fn malformed_callback_is_invalid() {
    let mut fields = FlatMapping::from_form_urlencoded(CALLBACK_BODY);
    fields.insert("currency", "DK");

    let error = quickpay().callback(fields).unwrap_err();
    assert!(matches!(error.current_context(), GatewayError::InvalidCallback));
}
