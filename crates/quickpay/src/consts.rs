//! Commonly used constants

/// The QuickPay payment window the request form is posted to
pub const PAYMENT_WINDOW_URL: &str = "https://secure.quickpay.dk/form/";

/// Wire name of the integrity hash in both the request form and the callback
pub const MD5CHECK_FIELD_NAME: &str = "md5check";

/// Timeout applied to the request posted to the payment window, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Message type sent when authorizing a standard payment
pub const AUTHORIZE_MSG_TYPE: &str = "authorize";

/// Environment variable prefix for settings overrides, e.g. `QUICKPAY__QUICKPAY__SECRET`
pub const SETTINGS_ENV_PREFIX: &str = "QUICKPAY";
