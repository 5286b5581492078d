//! Gateway-level defaults applied to every request parameter set.

use serde::Deserialize;

use crate::request::RequestField;

/// Defaults for the fields a merchant rarely changes between payments.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentOptions {
    /// Card types accepted by the payment window, comma separated
    pub cardtypelock: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// ISO 639-1 language of the payment window
    pub language: String,
    /// Protocol version
    pub protocol: String,
    /// `1` handles each transaction in test mode
    pub test_mode: String,
    /// `1` captures transactions automatically
    pub auto_capture: String,
    /// `1` adds the acquirer fee to the amount
    pub auto_fee: String,
    /// `authorize` or `subscribe`
    pub msg_type: String,
    /// `1` enables split payments
    pub split_payment: String,
}

impl Default for PaymentOptions {
    fn default() -> Self {
        Self {
            cardtypelock: "dankort".to_string(),
            currency: "DKK".to_string(),
            language: "da".to_string(),
            protocol: "4".to_string(),
            test_mode: "1".to_string(),
            auto_capture: String::new(),
            auto_fee: String::new(),
            msg_type: "authorize".to_string(),
            split_payment: String::new(),
        }
    }
}

impl PaymentOptions {
    /// Request fields these options provide a default for, paired with the default value.
    pub fn request_defaults(&self) -> [(RequestField, &str); 9] {
        [
            (RequestField::Cardtypelock, self.cardtypelock.as_str()),
            (RequestField::Currency, self.currency.as_str()),
            (RequestField::Language, self.language.as_str()),
            (RequestField::Protocol, self.protocol.as_str()),
            (RequestField::Testmode, self.test_mode.as_str()),
            (RequestField::Autocapture, self.auto_capture.as_str()),
            (RequestField::Autofee, self.auto_fee.as_str()),
            (RequestField::Msgtype, self.msg_type.as_str()),
            (RequestField::Splitpayment, self.split_payment.as_str()),
        ]
    }
}
