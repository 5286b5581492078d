//! Parameters the payment window sends back on callback or redirect.

use std::{collections::BTreeMap, str::FromStr};

use masking::Secret;

use crate::{
    checksum,
    errors::ParameterError,
    validation::{self, FieldFormat, ParameterField},
};
use common_utils::errors::CustomResult;

/// Fields recognised in a callback. The merchant secret is deliberately absent: it is never
/// taken from the wire.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResponseField {
    /// Message type of the original request
    Msgtype,
    /// Order number given by the merchant in the request
    Ordernumber,
    /// Amount in the currency's smallest unit
    Amount,
    /// Three letter ISO 4217 currency code
    Currency,
    /// Time the message was handled, `YYMMDDHHMMSS`
    Time,
    /// Current state of the transaction
    State,
    /// QuickPay status code
    Qpstat,
    /// QuickPay status message
    Qpstatmsg,
    /// Clearing house status code
    Chstat,
    /// Clearing house status message
    Chstatmsg,
    /// Merchant name
    Merchant,
    /// Merchant email / username
    Merchantemail,
    /// Id assigned to the transaction
    Transaction,
    /// Card type used to authorize the transaction
    Cardtype,
    /// Truncated card number, e.g. `XXXX XXXX XXXX 1234`
    Cardnumber,
    /// Card expiry for subscriptions, `yymm`
    Cardexpire,
    /// Split payment flag
    Splitpayment,
    /// Fraud probability
    Fraudprobability,
    /// Fraud remarks
    Fraudremarks,
    /// Fraud report
    Fraudreport,
    /// Fee calculated when autofee was requested
    Fee,
    /// The hash computed by the gateway
    Md5check,
}

impl ParameterField for ResponseField {
    fn field_name(self) -> &'static str {
        self.into()
    }

    fn format(self) -> FieldFormat {
        match self {
            Self::Ordernumber => FieldFormat::OrderNumber,
            Self::Amount => FieldFormat::ResponseAmount,
            Self::Currency => FieldFormat::Currency,
            Self::Time => FieldFormat::Time,
            Self::State => FieldFormat::State,
            Self::Qpstat | Self::Chstat => FieldFormat::StatusCode,
            Self::Qpstatmsg | Self::Chstatmsg => FieldFormat::StatusMessage,
            Self::Merchant => FieldFormat::MerchantName,
            Self::Merchantemail => FieldFormat::MerchantEmail,
            Self::Transaction => FieldFormat::Transaction,
            Self::Cardtype => FieldFormat::CardType,
            Self::Cardexpire => FieldFormat::CardExpire,
            Self::Msgtype
            | Self::Cardnumber
            | Self::Splitpayment
            | Self::Fraudprobability
            | Self::Fraudremarks
            | Self::Fraudreport
            | Self::Fee
            | Self::Md5check => FieldFormat::Unrestricted,
        }
    }
}

impl ResponseField {
    /// Order in which field values enter the `md5check`, before the secret.
    pub const MD5CHECK_ORDER: [Self; 21] = [
        Self::Msgtype,
        Self::Ordernumber,
        Self::Amount,
        Self::Currency,
        Self::Time,
        Self::State,
        Self::Qpstat,
        Self::Qpstatmsg,
        Self::Chstat,
        Self::Chstatmsg,
        Self::Merchant,
        Self::Merchantemail,
        Self::Transaction,
        Self::Cardtype,
        Self::Cardnumber,
        Self::Cardexpire,
        Self::Splitpayment,
        Self::Fraudprobability,
        Self::Fraudremarks,
        Self::Fraudreport,
        Self::Fee,
    ];
}

/// Validated parameters of one callback.
///
/// The gateway's own `md5check` is kept as received; [`Self::calculate_md5check`] recomputes it
/// locally once the merchant secret is set, and comparing the two is up to the caller.
#[derive(Clone, Debug, Default)]
pub struct PaymentResponseParameters {
    fields: BTreeMap<ResponseField, String>,
    secret: Option<Secret<String>>,
}

impl PaymentResponseParameters {
    /// Creates a parameter set with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set from a flat mapping, see [`Self::populate`].
    pub fn from_flat_mapping<I, K, V>(fields: I) -> CustomResult<Self, ParameterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut parameters = Self::new();
        parameters.populate(fields)?;
        Ok(parameters)
    }

    /// Sets every field whose name matches a key case-insensitively. Keys naming no field are
    /// ignored. Stops at the first value that fails its format; fields set before it are kept.
    pub fn populate<I, K, V>(&mut self, fields: I) -> CustomResult<&mut Self, ParameterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in fields {
            if let Ok(field) = ResponseField::from_str(name.as_ref()) {
                self.set(field, value)?;
            }
        }
        Ok(self)
    }

    /// Validates `value` for `field` and stores it; the previous value is kept on failure.
    pub fn set(
        &mut self,
        field: ResponseField,
        value: impl Into<String>,
    ) -> CustomResult<&mut Self, ParameterError> {
        let value = validation::validate(field, value)?;
        self.fields.insert(field, value);
        Ok(self)
    }

    /// Value of `field`, if set
    pub fn get(&self, field: ResponseField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// The `md5check` received from the gateway, if any
    pub fn received_md5check(&self) -> Option<&str> {
        self.get(ResponseField::Md5check)
    }

    /// Sets the merchant secret used by [`Self::calculate_md5check`].
    pub fn set_secret(&mut self, secret: Secret<String>) -> &mut Self {
        self.secret = Some(secret);
        self
    }

    /// Computes the `md5check` over the fields in [`ResponseField::MD5CHECK_ORDER`] and the secret.
    pub fn calculate_md5check(&self) -> CustomResult<String, ParameterError> {
        checksum::compute_md5check(
            ResponseField::MD5CHECK_ORDER
                .iter()
                .map(|field| self.get(*field)),
            self.secret.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn md5check_order_covers_every_field_except_the_received_hash() {
        let ordered: Vec<_> = ResponseField::MD5CHECK_ORDER.to_vec();
        let expected: Vec<_> = ResponseField::iter()
            .filter(|field| *field != ResponseField::Md5check)
            .collect();

        assert_eq!(ordered, expected);
    }

    #[test]
    fn secret_is_not_a_wire_field() {
        assert!(ResponseField::from_str("secret").is_err());
        assert_eq!(
            ResponseField::from_str("FraudProbability").unwrap(),
            ResponseField::Fraudprobability
        );
    }

    #[test]
    fn populate_keeps_fields_set_before_a_malformed_one() {
        let mut parameters = PaymentResponseParameters::new();
        assert!(parameters
            .populate([("amount", "100"), ("state", "0"), ("currency", "DKK")])
            .is_err());
        assert_eq!(parameters.get(ResponseField::Amount), Some("100"));
        assert_eq!(parameters.get(ResponseField::State), None);
        assert_eq!(parameters.get(ResponseField::Currency), None);
    }

    #[test]
    fn values_are_kept_untrimmed() {
        let parameters =
            PaymentResponseParameters::from_flat_mapping([("fee", " 25 ")]).unwrap();

        assert_eq!(parameters.get(ResponseField::Fee), Some(" 25 "));
    }
}
