//! Parameters posted to the payment window to start a payment.

use std::collections::BTreeMap;

use masking::Secret;

use crate::{
    checksum, consts,
    errors::ParameterError,
    options::PaymentOptions,
    types::FlatMapping,
    validation::{self, FieldFormat, ParameterField},
};
use common_utils::errors::CustomResult;

/// Settable fields of a payment request, in form order.
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
pub enum RequestField {
    /// Version of the protocol
    Protocol,
    /// Standard payment (`authorize`) or subscription payment (`subscribe`)
    Msgtype,
    /// The QuickPay merchant id
    Merchant,
    /// Language of the payment window as a two letter ISO 639-1 code
    Language,
    /// Merchant chosen identifier, unique per transaction
    Ordernumber,
    /// Amount in the currency's smallest unit, 1 EUR is written 100
    Amount,
    /// Three letter ISO 4217 currency code
    Currency,
    /// Redirect target after a successful transaction
    Continueurl,
    /// Redirect target after a cancelled transaction
    Cancelurl,
    /// Target of the server to server callback carrying the result
    Callbackurl,
    /// `1` captures the transaction automatically, only valid for `authorize`
    Autocapture,
    /// `1` adds the acquirer's fee to the amount
    Autofee,
    /// Card types accepted, comma separated
    Cardtypelock,
    /// Identifies a subscription payment, required for `subscribe`
    Description,
    /// Subscription group (protocol 4 only)
    Group,
    /// `1` handles this transaction in test mode
    Testmode,
    /// Enables split payment (protocol 4 only)
    Splitpayment,
}

impl ParameterField for RequestField {
    fn field_name(self) -> &'static str {
        self.into()
    }

    fn format(self) -> FieldFormat {
        match self {
            Self::Protocol => FieldFormat::Protocol,
            Self::Msgtype => FieldFormat::MessageType,
            Self::Merchant => FieldFormat::MerchantId,
            Self::Language => FieldFormat::Language,
            Self::Ordernumber => FieldFormat::OrderNumber,
            Self::Amount => FieldFormat::RequestAmount,
            Self::Currency => FieldFormat::Currency,
            Self::Continueurl | Self::Cancelurl | Self::Callbackurl => FieldFormat::Url,
            Self::Autocapture | Self::Autofee | Self::Splitpayment => FieldFormat::Flag,
            Self::Cardtypelock => FieldFormat::CardTypeLock,
            Self::Group => FieldFormat::Group,
            // The payment window documents no format for these two.
            Self::Description | Self::Testmode => FieldFormat::Unrestricted,
        }
    }
}

impl RequestField {
    /// Order in which field values enter the `md5check`, before the secret.
    pub const MD5CHECK_ORDER: [Self; 17] = [
        Self::Protocol,
        Self::Msgtype,
        Self::Merchant,
        Self::Language,
        Self::Ordernumber,
        Self::Amount,
        Self::Currency,
        Self::Continueurl,
        Self::Cancelurl,
        Self::Callbackurl,
        Self::Autocapture,
        Self::Autofee,
        Self::Cardtypelock,
        Self::Description,
        Self::Group,
        Self::Testmode,
        Self::Splitpayment,
    ];
}

/// Validated parameters of one payment request.
///
/// Every field is checked against its format when it is set, so an instance is valid at every
/// point in time. Values are stored as given and only trimmed when serialized.
#[derive(Clone, Debug, Default)]
pub struct PaymentRequestParameters {
    fields: BTreeMap<RequestField, String>,
    secret: Option<Secret<String>>,
}

impl PaymentRequestParameters {
    /// Creates a parameter set holding the gateway defaults from `options`.
    ///
    /// Fails with [ParameterError::InvalidFieldFormat] when one of the defaults is malformed.
    pub fn new(options: &PaymentOptions) -> CustomResult<Self, ParameterError> {
        let mut parameters = Self::default();
        for (field, value) in options.request_defaults() {
            parameters.set(field, value)?;
        }
        Ok(parameters)
    }

    /// Validates `value` for `field` and stores it; the previous value is kept on failure.
    pub fn set(
        &mut self,
        field: RequestField,
        value: impl Into<String>,
    ) -> CustomResult<&mut Self, ParameterError> {
        let value = validation::validate(field, value)?;
        self.fields.insert(field, value);
        Ok(self)
    }

    /// Builder flavour of [`Self::set`].
    pub fn with(
        mut self,
        field: RequestField,
        value: impl Into<String>,
    ) -> CustomResult<Self, ParameterError> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Value of `field`, if set
    pub fn get(&self, field: RequestField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Sets the merchant secret. It only enters the `md5check` and is never serialized.
    pub fn set_secret(&mut self, secret: Secret<String>) -> &mut Self {
        self.secret = Some(secret);
        self
    }

    /// Builder flavour of [`Self::set_secret`].
    pub fn with_secret(mut self, secret: Secret<String>) -> Self {
        self.set_secret(secret);
        self
    }

    /// Computes the `md5check` over the fields in [`RequestField::MD5CHECK_ORDER`] and the secret.
    pub fn md5check(&self) -> CustomResult<String, ParameterError> {
        checksum::compute_md5check(
            RequestField::MD5CHECK_ORDER
                .iter()
                .map(|field| self.get(*field)),
            self.secret.as_ref(),
        )
    }

    /// Serializes into the form posted to the payment window.
    ///
    /// Names are lowercase, values trimmed, and blank values left out. The `md5check` is
    /// recomputed on every call, so the secret must be set before serializing.
    pub fn to_flat_mapping(&self) -> CustomResult<FlatMapping, ParameterError> {
        let mut mapping: FlatMapping = self
            .fields
            .iter()
            .map(|(field, value)| (field.field_name(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        mapping.insert(consts::MD5CHECK_FIELD_NAME, self.md5check()?);
        Ok(mapping)
    }
}
