//! Field formats of the payment window protocol and the validator applied on every assignment.

#![deny(clippy::invalid_regex)]

use std::{collections::HashMap, sync::LazyLock};

use error_stack::{report, ResultExt};
use regex::{Regex, RegexBuilder};
use strum::IntoEnumIterator;

use crate::errors::ParameterError;
use common_utils::errors::CustomResult;

/// Documented value formats. Several fields share a format; fields documented as free text
/// use [`FieldFormat::Unrestricted`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum FieldFormat {
    /// `3` or `4`
    Protocol,
    /// `authorize` or `subscribe`
    MessageType,
    /// Exactly 8 digits
    MerchantId,
    /// ISO 639-1 two letter code
    Language,
    /// 4 to 20 alphanumeric characters
    OrderNumber,
    /// 1 to 9 digits
    RequestAmount,
    /// 1 to 10 digits
    ResponseAmount,
    /// ISO 4217 three letter code
    Currency,
    /// Anything starting with `http://` or `https://`
    Url,
    /// Empty, `0` or `1`
    Flag,
    /// Letters, commas and hyphens, possibly empty
    CardTypeLock,
    /// Up to 9 digits, possibly empty
    Group,
    /// `YYMMDDHHMMSS`
    Time,
    /// One or two digits in `1-9`
    State,
    /// Three digit status code
    StatusCode,
    /// Word characters, space, dot and hyphen
    StatusMessage,
    /// Word characters, space, dot and hyphen, 1 to 100 characters
    MerchantName,
    /// Word characters, dot, underscore, at sign and hyphen, at least 6 characters
    MerchantEmail,
    /// 1 to 32 digits
    Transaction,
    /// Word characters and hyphen, 1 to 32 characters
    CardType,
    /// Up to 4 word or space characters
    CardExpire,
    /// Any value
    Unrestricted,
}

impl FieldFormat {
    /// Pattern source for the format, matched case-insensitively.
    /// Every pattern is anchored at both ends except [`FieldFormat::Url`], which checks the scheme prefix only.
    pub const fn pattern(self) -> Option<&'static str> {
        match self {
            Self::Protocol => Some(r"^(?:3|4)$"),
            Self::MessageType => Some(r"^(?:authorize|subscribe)$"),
            Self::MerchantId => Some(r"^[0-9]{8}$"),
            Self::Language => Some(r"^[a-z]{2}$"),
            Self::OrderNumber => Some(r"^[a-z0-9]{4,20}$"),
            Self::RequestAmount => Some(r"^[0-9]{1,9}$"),
            Self::ResponseAmount => Some(r"^[0-9]{1,10}$"),
            Self::Currency => Some(r"^[A-Z]{3}$"),
            Self::Url => Some(r"^https?://"),
            Self::Flag => Some(r"^[01]?$"),
            Self::CardTypeLock => Some(r"^[a-z,-]*$"),
            Self::Group => Some(r"^[0-9]{0,9}$"),
            Self::Time => Some(r"^[0-9]{12}$"),
            Self::State => Some(r"^[1-9]{1,2}$"),
            Self::StatusCode => Some(r"^[0-9]{3}$"),
            Self::StatusMessage => Some(r"^[\w .-]+$"),
            Self::MerchantName => Some(r"^[\w .-]{1,100}$"),
            Self::MerchantEmail => Some(r"^[\w.@-]{6,}$"),
            Self::Transaction => Some(r"^[0-9]{1,32}$"),
            Self::CardType => Some(r"^[\w-]{1,32}$"),
            // Does not enforce the documented `yymm` length of exactly 4.
            Self::CardExpire => Some(r"^[\w\s]{0,4}$"),
            Self::Unrestricted => None,
        }
    }

    /// Whether the pattern relies on Unicode `\w` or `\s` classes. All other formats describe
    /// ASCII-only wire values and fold case over ASCII only.
    const fn uses_unicode_classes(self) -> bool {
        matches!(
            self,
            Self::StatusMessage
                | Self::MerchantName
                | Self::MerchantEmail
                | Self::CardType
                | Self::CardExpire
        )
    }

    /// Whether `value` satisfies this format, or `None` when the format's pattern failed to compile.
    pub fn is_match(self, value: &str) -> Option<bool> {
        if self.pattern().is_none() {
            return Some(true);
        }
        PATTERN_TABLE
            .get(&self)
            .and_then(Option::as_ref)
            .map(|regex| regex.is_match(value))
    }
}

/// Compiled once per process and shared by every parameter set.
static PATTERN_TABLE: LazyLock<HashMap<FieldFormat, Option<Regex>>> = LazyLock::new(|| {
    FieldFormat::iter()
        .filter_map(|format| {
            format.pattern().map(|source| {
                let compiled = RegexBuilder::new(source)
                    .case_insensitive(true)
                    .unicode(format.uses_unicode_classes())
                    .build()
                    .ok();
                (format, compiled)
            })
        })
        .collect()
});

/// A named field of a parameter set together with its documented format.
pub trait ParameterField: Copy + 'static {
    /// Lowercase wire name of the field
    fn field_name(self) -> &'static str;

    /// Format the field's values must satisfy
    fn format(self) -> FieldFormat;
}

/// Validates `value` for `field`, returning the accepted value unchanged.
///
/// It returns a [ParameterError::InvalidFieldFormat] naming the field when the value does not match.
pub fn validate<F: ParameterField>(
    field: F,
    value: impl Into<String>,
) -> CustomResult<String, ParameterError> {
    let value = value.into();
    let field_name = field.field_name();

    match field.format().is_match(&value) {
        Some(true) => Ok(value),
        Some(false) => Err(report!(ParameterError::InvalidFieldFormat { field_name })),
        None => Err(report!(ParameterError::InvalidFieldFormat { field_name }))
            .attach_printable("format pattern failed to compile"),
    }
}
