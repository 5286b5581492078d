//! The `md5check` integrity hash shared by request and callback parameter sets.
//!
//! The hash is the lowercase hex MD5 digest of the UTF-8 concatenation of the field values in a
//! fixed order, followed by the merchant secret. Unset fields contribute nothing and no separator
//! is placed between values. MD5 is mandated by the payment window protocol.

use std::sync::LazyLock;

use common_utils::{
    crypto::{GenerateDigest, Md5},
    errors::CustomResult,
};
use error_stack::{report, ResultExt};
use masking::{PeekInterface, Secret};
use regex::Regex;

use crate::errors::ParameterError;

static DIGEST_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{32}$").ok());

/// Concatenates `values` in the given order and appends the secret.
pub(crate) fn checksum_message<'a>(
    values: impl IntoIterator<Item = Option<&'a str>>,
    secret: Option<&Secret<String>>,
) -> String {
    let mut message: String = values.into_iter().flatten().collect();
    if let Some(secret) = secret {
        message.push_str(secret.peek());
    }
    message
}

/// Computes the `md5check` over `values` followed by `secret`.
pub(crate) fn compute_md5check<'a>(
    values: impl IntoIterator<Item = Option<&'a str>>,
    secret: Option<&Secret<String>>,
) -> CustomResult<String, ParameterError> {
    let message = checksum_message(values, secret);
    let digest = Md5
        .generate_hex_digest(message.as_bytes())
        .change_context(ParameterError::InvalidHashShape)?;
    ensure_digest_shape(&digest)?;
    Ok(digest)
}

/// Checks that `digest` looks like a lowercase hex encoded 128-bit digest.
pub fn ensure_digest_shape(digest: &str) -> CustomResult<(), ParameterError> {
    match DIGEST_SHAPE.as_ref() {
        Some(shape) if shape.is_match(digest) => Ok(()),
        Some(_) => Err(report!(ParameterError::InvalidHashShape))
            .attach_printable(format!("digest has length {}", digest.len())),
        None => Err(report!(ParameterError::InvalidHashShape))
            .attach_printable("digest shape pattern failed to compile"),
    }
}
