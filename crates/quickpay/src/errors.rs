//! Errors raised by the parameter sets, the gateway client and settings loading

/// Errors raised while assigning fields or computing the integrity hash of a parameter set.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// The value does not match the gateway's documented format for the field.
    #[error("Invalid format for field: {field_name}")]
    InvalidFieldFormat {
        /// Wire name of the rejected field
        field_name: &'static str,
    },
    /// The computed digest is not a 32 character lowercase hex string.
    #[error("Computed md5check is not a 32 character lowercase hex digest")]
    InvalidHashShape,
}

/// Errors raised while talking to the payment window or handling its callbacks.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The order could not be turned into a valid request parameter set.
    #[error("Order does not satisfy the payment window format")]
    InvalidOrder,
    /// The HTTP client or the form body could not be built.
    #[error("Failed to encode the payment window request")]
    RequestEncodingFailed,
    /// The request could not be sent or no response was received.
    #[error("Failed to send the request to the payment window")]
    RequestSendingFailed,
    /// The payment window answered with a non-success status.
    #[error("Payment window responded with unexpected status code {status_code}")]
    UnexpectedResponseStatus {
        /// HTTP status code received
        status_code: u16,
    },
    /// The callback carries a field that does not match its documented format.
    #[error("Callback contains malformed fields")]
    InvalidCallback,
    /// The callback's md5check is missing or does not match the recomputed hash.
    #[error("Callback md5check verification failed, callback is not trusted")]
    CallbackRejected,
}

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The config sources could not be read or deserialized.
    #[error("Failed to load settings")]
    ConfigLoadFailed,
    /// A value is present but unusable.
    #[error("Invalid value in settings for: {field_name}")]
    InvalidConfigValue {
        /// Name of the offending setting
        field_name: &'static str,
    },
}
