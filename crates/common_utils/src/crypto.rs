//! Utilities for cryptographic algorithms

use crate::errors::{self, CustomResult};

/// Trait for generating a message digest
pub trait GenerateDigest {
    /// takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError>;

    /// takes a message and returns its digest as a lowercase hex string
    fn generate_hex_digest(&self, message: &[u8]) -> CustomResult<String, errors::CryptoError> {
        self.generate_digest(message).map(hex::encode)
    }
}

/// MD5 hash function
///
/// Only kept for gateways whose wire protocol mandates it.
#[derive(Debug)]
pub struct Md5;

impl GenerateDigest for Md5 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = md5::compute(message);
        Ok(digest.as_ref().to_vec())
    }
}
