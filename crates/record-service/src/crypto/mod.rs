//! Record token issuance and verification.
//!
//! Tokens are opaque bearer credentials: 256 bits from the system CSPRNG,
//! hex-encoded. Verification is an exact, constant-time byte comparison.

use crate::errors::RecordError;
use ring::rand::{SecureRandom, SystemRandom};

/// Length of a record token in random bytes (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Generate a fresh record token.
pub fn generate_token() -> Result<String, RecordError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; TOKEN_BYTES];

    rng.fill(&mut bytes).map_err(|e| {
        tracing::error!(target: "rs.crypto", error = %e, "Failed to generate random bytes for record token");
        RecordError::Internal("RNG failure".to_string())
    })?;

    Ok(hex::encode(bytes))
}

/// Check a supplied token against the stored one.
///
/// An empty supplied token never matches.
pub fn tokens_match(stored: &str, supplied: &str) -> bool {
    if supplied.is_empty() {
        return false;
    }

    #[allow(deprecated)]
    ring::constant_time::verify_slices_are_equal(stored.as_bytes(), supplied.as_bytes()).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_is_hex_of_expected_length() {
        let token = generate_token().unwrap();

        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_token_is_unique_per_call() {
        let a = generate_token().unwrap();
        let b = generate_token().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tokens_match_exact() {
        assert!(tokens_match("valid_token", "valid_token"));
    }

    #[test]
    fn test_tokens_match_rejects_mismatch() {
        assert!(!tokens_match("valid_token", "wrong"));
        assert!(!tokens_match("valid_token", "valid_token "));
        assert!(!tokens_match("valid_token", "VALID_TOKEN"));
    }

    #[test]
    fn test_tokens_match_rejects_empty_supplied() {
        assert!(!tokens_match("", ""));
        assert!(!tokens_match("valid_token", ""));
    }
}
