//! HMAC-SHA256 webhook signatures.
//!
//! Signatures use the GitHub format: `sha256=<lowercase hex digest>` computed
//! over the raw request body.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies webhook signatures against a shared secret.
#[derive(Debug)]
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Compute the header value for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        let digest = mac.finalize().into_bytes();

        format!("{SIGNATURE_PREFIX}{}", hex::encode(digest))
    }

    /// Check `header` against the signature of `body`.
    ///
    /// An absent or empty header is a missing signature. Anything else that is
    /// not byte-for-byte equal to the expected value is a mismatch.
    pub fn verify(&self, header: Option<&[u8]>, body: &[u8]) -> Result<(), WebhookError> {
        let provided = match header {
            Some(value) if !value.is_empty() => value,
            _ => {
                tracing::warn!(reason = "missing", "deploy webhook called without signature");
                return Err(WebhookError::MissingSignature);
            }
        };

        let expected = self.sign(body);

        // Length is not secret; ct_eq handles unequal lengths as a mismatch.
        if bool::from(provided.ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            tracing::warn!(reason = "mismatch", "deploy webhook signature rejected");
            Err(WebhookError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn verifier(secret: &str) -> SignatureVerifier {
        SignatureVerifier::new(SecretString::from(secret.to_string()))
    }

    #[test]
    fn sign_matches_known_vector() {
        // RFC 4231 test case 2.
        let v = verifier("Jefe");
        assert_eq!(
            v.sign(b"what do ya want for nothing?"),
            "sha256=5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn accepts_own_signature() {
        let v = verifier("s3cr3t");
        let header = v.sign(b"ping");
        assert!(header.starts_with(SIGNATURE_PREFIX));
        assert_eq!(header.len(), SIGNATURE_PREFIX.len() + 64);
        assert!(v.verify(Some(header.as_bytes()), b"ping").is_ok());
    }

    #[test]
    fn missing_header_is_distinct_from_mismatch() {
        let v = verifier("s3cr3t");
        assert!(matches!(v.verify(None, b"ping"), Err(WebhookError::MissingSignature)));
        assert!(matches!(v.verify(Some(&b""[..]), b"ping"), Err(WebhookError::MissingSignature)));
        let zeros = format!("{SIGNATURE_PREFIX}{}", "0".repeat(64));
        assert!(matches!(
            v.verify(Some(zeros.as_bytes()), b"ping"),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_other_secret() {
        let header = verifier("other").sign(b"ping");
        assert!(matches!(
            verifier("s3cr3t").verify(Some(header.as_bytes()), b"ping"),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_uppercase_hex_and_missing_prefix() {
        let v = verifier("s3cr3t");
        let header = v.sign(b"ping");
        let digest = &header[SIGNATURE_PREFIX.len()..];
        let upper = format!("{SIGNATURE_PREFIX}{}", digest.to_uppercase());
        assert!(v.verify(Some(upper.as_bytes()), b"ping").is_err());
        assert!(v.verify(Some(digest.as_bytes()), b"ping").is_err());
    }

    #[test]
    fn debug_output_hides_secret() {
        let v = verifier("super-secret-value");
        assert!(!format!("{v:?}").contains("super-secret-value"));
    }

    proptest! {
        #[test]
        fn body_bit_flip_is_rejected(
            body in proptest::collection::vec(any::<u8>(), 1..256),
            index in any::<proptest::sample::Index>(),
            bit in 0u8..8,
        ) {
            let v = verifier("s3cr3t");
            let header = v.sign(&body);
            let mut tampered = body.clone();
            tampered[index.index(body.len())] ^= 1 << bit;
            prop_assert!(v.verify(Some(header.as_bytes()), &body).is_ok());
            prop_assert!(v.verify(Some(header.as_bytes()), &tampered).is_err());
        }

        #[test]
        fn header_bit_flip_is_rejected(
            body in proptest::collection::vec(any::<u8>(), 0..256),
            index in any::<proptest::sample::Index>(),
            bit in 0u8..8,
        ) {
            let v = verifier("s3cr3t");
            let mut header = v.sign(&body).into_bytes();
            let i = index.index(header.len());
            header[i] ^= 1 << bit;
            prop_assert!(v.verify(Some(header.as_slice()), &body).is_err());
        }
    }
}
