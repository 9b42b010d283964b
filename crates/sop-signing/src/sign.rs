//! RSA PKCS#1 v1.5 envelope signing.
//!
//! PKCS#1 v1.5 padding is deterministic, which the gateway relies on;
//! PSS would produce a different signature per call and silently break
//! interoperability.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;
use sha2::Sha256;

use sop_canonical::sign_content;
use sop_core::{RequestEnvelope, SigningScheme};

use crate::error::SigningError;
use crate::key::PrivateKeyMaterial;

/// Sign a canonical string with the given scheme and key.
///
/// Returns the raw signature bytes encoded with the standard base64
/// alphabet, the transport form the gateway expects in the `sign`
/// field.
///
/// # Errors
///
/// Returns `SigningError::InvalidKey` if the material does not parse
/// as a PKCS#8 RSA private key.
pub fn sign(
    content: &str,
    scheme: SigningScheme,
    key: &PrivateKeyMaterial,
) -> Result<String, SigningError> {
    let private_key = key.to_rsa_key()?;

    let raw = match scheme {
        SigningScheme::Rsa => SigningKey::<Sha1>::new(private_key)
            .sign(content.as_bytes())
            .to_vec(),
        SigningScheme::Rsa2 => SigningKey::<Sha256>::new(private_key)
            .sign(content.as_bytes())
            .to_vec(),
    };

    tracing::debug!(scheme = %scheme, signature_bytes = raw.len(), "sign content signed");

    Ok(BASE64.encode(raw))
}

/// Canonicalize and sign an envelope in one step.
///
/// Resolves `scheme_tag` case-insensitively against `RSA` / `RSA2`,
/// normalizes `raw_key`, serializes the envelope to its sign content,
/// and signs it.
///
/// # Errors
///
/// Returns `SigningError::UnsupportedScheme` for an unrecognized tag
/// and `SigningError::InvalidKey` for unparseable key material. A
/// caller must not transport an envelope whose signing failed.
pub fn sign_envelope(
    envelope: &RequestEnvelope,
    scheme_tag: &str,
    raw_key: &str,
) -> Result<String, SigningError> {
    let scheme: SigningScheme = scheme_tag.parse()?;
    let key = PrivateKeyMaterial::normalize(raw_key);
    let content = sign_content(envelope);
    sign(&content, scheme, &key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_key_body, test_private_key};
    use rsa::pkcs1v15::{Signature, VerifyingKey};
    use rsa::signature::Verifier;

    fn envelope() -> RequestEnvelope {
        let mut envelope = RequestEnvelope::new();
        envelope.insert("app_id", "123");
        envelope.insert("method", "map.download");
        envelope
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = PrivateKeyMaterial::normalize(&test_key_body());
        let first = sign("app_id=123", SigningScheme::Rsa2, &key).unwrap();
        let second = sign("app_id=123", SigningScheme::Rsa2, &key).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schemes_produce_different_signatures() {
        let key = PrivateKeyMaterial::normalize(&test_key_body());
        let rsa = sign("app_id=123", SigningScheme::Rsa, &key).unwrap();
        let rsa2 = sign("app_id=123", SigningScheme::Rsa2, &key).unwrap();
        assert_ne!(rsa, rsa2);
    }

    #[test]
    fn test_signature_is_standard_base64() {
        let key = PrivateKeyMaterial::normalize(&test_key_body());
        let signature = sign("app_id=123", SigningScheme::Rsa2, &key).unwrap();

        let raw = BASE64.decode(&signature).unwrap();
        // 2048-bit key yields a 256-byte signature
        assert_eq!(raw.len(), 256);
    }

    #[test]
    fn test_sign_envelope_roundtrip_verifies() {
        let signature = sign_envelope(&envelope(), "RSA2", &test_key_body()).unwrap();

        let verifying_key = VerifyingKey::<Sha256>::new(test_private_key().to_public_key());
        let raw = BASE64.decode(&signature).unwrap();
        let signature = Signature::try_from(raw.as_slice()).unwrap();
        verifying_key
            .verify(b"app_id=123&method=map.download", &signature)
            .unwrap();
    }

    #[test]
    fn test_tampered_content_fails_verification() {
        let signature = sign_envelope(&envelope(), "RSA2", &test_key_body()).unwrap();

        let verifying_key = VerifyingKey::<Sha256>::new(test_private_key().to_public_key());
        let raw = BASE64.decode(&signature).unwrap();
        let signature = Signature::try_from(raw.as_slice()).unwrap();
        assert!(verifying_key
            .verify(b"app_id=124&method=map.download", &signature)
            .is_err());
    }

    #[test]
    fn test_sha1_scheme_verifies_with_sha1() {
        let signature = sign_envelope(&envelope(), "rsa", &test_key_body()).unwrap();

        let verifying_key = VerifyingKey::<Sha1>::new(test_private_key().to_public_key());
        let raw = BASE64.decode(&signature).unwrap();
        let signature = Signature::try_from(raw.as_slice()).unwrap();
        verifying_key
            .verify(b"app_id=123&method=map.download", &signature)
            .unwrap();
    }

    #[test]
    fn test_unknown_scheme_tag_is_rejected() {
        let err = sign_envelope(&envelope(), "RSA3", &test_key_body()).unwrap_err();
        assert!(matches!(err, SigningError::UnsupportedScheme(_)));
    }

    #[test]
    fn test_garbage_key_is_rejected() {
        let err = sign_envelope(&envelope(), "RSA2", "not a key").unwrap_err();
        assert!(matches!(err, SigningError::InvalidKey(_)));
    }
}
