//! # SOP Signing
//!
//! RSA signing for SOP open-platform request envelopes.
//!
//! This crate provides:
//! - PEM normalization for caller-supplied private key material
//! - PKCS#1 v1.5 signing with SHA-1 (`RSA`) or SHA-256 (`RSA2`)
//! - Standard-alphabet base64 encoding of the signature for transport
//!
//! ## Example
//!
//! ```ignore
//! use sop_core::RequestEnvelope;
//! use sop_signing::sign_envelope;
//!
//! let mut envelope = RequestEnvelope::new();
//! envelope.insert("app_id", "2021000100");
//! envelope.insert("method", "map.download");
//!
//! // app_key may be a bare base64 PKCS#8 body or a full PEM string
//! let signature = sign_envelope(&envelope, "RSA2", app_key)?;
//! envelope.insert("sign", signature);
//! ```

mod error;
mod key;
mod sign;

pub use error::SigningError;
pub use key::{PrivateKeyMaterial, PEM_BEGIN, PEM_END};
pub use sign::{sign, sign_envelope};

#[cfg(test)]
mod test_support {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use rsa::pkcs8::EncodePrivateKey;
    use rsa::RsaPrivateKey;
    use sha2::{Digest, Sha256};
    use std::sync::OnceLock;

    /// A 2048-bit key grown from a fixed seed, generated once per test
    /// run.
    pub(crate) fn test_private_key() -> RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            let hash = Sha256::digest(b"sop-signing-test-key");
            let mut rng = ChaCha20Rng::from_seed(hash.into());
            RsaPrivateKey::new(&mut rng, 2048).expect("generating test RSA key")
        })
        .clone()
    }

    /// The test key as a bare single-line base64 PKCS#8 body, the form
    /// the gateway hands out to integrators.
    pub(crate) fn test_key_body() -> String {
        let der = test_private_key()
            .to_pkcs8_der()
            .expect("encoding test key to PKCS#8 DER");
        BASE64.encode(der.as_bytes())
    }
}
