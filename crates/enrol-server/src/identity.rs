use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("email is required to derive a user id")]
    EmptyEmail,
    /// HMAC takes keys of any length, so this is not expected in practice.
    #[error("invalid identity key")]
    InvalidKey,
}

/// Maps an email to a stable user id: base64(HMAC-SHA1(key, email)).
///
/// The email is hashed byte-for-byte, without normalization, so
/// `Ada@example.com` and `ada@example.com` are different users.
#[derive(Clone)]
pub struct IdentityDeriver {
    key: Vec<u8>,
}

impl IdentityDeriver {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    pub fn derive_id(&self, email: &str) -> Result<String, IdentityError> {
        if email.is_empty() {
            return Err(IdentityError::EmptyEmail);
        }
        let mut mac = <Hmac<Sha1> as Mac>::new_from_slice(&self.key)
            .map_err(|_| IdentityError::InvalidKey)?;
        mac.update(email.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for IdentityDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityDeriver").finish_non_exhaustive()
    }
}
