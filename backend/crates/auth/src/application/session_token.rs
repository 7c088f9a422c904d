//! Session Token Signing
//!
//! Cookie value format: `<session uuid>.<base64url HMAC-SHA256 of the uuid>`.
//! A token that fails verification is treated as no session at all.

use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};

use crate::domain::value_object::SessionId;

#[derive(Clone)]
pub struct SessionTokenSigner {
    secret: [u8; 32],
}

impl SessionTokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    pub fn sign(&self, session_id: &SessionId) -> String {
        let id = session_id.to_string();
        let signature = hmac_sha256(&self.secret, id.as_bytes());
        format!("{}.{}", id, to_base64_url(&signature))
    }

    /// Verify a token and extract its session id
    pub fn verify(&self, token: &str) -> Option<SessionId> {
        let (id, signature) = token.split_once('.')?;
        let signature = from_base64_url(signature).ok()?;

        if !verify_hmac_sha256(&self.secret, id.as_bytes(), &signature) {
            return None;
        }

        id.parse().ok()
    }
}

impl std::fmt::Debug for SessionTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let signer = SessionTokenSigner::new([7u8; 32]);
        let session_id = SessionId::new();

        let token = signer.sign(&session_id);
        assert_eq!(signer.verify(&token), Some(session_id));
    }

    #[test]
    fn test_rejects_tampered_id() {
        let signer = SessionTokenSigner::new([7u8; 32]);
        let token = signer.sign(&SessionId::new());
        let (_, signature) = token.split_once('.').unwrap();

        let forged = format!("{}.{}", SessionId::new(), signature);
        assert_eq!(signer.verify(&forged), None);
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = SessionTokenSigner::new([1u8; 32]).sign(&SessionId::new());
        assert_eq!(SessionTokenSigner::new([2u8; 32]).verify(&token), None);
    }

    #[test]
    fn test_rejects_malformed() {
        let signer = SessionTokenSigner::new([7u8; 32]);
        assert_eq!(signer.verify(""), None);
        assert_eq!(signer.verify("no-dot"), None);
        assert_eq!(signer.verify("abc.!!!"), None);
    }
}
