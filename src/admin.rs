use crate::storage::KeyValueStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha384};
use thiserror::Error;

pub const ADMIN_DIGEST: &str = "b53f3d5a331ac7ba157a9745e50ef88531f577d84ad1059ad287fdc26575161d62a154e1bc2a5143f24b4760846e49d6";
pub const SESSION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;
const SESSION_KEY: &str = "adminSession";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("Incorrect password")]
    WrongPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub expires_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGate {
    digest: &'static str,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self {
            digest: ADMIN_DIGEST,
        }
    }
}

pub fn sha384_hex(input: &str) -> String {
    hex::encode(Sha384::digest(input.as_bytes()))
}

impl AdminGate {
    #[cfg(test)]
    pub fn with_digest(digest: &'static str) -> Self {
        Self { digest }
    }

    pub fn verify(&self, password: &str) -> bool {
        sha384_hex(password).eq_ignore_ascii_case(self.digest)
    }

    pub fn login<S: KeyValueStore>(
        &self,
        backend: &S,
        password: &str,
        now_ms: i64,
    ) -> Result<AdminSession, AdminError> {
        if !self.verify(password) {
            return Err(AdminError::WrongPassword);
        }

        let session = AdminSession {
            expires_at: now_ms + SESSION_DURATION_MS,
        };
        if let Err(err) = backend.set(SESSION_KEY, &session) {
            warn!("Admin session will not survive a reload: {}", err);
        }
        Ok(session)
    }
}

pub fn restore_session<S: KeyValueStore>(backend: &S, now_ms: i64) -> bool {
    match backend.get::<AdminSession>(SESSION_KEY) {
        Ok(Some(session)) if now_ms < session.expires_at => {
            let remaining = (session.expires_at - now_ms) / 60_000;
            info!("Admin session active ({} min remaining)", remaining);
            true
        }
        Ok(None) => false,
        _ => {
            backend.delete(SESSION_KEY);
            false
        }
    }
}

pub fn logout<S: KeyValueStore>(backend: &S) {
    backend.delete(SESSION_KEY);
}
