//! Wire types for the Actions secrets REST API.

use serde::{Deserialize, Serialize};

/// Response of `GET /repos/{repo}/actions/secrets/public-key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPublicKey {
    pub key_id: String,
    /// Base64 encoded X25519 public key.
    pub key: String,
}

/// Body of `PUT /repos/{repo}/actions/secrets/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPayload {
    pub encrypted_value: String,
    pub key_id: String,
}
