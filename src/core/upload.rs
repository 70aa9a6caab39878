//! Upload loop: fetch the repository key once, seal, PUT.

use crate::core::github::{validate_secret_name, SecretsApi};
use crate::core::seal;
use crate::models::secret::{RepoPublicKey, SecretPayload};
use crate::models::settings::SecretsSection;
use anyhow::{Context, Result};
use std::io::Write;
use zeroize::Zeroizing;

/// A dotenv entry whose value is wiped on drop.
pub struct SecretEntry {
    pub key: String,
    pub value: Zeroizing<String>,
}

impl std::fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretEntry")
            .field("key", &self.key)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl SecretEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Zeroizing::new(value.into()),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    pub uploaded: Vec<String>,
    pub skipped: Vec<String>,
}

/// Names that would be uploaded and skipped, without touching the network.
///
/// Names are validated as they would be by [`upload`].
pub fn plan(entries: &[SecretEntry], policy: &SecretsSection) -> Result<UploadOutcome> {
    let mut outcome = UploadOutcome::default();
    for entry in entries {
        if policy.is_skipped(&entry.key) {
            outcome.skipped.push(entry.key.clone());
        } else {
            validate_secret_name(&entry.key)?;
            outcome.uploaded.push(entry.key.clone());
        }
    }
    Ok(outcome)
}

/// Upload every entry in order, stopping at the first failure.
pub fn upload<A: SecretsApi + ?Sized>(
    api: &A,
    entries: &[SecretEntry],
    policy: &SecretsSection,
    out: &mut dyn Write,
) -> Result<UploadOutcome> {
    let mut key: Option<RepoPublicKey> = None;
    let mut outcome = UploadOutcome::default();

    for entry in entries {
        let repo_key = match &key {
            Some(k) => k.clone(),
            None => {
                writeln!(out, "Fetch repo public key...").context("write output")?;
                let fetched = api.public_key()?;
                key = Some(fetched.clone());
                fetched
            }
        };

        if policy.is_skipped(&entry.key) {
            outcome.skipped.push(entry.key.clone());
            continue;
        }
        validate_secret_name(&entry.key)?;

        let payload = SecretPayload {
            encrypted_value: seal::seal(&repo_key.key, &entry.value)
                .with_context(|| format!("encrypt {}", entry.key))?,
            key_id: repo_key.key_id.clone(),
        };
        writeln!(out, "Creating secret {}", entry.key).context("write output")?;
        api.put_secret(&entry.key, &payload)?;
        outcome.uploaded.push(entry.key.clone());
    }

    Ok(outcome)
}
