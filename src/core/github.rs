//! Actions secrets REST client.

use crate::constants;
use crate::models::secret::{RepoPublicKey, SecretPayload};
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::debug;

/// Remote operations needed to store repository secrets.
pub trait SecretsApi {
    fn public_key(&self) -> Result<RepoPublicKey>;
    fn put_secret(&self, name: &str, payload: &SecretPayload) -> Result<()>;
}

pub struct ActionsClient {
    http: Client,
    api_url: String,
    repo: String,
}

impl ActionsClient {
    pub fn new(api_url: &str, repo: &str, token: &str) -> Result<Self> {
        validate_repo(repo)?;
        let mut auth = HeaderValue::from_str(&format!("token {}", token))
            .context("personal access token is not a valid header value")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(constants::API_ACCEPT));
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(concat!("template-kit/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
        })
    }

    fn secrets_url(&self, tail: &str) -> String {
        format!("{}/repos/{}/actions/secrets/{}", self.api_url, self.repo, tail)
    }
}

impl SecretsApi for ActionsClient {
    fn public_key(&self) -> Result<RepoPublicKey> {
        let url = self.secrets_url("public-key");
        debug!(%url, "GET");
        let resp = self.http.get(&url).send().context("request repository public key")?;
        let status = resp.status();
        let body = resp.text().context("read public key response")?;
        if status != reqwest::StatusCode::OK {
            bail!("failed to get public key: {} {}", status.as_u16(), body);
        }
        serde_json::from_str(&body).context("parse public key response")
    }

    fn put_secret(&self, name: &str, payload: &SecretPayload) -> Result<()> {
        let url = self.secrets_url(name);
        debug!(%url, "PUT");
        let resp = self
            .http
            .put(&url)
            .json(payload)
            .send()
            .with_context(|| format!("upload secret {}", name))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            bail!("{} not a 2xx status for {}: {}", status.as_u16(), name, body);
        }
        Ok(())
    }
}

/// `owner/name` with no empty parts or path tricks.
pub fn validate_repo(repo: &str) -> Result<()> {
    let valid_part = |s: &str| {
        !s.is_empty()
            && s != "."
            && s != ".."
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    };
    match repo.split_once('/') {
        Some((owner, name)) if valid_part(owner) && valid_part(name) => Ok(()),
        _ => bail!("invalid repository '{}', expected OWNER/NAME", repo),
    }
}

/// Secret names are `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_secret_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("invalid secret name '{}': only [A-Za-z0-9_] allowed, not starting with a digit", name);
    }
    Ok(())
}
