use std::str::FromStr;

use anyhow::{Context, anyhow};
use reqwest::Method;
use serde::Deserialize;

use crate::api::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";
pub const DEFAULT_BASE_PATH: &str = "/api";

const ENV_BASE_URL: &str = "PAYSTREAM_API_URL";
const ENV_BASE_PATH: &str = "PAYSTREAM_API_BASE_PATH";
const ENV_IDEMPOTENCY: &str = "PAYSTREAM_IDEMPOTENCY";
const ENV_LIST_ACCOUNTS: &str = "PAYSTREAM_LIST_ACCOUNTS";
const ENV_QUERY_RETRIES: &str = "PAYSTREAM_QUERY_RETRIES";
const ENV_MUTATION_RETRIES: &str = "PAYSTREAM_MUTATION_RETRIES";

/// Which methods receive an `idempotency-key` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdempotencyPolicy {
    /// Only creation requests.
    #[default]
    Post,
    /// Every state-changing method.
    Mutations,
    #[serde(rename = "none")]
    Disabled,
}

impl IdempotencyPolicy {
    pub fn applies_to(&self, method: &Method) -> bool {
        match self {
            IdempotencyPolicy::Post => *method == Method::POST,
            IdempotencyPolicy::Mutations => matches!(
                *method,
                Method::POST | Method::PUT | Method::PATCH | Method::DELETE
            ),
            IdempotencyPolicy::Disabled => false,
        }
    }
}

impl FromStr for IdempotencyPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" => Ok(IdempotencyPolicy::Post),
            "mutations" => Ok(IdempotencyPolicy::Mutations),
            "none" | "disabled" => Ok(IdempotencyPolicy::Disabled),
            other => Err(anyhow!("Unknown idempotency policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the API gateway, e.g. `https://gateway.example.com`.
    pub base_url: String,
    /// Fixed prefix every request path is appended to.
    pub base_path: String,
    pub idempotency: IdempotencyPolicy,
    /// Whether the gateway exposes `GET /v1/customers/{id}/accounts`.
    pub list_accounts: bool,
    pub query_retries: u32,
    pub mutation_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            idempotency: IdempotencyPolicy::default(),
            list_accounts: false,
            query_retries: 1,
            mutation_retries: 0,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    pub fn with_idempotency(mut self, policy: IdempotencyPolicy) -> Self {
        self.idempotency = policy;
        self
    }

    pub fn with_list_accounts(mut self, enabled: bool) -> Self {
        self.list_accounts = enabled;
        self
    }

    pub fn with_retries(mut self, query_retries: u32, mutation_retries: u32) -> Self {
        self.query_retries = query_retries;
        self.mutation_retries = mutation_retries;
        self
    }

    /// Reads the `PAYSTREAM_*` environment variables on top of the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(path) = lookup(ENV_BASE_PATH) {
            config.base_path = path;
        }
        if let Some(policy) = lookup(ENV_IDEMPOTENCY) {
            config.idempotency = policy
                .parse()
                .with_context(|| format!("Invalid value for {}", ENV_IDEMPOTENCY))?;
        }
        if let Some(flag) = lookup(ENV_LIST_ACCOUNTS) {
            config.list_accounts = parse_flag(&flag)
                .with_context(|| format!("Invalid value for {}", ENV_LIST_ACCOUNTS))?;
        }
        if let Some(count) = lookup(ENV_QUERY_RETRIES) {
            config.query_retries = count
                .trim()
                .parse()
                .with_context(|| format!("Invalid value for {}", ENV_QUERY_RETRIES))?;
        }
        if let Some(count) = lookup(ENV_MUTATION_RETRIES) {
            config.mutation_retries = count
                .trim()
                .parse()
                .with_context(|| format!("Invalid value for {}", ENV_MUTATION_RETRIES))?;
        }

        Ok(config)
    }

    /// Joins the base URL, the base path and a request path into the final target.
    pub fn url_for(&self, path: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        let base_path = self.base_path.trim_matches('/');
        let path = path.trim_start_matches('/');

        if base_path.is_empty() {
            format!("{}/{}", base_url, path)
        } else {
            format!("{}/{}/{}", base_url, base_path, path)
        }
    }

    pub fn query_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.query_retries)
    }

    pub fn mutation_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.mutation_retries)
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Expected a boolean, got '{}'", other)),
    }
}
