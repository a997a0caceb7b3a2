use crate::models::Record;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) const DEFAULT_DATA_URL: &str = "./data/data.json";
pub(crate) const DEFAULT_SYNC_URL: &str = "/update-data";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub data_url: String,
    pub sync_url: String,
}

impl EnvConfig {
    /// Reads `window.ENV`, falling back to the bundled fixture and `/update-data`.
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        match env {
            Some(env) => Self::from_lookup(|key| {
                js_sys::Reflect::get(&env, &key.into())
                    .ok()
                    .and_then(|v| v.as_string())
            }),
            None => Self::from_lookup(|_| None),
        }
    }

    /// Upper-case keys win over the lower-case spelling.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |upper: &str, lower: &str, default: &str| {
            lookup(upper)
                .or_else(|| lookup(lower))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            data_url: pick("DATA_URL", "data_url", DEFAULT_DATA_URL),
            sync_url: pick("SYNC_URL", "sync_url", DEFAULT_SYNC_URL),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins a possibly relative `raw` onto the page URL.
///
/// The wasm reqwest client rejects relative URLs, so everything is made
/// absolute before it reaches the client. Without a base, `raw` is kept as is.
pub(crate) fn resolve_url(raw: &str, base: Option<&str>) -> String {
    if let Ok(u) = url::Url::parse(raw) {
        return u.to_string();
    }

    base.and_then(|b| url::Url::parse(b).ok())
        .and_then(|b| b.join(raw).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn page_href() -> Option<String> {
    web_sys::window().and_then(|w| w.location().href().ok())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) data_url: String,
    pub(crate) sync_url: String,
}

impl ApiClient {
    pub fn new(data_url: String, sync_url: String) -> Self {
        Self { data_url, sync_url }
    }

    pub fn from_env() -> Self {
        let env = EnvConfig::new();
        let base = page_href();
        Self::new(
            resolve_url(&env.data_url, base.as_deref()),
            resolve_url(&env.sync_url, base.as_deref()),
        )
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        res: reqwest::Response,
        ctx: &str,
    ) -> ApiResult<T> {
        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    /// One-shot fetch of the record collection.
    pub async fn load_records(&self) -> ApiResult<Vec<Record>> {
        let res = reqwest::Client::new()
            .get(&self.data_url)
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::read_json(res, "Load failed").await
    }

    /// Posts the full collection. The reply is returned as opaque JSON.
    pub async fn sync_records(&self, records: &[Record]) -> ApiResult<serde_json::Value> {
        let res = reqwest::Client::new()
            .post(&self.sync_url)
            .header("Content-Type", "application/json")
            .json(records)
            .send()
            .await
            .map_err(ApiError::network)?;

        Self::read_json(res, "Sync failed").await
    }
}
