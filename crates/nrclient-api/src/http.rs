//! Shared HTTP plumbing for every API surface: transport construction, URL
//! joining and authenticated JSON requests.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ClientError, Result};

/// User agent sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("nrclient/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "X-Api-Key";
const CONNECT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// Build a `reqwest` client with standard nrclient configuration.
///
/// Config: 30s connect timeout, optional request timeout, rustls TLS,
/// the given user agent, redirect limit 10.
///
/// # Errors
///
/// Returns [`ClientError::Http`] if the user agent is not a valid header value
/// or the TLS backend cannot be initialised.
pub fn build_client(timeout: Option<Duration>, user_agent: &str) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Check that `raw` is an absolute URL. The caller's string is kept as-is.
pub(crate) fn check_base_url(raw: &str) -> Result<()> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|source| ClientError::InvalidBaseUrl {
            url: raw.to_owned(),
            source,
        })
}

fn endpoint(base_url: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base_url.trim_end_matches('/').to_owned();
    }
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

/// Connection parameters plus the client that carries them.
#[derive(Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
    overridden: bool,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) debug: bool,
    pub(crate) user_agent: String,
    pub(crate) timeout: Option<Duration>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("client", &"<reqwest::Client>")
            .field("overridden", &self.overridden)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Transport {
    pub(crate) fn new(
        api_key: String,
        base_url: String,
        debug: bool,
        user_agent: String,
        timeout: Option<Duration>,
        transport: Option<reqwest::Client>,
    ) -> Result<Self> {
        check_base_url(&base_url)?;
        let overridden = transport.is_some();
        let client = match transport {
            Some(client) => client,
            None => build_client(timeout, &user_agent)?,
        };
        Ok(Self {
            client,
            overridden,
            api_key,
            base_url,
            debug,
            user_agent,
            timeout,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = endpoint(&self.base_url, path);
        let mut request = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json");
        // An injected client knows nothing about our timeout or user agent.
        if self.overridden {
            request = request.header(USER_AGENT, &self.user_agent);
            if let Some(timeout) = self.timeout {
                request = request.timeout(timeout);
            }
        }

        if self.debug {
            tracing::debug!(%url, "sending New Relic API request");
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if self.debug {
            tracing::debug!(
                %url,
                status = status.as_u16(),
                bytes = text.len(),
                "received New Relic API response"
            );
        }

        if !status.is_success() {
            tracing::error!("New Relic API error {status} for {url}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_dropping_version_segment() {
        assert_eq!(
            endpoint("https://api.newrelic.com/v2", "applications.json"),
            "https://api.newrelic.com/v2/applications.json"
        );
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        assert_eq!(
            endpoint("https://api.newrelic.com/v2/", "/alerts_policies.json"),
            "https://api.newrelic.com/v2/alerts_policies.json"
        );
    }

    #[test]
    fn endpoint_empty_path_is_base() {
        assert_eq!(
            endpoint("https://api.newrelic.com/v2/", ""),
            "https://api.newrelic.com/v2"
        );
    }

    #[test]
    fn check_base_url_rejects_relative() {
        let err = check_base_url("api.newrelic.com/v2").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { ref url, .. } if url == "api.newrelic.com/v2"));
    }

    #[test]
    fn check_base_url_accepts_absolute() {
        assert!(check_base_url("https://api.eu.newrelic.com/v2").is_ok());
    }

    #[test]
    fn build_client_with_timeout() {
        assert!(build_client(Some(Duration::from_secs(5)), DEFAULT_USER_AGENT).is_ok());
    }

    #[test]
    fn build_client_rejects_invalid_user_agent() {
        let err = build_client(None, "bad\nagent").unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }

    #[test]
    fn default_user_agent_carries_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("nrclient/"));
        assert!(DEFAULT_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn transport_debug_redacts_api_key() {
        let transport = Transport::new(
            "secret-key".into(),
            "https://api.newrelic.com/v2".into(),
            false,
            DEFAULT_USER_AGENT.into(),
            None,
            None,
        )
        .unwrap();
        let dbg = format!("{transport:?}");
        assert!(!dbg.contains("secret-key"));
        assert!(dbg.contains("<redacted>"));
    }
}
