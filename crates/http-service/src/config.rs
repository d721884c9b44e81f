use std::time::Duration;

const DEFAULT_CHAT_PATH: &str = "/api/chat";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for [`HttpServiceConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpServiceConfigBuilder {
    base_url: String,
    chat_path: Option<String>,
    timeout: Option<Duration>,
}

impl HttpServiceConfigBuilder {
    /// Creates a builder with the given base URL, e.g.
    /// `http://127.0.0.1:2704`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            chat_path: None,
            timeout: None,
        }
    }

    /// Sets the path of the chat endpoint, relative to the base URL.
    #[inline]
    pub fn with_chat_path<S: Into<String>>(mut self, chat_path: S) -> Self {
        self.chat_path = Some(chat_path.into());
        self
    }

    /// Sets how long a request may take before it fails.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpServiceConfig {
        let base_url = self.base_url.trim_end_matches('/').to_owned();
        let chat_path = self
            .chat_path
            .unwrap_or_else(|| DEFAULT_CHAT_PATH.to_owned());
        let chat_path = if chat_path.starts_with('/') {
            chat_path
        } else {
            format!("/{chat_path}")
        };
        HttpServiceConfig {
            base_url,
            chat_path,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

/// Configuration for the HTTP answering service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpServiceConfig {
    pub(crate) base_url: String,
    pub(crate) chat_path: String,
    pub(crate) timeout: Duration,
}

impl HttpServiceConfig {
    /// Returns the full URL of the chat endpoint.
    #[inline]
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    /// Returns the request timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config =
            HttpServiceConfigBuilder::with_base_url("http://localhost:2704/")
                .build();
        assert_eq!(config.chat_url(), "http://localhost:2704/api/chat");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_custom_path() {
        let config = HttpServiceConfigBuilder::with_base_url("http://host")
            .with_chat_path("v2/ask")
            .with_timeout(Duration::from_secs(5))
            .build();
        assert_eq!(config.chat_url(), "http://host/v2/ask");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
