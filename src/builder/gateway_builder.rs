use secrecy::SecretString;

use crate::backends::ollama::{Ollama, OllamaConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::GatewayError;

/// Builder for configuring and instantiating the model gateway.
#[derive(Default)]
pub struct GatewayBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_seconds: Option<u64>,
}

impl GatewayBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the temperature for controlling response randomness (0.0-1.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Builds the gateway, validating the URL and constructing the HTTP client.
    pub fn build(self) -> Result<Ollama, GatewayError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        reqwest::Url::parse(&base_url)
            .map_err(|err| GatewayError::Generic(format!("invalid base URL '{base_url}': {err}")))?;

        let mut client = reqwest::Client::builder();
        if let Some(sec) = self.timeout_seconds {
            client = client.timeout(std::time::Duration::from_secs(sec));
        }
        let client = client.build()?;

        Ok(Ollama::with_client(
            client,
            OllamaConfig {
                base_url,
                api_key: self
                    .api_key
                    .unwrap_or_else(|| SecretString::new(DEFAULT_API_KEY.to_string())),
                model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_ollama() {
        let gateway = GatewayBuilder::new().build().expect("build");
        assert_eq!(gateway.model(), DEFAULT_MODEL);
        assert_eq!(gateway.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn rejects_malformed_base_url() {
        let result = GatewayBuilder::new().base_url("not a url").build();
        assert!(matches!(result, Err(GatewayError::Generic(_))));
    }
}
