use std::time::Duration;

use crate::config::settings::OrderServiceConfig;
use crate::error::{AppError, AppResult};

/// Builds the outbound HTTP client used for the order service.
///
/// One client is built per process and shared, so connections are pooled
/// across requests.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from `[order_service]`
/// - **Compression**: gzip responses are decoded transparently
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &OrderServiceConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Configuration {
            key: "order_service".to_string(),
            source: anyhow::Error::from(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_from_default_config() {
        let config = OrderServiceConfig::default();
        assert!(build_http_client(&config).is_ok());
    }
}
