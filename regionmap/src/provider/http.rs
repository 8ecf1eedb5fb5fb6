//! HTTP client abstraction for testability.

use std::time::Duration;

use super::ProviderError;

/// Trait for asynchronous HTTP GET operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
#[allow(async_fn_in_trait)]
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    ///
    /// Implementations must treat non-success status codes as errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Real HTTP client implementation using reqwest.
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new client with the given User-Agent and per-request
    /// timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::Http(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock HTTP client for testing.
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, ProviderError> {
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockAsyncHttpClient {
            response: Ok(vec![1, 2, 3, 4]),
        };

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockAsyncHttpClient {
            response: Err(ProviderError::Http("Test error".to_string())),
        };

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_reqwest_client_creation() {
        let client = AsyncReqwestClient::new("regionmap-test/0.1", Duration::from_secs(5));
        assert!(client.is_ok());
    }
}
