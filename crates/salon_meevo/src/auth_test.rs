#[cfg(test)]
mod tests {
    use crate::auth::{
        AccessToken, ClientCredentialsExchange, TokenCache, TokenExchange, MAX_TOKEN_LIFETIME,
    };
    use crate::error::MeevoError;
    use async_trait::async_trait;
    use salon_config::MeevoConfig;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MARGIN: Duration = Duration::from_secs(300);

    // Hands out token-1, token-2, ... and counts how often it was asked
    struct CountingExchange {
        calls: Arc<AtomicUsize>,
        lifetime: Duration,
        delay: Duration,
        fail: bool,
    }

    #[async_trait]
    impl TokenExchange for CountingExchange {
        async fn exchange(&self) -> Result<AccessToken, MeevoError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(MeevoError::Auth("denied".to_string()));
            }
            Ok(AccessToken {
                token: format!("token-{}", n),
                lifetime: self.lifetime,
            })
        }
    }

    fn cache_with(lifetime: Duration, delay: Duration, fail: bool) -> (TokenCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let exchange = CountingExchange {
            calls: calls.clone(),
            lifetime,
            delay,
            fail,
        };
        (TokenCache::new(Box::new(exchange), MARGIN), calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_reused_within_validity() {
        let (cache, calls) = cache_with(Duration::from_secs(3600), Duration::ZERO, false);

        let first = cache.get_token().await.unwrap();
        let second = cache.get_token().await.unwrap();

        assert_eq!(first, "token-1");
        assert_eq!(second, "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_refreshed_once_inside_safety_margin() {
        let (cache, calls) = cache_with(Duration::from_secs(3600), Duration::ZERO, false);
        assert_eq!(cache.get_token().await.unwrap(), "token-1");

        // One second before the margin starts
        tokio::time::advance(Duration::from_secs(3299)).await;
        assert_eq!(cache.get_token().await.unwrap(), "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Inside the margin
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get_token().await.unwrap(), "token-2");
        assert_eq!(cache.get_token().await.unwrap(), "token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_refresh() {
        let (cache, calls) = cache_with(
            Duration::from_secs(3600),
            Duration::from_millis(100),
            false,
        );
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_token().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "token-1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_exchange_is_not_cached() {
        let (cache, calls) = cache_with(Duration::from_secs(3600), Duration::ZERO, true);

        assert_eq!(
            cache.get_token().await,
            Err(MeevoError::Auth("denied".to_string()))
        );
        assert!(cache.get_token().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifetime_shorter_than_margin_is_never_reused() {
        let (cache, calls) = cache_with(Duration::from_secs(60), Duration::ZERO, false);

        assert_eq!(cache.get_token().await.unwrap(), "token-1");
        assert_eq!(cache.get_token().await.unwrap(), "token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_lifetime_is_capped() {
        let (cache, calls) = cache_with(Duration::from_secs(u64::MAX), Duration::ZERO, false);

        assert_eq!(cache.get_token().await.unwrap(), "token-1");
        assert_eq!(cache.get_token().await.unwrap(), "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Refreshed once the capped lifetime runs into the margin
        tokio::time::advance(MAX_TOKEN_LIFETIME - MARGIN).await;
        assert_eq!(cache.get_token().await.unwrap(), "token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_lifetime_is_rejected() {
        let (cache, calls) = cache_with(Duration::ZERO, Duration::ZERO, false);

        assert_eq!(
            cache.get_token().await,
            Err(MeevoError::Auth(
                "Malformed token response: expires_in is 0".to_string()
            ))
        );
        assert!(cache.get_token().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    fn meevo_config(auth_url: String) -> MeevoConfig {
        MeevoConfig {
            auth_url,
            api_url: "http://unused.test/publicapi/v1".to_string(),
            client_id: "client-1".to_string(),
            client_secret: "secret-1".to_string(),
            tenant_id: "4".to_string(),
            location_id: "5".to_string(),
            request_timeout_secs: 5,
            token_safety_margin_secs: 300,
            strict_service_ids: false,
        }
    }

    #[tokio::test]
    async fn test_client_credentials_exchange_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_json(json!({"client_id": "client-1", "client_secret": "secret-1"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "abc", "expires_in": 3600})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let exchange = ClientCredentialsExchange::new(
            reqwest::Client::new(),
            &meevo_config(format!("{}/oauth2/token", server.uri())),
        );

        let token = exchange.exchange().await.unwrap();
        assert_eq!(
            token,
            AccessToken {
                token: "abc".to_string(),
                lifetime: Duration::from_secs(3600),
            }
        );
    }

    #[tokio::test]
    async fn test_client_credentials_exchange_structured_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "Invalid client credentials"}})),
            )
            .mount(&server)
            .await;

        let exchange = ClientCredentialsExchange::new(
            reqwest::Client::new(),
            &meevo_config(format!("{}/oauth2/token", server.uri())),
        );

        assert_eq!(
            exchange.exchange().await,
            Err(MeevoError::Auth("Invalid client credentials".to_string()))
        );
    }

    #[tokio::test]
    async fn test_client_credentials_exchange_unstructured_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let exchange = ClientCredentialsExchange::new(
            reqwest::Client::new(),
            &meevo_config(format!("{}/oauth2/token", server.uri())),
        );

        assert_eq!(
            exchange.exchange().await,
            Err(MeevoError::Auth(
                "Token request failed with status code 500".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_client_credentials_exchange_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
            .mount(&server)
            .await;

        let exchange = ClientCredentialsExchange::new(
            reqwest::Client::new(),
            &meevo_config(format!("{}/oauth2/token", server.uri())),
        );

        match exchange.exchange().await {
            Err(MeevoError::Auth(message)) => {
                assert!(message.starts_with("Malformed token response"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
