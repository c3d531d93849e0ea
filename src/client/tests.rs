//! Tests for client module

#[cfg(test)]
mod tests {
    use crate::client::{HttpTransport, MockReply, MockTransport, Request};
    use crate::error::GeoError;
    use serde_json::json;
    use std::time::{Duration, Instant};

    #[test]
    fn test_request_describe() {
        let req = Request::json("https://api.example.com/rates")
            .param("base", "USD")
            .param("format", "json");
        assert_eq!(req.describe(), "https://api.example.com/rates?base=USD&format=json");
        assert_eq!(req.accept, "application/json");
    }

    #[test]
    fn test_xml_request_accept() {
        let req = Request::xml("https://news.google.com/rss");
        assert!(req.accept.contains("rss+xml"));
        assert!(req.query.is_empty());
    }

    #[tokio::test]
    async fn test_mock_routes_body() {
        let mock = MockTransport::new().route("rates", MockReply::Body("ok".to_string()));
        let body = mock.get(&Request::json("https://x/rates")).await.unwrap();
        assert_eq!(body, "ok");
        assert_eq!(mock.call_count("rates"), 1);
    }

    #[tokio::test]
    async fn test_mock_first_route_wins() {
        let mock = MockTransport::new()
            .route("a", MockReply::Body("first".to_string()))
            .route("ab", MockReply::Body("second".to_string()));
        let body = mock.get(&Request::json("https://x/ab")).await.unwrap();
        assert_eq!(body, "first");
    }

    #[tokio::test]
    async fn test_mock_unrouted_is_transport_failure() {
        let mock = MockTransport::new();
        let err = mock
            .get(&Request::json("https://nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::Connection(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_mock_status_codes() {
        let mock = MockTransport::new()
            .route("limited", MockReply::Status(429))
            .route("auth", MockReply::Status(401));

        let err = mock
            .get(&Request::json("https://x/limited"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::RateLimited { .. }));

        let err = mock
            .get(&Request::json("https://x/auth"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_mock_json_reply() {
        let mock = MockTransport::new().route(
            "latest/EUR",
            MockReply::json(json!({ "base": "EUR", "rates": { "USD": 1.09 } })),
        );
        let body = mock
            .get(&Request::json("https://x/latest/EUR"))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["rates"]["USD"], json!(1.09));
    }

    #[tokio::test]
    async fn test_mock_delay_applies_to_every_reply() {
        let mock = MockTransport::new()
            .route("slow", MockReply::Status(503))
            .with_delay(Duration::from_millis(40));

        let started = Instant::now();
        let err = mock
            .get(&Request::json("https://x/slow"))
            .await
            .unwrap_err();
        assert!(started.elapsed() >= Duration::from_millis(40));
        assert!(matches!(err, GeoError::Status { status: 503, .. }));
    }
}
