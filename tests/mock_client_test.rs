#[cfg(feature = "mock")]
mod mock_tests {
    use lastfm_api::{complete_auth, LastFmApi, LastFmError, MockLastFmApi, Result};
    use mockall::predicate::*;
    use mockall::Sequence;
    use serde_json::json;
    use std::collections::HashMap;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn test_mock_call() -> Result<()> {
        let mut mock_client = MockLastFmApi::new();

        mock_client
            .expect_call()
            .with(
                eq("artist"),
                eq("getInfo"),
                eq(vec![("artist".to_string(), "Cher".to_string())]),
            )
            .times(1)
            .returning(|_, _, _| Ok(Some(json!({"status": "ok", "Artist": {"name": "Cher"}}))));

        let client: &mut dyn LastFmApi = &mut mock_client;
        let payload = client
            .call(
                "artist",
                "getInfo",
                vec![("artist".to_string(), "Cher".to_string())],
            )
            .await?
            .unwrap();

        assert_eq!(payload["Artist"]["name"], "Cher");
        Ok(())
    }

    #[tokio::test]
    async fn test_complete_auth_catches_then_fetches() -> Result<()> {
        let mut mock_client = MockLastFmApi::new();
        let mut seq = Sequence::new();

        mock_client
            .expect_catch_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|query| Ok(query["token"].clone()));
        mock_client
            .expect_fetch_session()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("session-key".to_string()));

        let mut callback = HashMap::new();
        callback.insert("token".to_string(), TOKEN.to_string());

        let key = complete_auth(&mut mock_client, &callback).await?;
        assert_eq!(key, "session-key");
        Ok(())
    }

    #[tokio::test]
    async fn test_complete_auth_stops_on_bad_token() {
        let mut mock_client = MockLastFmApi::new();

        mock_client
            .expect_catch_token()
            .times(1)
            .returning(|_| Err(LastFmError::EmptyCallbackToken));
        mock_client.expect_fetch_session().never();

        let mut callback = HashMap::new();
        callback.insert("token".to_string(), String::new());

        let err = complete_auth(&mut mock_client, &callback).await.unwrap_err();
        assert!(matches!(err, LastFmError::EmptyCallbackToken));
    }

    #[test]
    fn test_mock_api_methods() {
        let mut mock_client = MockLastFmApi::new();

        mock_client
            .expect_api_methods()
            .with(eq("track"), eq(Some(true)))
            .returning(|_, _| Ok(vec!["addTags", "love"]));
        mock_client
            .expect_login_url()
            .returning(|| "http://www.last.fm/api/auth/?api_key=key".to_string());

        let client: &dyn LastFmApi = &mock_client;
        assert_eq!(
            client.api_methods("track", Some(true)).unwrap(),
            vec!["addTags", "love"]
        );
        assert!(client.login_url().ends_with("api_key=key"));
    }
}
