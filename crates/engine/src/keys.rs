//! Master key retrieval.

use lar_api::RuntimeClient;
use lar_types::MasterKey;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::interact::Interact;
use crate::remote::ADMIN_KEYS_PATH;

/// Fetch the management master key that authorizes all subsequent calls.
///
/// The key is held in memory for the duration of one command invocation and
/// never cached across commands. A failed call or a 200 response without the
/// expected `value` field both fail authorization; either way the user is
/// notified here before the error propagates.
pub async fn get_master_key(client: &RuntimeClient, ui: &dyn Interact) -> Result<MasterKey, EngineError> {
    debug!("retrieving master key");

    let builder = client.request(Method::GET, ADMIN_KEYS_PATH);
    let body = match client.execute(builder).await {
        Ok(body) => body,
        Err(error) => {
            let error = EngineError::Authorization(error);
            ui.notify_error(&format!("Logic App: error retrieving master key: {error}"));
            return Err(error);
        }
    };

    match body.get("value").and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(MasterKey::new(value)),
        _ => {
            let error = EngineError::MissingKeyValue;
            ui.notify_error(&format!("Logic App: error retrieving master key: {error}"));
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeUi;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_the_key_value_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/host/keys/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "value": "master-123" })))
            .mount(&server)
            .await;

        let client = RuntimeClient::new(&server.uri()).unwrap();
        let ui = FakeUi::new();
        let key = get_master_key(&client, &ui).await.expect("key");
        assert_eq!(key.expose(), "master-123");
        assert!(ui.errors().is_empty());
    }

    #[tokio::test]
    async fn missing_value_field_fails_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/host/keys/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "default" })))
            .mount(&server)
            .await;

        let client = RuntimeClient::new(&server.uri()).unwrap();
        let ui = FakeUi::new();
        let error = get_master_key(&client, &ui).await.expect_err("no value field");
        assert!(matches!(error, EngineError::MissingKeyValue));
        assert_eq!(ui.errors().len(), 1);
    }

    #[tokio::test]
    async fn non_200_fails_authorization_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/host/keys/default"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = RuntimeClient::new(&server.uri()).unwrap();
        let ui = FakeUi::new();
        let error = get_master_key(&client, &ui).await.expect_err("401");
        assert!(matches!(error, EngineError::Authorization(_)));
        assert!(ui.notices().is_empty(), "no success notice on failure");
        assert_eq!(ui.errors().len(), 1);
    }
}
