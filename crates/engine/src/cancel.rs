//! Run cancellation.

use lar_api::RuntimeClient;
use lar_types::{MasterKey, WorkflowRun};
use reqwest::Method;
use tracing::info;

use crate::error::EngineError;
use crate::interact::Interact;
use crate::remote::{MANAGEMENT_ROOT, render_failure_report};

/// Cancel one run of one workflow.
///
/// A single POST to the cancel endpoint; 200 confirms with a notice naming
/// both the run and the workflow, anything else is rendered as a modal
/// failure report and re-raised.
pub async fn cancel_workflow_run(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow_name: &str,
    run: &WorkflowRun,
) -> Result<(), EngineError> {
    let path = format!("{MANAGEMENT_ROOT}/workflows/{workflow_name}/runs/{}/cancel", run.name);
    let builder = client.request_with_key(Method::POST, &path, key).json(&serde_json::json!({}));

    match client.execute(builder).await {
        Ok(_) => {
            info!(workflow = %workflow_name, run = %run.name, "workflow run cancelled");
            ui.notify(&format!(
                "Logic App: cancelled workflow run, {}, on workflow, {workflow_name}.",
                run.name
            ));
            Ok(())
        }
        Err(error) => {
            let error = EngineError::from(error);
            ui.notify_error_modal(&render_failure_report("Logic App: error cancelling workflow run.", &error));
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeUi;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn run(name: &str) -> WorkflowRun {
        serde_json::from_value(json!({ "name": name, "properties": { "status": "Running" } })).unwrap()
    }

    #[tokio::test]
    async fn cancelling_posts_the_cancel_endpoint_with_the_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/runtime/webhooks/workflow/api/management/workflows/wf1/runs/08585287554748615111/cancel",
            ))
            .and(query_param("code", "k"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = RuntimeClient::new(&server.uri()).unwrap();
        let ui = FakeUi::new();
        cancel_workflow_run(&client, &ui, &MasterKey::new("k"), "wf1", &run("08585287554748615111"))
            .await
            .expect("ok");

        let confirmation = ui.notices().pop().expect("confirmation");
        assert!(confirmation.contains("wf1"));
        assert!(confirmation.contains("08585287554748615111"));
    }

    #[tokio::test]
    async fn failed_cancel_raises_and_shows_the_modal_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "error": { "code": "RunNotActive", "message": "The run is already completed." }
            })))
            .mount(&server)
            .await;

        let client = RuntimeClient::new(&server.uri()).unwrap();
        let ui = FakeUi::new();
        let error = cancel_workflow_run(&client, &ui, &MasterKey::new("k"), "wf1", &run("r1"))
            .await
            .expect_err("409");

        assert!(matches!(error, EngineError::Remote(_)));
        assert!(ui.notices().is_empty(), "no success notice on failure");
        let modal = ui.modals().pop().expect("modal report");
        assert!(modal.starts_with("Logic App: error cancelling workflow run."));
        assert!(modal.contains("remote error: The run is already completed."));
    }
}
