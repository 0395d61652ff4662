//! Workflow and run selection.
//!
//! Both selectors follow the same shape: fetch a list, fail on an empty one,
//! sort by name, hand the labels to the host picker, and resolve the chosen
//! label back to its entity. A dismissed picker resolves to `Ok(None)`, which
//! callers treat as "the user declined" rather than a failure.

use lar_api::RuntimeClient;
use lar_types::{MasterKey, Workflow, WorkflowRun};
use lar_util::date_handling::format_run_start;
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::error::EngineError;
use crate::interact::Interact;
use crate::remote::{MANAGEMENT_ROOT, execute_reported};

#[derive(Debug, Deserialize)]
struct RunListEnvelope {
    #[serde(default)]
    value: Vec<WorkflowRun>,
}

/// List the workflows on the configured runtime and let the user pick one.
///
/// The list is sorted by name (ordinal, case-sensitive, stable for ties) so
/// the picker is deterministic. An empty list, or a response that is not a
/// workflow array, raises `NotFound` after notifying the user.
pub async fn select_workflow(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
) -> Result<Option<Workflow>, EngineError> {
    let path = format!("{MANAGEMENT_ROOT}/workflows");
    let body = execute_reported(client, ui, client.request_with_key(Method::GET, &path, key), "retrieving workflows").await?;

    let mut workflows: Vec<Workflow> = serde_json::from_value(body).unwrap_or_default();
    if workflows.is_empty() {
        let error = EngineError::NotFound("Logic App: no workflows found.".to_string());
        ui.notify_error(&error.to_string());
        return Err(error);
    }
    debug!(count = workflows.len(), "listed workflows");

    workflows.sort_by(|a, b| a.name.cmp(&b.name));
    let labels: Vec<String> = workflows.iter().map(|workflow| workflow.name.clone()).collect();

    let Some(chosen) = ui.pick("Select Logic App", &labels) else {
        return Ok(None);
    };
    Ok(workflows.into_iter().find(|workflow| workflow.name == chosen))
}

/// List the runs of `workflow` and let the user pick one.
///
/// Run labels carry the name, formatted start time, and status as
/// tab-separated columns; resolving the user's choice parses only the
/// leading name segment before the first tab.
pub async fn select_workflow_run(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow: &Workflow,
) -> Result<Option<WorkflowRun>, EngineError> {
    let path = format!("{MANAGEMENT_ROOT}/workflows/{}/runs", workflow.name);
    let body = execute_reported(
        client,
        ui,
        client.request_with_key(Method::GET, &path, key),
        "retrieving workflow runs",
    )
    .await?;

    let mut runs = serde_json::from_value::<RunListEnvelope>(body)
        .map(|envelope| envelope.value)
        .unwrap_or_default();
    if runs.is_empty() {
        let error = EngineError::NotFound("Logic App: no workflow runs found.".to_string());
        ui.notify_error(&error.to_string());
        return Err(error);
    }
    debug!(workflow = %workflow.name, count = runs.len(), "listed workflow runs");

    runs.sort_by(|a, b| a.name.cmp(&b.name));
    let labels: Vec<String> = runs.iter().map(run_label).collect();

    let Some(chosen) = ui.pick("Select Workflow Run", &labels) else {
        return Ok(None);
    };
    let chosen_name = chosen.split('\t').next().unwrap_or_default();
    Ok(runs.into_iter().find(|run| run.name == chosen_name))
}

fn run_label(run: &WorkflowRun) -> String {
    format!(
        "{}\t{}\t{}",
        run.name,
        format_run_start(run.properties.start_time),
        run.properties.status
    )
}
