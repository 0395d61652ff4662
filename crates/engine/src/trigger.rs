//! Trigger dispatch and the two invocation strategies.
//!
//! The dispatcher takes a workflow's first declared trigger, classifies its
//! kind, and hands off to the matching strategy: recurrence triggers are
//! invoked through their management `run` endpoint, request triggers through
//! a freshly resolved callback URL. Any strategy failure is wrapped in a
//! rich modal-style report before it propagates, because actually invoking a
//! trigger is the highest-stakes action this tool performs.

use lar_api::RuntimeClient;
use lar_types::{CallbackDescriptor, MasterKey, TriggerKind, Workflow, WorkflowTrigger};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::EngineError;
use crate::interact::Interact;
use crate::remote::{MANAGEMENT_ROOT, execute_reported, render_failure_report};

/// Dispatch the workflow's first trigger to the matching invocation strategy.
///
/// A workflow without any trigger is a handled nothing-to-do: the user is
/// told and the function returns `Ok`. An unrecognized trigger kind is a
/// real error; every kind is matched exhaustively so nothing can fall
/// through silently. Strategy failures are re-reported here as a modal
/// rendering of the full error chain, then re-raised.
pub async fn run_trigger(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow: &Workflow,
) -> Result<(), EngineError> {
    let Some(trigger) = workflow.first_trigger() else {
        ui.notify_error(&format!("Logic App: no trigger found for workflow, {}.", workflow.name));
        return Ok(());
    };

    let kind = trigger.kind();
    debug!(workflow = %workflow.name, trigger = %trigger.name, %kind, "dispatching trigger");

    let outcome = match kind {
        TriggerKind::Recurrence => run_recurrence_trigger(client, ui, key, workflow, &trigger).await,
        TriggerKind::Request => run_request_trigger(client, ui, key, workflow, &trigger).await,
        TriggerKind::Unknown(tag) => Err(EngineError::UnsupportedTrigger {
            workflow: workflow.name.clone(),
            trigger: trigger.name.clone(),
            kind: tag,
        }),
    };

    if let Err(error) = outcome {
        ui.notify_error_modal(&render_failure_report("Logic App: error running trigger.", &error));
        return Err(error);
    }
    Ok(())
}

/// Invoke a recurrence trigger directly through its management run endpoint.
pub async fn run_recurrence_trigger(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow: &Workflow,
    trigger: &WorkflowTrigger,
) -> Result<(), EngineError> {
    ui.notify(&format!(
        "Logic App: running trigger, {}, for workflow, {}",
        trigger.name, workflow.name
    ));

    let path = format!("{MANAGEMENT_ROOT}/workflows/{}/triggers/{}/run", workflow.name, trigger.name);
    execute_reported(client, ui, client.request_with_key(Method::POST, &path, key), "running trigger").await?;

    info!(workflow = %workflow.name, trigger = %trigger.name, "recurrence trigger ran");
    ui.notify(&format!(
        "Logic App: successfully ran the trigger, {}, for workflow, {}",
        trigger.name, workflow.name
    ));
    Ok(())
}

/// Invoke a request trigger through its resolved callback URL.
///
/// The callback descriptor is re-resolved on every invocation because the
/// URL is signed and short-lived. When the resolved method is POST, the
/// trigger's JSON schema is fetched and offered as the pre-filled body
/// prompt; dismissing the prompt aborts the whole strategy with no call
/// made. Any other method invokes the callback with no body at all.
pub async fn run_request_trigger(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow: &Workflow,
    trigger: &WorkflowTrigger,
) -> Result<(), EngineError> {
    let callback = resolve_callback(client, ui, key, workflow, trigger).await?;
    let Some(callback_url) = callback.value.clone() else {
        let error = EngineError::NotFound(format!(
            "Logic App: no callback URL returned for trigger, {}, of workflow, {}.",
            trigger.name, workflow.name
        ));
        ui.notify_error(&error.to_string());
        return Err(error);
    };

    let raw_method = callback.method_or_default();
    let method = match Method::from_bytes(raw_method.as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            let error = EngineError::NotFound(format!(
                "Logic App: callback for trigger, {}, resolved to an unusable HTTP method '{raw_method}'.",
                trigger.name
            ));
            ui.notify_error(&error.to_string());
            return Err(error);
        }
    };

    let mut body: Option<Value> = None;
    if method == Method::POST {
        let schema = fetch_post_schema(client, ui, key, workflow, trigger).await?;
        // Serializing a Value back to text cannot fail.
        let initial = serde_json::to_string(&schema).unwrap_or_default();

        let text = match ui.input("Enter post body", "Post JSON", &initial) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(()),
        };
        let parsed = serde_json::from_str(&text).map_err(|source| {
            let error = EngineError::MalformedInput(source);
            ui.notify_error(&format!("Logic App: {error}"));
            error
        })?;
        body = Some(parsed);
    }

    ui.notify(&format!(
        "Logic App: running trigger, {}, for workflow, {}",
        trigger.name, workflow.name
    ));

    let mut builder = client.request_absolute(method, &callback_url);
    if let Some(body) = &body {
        builder = builder.json(body);
    }
    match client.execute(builder).await {
        Ok(_) => {}
        Err(error) => {
            ui.notify_error(&format!("Logic App: error running trigger: {error}"));
            return Err(error.into());
        }
    }

    info!(workflow = %workflow.name, trigger = %trigger.name, "request trigger ran");
    ui.notify(&format!(
        "Logic App: successfully ran the trigger, {}, for workflow, {}",
        trigger.name, workflow.name
    ));
    Ok(())
}

/// Resolve the callback descriptor (URL + method) for a request trigger.
async fn resolve_callback(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow: &Workflow,
    trigger: &WorkflowTrigger,
) -> Result<CallbackDescriptor, EngineError> {
    let path = format!(
        "{MANAGEMENT_ROOT}/workflows/{}/triggers/{}/listCallbackUrl",
        workflow.name, trigger.name
    );
    let body = execute_reported(
        client,
        ui,
        client.request_with_key(Method::POST, &path, key),
        "retrieving trigger callback URL",
    )
    .await?;

    Ok(serde_json::from_value(body).unwrap_or(CallbackDescriptor {
        value: None,
        method: None,
    }))
}

/// Fetch the JSON schema template offered as the POST body starting point.
async fn fetch_post_schema(
    client: &RuntimeClient,
    ui: &dyn Interact,
    key: &MasterKey,
    workflow: &Workflow,
    trigger: &WorkflowTrigger,
) -> Result<Value, EngineError> {
    let path = format!(
        "{MANAGEMENT_ROOT}/workflows/{}/triggers/{}/schemas/json",
        workflow.name, trigger.name
    );
    execute_reported(
        client,
        ui,
        client.request_with_key(Method::GET, &path, key),
        "retrieving trigger JSON post schema",
    )
    .await
}
