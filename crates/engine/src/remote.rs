//! Shared plumbing for the operations: endpoint paths, the report-then-raise
//! call helper, and the rich failure rendering used by the modal reports.

use std::error::Error as _;

use lar_api::RuntimeClient;
use reqwest::RequestBuilder;
use serde_json::Value;

use crate::error::EngineError;
use crate::interact::Interact;

/// Root of the runtime management API, relative to the configured base URL.
pub(crate) const MANAGEMENT_ROOT: &str = "/runtime/webhooks/workflow/api/management";

/// Admin endpoint serving the default host master key.
pub(crate) const ADMIN_KEYS_PATH: &str = "/admin/host/keys/default";

/// Execute a call, notifying the user on failure before propagating.
///
/// `what` completes the sentence "Logic App: error {what}". Failures are
/// never silent, and never recovered: the notified error is returned so no
/// further step of the calling operation executes.
pub(crate) async fn execute_reported(
    client: &RuntimeClient,
    ui: &dyn Interact,
    builder: RequestBuilder,
    what: &str,
) -> Result<Value, EngineError> {
    match client.execute(builder).await {
        Ok(body) => Ok(body),
        Err(error) => {
            ui.notify_error(&format!("Logic App: error {what}: {error}"));
            Err(error.into())
        }
    }
}

/// Render the rich multi-line failure report used by the modal error
/// surfaces: headline, the error itself, its source chain, and any
/// structured error message from the remote system.
pub(crate) fn render_failure_report(headline: &str, error: &EngineError) -> String {
    let mut report = format!("{headline}\n\n{error}");

    let mut source = error.source();
    while let Some(cause) = source {
        report.push_str(&format!("\n\ncaused by: {cause}"));
        source = cause.source();
    }

    if let Some(remote) = error.remote_message() {
        report.push_str(&format!("\n\nremote error: {remote}"));
    }

    report
}
