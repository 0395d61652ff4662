use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Logic App workflow as returned by the runtime management list endpoint.
///
/// Workflows are request-scoped: they are deserialized from one list call,
/// drive one interaction, and are then dropped. Nothing here is cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow name; the identifier used in every management API path.
    pub name: String,
    /// Declared triggers keyed by trigger name. Source insertion order is
    /// preserved, and the first entry is the dispatch target.
    #[serde(default)]
    pub triggers: IndexMap<String, TriggerDefinition>,
}

impl Workflow {
    /// Returns the first declared trigger in source order, paired with its
    /// name, or `None` when the workflow declares no triggers at all.
    pub fn first_trigger(&self) -> Option<WorkflowTrigger> {
        self.triggers.first().map(|(name, definition)| WorkflowTrigger {
            name: name.clone(),
            definition: definition.clone(),
        })
    }
}

/// Raw trigger definition as embedded in a workflow document.
///
/// Only the `type` tag is modeled; everything else the runtime attaches
/// (schedules, schemas, connector metadata) is carried opaquely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// The raw `type` tag (e.g. "Recurrence", "Request"). Free-form on the
    /// wire; classify through [`TriggerKind`] before acting on it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Kind-specific metadata carried but not otherwise modeled.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A trigger resolved out of its parent workflow's mapping.
#[derive(Debug, Clone)]
pub struct WorkflowTrigger {
    pub name: String,
    pub definition: TriggerDefinition,
}

impl WorkflowTrigger {
    /// Classifies this trigger's raw `type` tag.
    pub fn kind(&self) -> TriggerKind {
        TriggerKind::classify(self.definition.kind.as_deref())
    }
}

/// Closed classification of a trigger's `type` tag.
///
/// The wire format is an open string; dispatch must not be. Anything that is
/// not a recurrence or request trigger lands in [`TriggerKind::Unknown`] so
/// callers handle it explicitly instead of falling through a string switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    /// Time-based trigger, invoked through its management `run` endpoint.
    Recurrence,
    /// Inbound-call trigger, invoked through a resolved callback URL.
    Request,
    /// Unrecognized tag, with the raw value (empty when the tag was absent).
    Unknown(String),
}

impl TriggerKind {
    /// Case-insensitive classification of a raw `type` tag. A missing tag is
    /// `Unknown("")`.
    pub fn classify(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) if tag.eq_ignore_ascii_case("recurrence") => Self::Recurrence,
            Some(tag) if tag.eq_ignore_ascii_case("request") => Self::Request,
            Some(tag) => Self::Unknown(tag.to_string()),
            None => Self::Unknown(String::new()),
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recurrence => f.write_str("recurrence"),
            Self::Request => f.write_str("request"),
            Self::Unknown(tag) if tag.is_empty() => f.write_str("<missing>"),
            Self::Unknown(tag) => f.write_str(tag),
        }
    }
}

/// One execution of a workflow. Immutable snapshot used for display and as a
/// cancellation target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Run identifier (the long numeric name the runtime assigns).
    pub name: String,
    #[serde(default)]
    pub properties: RunProperties,
}

/// Lifecycle properties of a [`WorkflowRun`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProperties {
    /// Lifecycle status string as reported by the runtime (e.g. "Running",
    /// "Succeeded", "Cancelled").
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub wait_end_time: Option<DateTime<Utc>>,
}

/// Resolved invocation target for a request-type trigger.
///
/// Produced by the `listCallbackUrl` endpoint and used immediately; the URL
/// is signed and short-lived, so descriptors are never cached or reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackDescriptor {
    /// Fully-qualified callback URL. Absent when the runtime declines to
    /// hand one out, which callers must treat as a hard failure.
    #[serde(default)]
    pub value: Option<String>,
    /// HTTP method to invoke the callback with.
    #[serde(default)]
    pub method: Option<String>,
}

impl CallbackDescriptor {
    /// The resolved HTTP method, defaulting to GET when the runtime omits it.
    pub fn method_or_default(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }
}

/// Shared-secret credential authorizing management API calls.
///
/// Held in memory for the duration of a single command invocation and never
/// persisted. `Debug` output is redacted so the key cannot leak into logs.
#[derive(Clone)]
pub struct MasterKey(String);

impl MasterKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key value, for building the `code` query parameter.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}
