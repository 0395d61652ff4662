//! # logicapp-runner engine
//!
//! The interactive operations behind the two user commands: trigger a Logic
//! App workflow and cancel a workflow run. Every operation is a short
//! sequential procedure over the runtime management API:
//!
//! - **`keys`**: fetch the management master key that authorizes everything else
//! - **`select`**: list workflows or runs and let the user pick one
//! - **`trigger`**: classify a workflow's first trigger and invoke it through
//!   the matching strategy (recurrence run endpoint, or resolved callback URL)
//! - **`cancel`**: cancel one run of one workflow
//!
//! Host-UI concerns (notifications, the single-choice picker, the free-text
//! input box) are injected through [`Interact`], so the operations run
//! headless under test. Nothing here caches or persists anything: each
//! command invocation resolves its key and targets from scratch and drops
//! them when it completes.

pub mod cancel;
pub mod error;
pub mod interact;
pub mod keys;
pub mod select;
pub mod trigger;

mod remote;

pub use cancel::cancel_workflow_run;
pub use error::EngineError;
pub use interact::Interact;
pub use keys::get_master_key;
pub use select::{select_workflow, select_workflow_run};
pub use trigger::run_trigger;

#[cfg(test)]
pub(crate) mod testing;
