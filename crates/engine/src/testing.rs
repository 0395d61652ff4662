//! Scripted in-memory host surface for operation tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::interact::Interact;

/// One scripted answer for a picker invocation.
pub(crate) enum PickScript {
    /// Dismiss the picker without choosing.
    Dismiss,
    /// Choose the label at this index of the presented list.
    Choose(usize),
}

/// An [`Interact`] that replays scripted answers and records everything it
/// was shown. Unscripted picker or prompt invocations count as dismissals.
#[derive(Default)]
pub(crate) struct FakeUi {
    picks: Mutex<VecDeque<PickScript>>,
    inputs: Mutex<VecDeque<Option<String>>>,
    notices: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    modals: Mutex<Vec<String>>,
    picker_labels: Mutex<Vec<Vec<String>>>,
    input_prompts: Mutex<Vec<(String, String)>>,
}

impl FakeUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(self, scripts: impl IntoIterator<Item = PickScript>) -> Self {
        self.picks.lock().unwrap().extend(scripts);
        self
    }

    pub fn with_inputs(self, scripts: impl IntoIterator<Item = Option<String>>) -> Self {
        self.inputs.lock().unwrap().extend(scripts);
        self
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn modals(&self) -> Vec<String> {
        self.modals.lock().unwrap().clone()
    }

    /// The label lists handed to the picker, in invocation order.
    pub fn picker_labels(&self) -> Vec<Vec<String>> {
        self.picker_labels.lock().unwrap().clone()
    }

    /// The `(prompt, initial)` pairs handed to the input box.
    pub fn input_prompts(&self) -> Vec<(String, String)> {
        self.input_prompts.lock().unwrap().clone()
    }
}

impl Interact for FakeUi {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn notify_error_modal(&self, message: &str) {
        self.modals.lock().unwrap().push(message.to_string());
    }

    fn pick(&self, _placeholder: &str, labels: &[String]) -> Option<String> {
        self.picker_labels.lock().unwrap().push(labels.to_vec());
        match self.picks.lock().unwrap().pop_front() {
            Some(PickScript::Choose(index)) => labels.get(index).cloned(),
            Some(PickScript::Dismiss) | None => None,
        }
    }

    fn input(&self, prompt: &str, _title: &str, initial: &str) -> Option<String> {
        self.input_prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), initial.to_string()));
        self.inputs.lock().unwrap().pop_front().flatten()
    }
}
