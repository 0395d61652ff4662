//! Terminal implementation of the engine's host-UI capabilities.
//!
//! Notifications go to stdout/stderr; the picker and the body prompt are
//! dialoguer widgets. Prompt I/O failures (no TTY, closed stdin) are treated
//! as dismissal after a warning, since declining is the one recoverable
//! outcome the operations define.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use lar_engine::Interact;
use tracing::warn;

#[derive(Default)]
pub struct ConsoleUi {
    theme: ColorfulTheme,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Interact for ConsoleUi {
    fn notify(&self, message: &str) {
        println!("{message}");
    }

    fn notify_error(&self, message: &str) {
        eprintln!("{message}");
    }

    fn notify_error_modal(&self, message: &str) {
        // The closest terminal equivalent of a modal: a fenced block that
        // stands out from the notification stream.
        eprintln!();
        eprintln!("{}", "=".repeat(72));
        eprintln!("{message}");
        eprintln!("{}", "=".repeat(72));
    }

    fn pick(&self, placeholder: &str, labels: &[String]) -> Option<String> {
        match Select::with_theme(&self.theme)
            .with_prompt(placeholder)
            .items(labels)
            .default(0)
            .interact_opt()
        {
            Ok(choice) => choice.and_then(|index| labels.get(index).cloned()),
            Err(dialoguer_error) => {
                warn!(error = %dialoguer_error, "picker unavailable; treating as dismissal");
                None
            }
        }
    }

    fn input(&self, prompt: &str, title: &str, initial: &str) -> Option<String> {
        println!("{title}");
        match Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
        {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(dialoguer_error) => {
                warn!(error = %dialoguer_error, "input prompt unavailable; treating as dismissal");
                None
            }
        }
    }
}
