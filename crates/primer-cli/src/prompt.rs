//! Terminal adapters for the core's interactive ports.

use primer_core::application::{
    SetupEvent,
    ports::{Prompter, SetupReporter},
};
#[cfg(feature = "interactive")]
use primer_core::{application::ApplicationError, error::PrimerResult};
use tracing::debug;

use crate::error::CliResult;
use crate::output::{OutputManager, Tone};

/// Prints setup progress through the [`OutputManager`].
pub struct OutputReporter {
    output: OutputManager,
}

impl OutputReporter {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl SetupReporter for OutputReporter {
    fn report(&self, event: &SetupEvent) {
        let tone = match event {
            SetupEvent::Committed { .. } | SetupEvent::Retired { .. } => Tone::Note,
            SetupEvent::Completed { .. } => Tone::Heading,
            e if e.is_change() => Tone::Done,
            _ => Tone::Skipped,
        };
        if let Err(e) = self.output.say(tone, &event.to_string()) {
            debug!(error = %e, "Failed to write progress line");
        }
    }
}

/// Asks questions on the terminal with `dialoguer`.
#[cfg(feature = "interactive")]
pub struct DialoguerPrompter;

#[cfg(feature = "interactive")]
impl Prompter for DialoguerPrompter {
    fn ask(&self, prompt: &str) -> PrimerResult<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| {
                ApplicationError::PromptFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

/// The prompter for `--interactive`.
#[cfg(feature = "interactive")]
pub fn terminal_prompter() -> CliResult<Box<dyn Prompter>> {
    Ok(Box::new(DialoguerPrompter))
}

#[cfg(not(feature = "interactive"))]
pub fn terminal_prompter() -> CliResult<Box<dyn Prompter>> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
