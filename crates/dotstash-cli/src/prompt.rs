use inquire::Confirm;

/// Yes/no gate in front of destructive batch operations.
pub(crate) trait ConfirmPrompt {
    fn confirm(&self, prompt: &str) -> bool;
}

pub(crate) struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        // A prompt that cannot be shown (no interactive terminal) counts as
        // a decline.
        Confirm::new(prompt)
            .with_default(true)
            .prompt()
            .unwrap_or(false)
    }
}
