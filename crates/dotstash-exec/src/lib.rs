use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Captured result of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one external command to completion and captures its output.
///
/// Implementations take the program and its arguments as an argv array;
/// nothing above this boundary builds shell strings or branches on the
/// platform. No retry, no timeout: a hung child hangs the caller.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// `CommandRunner` backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let rendered = render_command_line(program, args);
        debug!(command = %rendered, "invoking external command");

        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to launch external command: {rendered}"))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Single-line rendering of an argv array, for logs and error messages.
pub fn render_command_line(program: &str, args: &[String]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
