//! External Process Execution
//!
//! Every tool shipyard drives (terraform, ansible-playbook, aws) goes through
//! `CommandRunner`, so adapters can be exercised with a scripted runner.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    /// Start from an empty environment; only `env` is passed through
    pub clear_env: bool,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
            clear_env: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn env_clear(mut self) -> Self {
        self.clear_env = true;
        self
    }

    /// Shell-like rendering for logs. Environment values are never shown.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The subcommand words (program excluded) joined by spaces.
    pub fn line(&self) -> String {
        self.args.join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args.iter().map(OsString::from));
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        if self.clear_env {
            cmd.env_clear();
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Result of a captured run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code with signal deaths mapped to 1.
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }

    /// Stdout followed by stderr; diagnostics may land on either.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// Runs external commands
pub trait CommandRunner {
    /// Run to completion and capture both streams.
    fn capture(&self, command: &ToolCommand) -> io::Result<CommandOutput>;

    /// Run with output shown to the operator; returns the exit code.
    fn stream(&self, command: &ToolCommand) -> io::Result<i32>;
}

/// Runs commands on the local system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    /// Machine-readable output mode: child stdout is redirected to stderr
    /// so it cannot interleave with NDJSON on stdout.
    json: bool,
}

impl SystemRunner {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, command: &ToolCommand) -> io::Result<CommandOutput> {
        let output = command.to_command().stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream(&self, command: &ToolCommand) -> io::Result<i32> {
        let mut cmd = command.to_command();
        cmd.stdin(Stdio::null()).stderr(Stdio::inherit());
        if self.json {
            cmd.stdout(Stdio::from(io::stderr()));
        } else {
            cmd.stdout(Stdio::inherit());
        }
        let status = cmd.status()?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Check that a tool is installed by running `<tool> --version`.
pub fn tool_responds(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted runner for adapter tests

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replies to commands in order and records what was run.
    #[derive(Default)]
    pub struct ScriptedRunner {
        replies: RefCell<VecDeque<CommandOutput>>,
        pub calls: RefCell<Vec<ToolCommand>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, code: i32, stdout: &str, stderr: &str) -> Self {
            self.replies.borrow_mut().push_back(CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            });
            self
        }

        pub fn ok(self) -> Self {
            self.reply(0, "", "")
        }

        pub fn lines(&self) -> Vec<String> {
            self.calls.borrow().iter().map(ToolCommand::line).collect()
        }

        fn next(&self, command: &ToolCommand) -> CommandOutput {
            self.calls.borrow_mut().push(command.clone());
            self.replies.borrow_mut().pop_front().unwrap_or_default()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn capture(&self, command: &ToolCommand) -> io::Result<CommandOutput> {
            Ok(self.next(command))
        }

        fn stream(&self, command: &ToolCommand) -> io::Result<i32> {
            Ok(self.next(command).exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = ToolCommand::new("terraform")
            .arg("state")
            .arg("list")
            .env("TF_IN_AUTOMATION", "1");
        assert_eq!(cmd.display(), "terraform state list");
        assert_eq!(cmd.line(), "state list");
    }

    #[test]
    fn combined_separates_streams_with_newline() {
        let out = CommandOutput {
            code: Some(1),
            stdout: "plan output".into(),
            stderr: "Error: boom\n".into(),
        };
        assert_eq!(out.combined(), "plan output\nError: boom\n");
        assert!(!out.success());
    }

    #[test]
    fn signal_death_maps_to_failure_code() {
        let out = CommandOutput {
            code: None,
            ..Default::default()
        };
        assert_eq!(out.exit_code(), 1);
    }

    #[test]
    fn tool_responds_is_false_for_missing_binary() {
        assert!(!tool_responds("shipyard-definitely-not-installed"));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output_and_code() {
        let out = SystemRunner::default()
            .capture(&ToolCommand::new("sh").args(["-c", "echo hi; echo err >&2; exit 3"]))
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, "hi\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[cfg(unix)]
    #[test]
    fn env_clear_drops_inherited_variables() {
        let out = SystemRunner::default()
            .capture(
                &ToolCommand::new("/bin/sh")
                    .args(["-c", "echo \"${HOME:-unset}:${ONLY}\""])
                    .env_clear()
                    .env("ONLY", "kept"),
            )
            .unwrap();
        assert_eq!(out.stdout.trim(), "unset:kept");
    }
}
