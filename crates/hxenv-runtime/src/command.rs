use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use hxenv_error::{Result, ToolchainError};

/// Everything a command needs from the run: the fully composed environment
/// and where it executes. Handed to deferred producers at execution time.
pub struct RunContext {
    pub env: HashMap<String, String>,
    pub install_root: PathBuf,
    pub working_dir: Option<PathBuf>,
}

/// One step of a command sequence. Deferred producers are evaluated lazily
/// with the run's context and may yield nothing to skip the step.
pub enum CommandSpec {
    /// Argument vector, spawned directly.
    Argv(Vec<String>),
    /// One line handed to the platform shell.
    Shell(String),
    Deferred(Box<dyn FnOnce(&RunContext) -> Option<CommandSpec>>),
}

impl CommandSpec {
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Argv(args.into_iter().map(Into::into).collect())
    }

    /// Collapses deferred producers into a literal invocation, or `None`
    /// when the step asks to be skipped.
    pub fn resolve(self, ctx: &RunContext) -> Option<Self> {
        match self {
            Self::Deferred(producer) => producer(ctx).and_then(|spec| spec.resolve(ctx)),
            literal => Some(literal),
        }
    }

    /// Space-joined rendering, as used in logs and export scripts.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Argv(argv) => argv.join(" "),
            Self::Shell(line) => line.clone(),
            Self::Deferred(_) => "<deferred>".to_string(),
        }
    }
}

/// Runs the commands strictly in order inside the composed environment,
/// with stdin/stdout/stderr inherited from this process. Stops at the
/// first nonzero exit and surfaces that exact code.
pub fn run_commands(commands: Vec<CommandSpec>, ctx: &RunContext) -> Result<()> {
    for spec in commands {
        let Some(spec) = spec.resolve(ctx) else {
            continue;
        };
        let shown = spec.display();

        let mut command = match &spec {
            CommandSpec::Argv(argv) => {
                let Some((program, args)) = argv.split_first() else {
                    continue;
                };
                let mut command = Command::new(program);
                command.args(args);
                command
            }
            CommandSpec::Shell(line) => {
                // The shell resolves the program against the composed PATH.
                if cfg!(target_os = "windows") {
                    let mut command = Command::new("cmd");
                    command.args(["/C", line]);
                    command
                } else {
                    let mut command = Command::new("sh");
                    command.args(["-c", line]);
                    command
                }
            }
            CommandSpec::Deferred(_) => continue,
        };

        hxenv_logger::shell(&shown);
        command.env_clear().envs(&ctx.env);
        if let Some(dir) = &ctx.working_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .map_err(|e| ToolchainError::Io(format!("could not start '{shown}': {e}")))?;
        let code = status.code().unwrap_or(1);
        if code != 0 {
            return Err(ToolchainError::CommandFailed(shown, code));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ctx(root: &std::path::Path) -> RunContext {
        RunContext {
            env: std::env::vars().collect(),
            install_root: root.to_path_buf(),
            working_dir: Some(root.to_path_buf()),
        }
    }

    #[test]
    fn test_successful_sequence_runs_all_commands() {
        let root = tempfile::tempdir().unwrap();
        let ctx = test_ctx(root.path());

        run_commands(
            vec![
                CommandSpec::Shell("touch first".to_string()),
                CommandSpec::Shell("touch second".to_string()),
            ],
            &ctx,
        )
        .unwrap();

        assert!(root.path().join("first").is_file());
        assert!(root.path().join("second").is_file());
    }

    #[test]
    fn test_failure_stops_the_sequence_with_its_code() {
        let root = tempfile::tempdir().unwrap();
        let ctx = test_ctx(root.path());

        let err = run_commands(
            vec![
                CommandSpec::Shell("exit 7".to_string()),
                CommandSpec::Shell("touch never".to_string()),
            ],
            &ctx,
        )
        .unwrap_err();

        assert!(matches!(err, ToolchainError::CommandFailed(_, 7)));
        assert!(!root.path().join("never").exists());
    }

    #[test]
    fn test_argv_commands_spawn_directly() {
        let root = tempfile::tempdir().unwrap();
        let ctx = test_ctx(root.path());

        run_commands(vec![CommandSpec::argv(["touch", "made-by-argv"])], &ctx).unwrap();
        assert!(root.path().join("made-by-argv").is_file());
    }

    #[test]
    fn test_deferred_commands_see_the_context() {
        let root = tempfile::tempdir().unwrap();
        let ctx = test_ctx(root.path());

        run_commands(
            vec![CommandSpec::Deferred(Box::new(|ctx: &RunContext| {
                let marker = ctx.install_root.join("from-deferred");
                Some(CommandSpec::Argv(vec![
                    "touch".to_string(),
                    marker.display().to_string(),
                ]))
            }))],
            &ctx,
        )
        .unwrap();

        assert!(root.path().join("from-deferred").is_file());
    }

    #[test]
    fn test_deferred_commands_can_skip() {
        let root = tempfile::tempdir().unwrap();
        let ctx = test_ctx(root.path());

        run_commands(
            vec![
                CommandSpec::Deferred(Box::new(|_: &RunContext| None)),
                CommandSpec::Shell("touch still-runs".to_string()),
            ],
            &ctx,
        )
        .unwrap();

        assert!(root.path().join("still-runs").is_file());
    }

    #[test]
    fn test_commands_run_inside_the_composed_environment() {
        let root = tempfile::tempdir().unwrap();
        let mut ctx = test_ctx(root.path());
        ctx.env
            .insert("TOOLCHAIN_MARKER".to_string(), "present".to_string());

        run_commands(
            vec![CommandSpec::Shell(
                "test \"$TOOLCHAIN_MARKER\" = present".to_string(),
            )],
            &ctx,
        )
        .unwrap();
    }
}
