use hxenv_env::{EnvOverlay, PATH_VAR};

use crate::command::{CommandSpec, RunContext};

/// Shell flavor an export script is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellDialect {
    /// `export NAME=value`, `${PATH}` continuation.
    Sh,
    /// `set NAME=value`, `%PATH%` continuation.
    Cmd,
    /// `NAME:value`, no continuation token. Neutral fallback.
    Plain,
}

impl ShellDialect {
    fn assignment(self, name: &str, value: &str) -> String {
        match self {
            Self::Sh => format!("export {name}={value}"),
            Self::Cmd => format!("set {name}={value}"),
            Self::Plain => format!("{name}:{value}"),
        }
    }

    fn path_token(self) -> Option<&'static str> {
        match self {
            Self::Sh => Some("${PATH}"),
            Self::Cmd => Some("%PATH%"),
            Self::Plain => None,
        }
    }

    fn separator(self) -> char {
        match self {
            Self::Cmd => ';',
            Self::Sh | Self::Plain => ':',
        }
    }
}

/// Projects the composed state into script text: one assignment per overlay
/// variable, a PATH line appending the dialect's existing-PATH token, then
/// the pending command lines. Runs nothing; deferred commands are evaluated
/// only to obtain their final rendering.
#[must_use]
pub fn render_script(
    overlay: &EnvOverlay,
    commands: Vec<CommandSpec>,
    ctx: &RunContext,
    dialect: ShellDialect,
) -> String {
    let mut lines = Vec::new();

    for (name, value) in overlay.vars() {
        lines.push(dialect.assignment(name, &value.display().to_string()));
    }

    let mut path = overlay.joined_path(dialect.separator());
    if let Some(token) = dialect.path_token() {
        if !path.is_empty() {
            path.push(dialect.separator());
        }
        path.push_str(token);
    }
    lines.push(dialect.assignment(PATH_VAR, &path));

    for spec in commands {
        if let Some(resolved) = spec.resolve(ctx) {
            lines.push(resolved.display());
        }
    }

    let mut script = lines.join("\n");
    script.push('\n');
    script
}
