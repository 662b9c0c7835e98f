pub mod command;
pub mod export;

pub use command::{CommandSpec, RunContext, run_commands};
pub use export::{ShellDialect, render_script};
