use hxenv_error::ToolchainError;

fn main() {
    if let Err(err) = hxenv_cli::run_cli() {
        hxenv_logger::error(&err.to_string());
        let code = err
            .downcast_ref::<ToolchainError>()
            .map_or(1, ToolchainError::exit_code);
        std::process::exit(code);
    }
}
