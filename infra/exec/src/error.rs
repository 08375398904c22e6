use std::borrow::Cow;

/// Errors raised while running external commands.
#[bix_derive::bix_error]
pub enum ExecError {
    /// The program could not be started (not installed, not on `PATH`, no permission).
    #[error("Failed to execute command{}: {source}", format_context(.context))]
    Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The program ran and exited unsuccessfully.
    #[error("Command `{command}` failed with {status}{}", format_context(.context))]
    Failed { command: String, status: String, context: Option<Cow<'static, str>> },

    #[error("Internal exec error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
