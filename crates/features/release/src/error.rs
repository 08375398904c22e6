use bix_exec::ExecError;
use std::borrow::Cow;

/// Error types raised by the release tasks.
#[bix_derive::bix_error]
pub enum TaskError {
    /// An external command could not start or exited unsuccessfully.
    #[error("Task step failed{}: {source}", format_context(.context))]
    Exec { source: ExecError, context: Option<Cow<'static, str>> },

    #[error("Filesystem error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The version tag is already present in a release repository.
    #[error("{image} has already been released. Please BUMP THE VERSION{}", format_context(.context))]
    AlreadyReleased { image: String, context: Option<Cow<'static, str>> },

    /// A directory the task would clear does not lie strictly inside the project.
    #[error("Refusing to clear `{path}`: not a relative path inside the project{}", format_context(.context))]
    UnsafePath { path: String, context: Option<Cow<'static, str>> },

    #[error("Missing environment variable `{name}`{}", format_context(.context))]
    MissingEnv { name: String, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal task error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
