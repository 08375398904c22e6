use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

const REDACTED: &str = "***";

/// A value that must never show up in logs.
#[derive(Clone, PartialEq, Eq)]
struct Secret(String);

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    Plain(String),
    Secret(Secret),
}

impl Arg {
    fn value(&self) -> &str {
        match self {
            Self::Plain(v) | Self::Secret(Secret(v)) => v,
        }
    }
}

/// An external command line, built up front and handed to a
/// [`CommandRunner`](crate::CommandRunner).
///
/// `Display` renders a shell-like line with secret arguments replaced by `***`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<Arg>,
    stdin: Option<Secret>,
    current_dir: Option<PathBuf>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), stdin: None, current_dir: None }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(arg.into()));
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|a| Arg::Plain(a.into())));
        self
    }

    /// Adds an argument that is passed verbatim but displayed as `***`.
    #[must_use]
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Secret(Secret(arg.into())));
        self
    }

    /// Appends `--flag value` only when `value` is present.
    #[must_use]
    pub fn opt_arg(self, flag: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.arg(flag).arg(v),
            None => self,
        }
    }

    /// Writes `input` to the process stdin, then closes it.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(Secret(input.into()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Real argument values, secrets included. Only for handing to the OS and for tests.
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(Arg::value).collect()
    }

    pub(crate) fn stdin_payload(&self) -> Option<&str> {
        self.stdin.as_ref().map(|s| s.0.as_str())
    }

    /// Program and real arguments joined with spaces, for matching in tests and scripts.
    pub fn unredacted_line(&self) -> String {
        std::iter::once(self.program.as_str()).chain(self.argv()).collect::<Vec<_>>().join(" ")
    }

    pub(crate) fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.args.iter().map(Arg::value));
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            match arg {
                Arg::Plain(v) if v.is_empty() || v.contains(char::is_whitespace) => {
                    write!(f, " '{v}'")?;
                },
                Arg::Plain(v) => write!(f, " {v}")?,
                Arg::Secret(_) => write!(f, " {REDACTED}")?,
            }
        }
        if self.stdin.is_some() {
            write!(f, " <<< {REDACTED}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_redacts_secrets_and_stdin() {
        let cmd = Cmd::new("docker")
            .args(["build", "--build-arg"])
            .secret_arg("KEY=s3cr3t")
            .arg("-t")
            .arg("tool")
            .stdin("password");

        let line = cmd.to_string();
        assert_eq!(line, "docker build --build-arg *** -t tool <<< ***");
        assert!(!format!("{cmd:?}").contains("s3cr3t"));
        assert!(!format!("{cmd:?}").contains("password"));
    }

    #[test]
    fn argv_keeps_real_values() {
        let cmd = Cmd::new("git").arg("push").secret_arg("https://u:t@host/repo.git").arg("1.0.0");
        assert_eq!(cmd.argv(), vec!["push", "https://u:t@host/repo.git", "1.0.0"]);
        assert_eq!(cmd.unredacted_line(), "git push https://u:t@host/repo.git 1.0.0");
    }

    #[test]
    fn optional_flags_are_skipped_when_absent() {
        let with = Cmd::new("aws").opt_arg("--profile", Some("dev"));
        let without = Cmd::new("aws").opt_arg("--profile", None);
        assert_eq!(with.argv(), vec!["--profile", "dev"]);
        assert!(without.argv().is_empty());
    }

    #[test]
    fn whitespace_arguments_are_quoted() {
        let cmd = Cmd::new("echo").arg("two words").arg("");
        assert_eq!(cmd.to_string(), "echo 'two words' ''");
    }
}
