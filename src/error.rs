use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::Report(err) => err.to_string(),
            Self::InputNotFound(path) => format!("Input file not found: {}", path.display()),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Names the file an operation failed on
pub trait FileContext<T> {
    /// Prefix an error with `Failed to <action> <path>`
    fn for_file(self, action: &str, path: &Path) -> Result<T>;
}

impl<T, E> FileContext<T> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn for_file(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|err| {
            let err: CliError = err.into();
            err.with_context(format!("Failed to {} {}", action, path.display()))
        })
    }
}
