use std::io;
use std::path::PathBuf;

use thiserror::Error;

// Message shown in the blocking alert when a commit is rejected.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha todos os campos obrigatórios!";

// Reasons the form cannot be committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("task title is empty")]
    MissingTitle,
    #[error("no priority selected")]
    MissingPriority,
}

impl ValidationFailure {
    // Every variant is surfaced to the user with the same fixed text.
    pub fn user_message(&self) -> &'static str {
        REQUIRED_FIELDS_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not install log subscriber: {0}")]
    Subscriber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_uses_the_fixed_alert_text() {
        for failure in [ValidationFailure::MissingTitle, ValidationFailure::MissingPriority] {
            assert_eq!(failure.user_message(), "Preencha todos os campos obrigatórios!");
        }
    }

    #[test]
    fn log_file_error_names_the_path() {
        let err = AppError::LogFile {
            path: PathBuf::from("/nowhere/taskdesk.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nowhere/taskdesk.log"));
    }
}
