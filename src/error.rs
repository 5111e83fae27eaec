//! Error handling for the starter application.
//! Defines custom error types and results used throughout the application.

use std::path::PathBuf;

use thiserror::Error;

/// Custom error types for starter operations.
///
/// Rename and content failures are kept as separate variants: the tree walk
/// records a [`Error::RenameError`] and carries on, while a
/// [`Error::ContentError`] stops it.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors in the template configuration document
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The template configuration document could not be found
    #[error("{config_file} does not exist in '{dir}', is this a template directory?")]
    ConfigNotFoundError { config_file: String, dir: String },

    /// A question carries a validation pattern that is not a valid regular expression
    #[error("Unable to parse regexp for variable '{name}', questions file is invalid: {source}.")]
    PatternError {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The operator's input stream ended while an answer was expected
    #[error("Input stream closed while waiting for '{name}'.")]
    InputClosedError { name: String },

    /// A path could not be renamed; the walk continues
    #[error("Unable to rename path '{}' to '{}': {source}.", from.display(), to.display())]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's content could not be read or written; the walk stops
    #[error("Unable to update file '{}': {source}.", path.display())]
    ContentError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template reference or destination is unusable
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Cloning the template repository failed
    #[error("Unable to clone template repository '{url}': {source}.")]
    CheckoutError {
        url: String,
        #[source]
        source: git2::Error,
    },

    /// A task could not be started or exited with a failure
    #[error("Task '{command}' failed: {reason}.")]
    TaskError { command: String, reason: String },

    /// Errors from the terminal prompt
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
