//! starter bootstraps projects from template repositories.
//! It checks a template out, asks for the template's variables, runs the
//! template's tasks, and can swap placeholders and values across a checked-out
//! template in both directions.

/// Collecting answers for template questions
pub mod answers;

/// Command-line interface for the `starter` and `starter-replace` binaries
pub mod cli;

/// Template configuration (.starter.yml): questions and tasks
pub mod config;

/// Constants shared across the application
pub mod constants;

/// Placeholder to value mapping and its application to names and contents
pub mod dictionary;

/// Error types and handling for the starter application
pub mod error;

/// Template URL resolution and checkout
pub mod loader;

/// Logger setup shared by the binaries
pub mod logger;

/// Placeholder replacement over a template tree
pub mod processor;

/// Operator interaction
pub mod prompt;

/// Execution of the template's tasks
pub mod tasks;

/// Template variables from flags and the environment
pub mod vars;
