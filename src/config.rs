//! Configuration handling for starter templates.
//! This module loads the `.starter.yml` document describing the questions to
//! ask and the tasks to run once they are answered.

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// A single question from the template configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Question {
    /// Variable the answer is stored under
    pub name: String,
    /// Text shown to the operator
    pub message: String,
    /// Used when the operator submits an empty answer
    #[serde(deserialize_with = "scalar_or_empty")]
    pub default: String,
    /// Optional regular expression the answer must contain a match of
    #[serde(rename = "regexp", deserialize_with = "empty_as_none")]
    pub pattern: Option<String>,
    /// Shown when an answer fails validation
    #[serde(rename = "validation_msg")]
    pub validation_message: String,
    /// Extra explanation shown before reading the answer
    #[serde(rename = "help_msg")]
    pub help_message: String,
}

/// Both spellings accepted for a task command in the configuration file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommandForm {
    Line(String),
    Tokens(Vec<String>),
}

/// An executable followed by its arguments.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CommandForm")]
pub struct Command(pub Vec<String>);

impl From<CommandForm> for Command {
    fn from(form: CommandForm) -> Self {
        match form {
            CommandForm::Line(line) => Command(line.split_whitespace().map(String::from).collect()),
            CommandForm::Tokens(tokens) => Command(tokens),
        }
    }
}

impl Command {
    /// Executable name, if the command has one.
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Everything after the executable.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub command: Command,
}

/// Parsed `.starter.yml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

// Scalars are accepted as text, so `default: 8080` reads as "8080".
fn scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        serde_yaml::Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!("expected a scalar, found {other:?}"))),
    }
}

fn scalar_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar(deserializer)?.filter(|pattern| !pattern.is_empty()))
}

impl Config {
    /// Parses and validates configuration content.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the document is malformed, a task command is
    ///   empty, or a question name is empty or repeated
    /// * `Error::PatternError` if a question's `regexp` does not compile
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document is a template without questions or tasks.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for question in &self.questions {
            if question.name.is_empty() {
                return Err(Error::ConfigError(format!(
                    "question '{}' has no name",
                    question.message
                )));
            }
            if !names.insert(question.name.as_str()) {
                return Err(Error::ConfigError(format!(
                    "question '{}' is defined more than once",
                    question.name
                )));
            }
            if let Some(pattern) = &question.pattern {
                Regex::new(pattern).map_err(|source| Error::PatternError {
                    name: question.name.clone(),
                    source,
                })?;
            }
        }

        for (index, task) in self.tasks.iter().enumerate() {
            if task.command.program().map_or(true, str::is_empty) {
                return Err(Error::ConfigError(format!(
                    "task #{} has an empty command, check your {CONFIG_FILE}",
                    index + 1
                )));
            }
        }

        Ok(())
    }
}

/// Loads the configuration document from `path`.
///
/// # Errors
/// * `Error::ConfigNotFoundError` if the document does not exist
/// * Any error from [`Config::parse`]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigNotFoundError {
            config_file: CONFIG_FILE.to_string(),
            dir: path.parent().unwrap_or(path).display().to_string(),
        });
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Config::parse(&content)
}
