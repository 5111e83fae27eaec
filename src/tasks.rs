//! Post-processing tasks declared in the template configuration.

use crate::config::Task;
use crate::constants::ENV_PREFIX;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::vars::{export_env, Vars};
use log::debug;
use regex::{Captures, Regex};
use std::path::Path;
use std::process::{Command, Stdio};

/// Replaces `$NAME` with the variable's value in every argument.
///
/// Each argument is scanned once, so a substituted value is never searched
/// for further `$NAME` references. Longer names win over their prefixes:
/// `$APP_NAME` is not read as `$APP` followed by `_NAME`. This is a plain text
/// replacement, nothing is quoted.
///
/// # Errors
/// * `Error::ConfigError` if the variable names cannot be compiled into a matcher
pub fn substitute_args(args: &[String], vars: &Vars) -> Result<Vec<String>> {
    let mut names: Vec<&str> =
        vars.keys().map(String::as_str).filter(|name| !name.is_empty()).collect();
    if names.is_empty() {
        return Ok(args.to_vec());
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = names.iter().map(|name| regex::escape(name)).collect::<Vec<_>>().join("|");
    let pattern = Regex::new(&format!(r"\$({alternation})")).map_err(|e| {
        Error::ConfigError(format!("Unable to prepare task argument substitution: {e}"))
    })?;

    Ok(args
        .iter()
        .map(|arg| {
            pattern
                .replace_all(arg, |caps: &Captures| vars[&caps[1]].clone())
                .into_owned()
        })
        .collect())
}

/// Runs one task to completion with inherited stdio.
///
/// The child sees the current environment plus every variable exported as
/// `STARTER_<NAME>`, and runs in `work_dir`.
///
/// # Errors
/// * `Error::ConfigError` if the task has no command
/// * `Error::TaskError` if the command cannot be started or does not succeed
pub fn run_task<P: AsRef<Path>>(task: &Task, vars: &Vars, work_dir: P) -> Result<()> {
    let program = match task.command.program() {
        Some(program) if !program.is_empty() => program,
        _ => return Err(Error::ConfigError("Task command can not be empty".to_string())),
    };
    let args = substitute_args(task.command.args(), vars)?;

    debug!("Executing {program} {args:?}");

    let status = Command::new(program)
        .args(&args)
        .envs(export_env(ENV_PREFIX, vars))
        .current_dir(work_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::TaskError {
            command: task.command.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::TaskError {
            command: task.command.to_string(),
            reason: format!("exited with {status}"),
        });
    }

    Ok(())
}

/// Runs the tasks in order and stops at the first failure.
pub fn run_tasks<P: AsRef<Path>>(
    prompt: &mut dyn Prompter,
    tasks: &[Task],
    vars: &Vars,
    work_dir: P,
) -> Result<()> {
    for task in tasks {
        let name = task.command.program().unwrap_or_default();
        prompt.title(&format!("Running task {name}..."));
        run_task(task, vars, work_dir.as_ref())?;
    }

    Ok(())
}
