//! Collects answers for the template's questions.

use crate::config::Question;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::vars::Vars;
use log::debug;
use regex::Regex;

/// Checks `answer` against the question's pattern. A match anywhere in the
/// answer is enough; the pattern is not anchored.
///
/// # Errors
/// * `Error::PatternError` if the pattern is not a valid regular expression
pub fn is_valid(question: &Question, answer: &str) -> Result<bool> {
    let Some(pattern) = question.pattern.as_deref().filter(|p| !p.is_empty()) else {
        return Ok(true);
    };

    let re = Regex::new(pattern).map_err(|source| Error::PatternError {
        name: question.name.clone(),
        source,
    })?;

    Ok(re.is_match(answer))
}

fn invalid_notice(question: &Question) -> String {
    format!("Invalid input! {}", question.validation_message)
}

/// Asks a single question until a valid answer is given.
///
/// # Errors
/// * `Error::PatternError` if the question's pattern is malformed
/// * `Error::InputClosedError` if the input ends before a valid answer
pub fn ask(prompt: &mut dyn Prompter, question: &Question) -> Result<String> {
    loop {
        prompt.title(&question.message);

        if !question.help_message.is_empty() {
            prompt.print(&format!("Help: {}", question.help_message));
        }

        if !question.default.is_empty() {
            prompt.print(&format!("Default: {}", question.default));
        }

        let answer = prompt
            .read_line(&format!("Enter {}: ", question.name))?
            .ok_or_else(|| Error::InputClosedError { name: question.name.clone() })?;

        let answer = if answer.is_empty() { question.default.clone() } else { answer };

        if is_valid(question, &answer)? {
            return Ok(answer);
        }

        prompt.error(&invalid_notice(question));
    }
}

/// Fills `vars` with an answer for every question, in order.
///
/// A value already present in `vars` is kept without prompting when it passes
/// validation. Otherwise the operator is notified and asked.
///
/// # Errors
/// * `Error::PatternError` if a question's pattern is malformed
/// * `Error::InputClosedError` if the input ends before all answers are given
pub fn get_answers(
    prompt: &mut dyn Prompter,
    questions: &[Question],
    mut vars: Vars,
) -> Result<Vars> {
    for question in questions {
        if let Some(value) = vars.get(&question.name) {
            if is_valid(question, value)? {
                debug!("Using provided value for '{}'", question.name);
                continue;
            }

            prompt.error(&invalid_notice(question));
        }

        let answer = ask(prompt, question)?;
        vars.insert(question.name.clone(), answer);
    }

    Ok(vars)
}
