use starter::answers::{ask, get_answers, is_valid};
use starter::config::Question;
use starter::error::Error;
use starter::prompt::Console;
use starter::vars::Vars;
use std::io::Cursor;

fn question(name: &str, pattern: Option<&str>) -> Question {
    Question {
        name: name.to_string(),
        message: format!("What is {name}?"),
        pattern: pattern.map(String::from),
        validation_message: "Try again.".to_string(),
        ..Question::default()
    }
}

fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_writer()).unwrap()
}

#[test]
fn test_without_pattern_any_answer_is_valid() {
    let q = question("name", None);
    assert!(is_valid(&q, "anything").unwrap());
    assert!(is_valid(&q, "").unwrap());
}

#[test]
fn test_pattern_is_a_containment_match() {
    let q = question("name", Some("abc"));
    assert!(is_valid(&q, "abc").unwrap());
    assert!(is_valid(&q, "xyzabc").unwrap());
    assert!(!is_valid(&q, "xyz").unwrap());

    let anchored = question("name", Some("^[a-z]+$"));
    assert!(!is_valid(&anchored, "Abc").unwrap());
}

#[test]
fn test_malformed_pattern_fails() {
    let q = question("name", Some("[a-z"));
    assert!(matches!(is_valid(&q, "abc"), Err(Error::PatternError { .. })));

    let mut console = console("abc\n");
    assert!(matches!(ask(&mut console, &q), Err(Error::PatternError { .. })));
}

#[test]
fn test_prompt_shows_help_and_default() {
    let q = Question {
        default: "awesome".to_string(),
        help_message: "Lower case only".to_string(),
        ..question("app_name", None)
    };
    let mut console = console("\n");

    assert_eq!(ask(&mut console, &q).unwrap(), "awesome");
    assert_eq!(
        output(console),
        "What is app_name?\nHelp: Lower case only\nDefault: awesome\nEnter app_name: "
    );
}

#[test]
fn test_invalid_answer_is_asked_again() {
    let q = question("port", Some("^[0-9]+$"));
    let mut console = console("http\n8080\n");

    assert_eq!(ask(&mut console, &q).unwrap(), "8080");

    let printed = output(console);
    assert_eq!(printed.matches("What is port?").count(), 2);
    assert!(printed.contains("Invalid input! Try again."));
}

#[test]
fn test_closed_input_ends_the_loop() {
    let q = question("port", Some("^[0-9]+$"));
    let mut console = console("http\n");

    assert!(matches!(ask(&mut console, &q), Err(Error::InputClosedError { .. })));
}

#[test]
fn test_get_answers_in_order() {
    let questions = vec![question("first", None), question("second", None)];
    let mut console = console("one\ntwo\n");

    let answers = get_answers(&mut console, &questions, Vars::new()).unwrap();

    assert_eq!(answers["first"], "one");
    assert_eq!(answers["second"], "two");
    let printed = output(console);
    assert!(printed.find("What is first?").unwrap() < printed.find("What is second?").unwrap());
}

#[test]
fn test_valid_prefilled_value_is_not_asked() {
    let questions = vec![question("port", Some("^[0-9]+$"))];
    let mut vars = Vars::new();
    vars.insert("port".to_string(), "8080".to_string());
    let mut console = console("");

    let answers = get_answers(&mut console, &questions, vars).unwrap();

    assert_eq!(answers["port"], "8080");
    assert_eq!(output(console), "");
}

#[test]
fn test_invalid_prefilled_value_is_asked() {
    let questions = vec![question("port", Some("^[0-9]+$")), question("other", None)];
    let mut vars = Vars::new();
    vars.insert("port".to_string(), "http".to_string());
    vars.insert("other".to_string(), "kept".to_string());
    let mut console = console("9090\n");

    let answers = get_answers(&mut console, &questions, vars).unwrap();

    assert_eq!(answers["port"], "9090");
    assert_eq!(answers["other"], "kept");
    let printed = output(console);
    assert!(printed.starts_with("Invalid input! Try again.\nWhat is port?"));
    assert!(!printed.contains("What is other?"));
}

#[test]
fn test_unrelated_vars_are_kept() {
    let mut vars = Vars::new();
    vars.insert("template_url".to_string(), "https://github.com/o/r".to_string());
    let mut console = console("value\n");

    let answers = get_answers(&mut console, &[question("name", None)], vars).unwrap();

    assert_eq!(answers.len(), 2);
    assert_eq!(answers["template_url"], "https://github.com/o/r");
}
