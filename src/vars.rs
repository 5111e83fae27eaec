//! Template variables: parsing `NAME=VALUE` assignments, discovering them in
//! the environment and exporting them back to child processes.

use indexmap::IndexMap;

/// Variable name to value mapping shared by every stage of a run.
pub type Vars = IndexMap<String, String>;

/// Splits an assignment on the first `=`. An assignment without `=` is a
/// presence flag and gets the value `"1"`.
///
/// Also used as the clap value parser for `--var`.
pub fn parse_var(assignment: &str) -> Result<(String, String), String> {
    let (name, value) = match assignment.split_once('=') {
        Some((name, value)) => (name, value),
        None => (assignment, "1"),
    };

    if name.is_empty() {
        return Err(format!("variable name is empty in '{assignment}'"));
    }

    Ok((name.to_string(), value.to_string()))
}

/// Collects the variables carried by environment entries named `prefix` + NAME.
/// The prefix is stripped and the remaining name is kept as it is.
pub fn vars_from_env<I, K, V>(prefix: &str, entries: I) -> Vars
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    entries
        .into_iter()
        .filter_map(|(key, value)| {
            key.as_ref()
                .strip_prefix(prefix)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), value.into()))
        })
        .collect()
}

/// Environment entries handed to child processes: `prefix` + upper-cased name.
pub fn export_env(prefix: &str, vars: &Vars) -> Vec<(String, String)> {
    vars.iter()
        .map(|(name, value)| (format!("{prefix}{}", name.to_uppercase()), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        let cases = [
            ("key=value", "key", "value"),
            ("key=", "key", ""),
            ("key", "key", "1"),
            ("key=value=value", "key", "value=value"),
        ];

        for (input, name, value) in cases {
            assert_eq!(
                parse_var(input).unwrap(),
                (name.to_string(), value.to_string()),
                "parsing {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_var_rejects_empty_name() {
        assert!(parse_var("=value").is_err());
        assert!(parse_var("").is_err());
    }

    #[test]
    fn test_vars_from_env_strips_prefix() {
        let env = vec![
            ("STARTER_APP_NAME", "awesome"),
            ("STARTER_Mixed", "kept"),
            ("PATH", "/usr/bin"),
            ("STARTER_", "ignored"),
        ];

        let vars = vars_from_env("STARTER_", env);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars["APP_NAME"], "awesome");
        assert_eq!(vars["Mixed"], "kept");
    }

    #[test]
    fn test_export_env_upper_cases_names() {
        let mut vars = Vars::new();
        vars.insert("app_name".to_string(), "awesome".to_string());

        assert_eq!(
            export_env("STARTER_", &vars),
            vec![("STARTER_APP_NAME".to_string(), "awesome".to_string())]
        );
    }
}
