//! Token dictionary: maps literal placeholder markers to their values and
//! applies that mapping to file names and file contents.

use crate::constants::{DEFAULT_PREFIX, DEFAULT_SUFFIX};
use crate::error::{Error, Result};
use crate::vars::Vars;
use std::borrow::Cow;

/// Placeholder markers wrapped around a variable name, plus the direction of
/// the substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub prefix: String,
    pub suffix: String,
    /// Search for values and put placeholders back
    pub reverse: bool,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            reverse: false,
        }
    }
}

impl Markers {
    pub fn wrap(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.suffix)
    }
}

/// Search token to replacement mapping, applied in a single pass.
///
/// Keys are tried longest first and then in lexical order, so the result
/// never depends on the iteration order of the variables it was built from.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<(String, String)>,
    text: Option<regex::Regex>,
    bytes: Option<regex::bytes::Regex>,
}

impl Dictionary {
    /// Builds the dictionary for `vars`. In reverse mode every pair is swapped.
    pub fn new(vars: &Vars, markers: &Markers) -> Result<Self> {
        let mut entries: Vec<(String, String)> = vars
            .iter()
            .map(|(name, value)| {
                let placeholder = markers.wrap(name);
                if markers.reverse {
                    (value.clone(), placeholder)
                } else {
                    (placeholder, value.clone())
                }
            })
            // An empty search token would match between every byte.
            .filter(|(key, _)| !key.is_empty())
            .collect();

        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        entries.dedup_by(|(a, _), (b, _)| a == b);

        if entries.is_empty() {
            return Ok(Self { entries, text: None, bytes: None });
        }

        let alternation = entries
            .iter()
            .map(|(key, _)| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");

        let text = regex::Regex::new(&alternation).map_err(|e| {
            Error::ConfigError(format!("unable to build placeholder dictionary: {e}"))
        })?;
        let bytes = regex::bytes::Regex::new(&alternation).map_err(|e| {
            Error::ConfigError(format!("unable to build placeholder dictionary: {e}"))
        })?;

        Ok(Self { entries, text: Some(text), bytes: Some(bytes) })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Search tokens and replacements, in application order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    fn lookup(&self, token: &[u8]) -> &str {
        self.entries
            .iter()
            .find(|(key, _)| key.as_bytes() == token)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }

    /// Replaces every token occurring in `name`.
    pub fn apply_str<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match &self.text {
            Some(re) => re.replace_all(name, |caps: &regex::Captures| {
                self.lookup(caps[0].as_bytes()).to_string()
            }),
            None => Cow::Borrowed(name),
        }
    }

    /// Replaces every token occurring in `content`.
    pub fn apply_bytes<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        match &self.bytes {
            Some(re) => re.replace_all(content, |caps: &regex::bytes::Captures| {
                self.lookup(&caps[0]).as_bytes().to_vec()
            }),
            None => Cow::Borrowed(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vars {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_forward_dictionary() {
        let dict = Dictionary::new(&vars(&[("NAME", "value")]), &Markers::default()).unwrap();

        assert_eq!(dict.entries(), &[("<NAME>".to_string(), "value".to_string())]);
        assert_eq!(dict.apply_str("a-<NAME>-b"), "a-value-b");
    }

    #[test]
    fn test_reverse_dictionary_swaps_pairs() {
        let markers = Markers { reverse: true, ..Markers::default() };
        let dict = Dictionary::new(&vars(&[("NAME", "value")]), &markers).unwrap();

        assert_eq!(dict.entries(), &[("value".to_string(), "<NAME>".to_string())]);
        assert_eq!(dict.apply_bytes(b"a value b").as_ref(), b"a <NAME> b");
    }

    #[test]
    fn test_custom_markers() {
        let markers = Markers { prefix: "{{".into(), suffix: "}}".into(), reverse: false };
        let dict = Dictionary::new(&vars(&[("X", "1")]), &markers).unwrap();

        assert_eq!(dict.apply_str("{{X}} <X>"), "1 <X>");
    }

    #[test]
    fn test_longest_token_wins() {
        let markers = Markers { reverse: true, ..Markers::default() };
        let dict =
            Dictionary::new(&vars(&[("SHORT", "app"), ("LONG", "app-name")]), &markers).unwrap();

        assert_eq!(dict.apply_str("app-name/app"), "<LONG>/<SHORT>");
    }

    #[test]
    fn test_replacements_are_not_rescanned() {
        let dict = Dictionary::new(&vars(&[("A", "<B>"), ("B", "x")]), &Markers::default()).unwrap();

        assert_eq!(dict.apply_str("<A><B>"), "<B>x");
    }

    #[test]
    fn test_empty_reverse_token_is_dropped() {
        let markers = Markers { reverse: true, ..Markers::default() };
        let dict = Dictionary::new(&vars(&[("EMPTY", "")]), &markers).unwrap();

        assert!(dict.is_empty());
        assert!(matches!(dict.apply_str("unchanged"), Cow::Borrowed("unchanged")));
    }

    #[test]
    fn test_binary_content() {
        let dict = Dictionary::new(&vars(&[("N", "v")]), &Markers::default()).unwrap();
        let content = [0xff, 0xfe, b'<', b'N', b'>', 0x00];

        assert_eq!(dict.apply_bytes(&content).as_ref(), &[0xff, 0xfe, b'v', 0x00]);
    }
}
