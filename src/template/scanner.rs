//! Discovery of `{{variable}}` placeholders.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `{{` followed by anything up to the first `}}`. No nesting.
pub(crate) static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Invalid placeholder regex"));

/// Returns the distinct variable names in `text`, in order of first appearance.
///
/// Whitespace inside the braces is trimmed. Placeholders that are empty after
/// trimming (`{{ }}`) are not variables and are skipped, as is any `{{` that
/// never gets closed.
///
/// ```
/// use contractgen::extract_variables;
///
/// let vars = extract_variables("{{b}} and {{ a }} then {{b}} again");
/// assert_eq!(vars, vec!["b", "a"]);
/// ```
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut variables = Vec::new();

    for m in PLACEHOLDER_REGEX.captures_iter(text).filter_map(|caps| caps.get(1)) {
        let name = m.as_str().trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name) {
            variables.push(name.to_string());
        }
    }

    variables
}

/// True if `text` contains at least one non-empty placeholder.
pub fn has_variables(text: &str) -> bool {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .any(|caps| !caps[1].trim().is_empty())
}
