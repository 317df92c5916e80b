//! Collapses the editor's variable wrappers back to bare placeholders.
//!
//! The rich-text editor stores each variable as an inline element such as
//! `<span data-type="variable" data-id="cnpj" data-label="cnpj">{{cnpj}}</span>`.
//! Rendering only understands the bare `{{cnpj}}` form.

use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// An element whose whole content is a single `{{...}}` token.
static WRAPPER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)(\s[^>]*)?>\{\{[^}]*\}\}</([A-Za-z][A-Za-z0-9-]*)\s*>")
        .expect("Invalid wrapper regex")
});

static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)data-label\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Invalid label regex")
});

/// Replaces every placeholder wrapper element with `{{label}}`.
///
/// The name comes from the `data-label` attribute, not from the element's
/// text. Wrappers without a usable label (missing, blank, or containing
/// braces or angle brackets) and wrappers whose closing tag does not match
/// are left exactly as they are. Everything else passes through unchanged.
///
/// Collapsing an inner wrapper can turn its parent into a wrapper, so passes
/// repeat until nothing more collapses. Nested wrappers therefore end up as
/// the outermost label. The result is a fixed point: normalizing it again
/// changes nothing.
pub fn prepare_for_substitution(markup: &str) -> String {
    let mut result = markup.to_string();
    let mut collapsed = 0usize;

    loop {
        let pass = collapse_wrappers(&mut result);
        if pass == 0 {
            break;
        }
        collapsed += pass;
    }

    if collapsed > 0 {
        debug!("Collapsed {} variable wrapper(s)", collapsed);
    }

    result
}

/// One left-to-right pass over `text`. Returns how many wrappers collapsed.
fn collapse_wrappers(text: &mut String) -> usize {
    let mut collapsed = 0usize;

    let replaced = WRAPPER_REGEX.replace_all(text, |caps: &Captures| {
        match wrapper_label(caps) {
            Some(label) => {
                collapsed += 1;
                format!("{{{{{}}}}}", label)
            }
            None => caps[0].to_string(),
        }
    });

    if collapsed > 0 {
        *text = replaced.into_owned();
    }

    collapsed
}

fn wrapper_label<'a>(caps: &'a Captures) -> Option<&'a str> {
    if !caps[1].eq_ignore_ascii_case(&caps[3]) {
        return None;
    }

    let attrs = caps.get(2)?.as_str();
    let label_caps = LABEL_REGEX.captures(attrs)?;
    let label = label_caps.get(1).or_else(|| label_caps.get(2))?.as_str().trim();

    if label.is_empty() || label.contains(['{', '}', '<', '>']) {
        return None;
    }

    Some(label)
}
