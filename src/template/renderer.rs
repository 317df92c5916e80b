use crate::template::scanner::PLACEHOLDER_REGEX;
use crate::template::ValueMap;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use regex::Captures;
use std::collections::BTreeSet;

/// Variable that always resolves to the render date, even when the caller's
/// map does not mention it.
pub const CURRENT_DATE_VARIABLE: &str = "data_atual";

/// Day/month/year, as used in Brazilian contracts.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a date the way `{{data_atual}}` is rendered.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// How substituted values are written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Values are inserted verbatim.
    #[default]
    None,
    /// Values are HTML-escaped and newlines become `<br>`.
    Html,
}

/// Substitutes `{{name}}` placeholders with values from a [`ValueMap`].
///
/// A name that is a key of the map is replaced with its value, or with an
/// empty string when the value is `None`. A name that is not a key at all is
/// left in the output as literal `{{name}}`, so a reviewer still sees what is
/// missing. Substitution is a single left-to-right pass: values that contain
/// placeholders are never expanded again.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    today: NaiveDate,
    escape: Escape,
}

impl TemplateRenderer {
    /// Renderer dated today (local time), without escaping.
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    pub fn with_date(today: NaiveDate) -> Self {
        Self {
            today,
            escape: Escape::None,
        }
    }

    pub fn escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn escape_html(text: &str) -> String {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;");

        escaped.replace('\n', "<br>")
    }

    fn resolve(&self, name: &str, values: &ValueMap) -> Option<String> {
        match values.get(name) {
            Some(value) => Some(value.clone().unwrap_or_default()),
            None if name == CURRENT_DATE_VARIABLE => Some(format_date(self.today)),
            None => None,
        }
    }

    pub fn render(&self, template: &str, values: &ValueMap) -> String {
        let mut replaced = 0usize;
        let mut unknown: BTreeSet<String> = BTreeSet::new();

        let result = PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures| {
            let name = caps[1].trim();
            match self.resolve(name, values) {
                Some(value) => {
                    replaced += 1;
                    match self.escape {
                        Escape::None => value,
                        Escape::Html => Self::escape_html(&value),
                    }
                }
                None => {
                    unknown.insert(name.to_string());
                    caps[0].to_string()
                }
            }
        });

        debug!("Replaced {} placeholder occurrence(s)", replaced);
        for name in &unknown {
            warn!("Placeholder '{{{{{}}}}}' has no value, left as is", name);
        }

        result.into_owned()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `template` with a renderer dated today and no escaping.
pub fn render(template: &str, values: &ValueMap) -> String {
    TemplateRenderer::new().render(template, values)
}
