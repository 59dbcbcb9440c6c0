//! YAML front-matter rendering.
//!
//! Deliberately ad hoc (no YAML library): an ordered list of key/value
//! lines, optional comment lines, and one level of nested blocks, which is
//! the shape the documentation site consumes. Scalars containing structural
//! characters are single-quoted with doubled inner quotes; list values are
//! rendered as inline JSON arrays.

use docsmith_shared::FieldValue;

// ---------------------------------------------------------------------------
// Quoting
// ---------------------------------------------------------------------------

/// Characters that force a scalar into single quotes.
const STRUCTURAL: &[char] = &[
    ':', '{', '}', '[', ']', ',', '&', '*', '#', '?', '|', '-', '<', '>', '=', '!', '%', '@',
    '\\', '\'', '"',
];

/// Quote a scalar for YAML output.
///
/// Empty values render as `''`; values with structural characters are
/// single-quoted with inner quotes doubled; bare booleans/null words and
/// digit strings are quoted so they stay strings; everything else passes
/// through unquoted.
pub fn yaml_quote(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    if value.contains(STRUCTURAL) {
        return format!("'{}'", value.replace('\'', "''"));
    }
    let lowered = value.to_lowercase();
    let reserved = matches!(
        lowered.as_str(),
        "true" | "false" | "null" | "yes" | "no" | "on" | "off"
    );
    if reserved || value.chars().all(|c| c.is_ascii_digit()) {
        return format!("'{value}'");
    }
    value.to_string()
}

/// Render a field value for one front-matter line.
fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => yaml_quote(text),
        // Inline JSON array, matching the site's loader.
        FieldValue::List(items) => serde_json::to_string(items).unwrap_or_else(|_| "[]".into()),
    }
}

// ---------------------------------------------------------------------------
// FrontMatter
// ---------------------------------------------------------------------------

/// One front-matter entry.
#[derive(Debug, Clone)]
enum Entry {
    Comment(String),
    Blank,
    Field(String, FieldValue),
    /// A key whose value is rendered verbatim (e.g. `null`).
    Raw(String, String),
    Block(String, Vec<(String, FieldValue)>),
}

/// An ordered front-matter block under construction.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    entries: Vec<Entry>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `# comment` line.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.entries.push(Entry::Comment(text.to_string()));
        self
    }

    /// Append a blank separator line.
    pub fn blank(&mut self) -> &mut Self {
        self.entries.push(Entry::Blank);
        self
    }

    /// Append a quoted key/value line.
    pub fn field(&mut self, key: &str, value: impl Into<FieldValue>) -> &mut Self {
        self.entries.push(Entry::Field(key.to_string(), value.into()));
        self
    }

    /// Append a key with a verbatim, unquoted value.
    pub fn raw(&mut self, key: &str, value: &str) -> &mut Self {
        self.entries
            .push(Entry::Raw(key.to_string(), value.to_string()));
        self
    }

    /// Append a nested block of key/value pairs.
    pub fn block(&mut self, key: &str, fields: Vec<(String, FieldValue)>) -> &mut Self {
        self.entries.push(Entry::Block(key.to_string(), fields));
        self
    }

    /// True if `key` is already present as a field, raw, or block key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| match entry {
            Entry::Field(k, _) | Entry::Raw(k, _) | Entry::Block(k, _) => k == key,
            _ => false,
        })
    }

    /// Render the delimited front-matter block, trailing newline included.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        for entry in &self.entries {
            match entry {
                Entry::Comment(text) => {
                    out.push_str("# ");
                    out.push_str(text);
                    out.push('\n');
                }
                Entry::Blank => out.push('\n'),
                Entry::Field(key, value) => {
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(&render_value(value));
                    out.push('\n');
                }
                Entry::Raw(key, value) => {
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(value);
                    out.push('\n');
                }
                Entry::Block(key, fields) => {
                    out.push_str(key);
                    out.push_str(":\n");
                    for (sub_key, value) in fields {
                        out.push_str("  ");
                        out.push_str(sub_key);
                        out.push_str(": ");
                        out.push_str(&render_value(value));
                        out.push('\n');
                    }
                }
            }
        }
        out.push_str("---\n");
        out
    }
}
