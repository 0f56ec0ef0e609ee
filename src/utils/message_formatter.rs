/// Pure functions for rendering birthday message lines (transport-agnostic)
use chrono::Datelike;

use crate::models::Occurrence;

/// A template string that could not be rendered
#[derive(Debug, PartialEq, Eq)]
pub enum FormatError {
    UnknownField(String),
    UnterminatedField,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnknownField(field) => {
                write!(
                    f,
                    "Unknown template field '{{{}}}' (expected day, month, dow, name or present)",
                    field
                )
            }
            FormatError::UnterminatedField => {
                write!(f, "Unterminated template field: missing closing '}}'")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Resolve a template field name against an occurrence
fn field_value(field: &str, occurrence: &Occurrence) -> Result<String, FormatError> {
    match field {
        "day" => Ok(occurrence.date.day().to_string()),
        "month" => Ok(occurrence.date.month().to_string()),
        "dow" => Ok(occurrence.date.format("%a").to_string()),
        "name" => Ok(occurrence.record.name.clone()),
        "present" => Ok(occurrence.record.present_note.clone()),
        other => Err(FormatError::UnknownField(other.to_string())),
    }
}

/// Render one template against one occurrence.
///
/// Fields are written as `{name}`; there is no escaping syntax for a
/// literal brace.
pub fn render_line(template: &str, occurrence: &Occurrence) -> Result<String, FormatError> {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            rendered.push(ch);
            continue;
        }

        let mut field = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) => field.push(c),
                None => return Err(FormatError::UnterminatedField),
            }
        }
        rendered.push_str(&field_value(&field, occurrence)?);
    }

    Ok(rendered)
}

/// Render one occurrence, picking the present template when a present note exists
pub fn render_entry(
    occurrence: &Occurrence,
    plain_template: &str,
    present_template: &str,
) -> Result<String, FormatError> {
    if occurrence.record.has_present() {
        render_line(present_template, occurrence)
    } else {
        render_line(plain_template, occurrence)
    }
}

/// Render all occurrences into a newline-joined message block, in input order
pub fn build_message(
    occurrences: &[Occurrence],
    plain_template: &str,
    present_template: &str,
) -> Result<String, FormatError> {
    let mut entries = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        entries.push(render_entry(occurrence, plain_template, present_template)?);
    }
    Ok(entries.join("\n"))
}

/// Build the full delivery text from intro line and message block
pub fn compose_delivery_text(intro: &str, message: &str) -> String {
    format!("{}\n{}", intro, message)
}
