//! Card-field traversal: applies the stripper to the card's prose fields.
//!
//! A V2 character card is a JSON document whose `data` object carries five
//! top-level prose fields, an optional lorebook (`character_book.entries`,
//! each with a `content` string) and an optional `alternate_greetings`
//! string array. Only those positions are edited; every other field in the
//! document — known or unknown — round-trips byte-identically, which is why
//! the walker operates on a [`serde_json::Value`] tree rather than a typed
//! struct that would drop fields it does not model.

use crate::pipeline::strip::strip_markers;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// The five top-level prose fields inside `data` that get stripped.
pub const EDITED_FIELDS: [&str; 5] = [
    "description",
    "personality",
    "scenario",
    "first_mes",
    "mes_example",
];

/// What the walker did to a card.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditStats {
    /// String fields the walker looked at.
    pub fields_visited: usize,
    /// Fields whose text actually changed.
    pub fields_changed: usize,
}

/// Strip emphasis markers from every editable field of `card`, in place.
///
/// Absent `data`, `character_book`, `entries`, or `alternate_greetings` are
/// no-ops, as are `null` fields. A non-string, non-null value at an edited
/// position is left untouched with a warning — a metadata edit must never
/// destroy a card over a field it does not understand.
pub fn edit_card(card: &mut Value) -> EditStats {
    let mut stats = EditStats::default();

    let Some(data) = card.get_mut("data").and_then(Value::as_object_mut) else {
        return stats;
    };

    for field in EDITED_FIELDS {
        if let Some(value) = data.get_mut(field) {
            strip_value(value, field, &mut stats);
        }
    }

    if let Some(entries) = data
        .get_mut("character_book")
        .and_then(|book| book.get_mut("entries"))
        .and_then(Value::as_array_mut)
    {
        for entry in entries.iter_mut() {
            if let Some(content) = entry.get_mut("content") {
                strip_value(content, "character_book.entries.content", &mut stats);
            }
        }
    }

    if let Some(greetings) = data
        .get_mut("alternate_greetings")
        .and_then(Value::as_array_mut)
    {
        for greeting in greetings.iter_mut() {
            strip_value(greeting, "alternate_greetings", &mut stats);
        }
    }

    stats
}

fn strip_value(value: &mut Value, field: &str, stats: &mut EditStats) {
    match value {
        Value::String(text) => {
            stats.fields_visited += 1;
            let stripped = strip_markers(text);
            if stripped != *text {
                stats.fields_changed += 1;
                *value = Value::String(stripped);
            }
        }
        Value::Null => {}
        other => warn!(
            field,
            found = json_type_name(other),
            "expected a string, leaving field untouched"
        ),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
