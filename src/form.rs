//!
//! Submitted form state.
//!
//! [SubmittedForm] is the request-scoped, read-only store of the values
//! a previous submission carried. The cell renderer looks resubmitted
//! values up by the (prefix, id, attribute) triple and echoes them back
//! into the controls after a failed validation.
//!
use serde_json::Value;
use std::collections::HashMap;

/// Compose the submitted field name for a (prefix, id, attribute) triple.
///
/// This is the single point of truth for field identity:
/// `Article[7][title]`, or `[7][title]` for mapping rows without a
/// model name.
pub fn field_name(prefix: &str, id: &str, attr: &str) -> String {
    format!("{}[{}][{}]", prefix, id, attr)
}

/// Previously submitted raw values, keyed by (prefix, id, attribute).
#[derive(Debug, Default, Clone)]
pub struct SubmittedForm {
    values: HashMap<String, HashMap<String, HashMap<String, Value>>>,
}

impl SubmittedForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from submitted (field-name, value) pairs.
    ///
    /// Field names follow the bracket convention produced by
    /// [field_name]: `prefix[id][attr]`, with an optional trailing
    /// `[]` for list controls. List fields aggregate into an array in
    /// submission order. Names of any other shape are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            let Some((prefix, id, attr, list)) = parse_field_name(name.as_ref()) else {
                continue;
            };
            if list {
                form.push(prefix, id, attr, value.into());
            } else {
                form.insert(prefix, id, attr, value.into());
            }
        }
        form
    }

    /// Store one submitted value.
    pub fn insert(&mut self, prefix: &str, id: &str, attr: &str, value: impl Into<Value>) {
        self.values
            .entry(prefix.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default()
            .insert(attr.to_string(), value.into());
    }

    /// Append one submitted value to a list field.
    pub fn push(&mut self, prefix: &str, id: &str, attr: &str, value: impl Into<Value>) {
        let slot = self
            .values
            .entry(prefix.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default()
            .entry(attr.to_string())
            .or_insert(Value::Array(Vec::new()));
        match slot {
            Value::Array(items) => items.push(value.into()),
            other => {
                let first = other.take();
                *other = Value::Array(vec![first, value.into()]);
            }
        }
    }

    /// The submitted value for a field, if any.
    pub fn value(&self, prefix: &str, id: &str, attr: &str) -> Option<&Value> {
        self.values.get(prefix)?.get(id)?.get(attr)
    }

    /// Was anything submitted under this field?
    pub fn contains(&self, prefix: &str, id: &str, attr: &str) -> bool {
        self.value(prefix, id, attr).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse `prefix[id][attr]` or `prefix[id][attr][]`.
fn parse_field_name(name: &str) -> Option<(&str, &str, &str, bool)> {
    let open = name.find('[')?;
    let prefix = &name[..open];

    let rest = &name[open + 1..];
    let close = rest.find(']')?;
    let id = &rest[..close];

    let rest = rest[close + 1..].strip_prefix('[')?;
    let close = rest.find(']')?;
    let attr = &rest[..close];

    let tail = &rest[close + 1..];
    match tail {
        "" => Some((prefix, id, attr, false)),
        "[]" => Some((prefix, id, attr, true)),
        _ => None,
    }
}
