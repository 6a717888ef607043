//!
//! Entity access for grid cells.
//!
//! A row can be backed by a typed model or by a plain mapping. Both are
//! used through [Record]; path resolution and the cell renderer never
//! look at the concrete type.
//!
use serde_json::{Map, Value};

/// One attribute-addressable container.
///
/// Typed models implement this directly; `serde_json::Map` has a
/// blanket implementation for mapping rows.
pub trait Record {
    /// Type name for typed models.
    ///
    /// `None` for plain mappings. The post-var prefix of the field
    /// name is built from this.
    fn model_name(&self) -> Option<&str> {
        None
    }

    /// Read one attribute.
    fn get(&self, attr: &str) -> Option<Value>;

    /// Write one attribute.
    ///
    /// Used to echo a resubmitted value back onto the entity.
    fn set(&mut self, attr: &str, value: Value);

    /// Step into a nested container during path resolution.
    fn child(&self, key: &str) -> Option<&dyn Record>;

    /// Step into a nested container during path resolution.
    fn child_mut(&mut self, key: &str) -> Option<&mut dyn Record>;

    /// Validation capability, if the entity has one.
    fn as_validatable(&mut self) -> Option<&mut dyn Validatable> {
        None
    }
}

/// Validation service of an entity.
///
/// Entities that can check themselves get error decoration on their
/// controls and human labels as placeholders.
pub trait Validatable {
    /// Validate the given attributes only. True means valid.
    fn validate(&mut self, attrs: &[&str]) -> bool;

    /// Validation message for one attribute after a failed [validate](Validatable::validate).
    fn error(&self, attr: &str) -> Option<String>;

    /// Human label for one attribute.
    fn attribute_label(&self, attr: &str) -> String {
        attr.to_string()
    }
}

impl Record for Map<String, Value> {
    fn get(&self, attr: &str) -> Option<Value> {
        self.get(attr).cloned()
    }

    fn set(&mut self, attr: &str, value: Value) {
        self.insert(attr.to_string(), value);
    }

    fn child(&self, key: &str) -> Option<&dyn Record> {
        match self.get(key) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut dyn Record> {
        match self.get_mut(key) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}
