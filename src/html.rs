//!
//! HTML control generation.
//!
//! Pure `(name, value, options) -> markup` functions, plus list-aware
//! variants for the select/checkbox-list/radio-list controls. All
//! attribute values and text content are HTML-escaped.
//!
use crate::util::{scalar, truthy};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt::Write;

/// List data for select/checkbox-list/radio-list controls.
///
/// Ordered key -> label pairs. The key is what gets submitted.
pub type ListItems = Vec<(String, String)>;

/// Meta key in [Attrs] holding the uncheck sentinel of checkbox
/// controls. Emitted as a hidden input, never as an attribute.
pub const UNCHECK: &str = "uncheck";

/// Ordered HTML attribute map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attrs {
    map: IndexMap<String, String>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute. Builder-style.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Set one attribute. Overwrites in place.
    pub fn set(&mut self, name: &str, value: &str) {
        self.map.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|v| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.map.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append inline css to the style attribute, "; "-separated.
    pub fn append_style(&mut self, css: &str) {
        match self.get("style") {
            Some(style) if !style.is_empty() => {
                let style = format!("{}; {}", style, css);
                self.set("style", &style);
            }
            _ => self.set("style", css),
        }
    }

    /// Append a class token, " "-separated.
    pub fn append_class(&mut self, token: &str) {
        match self.get("class") {
            Some(class) if !class.is_empty() => {
                let class = format!("{} {}", class, token);
                self.set("class", &class);
            }
            _ => self.set("class", token),
        }
    }
}

/// HTML-escape text.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Generic self-closing tag.
pub fn tag(name: &str, attrs: &Attrs) -> String {
    format!("<{}{}/>", name, render_attrs(attrs))
}

/// A single input tag of the given type.
pub fn input_field(kind: &str, name: &str, value: &str, attrs: &Attrs) -> String {
    let mut all = Attrs::new();
    all.set("type", kind);
    all.set("name", name);
    all.set("value", value);
    merge_rest(&mut all, attrs);
    tag("input", &all)
}

pub fn text_field(name: &str, value: &str, attrs: &Attrs) -> String {
    input_field("text", name, value, attrs)
}

pub fn file_field(name: &str, value: &str, attrs: &Attrs) -> String {
    input_field("file", name, value, attrs)
}

pub fn hidden_field(name: &str, value: &str) -> String {
    input_field("hidden", name, value, &Attrs::new())
}

pub fn text_area(name: &str, value: &str, attrs: &Attrs) -> String {
    let mut all = Attrs::new();
    all.set("name", name);
    merge_rest(&mut all, attrs);
    format!(
        "<textarea{}>{}</textarea>",
        render_attrs(&all),
        encode(value)
    )
}

/// Dropdown select. The item whose key equals the scalar rendering of
/// the selection carries the selected attribute.
pub fn drop_down_list(name: &str, selection: &Value, items: &ListItems, attrs: &Attrs) -> String {
    let mut all = Attrs::new();
    all.set("name", name);
    merge_rest(&mut all, attrs);

    let selected = scalar(selection);
    let mut out = format!("<select{}>", render_attrs(&all));
    for (key, label) in items {
        let mut item = Attrs::new();
        item.set("value", key);
        if *key == selected {
            item.set("selected", "selected");
        }
        _ = write!(
            out,
            "<option{}>{}</option>",
            render_attrs(&item),
            encode(label)
        );
    }
    out.push_str("</select>");
    out
}

/// Single checkbox, checked when the value is truthy.
///
/// When an [UNCHECK] sentinel is set, a hidden input with the same name
/// and the sentinel value precedes the checkbox, so an unchecked box
/// still submits a deterministic value.
pub fn check_box(name: &str, value: &Value, attrs: &Attrs) -> String {
    let mut rest = attrs.clone();
    let uncheck = rest.remove(UNCHECK);
    let submit_value = rest.remove("value").unwrap_or_else(|| "1".to_string());

    let mut out = String::new();
    if let Some(uncheck) = uncheck {
        out.push_str(&hidden_field(name, &uncheck));
    }

    let mut all = Attrs::new();
    all.set("type", "checkbox");
    all.set("name", name);
    all.set("value", &submit_value);
    if truthy(value) {
        all.set("checked", "checked");
    }
    merge_rest(&mut all, &rest);
    out.push_str(&tag("input", &all));
    out
}

/// One labelled checkbox per list item, submitted under `name[]`.
///
/// Checked when the item key is contained in the selection: array
/// membership, or scalar equality. Uncheck sentinel as in [check_box].
pub fn check_box_list(name: &str, selection: &Value, items: &ListItems, attrs: &Attrs) -> String {
    let mut rest = attrs.clone();
    let uncheck = rest.remove(UNCHECK);

    let mut out = String::new();
    if let Some(uncheck) = uncheck {
        out.push_str(&hidden_field(name, &uncheck));
    }

    let item_name = format!("{}[]", name);
    for (i, (key, label)) in items.iter().enumerate() {
        if i > 0 {
            out.push_str("<br/>");
        }
        let mut all = Attrs::new();
        all.set("type", "checkbox");
        all.set("name", &item_name);
        all.set("value", key);
        if selected_in(selection, key) {
            all.set("checked", "checked");
        }
        merge_rest(&mut all, &rest);
        _ = write!(out, "<label>{} {}</label>", tag("input", &all), encode(label));
    }
    out
}

/// One labelled radio per list item, all sharing the field name.
pub fn radio_button_list(name: &str, selection: &Value, items: &ListItems, attrs: &Attrs) -> String {
    let mut rest = attrs.clone();
    rest.remove(UNCHECK);

    let mut out = String::new();
    for (i, (key, label)) in items.iter().enumerate() {
        if i > 0 {
            out.push_str("<br/>");
        }
        let mut all = Attrs::new();
        all.set("type", "radio");
        all.set("name", name);
        all.set("value", key);
        if selected_in(selection, key) {
            all.set("checked", "checked");
        }
        merge_rest(&mut all, &rest);
        _ = write!(out, "<label>{} {}</label>", tag("input", &all), encode(label));
    }
    out
}

fn render_attrs(attrs: &Attrs) -> String {
    let mut out = String::new();
    for (k, v) in attrs.iter() {
        _ = write!(out, " {}=\"{}\"", k, encode(v));
    }
    out
}

/// Merge configured attributes behind the computed ones.
/// Computed attributes win, meta keys are dropped.
fn merge_rest(target: &mut Attrs, attrs: &Attrs) {
    for (k, v) in attrs.iter() {
        if k == UNCHECK || target.contains(k) {
            continue;
        }
        target.set(k, v);
    }
}

fn selected_in(selection: &Value, key: &str) -> bool {
    match selection {
        Value::Array(items) => items.iter().any(|v| scalar(v) == key),
        Value::Null => false,
        other => scalar(other) == key,
    }
}
