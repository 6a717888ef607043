//!
//! Pluggable custom cell controls.
//!
//! A column can render an external widget instead of one of the
//! built-in controls. Widgets are registered by id; the structured
//! input descriptor of a column names that id plus its configuration.
//!
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Debug, Formatter};

/// A custom control, ready to render.
pub trait CellWidget {
    /// Emit the control markup.
    fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Everything a widget factory gets from the cell renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Computed submitted-field name.
    pub name: String,
    /// Resolved cell value.
    pub value: Value,
    /// The configuration of the input descriptor, minus the widget id.
    pub options: Map<String, Value>,
}

/// Structured input descriptor: widget id plus configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub class: String,
    pub config: Map<String, Value>,
}

impl WidgetSpec {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            config: Map::new(),
        }
    }

    /// Add one configuration entry. Builder-style.
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }
}

type WidgetFactory = Box<dyn Fn(WidgetConfig) -> Box<dyn CellWidget>>;

/// Registry of widget factories, keyed by widget id.
///
/// The registry stands in for dynamic class loading: the grid shell
/// registers every custom control once per request, columns refer to
/// them by id.
#[derive(Default)]
pub struct WidgetRegistry {
    factories: HashMap<String, WidgetFactory>,
}

impl Debug for WidgetRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("factories", &self.factories.keys())
            .finish()
    }
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget factory under an id.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(WidgetConfig) -> Box<dyn CellWidget> + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Instantiate the widget registered under an id.
    pub fn instantiate(&self, id: &str, config: WidgetConfig) -> Option<Box<dyn CellWidget>> {
        let factory = self.factories.get(id)?;
        Some(factory(config))
    }
}

#[cfg(test)]
mod tests {
    use crate::widget::{CellWidget, WidgetConfig, WidgetRegistry, WidgetSpec};
    use serde_json::json;
    use std::fmt;

    struct Spinner {
        config: WidgetConfig,
    }

    impl CellWidget for Spinner {
        fn render(&self, out: &mut dyn fmt::Write) -> fmt::Result {
            write!(out, "<spinner name=\"{}\"/>", self.config.name)
        }
    }

    #[test]
    fn test_registry() {
        let mut registry = WidgetRegistry::new();
        registry.register("spinner", |config| Box::new(Spinner { config }));

        assert!(registry.contains("spinner"));
        assert!(!registry.contains("slider"));

        let spec = WidgetSpec::new("spinner").option("step", 1);
        assert_eq!(spec.config.get("step"), Some(&json!(1)));

        let widget = registry
            .instantiate(
                "spinner",
                WidgetConfig {
                    name: "Article[7][rating]".to_string(),
                    value: json!(3),
                    options: spec.config,
                },
            )
            .expect("registered");

        let mut out = String::new();
        widget.render(&mut out).expect("render");
        assert_eq!(out, "<spinner name=\"Article[7][rating]\"/>");
    }
}
