//!
//! Editable grid column.
//!
//! Renders one form control per table cell, bound to a model attribute
//! through a dotted relation path. The control's name encodes
//! (model, primary key, attribute) so a whole-page submission maps
//! back to the edited rows; resubmitted values are echoed into the
//! controls and validation failures decorate them.
//!
//! ```rust ignore
//! use editcell::column::{EditColumn, InputType, RenderContext};
//!
//! let column = EditColumn::new("status")
//!     .input_type(InputType::Select)
//!     .list_data(vec![
//!         ("1".into(), "draft".into()),
//!         ("2".into(), "published".into()),
//!     ]);
//! column.init()?;
//!
//! let mut cell = String::new();
//! column.render_cell(row, &mut article, &ctx, &mut cell)?;
//! ```
//!
use crate::form::{self, SubmittedForm};
use crate::html::{self, Attrs, ListItems};
use crate::path;
use crate::record::Record;
use crate::util::scalar;
use crate::widget::{WidgetConfig, WidgetRegistry, WidgetSpec};
use crate::EditError;
use log::debug;
use serde_json::Value;
use std::fmt;
use std::fmt::{Debug, Formatter};

/// The kind of control rendered for a cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum InputType {
    /// Plain text input. The default, and the fallback for unknown
    /// type names.
    #[default]
    Text,
    Number,
    TextArea,
    /// Dropdown. Needs list data.
    Select,
    Checkbox,
    /// One checkbox per list item, submitted under `name[]`.
    CheckboxList,
    /// One radio per list item. Needs list data.
    RadioButtonList,
    File,
    /// The value verbatim, no input element.
    Display,
    /// Nothing at all.
    None,
    /// A custom widget from the registry.
    Widget(WidgetSpec),
}

impl InputType {
    /// Input type by name. Unknown names fall back to [InputType::Text].
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => InputType::Text,
            "number" => InputType::Number,
            "textarea" => InputType::TextArea,
            "select" => InputType::Select,
            "checkbox" => InputType::Checkbox,
            "checkboxlist" => InputType::CheckboxList,
            "radiobuttonlist" => InputType::RadioButtonList,
            "file" => InputType::File,
            "display" => InputType::Display,
            "none" => InputType::None,
            other => {
                debug!("unknown input type {:?}, falling back to text", other);
                InputType::Text
            }
        }
    }
}

/// A column setting that is either fixed or computed per row.
pub enum Dynamic<T> {
    /// The same for every cell.
    Fixed(T),
    /// Computed from (row index, row data) for every cell.
    PerRow(Box<dyn Fn(usize, &dyn Record) -> T>),
}

impl<T: Clone> Dynamic<T> {
    pub fn resolve(&self, row: usize, data: &dyn Record) -> T {
        match self {
            Dynamic::Fixed(value) => value.clone(),
            Dynamic::PerRow(compute) => compute(row, data),
        }
    }
}

impl<T: Debug> Debug for Dynamic<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Dynamic::PerRow(_) => f.debug_tuple("PerRow").finish(),
        }
    }
}

/// Request-scoped collaborators for cell rendering.
///
/// Built once per page render by the grid shell, shared by all cells.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    form: &'a SubmittedForm,
    widgets: &'a WidgetRegistry,
}

impl<'a> RenderContext<'a> {
    pub fn new(form: &'a SubmittedForm, widgets: &'a WidgetRegistry) -> Self {
        Self { form, widgets }
    }

    pub fn form(&self) -> &SubmittedForm {
        self.form
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        self.widgets
    }
}

/// Editable data column.
///
/// Configuration is builder-style; [EditColumn::init] must pass before
/// the first row renders.
#[derive(Debug)]
pub struct EditColumn {
    name: String,
    input_type: Dynamic<InputType>,
    value: Option<Dynamic<Value>>,
    list_data: Option<Dynamic<ListItems>>,
    attrs: Attrs,
    var_suffix: String,
    id_attribute: String,
    error_style: String,
    error_class: String,
    before: Option<Dynamic<String>>,
    after: Option<Dynamic<String>>,
}

impl EditColumn {
    /// New column bound to a dotted attribute path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: Dynamic::Fixed(InputType::Text),
            value: None,
            list_data: None,
            attrs: Attrs::new(),
            var_suffix: String::new(),
            id_attribute: "id".to_string(),
            error_style: String::new(),
            error_class: "error".to_string(),
            before: None,
            after: None,
        }
    }

    /// The control rendered for every cell.
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = Dynamic::Fixed(input_type);
        self
    }

    /// Choose the control per row.
    pub fn input_type_fn<F>(mut self, compute: F) -> Self
    where
        F: Fn(usize, &dyn Record) -> InputType + 'static,
    {
        self.input_type = Dynamic::PerRow(Box::new(compute));
        self
    }

    /// Explicit cell value. Wins over resubmitted and current values.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(Dynamic::Fixed(value.into()));
        self
    }

    /// Compute the cell value per row. Wins over resubmitted and
    /// current values.
    pub fn value_fn<F>(mut self, compute: F) -> Self
    where
        F: Fn(usize, &dyn Record) -> Value + 'static,
    {
        self.value = Some(Dynamic::PerRow(Box::new(compute)));
        self
    }

    /// List data for select/checkbox-list/radio-list controls.
    pub fn list_data(mut self, items: ListItems) -> Self {
        self.list_data = Some(Dynamic::Fixed(items));
        self
    }

    /// Compute the list data per row.
    pub fn list_data_fn<F>(mut self, compute: F) -> Self
    where
        F: Fn(usize, &dyn Record) -> ListItems + 'static,
    {
        self.list_data = Some(Dynamic::PerRow(Box::new(compute)));
        self
    }

    /// HTML attribute overrides for the control.
    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set one HTML attribute override.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Suffix appended to the post-var prefix of the field name.
    pub fn var_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.var_suffix = suffix.into();
        self
    }

    /// Attribute holding the primary key. Default "id".
    pub fn id_attribute(mut self, attr: impl Into<String>) -> Self {
        self.id_attribute = attr.into();
        self
    }

    /// Inline style applied on validation error.
    /// Takes precedence over [EditColumn::error_class].
    pub fn error_style(mut self, style: impl Into<String>) -> Self {
        self.error_style = style.into();
        self
    }

    /// Class token applied on validation error. Default "error".
    pub fn error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = class.into();
        self
    }

    /// Markup emitted immediately before the control.
    pub fn before(mut self, markup: impl Into<String>) -> Self {
        self.before = Some(Dynamic::Fixed(markup.into()));
        self
    }

    /// Compute the before-markup per row.
    pub fn before_fn<F>(mut self, compute: F) -> Self
    where
        F: Fn(usize, &dyn Record) -> String + 'static,
    {
        self.before = Some(Dynamic::PerRow(Box::new(compute)));
        self
    }

    /// Markup emitted immediately after the control.
    pub fn after(mut self, markup: impl Into<String>) -> Self {
        self.after = Some(Dynamic::Fixed(markup.into()));
        self
    }

    /// Compute the after-markup per row.
    pub fn after_fn<F>(mut self, compute: F) -> Self
    where
        F: Fn(usize, &dyn Record) -> String + 'static,
    {
        self.after = Some(Dynamic::PerRow(Box::new(compute)));
        self
    }

    /// The configured attribute path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate the column setup.
    ///
    /// Fails when no attribute path is configured. The grid shell must
    /// not render any row of a column that fails here.
    pub fn init(&self) -> Result<(), EditError> {
        if self.name.is_empty() {
            return Err(EditError::NoAttributePath);
        }
        Ok(())
    }

    /// Render the cell content for one row.
    ///
    /// Emits before-markup, the control, after-markup, in that order.
    /// May write a resubmitted value back onto the entity attribute,
    /// that is the intended echo after a failed validation.
    pub fn render_cell(
        &self,
        row: usize,
        data: &mut dyn Record,
        ctx: &RenderContext<'_>,
        out: &mut dyn fmt::Write,
    ) -> Result<(), EditError> {
        self.init()?;

        // per-row override of the control kind
        let input_type = self.input_type.resolve(row, &*data);

        let (entity, attr) = path::resolve_mut(data, &self.name);

        // field identity: prefix from the model type, primary key,
        // attribute name
        let prefix = match entity.model_name() {
            Some(model) => format!("{}{}", model, self.var_suffix),
            None => self.var_suffix.clone(),
        };
        let id = entity
            .get(&self.id_attribute)
            .map(|v| scalar(&v))
            .unwrap_or_default();
        let name = form::field_name(&prefix, &id, &attr);

        let resubmitted = ctx.form.value(&prefix, &id, &attr).cloned();

        // value priority: explicit expression, resubmitted value
        // (echoed back onto the entity), current attribute
        let value = if let Some(value) = &self.value {
            value.resolve(row, &*entity)
        } else if let Some(resubmitted) = &resubmitted {
            entity.set(&attr, resubmitted.clone());
            resubmitted.clone()
        } else {
            entity.get(&attr).unwrap_or(Value::Null)
        };

        let mut attrs = self.attrs.clone();

        // error decoration: only for validatable entities with a
        // resubmission under this exact field
        if resubmitted.is_some() {
            if let Some(validatable) = entity.as_validatable() {
                if !validatable.validate(&[&attr]) {
                    if let Some(message) = validatable.error(&attr) {
                        attrs.set("title", &message);
                    }
                    if !self.error_style.is_empty() {
                        attrs.append_style(&self.error_style);
                    } else {
                        attrs.append_class(&self.error_class);
                    }
                }
            }
        }

        // placeholder wins over anything configured and over the
        // error decoration
        let placeholder = match entity.as_validatable() {
            Some(validatable) => validatable.attribute_label(&attr),
            None => attr.clone(),
        };
        attrs.set("placeholder", &placeholder);

        if let Some(before) = &self.before {
            out.write_str(&before.resolve(row, &*entity))?;
        }

        match input_type {
            InputType::Widget(spec) => {
                let widget = ctx
                    .widgets
                    .instantiate(
                        &spec.class,
                        WidgetConfig {
                            name: name.clone(),
                            value: value.clone(),
                            options: spec.config,
                        },
                    )
                    .ok_or(EditError::UnknownWidget(spec.class))?;
                widget.render(out)?;
            }
            InputType::Number => {
                out.write_str(&html::input_field("number", &name, &scalar(&value), &attrs))?;
            }
            InputType::TextArea => {
                out.write_str(&html::text_area(&name, &scalar(&value), &attrs))?;
            }
            InputType::Select => {
                let items = self.resolve_list(row, &*entity);
                out.write_str(&html::drop_down_list(&name, &value, &items, &attrs))?;
            }
            InputType::Checkbox => {
                if !attrs.contains(html::UNCHECK) {
                    attrs.set(html::UNCHECK, "0");
                }
                out.write_str(&html::check_box(&name, &value, &attrs))?;
            }
            InputType::CheckboxList => {
                let items = self.resolve_list(row, &*entity);
                if !attrs.contains(html::UNCHECK) {
                    attrs.set(html::UNCHECK, "0");
                }
                out.write_str(&html::check_box_list(&name, &value, &items, &attrs))?;
            }
            InputType::RadioButtonList => {
                let items = self.resolve_list(row, &*entity);
                out.write_str(&html::radio_button_list(&name, &value, &items, &attrs))?;
            }
            InputType::File => {
                out.write_str(&html::file_field(&name, &scalar(&value), &attrs))?;
            }
            InputType::Display => {
                out.write_str(&scalar(&value))?;
            }
            InputType::None => {}
            InputType::Text => {
                out.write_str(&html::text_field(&name, &scalar(&value), &attrs))?;
            }
        }

        if let Some(after) = &self.after {
            out.write_str(&after.resolve(row, &*entity))?;
        }

        Ok(())
    }

    fn resolve_list(&self, row: usize, data: &dyn Record) -> ListItems {
        match &self.list_data {
            Some(list) => list.resolve(row, data),
            None => ListItems::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::column::InputType;

    #[test]
    fn test_from_name() {
        assert_eq!(InputType::from_name("select"), InputType::Select);
        assert_eq!(InputType::from_name("none"), InputType::None);
        assert_eq!(InputType::from_name("display"), InputType::Display);
        // unknown names default to text
        assert_eq!(InputType::from_name("password"), InputType::Text);
        assert_eq!(InputType::from_name(""), InputType::Text);
    }
}
