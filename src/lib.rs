#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

pub mod column;
pub mod form;
pub mod html;
pub mod path;
pub mod record;
pub mod util;
pub mod widget;

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The column has no attribute path configured.
    ///
    /// This is a setup error. It is reported by [column::EditColumn::init]
    /// before any row is rendered, and again by render_cell for columns
    /// that were never initialized.
    NoAttributePath,
    /// The input descriptor names a widget that is not registered.
    ///
    /// Contains the widget id.
    UnknownWidget(String),
    /// Writing to the output sink failed.
    Fmt(fmt::Error),
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for EditError {}

impl From<fmt::Error> for EditError {
    fn from(value: fmt::Error) -> Self {
        EditError::Fmt(value)
    }
}
