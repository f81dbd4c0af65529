use alloc::string::{String, ToString};
use alloc::vec::Vec;

use stylefx::to_kebab_case;

/// Where a shortcut property lives on an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureKind {
    Css,
    Attr,
}

const DEFAULT_CSS: [&str; 26] = [
    "width",
    "height",
    "top",
    "left",
    "right",
    "bottom",
    "position",
    "float",
    "clear",
    "padding",
    "margin",
    "border",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-width",
    "border-top-width",
];

const DEFAULT_ATTR: [&str; 2] = ["title", "lang"];

/// Properties reachable by shortcut through [`crate::Controller::set_feature`] and
/// [`crate::Controller::get_feature`].
///
/// Style names are stored in hyphen-case, so `marginLeft` and `margin-left` name the same
/// shortcut. Attribute names are matched as given.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureSet {
    css: Vec<String>,
    attr: Vec<String>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            css: DEFAULT_CSS.iter().map(ToString::to_string).collect(),
            attr: DEFAULT_ATTR.iter().map(ToString::to_string).collect(),
        }
    }
}

impl FeatureSet {
    /// A set with no shortcuts.
    pub fn empty() -> Self {
        Self {
            css: Vec::new(),
            attr: Vec::new(),
        }
    }

    pub fn with_css(mut self, property: &str) -> Self {
        let property = to_kebab_case(property);
        if !self.css.iter().any(|p| *p == property) {
            self.css.push(property.into_owned());
        }
        self
    }

    pub fn with_attr(mut self, name: &str) -> Self {
        if !self.attr.iter().any(|a| a == name) {
            self.attr.push(name.to_string());
        }
        self
    }

    pub fn css(&self) -> &[String] {
        &self.css
    }

    pub fn attr(&self) -> &[String] {
        &self.attr
    }

    /// Resolves a shortcut name to its kind and canonical property name.
    ///
    /// Style shortcuts win when a name is registered as both.
    pub fn lookup(&self, name: &str) -> Option<(FeatureKind, &str)> {
        let property = to_kebab_case(name);
        if let Some(p) = self.css.iter().find(|p| **p == property) {
            return Some((FeatureKind::Css, p.as_str()));
        }
        self.attr
            .iter()
            .find(|a| *a == name)
            .map(|a| (FeatureKind::Attr, a.as_str()))
    }
}
