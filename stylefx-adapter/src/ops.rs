use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use stylefx::{AnimationStep, StyleMap, Value};

/// A per-node operation for [`crate::Controller::apply_to_all`].
///
/// Setters and `Fx`/`ClearFx` yield the node and leave the batch chainable. Getters yield an
/// [`OpValue`] and turn the batch into a list of values.
#[derive(Clone, Debug)]
pub enum NodeOp {
    SetCss(StyleMap),
    GetCss(String),
    GetCssMany(Vec<String>),
    AddClass(Vec<String>),
    ToggleClass(Vec<String>),
    SetAttr(Vec<(String, String)>),
    GetAttr(String),
    SetData(String, Value),
    GetData(String),
    /// A shortcut from the controller's [`crate::FeatureSet`]: `(name, value)`.
    SetFeature(String, String),
    GetFeature(String),
    SetHtml(String),
    AppendHtml(String),
    GetHtml,
    Fx(Vec<AnimationStep>),
    ClearFx,
}

impl NodeOp {
    pub fn set_css(props: impl Into<StyleMap>) -> Self {
        Self::SetCss(props.into())
    }

    pub fn get_css(property: &str) -> Self {
        Self::GetCss(property.to_string())
    }

    pub fn get_css_many<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::GetCssMany(to_strings(properties))
    }

    pub fn add_class<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::AddClass(to_strings(classes))
    }

    pub fn toggle_class<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::ToggleClass(to_strings(classes))
    }

    pub fn set_feature(name: &str, value: impl Into<String>) -> Self {
        Self::SetFeature(name.to_string(), value.into())
    }

    pub fn get_feature(name: &str) -> Self {
        Self::GetFeature(name.to_string())
    }

    pub fn fx<I>(steps: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnimationStep>,
    {
        Self::Fx(steps.into_iter().map(Into::into).collect())
    }

    /// `true` when the operation produces a value rather than the node.
    pub fn is_getter(&self) -> bool {
        matches!(
            self,
            Self::GetCss(_)
                | Self::GetCssMany(_)
                | Self::GetAttr(_)
                | Self::GetData(_)
                | Self::GetFeature(_)
                | Self::GetHtml
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCss(_) => "set_css",
            Self::GetCss(_) => "get_css",
            Self::GetCssMany(_) => "get_css_many",
            Self::AddClass(_) => "add_class",
            Self::ToggleClass(_) => "toggle_class",
            Self::SetAttr(_) => "set_attr",
            Self::GetAttr(_) => "get_attr",
            Self::SetData(..) => "set_data",
            Self::GetData(_) => "get_data",
            Self::SetFeature(..) => "set_feature",
            Self::GetFeature(_) => "get_feature",
            Self::SetHtml(_) => "set_html",
            Self::AppendHtml(_) => "append_html",
            Self::GetHtml => "get_html",
            Self::Fx(_) => "fx",
            Self::ClearFx => "clear_fx",
        }
    }
}

fn to_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().map(|s| s.as_ref().to_string()).collect()
}

/// What a getter [`NodeOp`] read from one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpValue {
    Css(Option<String>),
    CssMany(BTreeMap<String, Option<String>>),
    Attr(Option<String>),
    Data(Option<Value>),
    Html(Option<String>),
}

impl OpValue {
    /// The value of a `Css`, `Attr` or `Html` result.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Css(v) | Self::Attr(v) | Self::Html(v) => v.as_deref(),
            Self::CssMany(_) | Self::Data(_) => None,
        }
    }
}
