use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::{format, vec};

use crate::StyleMap;

/// Configuration for [`crate::ChainScheduler`] and the relative-value resolver.
///
/// The defaults write the standard transition properties plus the `-webkit-` and `-moz-`
/// aliases, recognise `px`, `%`, `em`, `rem` and `vw`, and use a 10 ms lead-in / 100 ms lead-out.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxOptions {
    /// Vendor prefixes written in front of every transition-control property. The empty string
    /// stands for the standard, unprefixed property.
    pub prefixes: Vec<String>,

    /// Unit suffixes recognised in relative expressions.
    ///
    /// When more than one occurs in an expression, the one listed last wins (so `rem` must come
    /// after `em`).
    pub units: Vec<String>,

    /// Unit used when a relative expression names none of `units`.
    pub default_unit: String,

    /// Step duration used when a step does not declare one.
    pub default_duration_secs: f64,

    /// Delay added to every apply timer.
    pub lead_in_ms: u64,

    /// How long before the nominal end of a step its completion callback fires.
    pub lead_out_ms: u64,
}

impl Default for FxOptions {
    fn default() -> Self {
        Self {
            prefixes: vec![String::new(), "-webkit-".into(), "-moz-".into()],
            units: ["px", "%", "em", "rem", "vw"]
                .iter()
                .map(|u| u.to_string())
                .collect(),
            default_unit: "px".into(),
            default_duration_secs: 5.0,
            lead_in_ms: 10,
            lead_out_ms: 100,
        }
    }
}

impl FxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_duration_secs(mut self, secs: f64) -> Self {
        self.default_duration_secs = secs;
        self
    }

    pub fn with_lead_in_ms(mut self, ms: u64) -> Self {
        self.lead_in_ms = ms;
        self
    }

    pub fn with_lead_out_ms(mut self, ms: u64) -> Self {
        self.lead_out_ms = ms;
        self
    }

    /// The transition-control triple for one step, written once per configured prefix.
    pub fn transition_props(&self, duration_secs: f64) -> StyleMap {
        let duration = format!("{duration_secs}s");
        let mut props = StyleMap::new();
        for prefix in &self.prefixes {
            props.insert(&format!("{prefix}transition-property"), "all");
            props.insert(&format!("{prefix}transition-duration"), duration.as_str());
            props.insert(&format!("{prefix}transition-timing-function"), "linear");
        }
        props
    }

    /// Properties that switch transitions off, written once per configured prefix.
    pub fn clear_props(&self) -> StyleMap {
        self.prefixes
            .iter()
            .map(|prefix| (format!("{prefix}transition-property"), "none"))
            .collect()
    }

    /// Normalises a step's declared duration.
    pub(crate) fn step_duration(&self, declared: Option<f64>) -> f64 {
        match declared {
            None => self.default_duration_secs,
            Some(secs) if secs.is_finite() && secs >= 0.0 => secs,
            Some(secs) => {
                fxwarn!(secs, "invalid step duration, using the default");
                self.default_duration_secs
            }
        }
    }
}
