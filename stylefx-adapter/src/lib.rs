//! Adapter utilities for the `stylefx` crate.
//!
//! `stylefx` is host-agnostic: it talks to nodes, timers and per-node storage through the
//! [`stylefx::FxHost`] trait. This crate provides a ready-made host and the loop that drives it:
//!
//! - [`Document`]: an in-memory node tree with base and inline style, classes, attributes, and a
//!   journal of every style write
//! - [`TimerQueue`]: one-shot timers on a manual clock
//! - [`Controller`]: owns the scheduler and the document; call `tick(now_ms)` to fire due timers
//! - [`FeatureSet`]: shortcut properties (`width`, `margin-left`, `title`, ...) reachable through
//!   `set_feature` / `get_feature`
//!
//! ```
//! use stylefx::{AnimationStep, FxOptions};
//! use stylefx_adapter::{Controller, ElementFeatures};
//!
//! let mut c = Controller::new(FxOptions::default());
//! let box_ = c.div(ElementFeatures::new().css([("width", "10px")]));
//! c.fx(box_, [AnimationStep::new([("width", "+=20px")]).duration(0.5)]);
//! c.tick(10);
//! assert_eq!(c.get_css(box_, "width"), Some("30px"));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod document;
mod features;
mod ops;
mod timers;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use document::{Document, Element, ElementFeatures, StyleWrite};
pub use features::{FeatureKind, FeatureSet};
pub use ops::{NodeOp, OpValue};
pub use timers::TimerQueue;
