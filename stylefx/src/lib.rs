//! A headless scheduler for chained CSS-transition style steps.
//!
//! For an in-memory document, manual-clock timers and a driving controller, see the
//! `stylefx-adapter` crate.
//!
//! This crate focuses on the temporal logic of "fx" chaining: cancelling a node's superseded
//! chain, computing cumulative step offsets, resolving relative (`+=` / `-=`) values against live
//! computed style, and firing completion callbacks just before a step's transition ends.
//!
//! It is UI-agnostic. A host is expected to provide (see [`FxHost`]):
//! - a style write and a computed-style read per node
//! - one-shot timers that can be cancelled
//! - a [`NodeStorage`] owned alongside its nodes
//!
//! The host performs the visual transition itself once a style property is written.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batch;
mod casing;
mod host;
mod key;
mod options;
mod resolve;
mod scheduler;
mod state;
mod step;
mod storage;
mod types;


pub use batch::{Batch, Outcome, apply_to_all};
pub use casing::{to_camel_case, to_kebab_case};
pub use host::{FxContext, FxHost};
pub use options::FxOptions;
pub use resolve::{DeltaOp, RelativeExpr, ResolveError, resolve, resolve_map};
pub use scheduler::{ChainScheduler, StepTiming};
pub use state::{FxState, NodeAnimationState};
pub use step::{AnimationStep, FxTask, OnComplete};
pub use storage::NodeStorage;
pub use types::{ChainToken, NodeId, StyleMap, StyleMapIter, TimerHandle, Value};
