#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::NodeId;

#[cfg(feature = "std")]
pub(crate) type NodeMap<V> = HashMap<NodeId, V>;
#[cfg(not(feature = "std"))]
pub(crate) type NodeMap<V> = BTreeMap<NodeId, V>;
