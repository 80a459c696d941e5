#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The furthest any query looks ahead, in m.
pub const EVENT_HORIZON: f64 = 2000.0;

/// The maximum number of nodes a single multi-stream may contain.
const MAX_MULTI_STREAM_NODES: usize = 1024;

/// The step used when probing for a valid `s` coordinate on a lane, in m.
const VALID_S_STEP: f64 = 1.0;

/// Tunable limits for stream construction and queries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryConfig {
    /// The maximum distance searched by horizon-bounded queries, in m.
    pub max_search_length: f64,
    /// Multi-stream construction stops adding nodes beyond this count.
    pub max_multi_stream_nodes: usize,
    /// The probe step of the valid-s searches, in m.
    pub valid_s_step: f64,
    /// How to pick a lane when several lanes continue onto the same road graph edge.
    pub tie_break: BranchTieBreak,
}

/// Selects a single successor lane out of several that lead onto the same road.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BranchTieBreak {
    /// Keep the candidate that comes first in the lane's successor list.
    #[default]
    FirstInLaneOrder,
    /// Keep the candidate whose lane id is closest to the current lane's id.
    ClosestLaneId,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_search_length: EVENT_HORIZON,
            max_multi_stream_nodes: MAX_MULTI_STREAM_NODES,
            valid_s_step: VALID_S_STEP,
            tie_break: BranchTieBreak::FirstInLaneOrder,
        }
    }
}

impl QueryConfig {
    /// Sets the maximum search length, in m.
    pub fn with_max_search_length(mut self, length: f64) -> Self {
        self.max_search_length = length;
        self
    }

    /// Sets the maximum number of multi-stream nodes.
    pub fn with_max_multi_stream_nodes(mut self, count: usize) -> Self {
        self.max_multi_stream_nodes = count;
        self
    }

    /// Sets the probe step of the valid-s searches, in m.
    ///
    /// A step that is not positive is replaced by the default step.
    pub fn with_valid_s_step(mut self, step: f64) -> Self {
        if step > 0.0 {
            self.valid_s_step = step;
        } else {
            log::warn!("ignoring valid-s step of {} m", step);
            self.valid_s_step = VALID_S_STEP;
        }
        self
    }

    /// Sets the branch tie-break policy.
    pub fn with_tie_break(mut self, tie_break: BranchTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
