use crate::util::Interval;
use crate::{JunctionId, LaneId, RoadId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The priority of an intersecting connector relative to the own connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntersectingConnectionRank {
    Undefined,
    Higher,
    Lower,
}

/// Describes where two connecting roads of a junction cross.
#[derive(Clone, Debug)]
pub struct IntersectionInfo {
    /// The connector crossing the own connector.
    pub intersecting_road: RoadId,
    /// The priority of the intersecting connector.
    pub relative_rank: IntersectingConnectionRank,
    /// The conflict zone on each lane of `intersecting_road`, in its road coordinates,
    /// keyed by (lane of the connector holding this entry, lane of `intersecting_road`).
    pub s_offsets: HashMap<(LaneId, LaneId), Interval<f64>>,
}

/// A junction, joining roads through its connecting roads.
#[derive(Clone, Debug)]
pub struct Junction {
    /// The junction ID.
    id: JunctionId,
    /// The human-readable junction ID.
    od_id: String,
    /// The connecting roads.
    pub(crate) connectors: Vec<RoadId>,
    /// Pairs of (high priority, low priority) connectors.
    pub(crate) priorities: Vec<(RoadId, RoadId)>,
    /// The crossings of each connector with the others.
    pub(crate) intersections: HashMap<RoadId, Vec<IntersectionInfo>>,
}

impl Junction {
    pub(crate) fn new(id: JunctionId, od_id: String) -> Self {
        Self {
            id,
            od_id,
            connectors: vec![],
            priorities: vec![],
            intersections: HashMap::new(),
        }
    }

    pub fn id(&self) -> JunctionId {
        self.id
    }

    /// Gets the human-readable junction ID.
    pub fn od_id(&self) -> &str {
        &self.od_id
    }

    /// Gets the connecting roads of the junction.
    pub fn connectors(&self) -> &[RoadId] {
        &self.connectors
    }

    /// Gets the (high priority, low priority) connector pairs.
    pub fn priorities(&self) -> &[(RoadId, RoadId)] {
        &self.priorities
    }

    /// Gets the crossings of the given connector.
    pub fn intersections(&self, connector: RoadId) -> &[IntersectionInfo] {
        self.intersections
            .get(&connector)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
