use crate::util::Interval;
use crate::{JunctionId, LaneId, RoadId, SectionId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The element a road connects to at one of its ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoadLink {
    /// The road continues directly onto another road.
    Road(RoadId),
    /// The road ends at a junction.
    Junction(JunctionId),
    /// The road ends without a connection.
    #[default]
    None,
}

/// A road, made up of one or more contiguous sections.
#[derive(Clone, Debug)]
pub struct Road {
    /// The road ID.
    id: RoadId,
    /// The human-readable road ID.
    od_id: String,
    /// The sections of the road, ordered by `s`.
    pub(crate) sections: Vec<SectionId>,
    /// The length of the road in m.
    pub(crate) length: f64,
    /// The element connected to the end of the road.
    pub(crate) successor: RoadLink,
    /// The element connected to the start of the road.
    pub(crate) predecessor: RoadLink,
    /// Whether the road is driven along its own coordinate.
    in_stream_direction: bool,
    /// The junction this road is a connector of, if any.
    pub(crate) junction: Option<JunctionId>,
}

impl Road {
    pub(crate) fn new(id: RoadId, od_id: String, in_stream_direction: bool) -> Self {
        Self {
            id,
            od_id,
            sections: vec![],
            length: 0.0,
            successor: RoadLink::None,
            predecessor: RoadLink::None,
            in_stream_direction,
            junction: None,
        }
    }

    /// Gets the road's ID.
    pub fn id(&self) -> RoadId {
        self.id
    }

    /// Gets the human-readable road ID.
    pub fn od_id(&self) -> &str {
        &self.od_id
    }

    /// Gets the length of the road in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Gets the sections of the road, ordered by `s`.
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn successor(&self) -> RoadLink {
        self.successor
    }

    pub fn predecessor(&self) -> RoadLink {
        self.predecessor
    }

    pub fn in_stream_direction(&self) -> bool {
        self.in_stream_direction
    }

    /// Gets the junction this road connects through, if it is a connector.
    pub fn junction(&self) -> Option<JunctionId> {
        self.junction
    }

    /// Returns true if the road is a connecting road of a junction.
    pub fn is_connector(&self) -> bool {
        self.junction.is_some()
    }
}

/// A longitudinal slice of a road with a constant set of lanes.
#[derive(Clone, Debug)]
pub struct Section {
    /// The section ID.
    id: SectionId,
    /// The road the section belongs to.
    road: RoadId,
    /// The road coordinate at which the section starts, in m.
    s_start: f64,
    /// The length of the section in m.
    length: f64,
    /// The lanes of the section, ordered from left to right.
    pub(crate) lanes: Vec<LaneId>,
}

impl Section {
    pub(crate) fn new(id: SectionId, road: RoadId, s_start: f64, length: f64) -> Self {
        Self {
            id,
            road,
            s_start,
            length,
            lanes: vec![],
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Gets the road the section belongs to.
    pub fn road(&self) -> RoadId {
        self.road
    }

    /// Gets the lanes of the section, ordered from left to right.
    pub fn lanes(&self) -> &[LaneId] {
        &self.lanes
    }

    /// Gets the length of the section in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Gets the road coordinates spanned by the section.
    pub fn bounds(&self) -> Interval<f64> {
        Interval::new(self.s_start, self.s_start + self.length)
    }

    /// Returns true if the road coordinate `s` lies on the section, ends included.
    pub fn covers(&self, s: f64) -> bool {
        self.bounds().contains(s)
    }

    /// Returns true if any part of `[s_start, s_end]` lies on the section.
    pub fn covers_interval(&self, s_start: f64, s_end: f64) -> bool {
        self.bounds().touches(&Interval::new(s_start, s_end))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use slotmap::Key;

    #[test]
    fn covers_is_inclusive() {
        let section = Section::new(SectionId::null(), RoadId::null(), 100.0, 50.0);
        assert!(section.covers(100.0));
        assert!(section.covers(150.0));
        assert!(!section.covers(150.1));
        assert!(section.covers_interval(20.0, 100.0));
        assert!(!section.covers_interval(151.0, 200.0));
    }
}
