//! Lane boundaries, traffic signs and road markings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The line style of a lane boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LaneMarkingType {
    #[default]
    None,
    Solid,
    Broken,
    SolidSolid,
    SolidBroken,
    BrokenSolid,
    BrokenBroken,
    Grass,
    BottsDots,
    Curb,
}

impl LaneMarkingType {
    /// Combines the lines of a double marking, left line first.
    pub fn combine(left: Self, right: Self) -> Option<Self> {
        use LaneMarkingType::{Broken, BrokenBroken, BrokenSolid, Solid, SolidBroken, SolidSolid};
        match (left, right) {
            (Solid, Solid) => Some(SolidSolid),
            (Solid, Broken) => Some(SolidBroken),
            (Broken, Solid) => Some(BrokenSolid),
            (Broken, Broken) => Some(BrokenBroken),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LaneMarkingColor {
    #[default]
    White,
    Yellow,
    Red,
    Blue,
    Green,
    Other,
}

/// Which line of a boundary this is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundarySide {
    /// The boundary is a single line.
    #[default]
    Single,
    /// The left line of a double line.
    Left,
    /// The right line of a double line.
    Right,
}

/// A painted line along a lane.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneBoundary {
    /// The road coordinate at which the line starts, in m.
    pub s_start: f64,
    /// The road coordinate at which the line ends, in m.
    pub s_end: f64,
    /// The width of the line in m.
    pub width: f64,
    pub marking_type: LaneMarkingType,
    pub color: LaneMarkingColor,
    pub side: BoundarySide,
}

/// A lane marking as seen from a position on a stream.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneMarkingEntity {
    /// The stream distance from the query position to the start of the marking, in m.
    ///
    /// The start is the end of the marking met first when driving along the
    /// stream, so on a lane driven against its coordinate it is the road
    /// coordinate where the marking ends.
    pub relative_start_distance: f64,
    /// The width of the marking in m.
    pub width: f64,
    pub marking_type: LaneMarkingType,
    pub color: LaneMarkingColor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrafficSignType {
    #[default]
    Undefined,
    GiveWay,
    Stop,
    DoNotEnter,
    RightOfWayNextIntersection,
    RightOfWayBegin,
    RightOfWayEnd,
    MaximumSpeedLimit,
    EndOfMaximumSpeedLimit,
    OvertakingBanBegin,
    OvertakingBanEnd,
    TownBegin,
    TownEnd,
    HighwayBegin,
    HighwayEnd,
    DistanceIndication,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignUnit {
    #[default]
    None,
    KilometerPerHour,
    MilesPerHour,
    Meter,
    Kilometer,
    Percentage,
}

/// A sign mounted below a traffic sign.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SupplementarySign {
    pub value: f64,
    pub unit: SignUnit,
    pub text: String,
}

/// A traffic sign placed along a road.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrafficSign {
    /// The road coordinate of the sign, in m.
    pub s: f64,
    pub sign_type: TrafficSignType,
    pub value: f64,
    pub unit: SignUnit,
    pub text: String,
    pub supplementary_signs: Vec<SupplementarySign>,
}

impl TrafficSign {
    /// Describes the sign as seen from `relative_distance` m before it.
    pub fn entity(&self, relative_distance: f64) -> TrafficSignEntity {
        TrafficSignEntity {
            sign_type: self.sign_type,
            relative_distance,
            value: self.value,
            unit: self.unit,
            text: self.text.clone(),
            supplementary_signs: self.supplementary_signs.clone(),
        }
    }
}

/// A traffic sign as seen from a position on a stream.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrafficSignEntity {
    pub sign_type: TrafficSignType,
    /// The stream distance from the query position to the sign, in m.
    pub relative_distance: f64,
    pub value: f64,
    pub unit: SignUnit,
    pub text: String,
    pub supplementary_signs: Vec<SupplementarySign>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoadMarkingType {
    #[default]
    Undefined,
    Stop,
    GiveWay,
    Crosswalk,
    SpeedLimit,
    Arrow,
}

/// A symbol painted on the road surface.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadMarking {
    /// The road coordinate of the marking, in m.
    pub s: f64,
    pub marking_type: RoadMarkingType,
    pub value: f64,
    pub text: String,
}

impl RoadMarking {
    /// Describes the marking as seen from `relative_distance` m before it.
    pub fn entity(&self, relative_distance: f64) -> RoadMarkingEntity {
        RoadMarkingEntity {
            marking_type: self.marking_type,
            relative_distance,
            value: self.value,
            text: self.text.clone(),
        }
    }
}

/// A road marking as seen from a position on a stream.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadMarkingEntity {
    pub marking_type: RoadMarkingType,
    /// The stream distance from the query position to the marking, in m.
    pub relative_distance: f64,
    pub value: f64,
    pub text: String,
}

