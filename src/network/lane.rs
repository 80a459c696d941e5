use crate::math::{heading_vector, lerp_point, rot90, Point2d};
use crate::util::Interval;
use crate::{LaneBoundaryId, LaneId, ObjectId, RoadId, RoadMarkingId, SectionId, TrafficSignId};
use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slotmap::Key;
use smallvec::SmallVec;

/// The lane returned by lookups that find nothing.
static INVALID_LANE: Lazy<Lane> = Lazy::new(|| Lane::new(&LaneAttributes::default()));

/// The usage of a lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LaneType {
    #[default]
    Undefined,
    None,
    Driving,
    Stop,
    Shoulder,
    Biking,
    Sidewalk,
    Border,
    Restricted,
    Parking,
    Bidirectional,
    Median,
    Curb,
    Entry,
    Exit,
    OnRamp,
    OffRamp,
    ConnectingRamp,
    Tram,
    Rail,
}

/// A lateral side of a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

/// A sample of a lane's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometryJoint {
    /// The road coordinate of the sample, in m.
    pub s: f64,
    /// The point on the lane's centre line.
    pub reference: Point2d,
    /// The width of the lane in m.
    pub width: f64,
    /// The heading of the centre line in radians.
    pub heading: f64,
    /// The curvature of the centre line in 1/m.
    pub curvature: f64,
}

/// The lane geometry interpolated at some road coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanePoint {
    pub reference: Point2d,
    pub width: f64,
    pub heading: f64,
    pub curvature: f64,
}

impl LanePoint {
    /// Offsets the reference point laterally by `t`, positive to the left.
    pub fn offset(&self, t: f64) -> Point2d {
        self.reference + rot90(heading_vector(self.heading)) * t
    }
}

/// The part of a lane covered by an object, in road coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneOverlap {
    pub s_min: f64,
    pub s_max: f64,
}

/// The attributes of a lane.
#[derive(Clone, Debug, Default)]
pub struct LaneAttributes {
    /// The signed, human-readable lane ID.
    pub od_id: i32,
    /// The usage of the lane.
    pub lane_type: LaneType,
    /// Samples of the lane geometry, ordered by `s`.
    pub geometry: Vec<GeometryJoint>,
}

/// A single lane within a section of road.
#[derive(Clone, Debug)]
pub struct Lane {
    /// The lane ID.
    id: LaneId,
    /// The signed, human-readable lane ID.
    od_id: i32,
    /// The usage of the lane.
    lane_type: LaneType,
    /// The road the lane belongs to.
    pub(crate) road: RoadId,
    /// The section the lane belongs to.
    pub(crate) section: SectionId,
    /// The road coordinate at which the lane starts, in m.
    pub(crate) road_start: f64,
    /// The length of the lane in m.
    pub(crate) length: f64,
    /// The neighbouring lane to the left.
    pub(crate) left: Option<LaneId>,
    /// The neighbouring lane to the right.
    pub(crate) right: Option<LaneId>,
    /// The lanes connected to the end of this lane.
    pub(crate) next: SmallVec<[LaneId; 2]>,
    /// The lanes connected to the start of this lane.
    pub(crate) previous: SmallVec<[LaneId; 2]>,
    /// The boundaries on the left side, ordered by `s`.
    pub(crate) left_boundaries: Vec<LaneBoundaryId>,
    /// The boundaries on the right side, ordered by `s`.
    pub(crate) right_boundaries: Vec<LaneBoundaryId>,
    pub(crate) traffic_signs: Vec<TrafficSignId>,
    pub(crate) road_markings: Vec<RoadMarkingId>,
    /// Samples of the lane geometry.
    geometry: Vec<GeometryJoint>,
    /// The objects currently on the lane.
    pub(crate) objects: Vec<(LaneOverlap, ObjectId)>,
}

impl Lane {
    pub(crate) fn new(attribs: &LaneAttributes) -> Self {
        Self {
            id: LaneId::null(),
            od_id: attribs.od_id,
            lane_type: attribs.lane_type,
            road: RoadId::null(),
            section: SectionId::null(),
            road_start: 0.0,
            length: 0.0,
            left: None,
            right: None,
            next: SmallVec::new(),
            previous: SmallVec::new(),
            left_boundaries: vec![],
            right_boundaries: vec![],
            traffic_signs: vec![],
            road_markings: vec![],
            geometry: attribs.geometry.clone(),
            objects: vec![],
        }
    }

    pub(crate) fn place(&mut self, id: LaneId, road: RoadId, section: SectionId, bounds: Interval<f64>) {
        self.id = id;
        self.road = road;
        self.section = section;
        self.road_start = bounds.min;
        self.length = bounds.length();
    }

    /// The lane returned when a lookup finds nothing.
    pub fn invalid() -> &'static Lane {
        &INVALID_LANE
    }

    /// Returns false for the invalid lane.
    pub fn exists(&self) -> bool {
        !self.id.is_null()
    }

    pub fn id(&self) -> LaneId {
        self.id
    }

    /// Gets the signed, human-readable lane ID.
    pub fn od_id(&self) -> i32 {
        self.od_id
    }

    pub fn lane_type(&self) -> LaneType {
        self.lane_type
    }

    pub fn road(&self) -> RoadId {
        self.road
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Gets the length of the lane in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Gets the road coordinates spanned by the lane.
    pub fn bounds(&self) -> Interval<f64> {
        Interval::new(self.road_start, self.road_start + self.length)
    }

    /// Gets the road coordinate at which the lane starts.
    pub fn road_start(&self) -> f64 {
        self.road_start
    }

    /// Gets the road coordinate at which the lane ends.
    pub fn road_end(&self) -> f64 {
        self.road_start + self.length
    }

    /// Gets the neighbouring lane on the given side.
    pub fn neighbour(&self, side: Side) -> Option<LaneId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Gets the lanes connected to the end of this lane.
    pub fn next(&self) -> &[LaneId] {
        &self.next
    }

    /// Gets the lanes connected to the start of this lane.
    pub fn previous(&self) -> &[LaneId] {
        &self.previous
    }

    /// Gets the lanes following this one when driving in (`true`) or against its direction.
    pub fn successors(&self, in_direction: bool) -> &[LaneId] {
        if in_direction {
            &self.next
        } else {
            &self.previous
        }
    }

    /// Gets the boundaries on the given side, ordered by `s`.
    pub fn boundaries(&self, side: Side) -> &[LaneBoundaryId] {
        match side {
            Side::Left => &self.left_boundaries,
            Side::Right => &self.right_boundaries,
        }
    }

    pub fn traffic_signs(&self) -> &[TrafficSignId] {
        &self.traffic_signs
    }

    pub fn road_markings(&self) -> &[RoadMarkingId] {
        &self.road_markings
    }

    /// Gets the objects assigned to the lane together with the part of the lane they cover.
    pub fn objects(&self) -> &[(LaneOverlap, ObjectId)] {
        &self.objects
    }

    /// Interpolates the lane geometry at road coordinate `s`.
    ///
    /// Coordinates beyond the first or last sample are clamped.
    pub fn point_at(&self, s: f64) -> Option<LanePoint> {
        let idx = self.geometry.partition_point(|j| j.s <= s);
        let (a, b) = match idx {
            0 => (self.geometry.first()?, self.geometry.first()?),
            i if i >= self.geometry.len() => (self.geometry.last()?, self.geometry.last()?),
            i => (&self.geometry[i - 1], &self.geometry[i]),
        };
        let t = if b.s > a.s {
            ((s - a.s) / (b.s - a.s)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some(LanePoint {
            reference: lerp_point(a.reference, b.reference, t),
            width: a.width + t * (b.width - a.width),
            heading: a.heading + t * (b.heading - a.heading),
            curvature: a.curvature + t * (b.curvature - a.curvature),
        })
    }

    /// Gets the width of the lane at road coordinate `s`, in m.
    pub fn width(&self, s: f64) -> f64 {
        self.point_at(s).map_or(0.0, |p| p.width)
    }

    /// Gets the curvature of the lane at road coordinate `s`, in 1/m.
    pub fn curvature(&self, s: f64) -> f64 {
        self.point_at(s).map_or(0.0, |p| p.curvature)
    }

    /// Gets the heading of the lane at road coordinate `s`, in radians.
    pub fn direction(&self, s: f64) -> f64 {
        self.point_at(s).map_or(0.0, |p| p.heading)
    }

    /// Assigns an object to the lane.
    pub(crate) fn add_object(&mut self, overlap: LaneOverlap, object: ObjectId) {
        let idx = self
            .objects
            .iter()
            .position(|(o, _)| o.s_min > overlap.s_min)
            .unwrap_or(self.objects.len());
        self.objects.insert(idx, (overlap, object));
    }

    /// Removes an object from the lane.
    pub(crate) fn remove_object(&mut self, object: ObjectId) {
        self.objects.retain(|(_, id)| *id != object);
    }
}
