pub use cgmath;
pub use config::{BranchTieBreak, QueryConfig};
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use error::{NetworkError, NetworkResult};
pub use network::*;
pub use query::*;
pub use route::{RoadGraph, RoadGraphVertex, Route, RouteElement};
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use stream::{
    LaneMultiStream, LaneStream, MultiStream, MultiStreamNode, RoadMultiStream, RoadStream,
    Stream, StreamInfo, StreamPosition,
};
pub use util::Interval;

mod config;
mod debug;
mod error;
pub mod math;
mod network;
mod query;
mod route;
mod stream;
mod util;

new_key_type! {
    /// Unique ID of a [Road].
    pub struct RoadId;
    /// Unique ID of a [Section].
    pub struct SectionId;
    /// Unique ID of a [Lane].
    pub struct LaneId;
    /// Unique ID of a [Junction].
    pub struct JunctionId;
    /// Unique ID of a [LaneBoundary].
    pub struct LaneBoundaryId;
    /// Unique ID of a [TrafficSign].
    pub struct TrafficSignId;
    /// Unique ID of a [RoadMarking].
    pub struct RoadMarkingId;
    /// Unique ID of a [WorldObject].
    pub struct ObjectId;
}

type RoadSet = SlotMap<RoadId, Road>;
type SectionSet = SlotMap<SectionId, Section>;
type LaneSet = SlotMap<LaneId, Lane>;
type JunctionSet = SlotMap<JunctionId, Junction>;
type ObjectSet = SlotMap<ObjectId, WorldObject>;
