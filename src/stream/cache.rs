use super::LaneStream;
use crate::route::Route;
use crate::util::Interval;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Identifies a lane of a stream built for a route.
type CacheKey = (Route, String, i32);

/// Lane streams built so far, indexed by every lane they contain.
///
/// A stream is registered under each of its lanes together with the road
/// coordinates that lane spans, so a later request from anywhere on the
/// same stream returns the same [Arc].
#[derive(Default)]
pub struct StreamCache {
    entries: Mutex<HashMap<CacheKey, Vec<(Interval<f64>, Arc<LaneStream>)>>>,
}

impl StreamCache {
    /// Finds a cached stream for the route that contains the lane at road coordinate `s`.
    pub fn get(&self, route: &Route, road_id: &str, lane_id: i32, s: f64) -> Option<Arc<LaneStream>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (route.clone(), road_id.to_owned(), lane_id);
        let hit = entries
            .get(&key)?
            .iter()
            .find(|(bounds, _)| bounds.contains(s))
            .map(|(_, stream)| stream.clone());
        log::trace!(
            "stream cache {} for lane {} of road {:?} at s = {}",
            if hit.is_some() { "hit" } else { "miss" },
            lane_id,
            road_id,
            s
        );
        hit
    }

    /// Registers a stream under one of its lanes.
    ///
    /// # Parameters
    /// * `route` - The route the stream was built for
    /// * `road_id` - The human-readable ID of the lane's road
    /// * `lane_id` - The signed ID of the lane
    /// * `bounds` - The road coordinates spanned by the lane
    /// * `stream` - The stream
    pub fn insert(
        &self,
        route: &Route,
        road_id: &str,
        lane_id: i32,
        bounds: Interval<f64>,
        stream: Arc<LaneStream>,
    ) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry((route.clone(), road_id.to_owned(), lane_id))
            .or_default()
            .push((bounds, stream));
    }

    /// Drops every cached stream.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
