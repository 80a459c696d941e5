use super::SearchState;
use crate::stream::{LaneMultiStream, LaneStream, StreamInfo};
use crate::{LaneId, LaneType, RoadGraphVertex, RoadNetwork};
use std::collections::HashMap;

impl RoadNetwork {
    /// Advances a distance-to-end-of-lane search by one lane.
    fn end_of_lane_step(
        &self,
        info: &StreamInfo<LaneId>,
        start: f64,
        max_search_length: f64,
        lane_types: &[LaneType],
    ) -> SearchState {
        if info.end_s() < start {
            return SearchState::Searching(0.0);
        }
        if info.start_s() > start + max_search_length {
            return SearchState::Exhausted;
        }
        if !lane_types.contains(&self.lane(info.element).lane_type()) {
            return SearchState::WrongType(info.start_s() - start);
        }
        if info.end_s() > start + max_search_length {
            return SearchState::Exhausted;
        }
        SearchState::Searching(info.end_s() - start)
    }

    /// Computes the distance from a stream position to the end of the connected
    /// lanes of the requested types.
    ///
    /// # Parameters
    /// * `stream` - The lane stream to search
    /// * `start` - The stream position to measure from
    /// * `max_search_length` - Distances beyond this are reported as infinite, in m
    /// * `lane_types` - The lane types that count as a continuation
    pub fn distance_to_end_of_lane(
        &self,
        stream: &LaneStream,
        start: f64,
        max_search_length: f64,
        lane_types: &[LaneType],
    ) -> f64 {
        if stream.is_empty() {
            return f64::INFINITY;
        }
        let mut state = SearchState::Searching(0.0);
        for info in stream.elements() {
            state = self.end_of_lane_step(info, start, max_search_length, lane_types);
            if state.is_final() {
                break;
            }
        }
        match state {
            SearchState::Searching(distance) => distance.max(0.0),
            other => other.value(),
        }
    }

    /// Computes [RoadNetwork::distance_to_end_of_lane] for every branch of a multi-stream.
    pub fn distance_to_end_of_lane_multi(
        &self,
        stream: &LaneMultiStream,
        start: f64,
        max_search_length: f64,
        lane_types: &[LaneType],
    ) -> HashMap<RoadGraphVertex, f64> {
        stream
            .traverse(SearchState::Searching(0.0), |info, parent| {
                if parent.is_final() {
                    *parent
                } else {
                    self.end_of_lane_step(info, start, max_search_length, lane_types)
                }
            })
            .into_iter()
            .map(|(vertex, state)| (vertex, state.value()))
            .collect()
    }
}
