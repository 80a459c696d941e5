#[cfg(feature = "debug")]
use crate::stream::{MultiStream, Stream};
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

/// Records the elements of a freshly built stream.
#[cfg(feature = "debug")]
pub fn debug_stream<K: Copy + PartialEq + serde::Serialize>(name: &str, stream: &Stream<K>) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "stream",
            "name": name,
            "elements": stream.elements(),
        }))
    })
}

/// Records every branch of a freshly built multi-stream.
#[cfg(feature = "debug")]
pub fn debug_multi_stream<K: Copy + PartialEq + serde::Serialize>(name: &str, stream: &MultiStream<K>) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "multi_stream",
            "name": name,
            "nodes": stream.node_count(),
            "branches": stream.branches(),
        }))
    })
}

/// Takes everything recorded on this thread since the last call.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
