use super::StreamInfo;
use crate::route::RoadGraphVertex;
use crate::{LaneId, RoadId};
use std::collections::HashMap;

/// A node of a [MultiStream].
#[derive(Clone, Debug, PartialEq)]
pub struct MultiStreamNode<K> {
    /// The road graph vertex this node belongs to.
    pub vertex: RoadGraphVertex,
    /// The lane or road of the node; absent when the branch has no such element.
    pub element: Option<StreamInfo<K>>,
    /// The nodes that follow this one.
    pub next: Vec<MultiStreamNode<K>>,
}

impl<K> MultiStreamNode<K> {
    pub fn new(vertex: RoadGraphVertex, element: Option<StreamInfo<K>>) -> Self {
        Self {
            vertex,
            element,
            next: vec![],
        }
    }

    /// Appends a child node and returns it.
    #[cfg(test)]
    pub fn push(&mut self, child: MultiStreamNode<K>) -> &mut MultiStreamNode<K> {
        self.next.push(child);
        let idx = self.next.len() - 1;
        &mut self.next[idx]
    }
}

/// A tree of lanes or roads, branching wherever the road graph branches.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiStream<K> {
    root: MultiStreamNode<K>,
}

/// A branching stream of lanes.
pub type LaneMultiStream = MultiStream<LaneId>;

/// A branching stream of roads.
pub type RoadMultiStream = MultiStream<RoadId>;

impl<K: Copy + PartialEq> MultiStream<K> {
    /// Creates a multi-stream from its root node.
    pub fn new(root: MultiStreamNode<K>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &MultiStreamNode<K> {
        &self.root
    }

    /// Counts the nodes of the tree.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Iterates over all nodes, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = &MultiStreamNode<K>> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.next.iter().rev());
            Some(node)
        })
    }

    /// Evaluates a value at every node, each derived from the value of its parent.
    ///
    /// `step` receives a node that has an element together with the value of the
    /// parent; the root's parent value is `init`. A node without an element takes
    /// over its parent's value unchanged. When several nodes share a vertex, the
    /// last one visited determines the result for that vertex.
    pub fn traverse<A, F>(&self, init: A, mut step: F) -> HashMap<RoadGraphVertex, A>
    where
        A: Clone,
        F: FnMut(&StreamInfo<K>, &A) -> A,
    {
        let mut results = HashMap::new();
        let mut stack = vec![(&self.root, init)];
        while let Some((node, parent)) = stack.pop() {
            let value = match &node.element {
                Some(info) => step(info, &parent),
                None => parent,
            };
            for child in node.next.iter().rev() {
                stack.push((child, value.clone()));
            }
            results.insert(node.vertex, value);
        }
        results
    }

    /// Converts a road coordinate on the element of `vertex` into a stream position.
    pub fn position_by_vertex_and_s(&self, vertex: RoadGraphVertex, road_s: f64) -> Option<f64> {
        self.nodes()
            .filter(|node| node.vertex == vertex)
            .find_map(|node| node.element.as_ref())
            .map(|info| info.stream_position_of_road_s(road_s))
    }

    /// Lists every root-to-leaf path of elements.
    pub fn branches(&self) -> Vec<Vec<StreamInfo<K>>> {
        fn walk<K: Copy>(
            node: &MultiStreamNode<K>,
            path: &mut Vec<StreamInfo<K>>,
            out: &mut Vec<Vec<StreamInfo<K>>>,
        ) {
            let pushed = node.element.map(|e| path.push(e)).is_some();
            if node.next.is_empty() {
                out.push(path.clone());
            }
            for child in &node.next {
                walk(child, path, out);
            }
            if pushed {
                path.pop();
            }
        }
        let mut out = vec![];
        walk(&self.root, &mut vec![], &mut out);
        out
    }
}
