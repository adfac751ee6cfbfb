//! Single-source shortest path over the metro graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::network::{Edge, MetroNetwork, NodeIndex};

/// Frontier entry: a node reached at some accumulated distance.
#[derive(Clone, Copy)]
struct State {
    cost: f64,
    /// Push order, used to break ties between equal costs.
    seq: u64,
    node: NodeIndex,
}

// Min-heap by cost, then by push order (earlier first).
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// A shortest path: the visited nodes and the edge taken for each hop.
#[derive(Debug)]
pub(super) struct ShortestPath<'a> {
    pub nodes: Vec<NodeIndex>,
    /// `edges[i]` leads from `nodes[i]` to `nodes[i + 1]`.
    pub edges: Vec<&'a Edge>,
    pub cost_km: f64,
    /// Nodes settled before the target was reached.
    pub settled: usize,
}

impl<'a> ShortestPath<'a> {
    /// The same path walked from its last node back to its first.
    ///
    /// Each hop uses the opposite direction of the same undirected edge, so
    /// the line ridden on every hop is unchanged. Returns `None` if an edge
    /// has no stored opposite, which a built network never produces.
    pub(super) fn reversed(self, network: &'a MetroNetwork) -> Option<Self> {
        let mut edges = Vec::with_capacity(self.edges.len());
        for (i, edge) in self.edges.iter().enumerate().rev() {
            let (from, to) = (self.nodes[i], self.nodes[i + 1]);
            let back = network
                .edges(to)
                .iter()
                .find(|e| e.to == from && e.kind == edge.kind)?;
            edges.push(back);
        }
        let mut nodes = self.nodes;
        nodes.reverse();

        Some(Self {
            nodes,
            edges,
            cost_km: self.cost_km,
            settled: self.settled,
        })
    }
}

/// Dijkstra's algorithm from `source` to `target`.
///
/// Edge weights are the network's search weights (km, or km-equivalent
/// for transfers). Candidates are only replaced on a strict improvement and
/// the frontier pops equal costs in push order, so among equal-length paths
/// the first one discovered wins.
///
/// Returns `None` if the frontier is exhausted without reaching `target`.
pub(super) fn shortest_path(
    network: &MetroNetwork,
    source: NodeIndex,
    target: NodeIndex,
) -> Option<ShortestPath<'_>> {
    let n = network.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<(NodeIndex, &Edge)>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut settled_count = 0;
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist[source.0] = 0.0;
    heap.push(State {
        cost: 0.0,
        seq,
        node: source,
    });

    while let Some(State { cost, node, .. }) = heap.pop() {
        if settled[node.0] {
            continue;
        }
        settled[node.0] = true;
        settled_count += 1;

        if node == target {
            break;
        }

        for edge in network.edges(node) {
            let next = edge.to;
            if settled[next.0] {
                continue;
            }
            let next_cost = cost + edge.weight_km;
            if next_cost < dist[next.0] {
                dist[next.0] = next_cost;
                prev[next.0] = Some((node, edge));
                seq += 1;
                heap.push(State {
                    cost: next_cost,
                    seq,
                    node: next,
                });
            }
        }
    }

    if !settled[target.0] {
        return None;
    }

    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut current = target;
    while let Some((from, edge)) = prev[current.0] {
        nodes.push(from);
        edges.push(edge);
        current = from;
    }
    nodes.reverse();
    edges.reverse();

    Some(ShortestPath {
        nodes,
        edges,
        cost_km: dist[target.0],
        settled: settled_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::network::{NetworkConfig, NetworkSnapshot, RawStation};

    fn raw(id: i64, lat: f64, lon: f64, line: &str) -> RawStation {
        RawStation::new(id, format!("S{id}"), lat.to_string(), lon.to_string(), line, 0)
    }

    fn idx(net: &MetroNetwork, id: i64) -> NodeIndex {
        net.node_index(StationId(id)).unwrap()
    }

    fn ids(net: &MetroNetwork, path: &ShortestPath<'_>) -> Vec<i64> {
        path.nodes.iter().map(|&n| net.node(n).id.0).collect()
    }

    #[test]
    fn heap_pops_cheapest_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 2.0, seq: 0, node: NodeIndex(0) });
        heap.push(State { cost: 1.0, seq: 2, node: NodeIndex(1) });
        heap.push(State { cost: 1.0, seq: 1, node: NodeIndex(2) });

        assert_eq!(heap.pop().unwrap().node, NodeIndex(2));
        assert_eq!(heap.pop().unwrap().node, NodeIndex(1));
        assert_eq!(heap.pop().unwrap().node, NodeIndex(0));
    }

    #[test]
    fn trivial_path_to_self() {
        let net = MetroNetwork::build(
            &NetworkSnapshot::from_line_lists(vec![(
                "M1".into(),
                "#000000".into(),
                vec![raw(1, 41.0, 29.0, "M1"), raw(2, 41.01, 29.0, "M1")],
            )]),
            &NetworkConfig::default(),
        )
        .unwrap();

        let path = shortest_path(&net, idx(&net, 1), idx(&net, 1)).unwrap();
        assert_eq!(ids(&net, &path), vec![1]);
        assert!(path.edges.is_empty());
        assert_eq!(path.cost_km, 0.0);
    }

    #[test]
    fn disconnected_target_is_unreachable() {
        let net = MetroNetwork::build(
            &NetworkSnapshot::from_line_lists(vec![
                ("M1".into(), "#000000".into(), vec![raw(1, 41.0, 29.0, "M1")]),
                ("M2".into(), "#000000".into(), vec![raw(2, 42.0, 29.0, "M2")]),
            ]),
            &NetworkConfig::default(),
        )
        .unwrap();

        assert!(shortest_path(&net, idx(&net, 1), idx(&net, 2)).is_none());
    }

    #[test]
    fn equal_cost_paths_keep_first_discovered() {
        // 1 - 2 - 4 on line M1 and 1 - 3 - 4 on line M2, where 2 and 3 share
        // a position so both branches have exactly the same length. Line M1
        // is inserted first, so its branch is discovered first.
        let net = MetroNetwork::build(
            &NetworkSnapshot::from_line_lists(vec![
                (
                    "M1".into(),
                    "#000000".into(),
                    vec![raw(1, 41.0, 29.0, "M1"), raw(2, 41.01, 29.01, "M1"), raw(4, 41.02, 29.0, "M1")],
                ),
                (
                    "M2".into(),
                    "#000000".into(),
                    vec![raw(1, 41.0, 29.0, "M2"), raw(3, 41.01, 29.01, "M2"), raw(4, 41.02, 29.0, "M2")],
                ),
            ]),
            &NetworkConfig::default(),
        )
        .unwrap();

        let path = shortest_path(&net, idx(&net, 1), idx(&net, 4)).unwrap();
        assert_eq!(ids(&net, &path), vec![1, 2, 4]);
    }

    #[test]
    fn reversed_path_keeps_lines() {
        let net = MetroNetwork::build(
            &NetworkSnapshot::from_line_lists(vec![
                ("M1".into(), "#000000".into(), vec![raw(1, 41.0, 29.0, "M1"), raw(2, 41.01, 29.0, "M1")]),
                ("M2".into(), "#000000".into(), vec![raw(2, 41.01, 29.0, "M2"), raw(3, 41.01, 29.01, "M2")]),
            ]),
            &NetworkConfig::default(),
        )
        .unwrap();

        let forward = shortest_path(&net, idx(&net, 1), idx(&net, 3)).unwrap();
        let kinds: Vec<_> = forward.edges.iter().map(|e| e.kind).collect();
        let cost = forward.cost_km;

        let backward = forward.reversed(&net).unwrap();
        assert_eq!(ids(&net, &backward), vec![3, 2, 1]);
        assert_eq!(backward.edges[0].to, idx(&net, 2));
        assert_eq!(backward.edges[1].to, idx(&net, 1));
        let mut back_kinds: Vec<_> = backward.edges.iter().map(|e| e.kind).collect();
        back_kinds.reverse();
        assert_eq!(kinds, back_kinds);
        assert_eq!(backward.cost_km, cost);
    }
}
