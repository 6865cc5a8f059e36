use crate::net::{ItemId, NodeId};
use crate::topo::two_tier::{TwoTierOpts, build_two_tier};
use crate::topo::uniform::{UniformOpts, build_uniform};
use crate::topo::{TopologyError, content_universe, make_graph};

#[test]
fn make_graph_builds_fully_connected_digraph_ignoring_diagonal() {
    let caps = vec![vec![9, 1, 2], vec![3, 9, 4], vec![5, 6, 9]];
    let g = make_graph(3, content_universe(3), &[4, 5, 6], &caps).expect("valid topology");

    assert_eq!(g.len(), 3);
    assert_eq!(g.links().len(), 6);
    for i in 0..3 {
        assert!(g.link(NodeId(i), NodeId(i)).is_none(), "self link {i}");
        for j in 0..3 {
            if i != j {
                let link = g.link(NodeId(i), NodeId(j)).expect("link exists");
                assert_eq!(link.capacity, caps[i][j]);
                assert_eq!(link.round_util, 0);
            }
        }
    }
    let neighbors: Vec<_> = g.neighbors(NodeId(1)).collect();
    assert_eq!(neighbors, vec![NodeId(0), NodeId(2)]);
}

#[test]
fn make_graph_seeds_only_node_zero() {
    let universe = content_universe(4);
    let g = make_graph(3, universe.clone(), &[1, 2, 3], &vec![vec![1; 3]; 3]).expect("valid");

    let seed = g.node(NodeId(0)).expect("seed");
    assert_eq!(seed.dataset, universe);
    for n in g.nodes() {
        assert!(n.buffer.is_empty());
        assert_eq!(n.send_util, 0);
        assert_eq!(n.recv_util, 0);
        if n.id != NodeId(0) {
            assert!(n.dataset.is_empty(), "node {:?} should start empty", n.id);
        }
    }
    assert_eq!(g.node(NodeId(2)).map(|n| n.bandwidth), Some(3));
    assert!(g.universe().contains(&ItemId(3)));
}

#[test]
fn make_graph_rejects_malformed_config() {
    let caps = vec![vec![1; 2]; 2];
    assert_eq!(
        make_graph(0, content_universe(1), &[], &[]).unwrap_err(),
        TopologyError::NoNodes
    );
    assert_eq!(
        make_graph(2, content_universe(1), &[1], &caps).unwrap_err(),
        TopologyError::BandwidthCount {
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(
        make_graph(2, content_universe(1), &[1, 1], &caps[..1]).unwrap_err(),
        TopologyError::CapacityRows {
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(
        make_graph(2, content_universe(1), &[1, 1], &[vec![1, 1], vec![1]]).unwrap_err(),
        TopologyError::CapacityColumns {
            row: 1,
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(
        make_graph(2, content_universe(1), &[1, 0], &caps).unwrap_err(),
        TopologyError::ZeroBandwidth { node: 1 }
    );
}

#[test]
fn uniform_topology_uses_same_bandwidth_and_capacity() {
    let opts = UniformOpts {
        nodes: 4,
        items: 7,
        bandwidth: 3,
        link_capacity: 2,
    };
    let g = build_uniform(&opts).expect("uniform");
    assert_eq!(g.len(), 4);
    assert_eq!(g.universe().len(), 7);
    assert!(g.nodes().iter().all(|n| n.bandwidth == 3));
    assert!(g.links().iter().all(|l| l.capacity == 2));
}

#[test]
fn two_tier_capacity_depends_on_destination_group() {
    let opts = TwoTierOpts {
        items: 10,
        high_nodes: 2,
        low_nodes: 3,
        high_bandwidth: 20,
        low_bandwidth: 4,
        high_capacity: 10,
        low_capacity: 2,
    };
    let g = build_two_tier(&opts).expect("two tier");
    assert_eq!(g.len(), 5);
    assert_eq!(g.links().len(), 20);

    for n in g.nodes() {
        let want = if opts.is_high(n.id) { 20 } else { 4 };
        assert_eq!(n.bandwidth, want, "bandwidth of {:?}", n.id);
    }
    for l in g.links() {
        let want = if opts.is_high(l.to) { 10 } else { 2 };
        assert_eq!(l.capacity, want, "capacity of {:?} -> {:?}", l.from, l.to);
    }
    assert_eq!(
        g.node(NodeId(0)).map(|n| n.dataset.len()),
        Some(10),
        "seed sits in the high tier"
    );
}
