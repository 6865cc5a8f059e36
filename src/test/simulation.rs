use std::collections::{BTreeSet, HashMap};

use crate::ledger::TransferError;
use crate::net::{Graph, ItemId, NodeId};
use crate::policy::{PolicyKind, SchedulingPolicy, SendIntent, SimRng};
use crate::sim::{SimError, SimState, Simulation, Termination};
use crate::topo::two_tier::{TwoTierOpts, build_two_tier};
use crate::topo::uniform::{UniformOpts, build_uniform};
use crate::topo::{content_universe, make_graph};

fn uniform(nodes: usize, items: u64, bandwidth: u64, link_capacity: u64) -> Graph {
    build_uniform(&UniformOpts {
        nodes,
        items,
        bandwidth,
        link_capacity,
    })
    .expect("uniform topology")
}

/// 0 -> 2 容量为 0，只能经 node 1 转发；目的速率不等
fn relay_graph() -> Graph {
    let caps = vec![vec![0, 4, 0], vec![4, 0, 4], vec![4, 4, 0]];
    make_graph(3, content_universe(4), &[4, 4, 4], &caps).expect("relay topology")
}

#[test]
fn five_uniform_nodes_complete_with_equal_split() {
    let mut sim = Simulation::new(uniform(5, 4, 4, 1), PolicyKind::EqualSplit, Some(42));
    let outcome = sim.run(Some(100)).expect("run");

    assert_eq!(outcome.termination, Termination::Completed);
    assert_eq!(sim.state(), SimState::Done);
    // 种子每轮至少给每个未完成节点 1 个新条目
    assert!((2..=4).contains(&outcome.rounds), "rounds {}", outcome.rounds);
    let universe = content_universe(4);
    for n in sim.graph().nodes() {
        assert_eq!(n.dataset, universe, "node {:?}", n.id);
    }
    assert!(outcome.final_sizes.iter().all(|s| s.dataset_size == 4));
    assert_eq!(outcome.utilization.len() as u64, outcome.rounds);

    assert_eq!(sim.seed(), 42);
    assert_eq!(sim.policy(), &PolicyKind::EqualSplit);

    let mut again = Simulation::new(uniform(5, 4, 4, 1), PolicyKind::EqualSplit, Some(42));
    let replay = again.run(Some(100)).expect("rerun");
    assert_eq!(replay.rounds, outcome.rounds);
    assert_eq!(replay.utilization, outcome.utilization);
}

#[test]
fn zero_capacity_links_never_converge() {
    for policy in PolicyKind::ALL {
        let mut sim = Simulation::new(uniform(2, 1, 1, 0), policy, Some(3));
        let outcome = sim.run(Some(50)).expect("run");

        assert_eq!(outcome.termination, Termination::RoundLimit, "{policy}");
        assert_eq!(outcome.rounds, 50);
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(outcome.final_sizes[1].dataset_size, 0);
        assert!(outcome.utilization.iter().all(|&u| u == 0.0));
    }
}

#[test]
fn greedy_finishes_no_later_than_equal_split_on_unequal_rates() {
    let seed = 11;
    let greedy = Simulation::new(relay_graph(), PolicyKind::Greedy, Some(seed))
        .run(Some(100))
        .expect("greedy run");
    let equal = Simulation::new(relay_graph(), PolicyKind::EqualSplit, Some(seed))
        .run(Some(100))
        .expect("equal split run");

    assert!(greedy.completed() && equal.completed());
    assert_eq!(greedy.rounds, 2);
    assert_eq!(equal.rounds, 3);
    assert!(greedy.rounds <= equal.rounds);
}

#[test]
fn items_arrive_one_round_after_they_are_sent() {
    let mut sim = Simulation::new(relay_graph(), PolicyKind::Greedy, Some(5));

    let r1 = sim.step().expect("round 1");
    assert_eq!(r1.round, 1);
    assert_eq!(r1.items_moved, 4);
    // node 1 在第 1 轮收到的条目第 2 轮才能转发给 node 2
    assert_eq!(sim.graph().node(NodeId(2)).map(|n| n.dataset.len()), Some(0));

    let r2 = sim.step().expect("round 2");
    assert_eq!(r2.state, SimState::Done);
    assert_eq!(r2.nodes.iter().map(|s| s.dataset_size).collect::<Vec<_>>(), vec![4, 4, 4]);

    assert!(matches!(sim.step(), Err(SimError::AlreadyDone { rounds: 2 })));
}

#[test]
fn unseeded_run_records_the_drawn_seed() {
    let mut sim = Simulation::new(uniform(3, 2, 2, 2), PolicyKind::UniformRandom, None);
    let seed = sim.seed();
    let outcome = sim.run(Some(100)).expect("run");
    assert_eq!(outcome.seed, seed);
    assert_eq!(outcome.policy, sim.policy().name());
}

/// 在 node 0 上总共发 3 个条目，超过带宽 2
struct Overbooking;

impl SchedulingPolicy for Overbooking {
    fn name(&self) -> &'static str {
        "overbooking"
    }

    fn decide(&self, _graph: &Graph, node: NodeId, _rng: &mut SimRng) -> Vec<SendIntent> {
        if node != NodeId(0) {
            return Vec::new();
        }
        vec![
            SendIntent {
                receiver: NodeId(1),
                items: [ItemId(0)].into_iter().collect(),
            },
            SendIntent {
                receiver: NodeId(2),
                items: [ItemId(1), ItemId(2)].into_iter().collect(),
            },
        ]
    }
}

#[test]
fn transfer_violation_aborts_the_simulation() {
    let mut sim = Simulation::new(uniform(3, 3, 2, 2), Overbooking, Some(1));
    let err = sim.run(Some(10)).unwrap_err();

    match err {
        SimError::Transfer { round, source } => {
            assert_eq!(round, 1);
            assert_eq!(
                source,
                TransferError::SenderBandwidth {
                    sender: NodeId(0),
                    receiver: NodeId(2),
                    count: 2,
                    send_util: 1,
                    bandwidth: 2,
                }
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(sim.state(), SimState::Aborted);
    assert_eq!(sim.round(), 1);

    // 第一条发送已生效但未提交，图保持在出错时的样子
    let g = sim.graph();
    assert_eq!(g.node(NodeId(0)).map(|n| n.send_util), Some(1));
    assert!(g.node(NodeId(1)).is_some_and(|n| n.dataset.is_empty()));
    assert!(g.node(NodeId(1)).is_some_and(|n| n.buffer.contains(&ItemId(0))));
    assert!(g.node(NodeId(2)).is_some_and(|n| n.buffer.is_empty()));

    assert!(matches!(sim.step(), Err(SimError::Aborted { round: 1 })));
    assert!(matches!(sim.run(Some(10)), Err(SimError::Aborted { round: 1 })));
    assert_eq!(sim.round(), 1);
}

#[test]
fn single_node_graph_is_done_before_any_round() {
    let mut sim = Simulation::new(uniform(1, 3, 2, 2), PolicyKind::Greedy, Some(0));
    assert_eq!(sim.state(), SimState::Done);
    let outcome = sim.run(None).expect("run");
    assert_eq!(outcome.termination, Termination::Completed);
    assert_eq!(outcome.rounds, 0);
}

#[test]
fn rounds_preserve_monotonicity_conservation_and_capacity() {
    let opts = TwoTierOpts {
        items: 24,
        high_nodes: 2,
        low_nodes: 5,
        high_bandwidth: 8,
        low_bandwidth: 3,
        high_capacity: 4,
        low_capacity: 2,
    };

    for policy in PolicyKind::ALL {
        for seed in 0..4 {
            let mut graph = build_two_tier(&opts).expect("two tier");
            graph.enable_trace();
            let mut sim = Simulation::new(graph, policy, Some(seed));

            while sim.state() == SimState::Running && sim.round() < 300 {
                let before: Vec<BTreeSet<ItemId>> =
                    sim.graph().nodes().iter().map(|n| n.dataset.clone()).collect();
                let report = sim.step().expect("no invariant violation");
                assert!((0.0..=1.0).contains(&report.utilization), "{policy}: {report:?}");

                let after = sim.graph().nodes();
                for (old, node) in before.iter().zip(after) {
                    assert!(node.dataset.is_superset(old), "{policy}: dataset shrank");
                }

                let log = sim.graph().trace.as_ref().expect("trace");
                let mut per_edge: HashMap<(NodeId, NodeId), u64> = HashMap::new();
                let mut sent: HashMap<NodeId, u64> = HashMap::new();
                let mut recv: HashMap<NodeId, u64> = HashMap::new();
                for t in log.transfers.iter().filter(|t| t.round == report.round) {
                    let items: BTreeSet<ItemId> = t.items.iter().copied().collect();
                    assert_eq!(t.count as usize, items.len());
                    assert!(items.is_subset(&before[t.sender.0]), "{policy}: not owned");
                    assert!(items.is_disjoint(&before[t.receiver.0]), "{policy}: duplicate");
                    assert!(items.is_subset(&after[t.receiver.0].dataset), "{policy}: lost");
                    *per_edge.entry((t.sender, t.receiver)).or_default() += t.count;
                    *sent.entry(t.sender).or_default() += t.count;
                    *recv.entry(t.receiver).or_default() += t.count;
                }
                for ((from, to), moved) in per_edge {
                    let cap = sim.graph().link(from, to).map_or(0, |l| l.capacity);
                    assert!(moved <= cap, "{policy}: edge {from:?}->{to:?} moved {moved} > {cap}");
                }
                for (node, total) in sent.into_iter().chain(recv) {
                    let bw = after[node.0].bandwidth;
                    assert!(total <= bw, "{policy}: {node:?} used {total} > {bw}");
                }
            }

            if policy != PolicyKind::UniformRandom {
                assert_eq!(sim.state(), SimState::Done, "{policy} seed {seed}");
            }
        }
    }
}

#[test]
fn trace_records_every_round_snapshot() {
    let mut graph = uniform(5, 4, 4, 1);
    graph.enable_trace();
    let mut sim = Simulation::new(graph, PolicyKind::EqualSplit, Some(8));
    let outcome = sim.run(Some(100)).expect("run");

    let log = sim.graph().trace.clone().expect("trace");
    assert_eq!(log.rounds.len() as u64, outcome.rounds);
    assert_eq!(log.current_round(), outcome.rounds);
    let last = log.rounds.last().expect("at least one round");
    assert_eq!(last.nodes, outcome.final_sizes);
    assert!(log.transfers.iter().all(|t| (1..=outcome.rounds).contains(&t.round)));
    assert!(log.transfers.iter().all(|t| t.sender != t.receiver));
}
