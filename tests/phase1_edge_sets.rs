//! Phase 1 tests: edge collections, adjacency buckets and change events.

use std::cell::RefCell;
use std::rc::Rc;

use relgraph::{
    ById, Change, DirectedEdgeSet, DuplicatePolicy, Edge, EdgeSet, GraphError, IdNodeSet, NodeSet,
    UndirectedEdge, UndirectedEdgeSet,
};

// ==================== Helpers ====================

fn hierarchy() -> DirectedEdgeSet<Edge<u32>> {
    DirectedEdgeSet::from_edges([
        Edge::new(1, 11),
        Edge::new(1, 12),
        Edge::new(11, 111),
        Edge::new(11, 112),
        Edge::new(12, 121),
        Edge::new(12, 122),
    ])
    .unwrap()
}

/// Every stored edge sits in its source's outgoing bucket and its target's
/// incoming bucket, and nowhere else.
fn assert_directed_index(set: &DirectedEdgeSet<Edge<u32>>) {
    for edge in set.distinct_edges() {
        assert!(
            set.outgoing_edges(&edge.source).any(|e| e == edge),
            "{} missing from outgoing bucket",
            edge
        );
        assert!(
            set.incoming_edges(&edge.target).any(|e| e == edge),
            "{} missing from incoming bucket",
            edge
        );
    }
    let total_out: usize = set
        .distinct_edges()
        .map(|e| e.source)
        .collect::<std::collections::HashSet<_>>()
        .iter()
        .map(|n| set.out_degree(n))
        .sum();
    assert_eq!(total_out, set.edge_collection().distinct_count());
}

// ==================== EdgeSet ====================

#[test]
fn test_edge_set_rejects_duplicates_by_default() {
    let mut set: EdgeSet<Edge<u32>> = EdgeSet::new();
    set.add_edge(Edge::new(1, 2)).unwrap();
    match set.add_edge(Edge::new(1, 2)) {
        Err(GraphError::DuplicateEdge(_)) => {}
        other => panic!("Expected DuplicateEdge, got {:?}", other),
    }
    assert_eq!(set.edge_count(), 1);
}

#[test]
fn test_edge_set_allow_counts_multiplicity() {
    let mut set: EdgeSet<Edge<u32>> = EdgeSet::with_policy(DuplicatePolicy::Allow);
    assert!(set.allows_duplicates());
    set.add_edges([Edge::new(1, 2), Edge::new(1, 2), Edge::new(2, 3)])
        .unwrap();

    assert_eq!(set.edge_count(), 3);
    assert_eq!(set.distinct_count(), 2);
    assert_eq!(set.multiplicity(&Edge::new(1, 2)), 2);
    assert_eq!(set.edges().count(), 3);

    assert!(set.remove_edge(&Edge::new(1, 2)));
    assert!(set.exists_edge(&Edge::new(1, 2)));
    assert!(set.remove_edge(&Edge::new(1, 2)));
    assert!(!set.exists_edge(&Edge::new(1, 2)));
    assert!(!set.remove_edge(&Edge::new(1, 2)));
}

#[test]
fn test_edge_set_linear_queries() {
    let set: EdgeSet<Edge<u32>> =
        EdgeSet::from_edges([Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)]).unwrap();
    assert!(set.exists_edge_between(&2, &3));
    assert!(!set.exists_edge_between(&3, &2));
    assert_eq!(set.edges_of(&1).count(), 2);
    assert_eq!(set.edges_between(&3, &1).count(), 1);
}

#[test]
fn test_remove_edges_counts_present_only() {
    let mut set: EdgeSet<Edge<u32>> =
        EdgeSet::from_edges([Edge::new(1, 2), Edge::new(2, 3)]).unwrap();
    let removed = set.remove_edges(&[Edge::new(1, 2), Edge::new(9, 9)]);
    assert_eq!(removed, 1);
    assert_eq!(set.edge_count(), 1);
}

// ==================== Directed index ====================

#[test]
fn test_directed_one_hop_queries() {
    let set = hierarchy();
    let children: Vec<u32> = set.outgoing_nodes(&1).copied().collect();
    assert_eq!(children, vec![11, 12]);
    let parents: Vec<u32> = set.incoming_nodes(&121).copied().collect();
    assert_eq!(parents, vec![12]);
    assert_eq!(set.in_degree(&1), 0);
    assert_eq!(set.out_degree(&11), 2);
    assert!(set.exists_edge_between(&11, &112));
    assert!(!set.exists_edge_between(&112, &11));
    assert_directed_index(&set);
}

#[test]
fn test_directed_index_tracks_removal() {
    let mut set = hierarchy();
    assert!(set.remove_edge(&Edge::new(11, 111)));
    assert!(!set.remove_edge(&Edge::new(11, 111)));
    assert_eq!(set.out_degree(&11), 1);
    assert_eq!(set.in_degree(&111), 0);
    assert_directed_index(&set);

    let removed = set.remove_edges(&[Edge::new(12, 121), Edge::new(12, 122)]);
    assert_eq!(removed, 2);
    assert_eq!(set.outgoing_edges(&12).count(), 0);
    assert_directed_index(&set);
}

#[test]
fn test_directed_add_remove_restores_state() {
    let mut set = hierarchy();
    let before: Vec<Edge<u32>> = set.outgoing_edges(&1).cloned().collect();
    set.add_edge(Edge::new(1, 13)).unwrap();
    set.remove_edge(&Edge::new(1, 13));
    let after: Vec<Edge<u32>> = set.outgoing_edges(&1).cloned().collect();
    assert_eq!(before, after);
    assert_eq!(set.edge_count(), 6);
}

#[test]
fn test_directed_readd_restores_membership() {
    let mut set = hierarchy();
    let edge = Edge::new(11, 111);
    assert!(set.remove_edge(&edge));
    assert!(!set.exists_edge(&edge));
    assert_eq!(set.incoming_edges(&111).count(), 0);

    set.add_edge(edge).unwrap();
    assert!(set.exists_edge(&edge));
    assert_eq!(set.outgoing_edges(&11).filter(|e| **e == edge).count(), 1);
    assert_eq!(set.incoming_edges(&111).filter(|e| **e == edge).count(), 1);
    assert_eq!(set.out_degree(&11), 2);
    assert_eq!(set.edge_count(), 6);
    assert_directed_index(&set);
}

#[test]
fn test_directed_duplicate_rejected_leaves_index_alone() {
    let mut set = hierarchy();
    assert!(set.add_edge(Edge::new(1, 11)).is_err());
    assert_eq!(set.out_degree(&1), 2);
    assert_eq!(set.edge_count(), 6);
}

// ==================== Undirected index ====================

#[test]
fn test_undirected_symmetry() {
    let mut set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::new();
    set.add_edges([UndirectedEdge::new(1, 2), UndirectedEdge::new(3, 2)])
        .unwrap();

    assert!(set.exists_edge(&UndirectedEdge::new(2, 1)));
    assert!(set.exists_edge_between(&2, &3));
    assert!(set.exists_edge_between(&3, &2));
    assert_eq!(set.degree(&2), 2);

    let adjacent: Vec<u32> = set.adjacent_nodes(&2).copied().collect();
    assert_eq!(adjacent, vec![1, 3]);

    assert!(set.add_edge(UndirectedEdge::new(2, 3)).is_err());
}

#[test]
fn test_undirected_readd_restores_membership() {
    let mut set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::new();
    set.add_edges([UndirectedEdge::new(1, 2), UndirectedEdge::new(3, 2)])
        .unwrap();

    let edge = UndirectedEdge::new(1, 2);
    assert!(set.remove_edge(&UndirectedEdge::new(2, 1)));
    assert_eq!(set.degree(&1), 0);

    set.add_edge(edge).unwrap();
    assert!(set.exists_edge(&edge));
    assert_eq!(set.edges_of(&1).filter(|e| **e == edge).count(), 1);
    assert_eq!(set.edges_of(&2).filter(|e| **e == edge).count(), 1);
    assert_eq!(set.degree(&2), 2);
    assert_eq!(set.edge_count(), 2);
}

#[test]
fn test_undirected_self_loop_indexed_once() {
    let mut set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::new();
    set.add_edge(UndirectedEdge::new(4, 4)).unwrap();
    assert_eq!(set.degree(&4), 1);
    assert_eq!(set.adjacent_nodes(&4).copied().collect::<Vec<_>>(), vec![4]);
    assert!(set.remove_edge(&UndirectedEdge::new(4, 4)));
    assert_eq!(set.degree(&4), 0);
}

// ==================== Identity keying ====================

#[test]
fn test_by_id_distinguishes_parallel_edges() {
    let mut set: DirectedEdgeSet<Edge<u32, &str>, ById> = DirectedEdgeSet::new();
    set.add_edge(Edge::with_id("a", 1, 2)).unwrap();
    set.add_edge(Edge::with_id("b", 1, 2)).unwrap();
    assert_eq!(set.out_degree(&1), 2);
    assert_eq!(set.edges_between(&1, &2).count(), 2);

    match set.add_edge(Edge::with_id("a", 5, 6)) {
        Err(GraphError::DuplicateEdge(_)) => {}
        other => panic!("Expected DuplicateEdge, got {:?}", other),
    }

    assert!(set.exists_edge_id(&"b"));
    assert_eq!(set.get_edge(&"a").map(|e| e.target), Some(2));
    assert!(set.remove_edge_by_id(&"a"));
    assert!(!set.exists_edge_id(&"a"));
    assert_eq!(set.out_degree(&1), 1);
}

#[test]
fn test_by_id_undirected() {
    let mut set: UndirectedEdgeSet<UndirectedEdge<u32, u64>, ById> = UndirectedEdgeSet::new();
    set.add_edge(UndirectedEdge::with_id(7, 1, 2)).unwrap();
    set.add_edge(UndirectedEdge::with_id(8, 2, 1)).unwrap();
    assert_eq!(set.degree(&1), 2);
    assert!(set.remove_edge_by_id(&7));
    assert_eq!(set.degree(&2), 1);
    assert!(set.get_edge(&8).is_some());
}

// ==================== Node sets ====================

#[test]
fn test_node_set_membership() {
    let mut nodes: NodeSet<&str> = NodeSet::new();
    assert!(nodes.add_node("a"));
    assert!(!nodes.add_node("a"));
    assert_eq!(nodes.add_nodes(["b", "c", "a"]), 2);
    assert_eq!(nodes.nodes().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(nodes.remove_nodes(&["b", "z"]), 1);
    assert!(!nodes.exists_node(&"b"));
    nodes.clear_nodes();
    assert!(nodes.is_empty());
}

#[test]
fn test_id_node_set() {
    let mut nodes: IdNodeSet<u32, String> = IdNodeSet::new();
    nodes.add_node(1, "one".to_string()).unwrap();
    nodes.add_node(2, "two".to_string()).unwrap();
    assert!(matches!(
        nodes.add_node(1, "uno".to_string()),
        Err(GraphError::DuplicateNode(_))
    ));

    if let Some(value) = nodes.get_node_mut(&2) {
        value.push_str("!");
    }
    assert_eq!(nodes.get_node(&2).map(String::as_str), Some("two!"));
    assert_eq!(nodes.remove_node(&1), Some("one".to_string()));
    assert_eq!(nodes.node_ids().copied().collect::<Vec<_>>(), vec![2]);
}

// ==================== Change events ====================

#[test]
fn test_edge_events_follow_mutations() {
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);

    let mut set: DirectedEdgeSet<Edge<u32>> = DirectedEdgeSet::new();
    set.subscribe(move |change: Change<'_, Edge<u32>>| {
        let entry = match change.element() {
            Some(edge) => format!("{} {}", change.name(), edge),
            None => change.name().to_string(),
        };
        sink.borrow_mut().push(entry);
    });

    set.add_edge(Edge::new(1, 2)).unwrap();
    set.add_edge(Edge::new(2, 3)).unwrap();
    let _ = set.add_edge(Edge::new(1, 2));
    set.remove_edge(&Edge::new(1, 2));
    set.remove_edge(&Edge::new(1, 2));
    set.clear_edges();
    set.clear_edges();

    assert_eq!(
        *log.borrow(),
        vec!["add 1->2", "add 2->3", "remove 1->2", "reset"]
    );
}

#[test]
fn test_observer_sees_indexed_state_through_counter() {
    let adds = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&adds);

    let mut set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::new();
    set.subscribe(move |change| {
        if let Change::Added(_) = change {
            *counter.borrow_mut() += 1;
        }
    });
    set.add_edges([UndirectedEdge::new(1, 2), UndirectedEdge::new(2, 3)])
        .unwrap();
    assert_eq!(*adds.borrow(), 2);
}
