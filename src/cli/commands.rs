//! CLI command implementations.
//!
//! Graphs are read from plain-text edge lists: one `source target` pair per
//! line, a single token declares an isolated node, `#` starts a comment.

use std::io::Write;
use std::path::Path;

use crate::engine::{
    common_parent, find_connected_nodes, find_connected_paths, nodes_with_single_connection,
    root_nodes, terminal_nodes,
};
use crate::graph::traversal::Bfs;
use crate::graph::{BfsConfig, DirectedGraph, TraversalDirection, UndirectedEdgeSet};
use crate::types::{Edge, GraphError, GraphResult, UndirectedEdge};

/// Parsed content of an edge-list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    /// Nodes declared on their own line.
    pub nodes: Vec<String>,
    /// Edges in file order.
    pub edges: Vec<Edge<String>>,
}

/// Parse edge-list text.
pub fn parse_edge_list(text: &str) -> GraphResult<EdgeList> {
    let mut list = EdgeList::default();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            [node] => list.nodes.push((*node).to_string()),
            [source, target] => list
                .edges
                .push(Edge::new((*source).to_string(), (*target).to_string())),
            _ => {
                return Err(GraphError::Parse {
                    line: index + 1,
                    reason: format!("expected 1 or 2 tokens, found {}", tokens.len()),
                })
            }
        }
    }
    Ok(list)
}

/// Read an edge-list file into a directed graph.
///
/// Repeated edges are skipped with a warning.
pub fn load_graph(path: &Path) -> GraphResult<DirectedGraph<Edge<String>>> {
    let text = std::fs::read_to_string(path)?;
    graph_from_list(parse_edge_list(&text)?)
}

/// Build a directed graph from a parsed edge list.
pub fn graph_from_list(list: EdgeList) -> GraphResult<DirectedGraph<Edge<String>>> {
    let mut graph: DirectedGraph<Edge<String>> = DirectedGraph::new();
    graph.add_nodes(list.nodes);
    for edge in list.edges {
        if graph.exists_edge(&edge) {
            log::warn!("skipping duplicate edge {}", edge);
            continue;
        }
        graph.add_node(edge.source.clone());
        graph.add_node(edge.target.clone());
        graph.add_edge(edge)?;
    }
    log::debug!(
        "loaded graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// The edges of a directed graph with direction dropped.
///
/// `a b` and `b a` collapse into one undirected edge.
pub fn undirected_view(
    graph: &DirectedGraph<Edge<String>>,
) -> GraphResult<UndirectedEdgeSet<UndirectedEdge<String>>> {
    let mut set: UndirectedEdgeSet<UndirectedEdge<String>> = UndirectedEdgeSet::new();
    for edge in graph.edges() {
        let undirected = UndirectedEdge::new(edge.source.clone(), edge.target.clone());
        if set.exists_edge(&undirected) {
            log::warn!("skipping reversed duplicate {}", edge);
            continue;
        }
        set.add_edge(undirected)?;
    }
    Ok(set)
}

/// Display summary information about an edge-list file.
pub fn cmd_info(path: &Path, json: bool, out: &mut impl Write) -> GraphResult<()> {
    let graph = load_graph(path)?;
    let undirected = undirected_view(&graph)?;
    let roots = root_nodes(&graph).count();
    let leaves = terminal_nodes(&graph).count();
    let components = find_connected_paths(&undirected).count();
    let self_loops = graph.edges().filter(|e| e.source == e.target).count();

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "nodes": graph.node_count(),
            "edges": graph.edge_count(),
            "roots": roots,
            "leaves": leaves,
            "components": components,
            "self_loops": self_loops,
        });
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        )?;
    } else {
        writeln!(out, "File: {}", path.display())?;
        writeln!(out, "Nodes: {}", graph.node_count())?;
        writeln!(out, "Edges: {}", graph.edge_count())?;
        writeln!(out, "Roots: {}", roots)?;
        writeln!(out, "Leaves: {}", leaves)?;
        writeln!(out, "Components: {}", components)?;
        writeln!(out, "Self-loops: {}", self_loops)?;
    }
    Ok(())
}

/// Breadth-first traversal from a start node.
pub fn cmd_bfs(
    path: &Path,
    start: &str,
    direction: TraversalDirection,
    max_depth: Option<usize>,
    json: bool,
    out: &mut impl Write,
) -> GraphResult<()> {
    let graph = load_graph(path)?;
    let start = start.to_string();
    let mut config = BfsConfig::new();
    config.max_depth = max_depth;

    let found: Vec<_> = Bfs::directed(graph.edge_set(), &start, direction, config).collect();

    if json {
        let edges: Vec<serde_json::Value> = found
            .iter()
            .map(|f| {
                serde_json::json!({
                    "source": f.edge.source,
                    "target": f.edge.target,
                    "depth": f.depth,
                })
            })
            .collect();
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&edges).unwrap_or_default()
        )?;
    } else {
        writeln!(out, "BFS from {} ({:?}):", start, direction)?;
        for f in &found {
            writeln!(out, "  [depth {}] {}", f.depth, f.edge)?;
        }
        writeln!(out, "Edges: {}", found.len())?;
    }
    Ok(())
}

/// Nearest common ancestor of the given nodes.
pub fn cmd_common_parent(
    path: &Path,
    nodes: &[String],
    json: bool,
    out: &mut impl Write,
) -> GraphResult<()> {
    let graph = load_graph(path)?;
    let parent = common_parent(&graph, nodes.iter().cloned());

    if json {
        writeln!(
            out,
            "{}",
            serde_json::json!({ "nodes": nodes, "parent": parent })
        )?;
    } else {
        match parent {
            Some(parent) => writeln!(out, "Common parent: {}", parent)?,
            None => writeln!(out, "No common parent")?,
        }
    }
    Ok(())
}

/// Connected components, ignoring edge direction.
pub fn cmd_components(path: &Path, json: bool, out: &mut impl Write) -> GraphResult<()> {
    let graph = load_graph(path)?;
    let undirected = undirected_view(&graph)?;
    let components: Vec<Vec<&String>> = find_connected_nodes(&undirected).collect();

    if json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&components).unwrap_or_default()
        )?;
    } else {
        for (i, component) in components.iter().enumerate() {
            let names: Vec<&str> = component.iter().map(|n| n.as_str()).collect();
            writeln!(out, "Component {}: {}", i + 1, names.join(" "))?;
        }
        writeln!(out, "Components: {}", components.len())?;
    }
    Ok(())
}

/// Nodes without children, or with `undirected` nodes with a single connection.
pub fn cmd_leaves(
    path: &Path,
    undirected: bool,
    json: bool,
    out: &mut impl Write,
) -> GraphResult<()> {
    let graph = load_graph(path)?;
    let view;
    let leaves: Vec<&String> = if undirected {
        view = undirected_view(&graph)?;
        nodes_with_single_connection(&view)
    } else {
        terminal_nodes(&graph).collect()
    };
    print_nodes("Leaves", &leaves, json, out)
}

/// Nodes without parents.
pub fn cmd_roots(path: &Path, json: bool, out: &mut impl Write) -> GraphResult<()> {
    let graph = load_graph(path)?;
    let roots: Vec<&String> = root_nodes(&graph).collect();
    print_nodes("Roots", &roots, json, out)
}

fn print_nodes(label: &str, nodes: &[&String], json: bool, out: &mut impl Write) -> GraphResult<()> {
    if json {
        writeln!(out, "{}", serde_json::json!(nodes))?;
    } else {
        for node in nodes {
            writeln!(out, "  {}", node)?;
        }
        writeln!(out, "{}: {}", label, nodes.len())?;
    }
    Ok(())
}
