//! Undirected weighted graph and its traversal step producers.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{config::GraphConfig, Highlight, Result, Step, VisualiserError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub visited: bool,
    /// Tentative shortest distance; `None` means unreachable so far.
    #[serde(default)]
    pub distance: Option<u32>,
    /// Predecessor on the shortest path found so far.
    #[serde(default)]
    pub parent: Option<String>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visited: false,
            distance: None,
            parent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        let mut graph = Self::default();
        for id in &config.nodes {
            if graph.node(id).is_some() {
                return Err(VisualiserError::invalid(format!("duplicate graph node `{id}`")));
            }
            graph.nodes.push(GraphNode::new(id.clone()));
        }

        for edge in &config.edges {
            for endpoint in [&edge.from, &edge.to] {
                if graph.node(endpoint).is_none() {
                    return Err(VisualiserError::invalid(format!(
                        "edge {}-{} references unknown node `{endpoint}`",
                        edge.from, edge.to
                    )));
                }
            }
            graph.edges.push(Edge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                weight: edge.weight,
            });
        }
        Ok(graph)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Neighbours of `id` with edge weights, in edge declaration order.
    pub fn neighbours(&self, id: &str) -> Vec<(String, u32)> {
        self.edges
            .iter()
            .filter_map(|edge| {
                if edge.from == id {
                    Some((edge.to.clone(), edge.weight))
                } else if edge.to == id {
                    Some((edge.from.clone(), edge.weight))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Copy of the graph with traversal annotations cleared.
    pub fn cleared(&self) -> Self {
        Self {
            nodes: self.nodes.iter().map(|node| GraphNode::new(node.id.clone())).collect(),
            edges: self.edges.clone(),
        }
    }

    /// Node ids from the traversal root to `target`, following `parent`
    /// links. Empty when `target` was never reached.
    pub fn path_to(&self, target: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.node(target);
        while let Some(node) = current {
            if node.distance.is_none() || path.contains(&node.id) {
                return Vec::new();
            }
            path.push(node.id.clone());
            current = node.parent.as_deref().and_then(|parent| self.node(parent));
        }
        path.reverse();
        path
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    fn mark_visited(&mut self, id: &str) {
        if let Some(node) = self.node_mut(id) {
            node.visited = true;
        }
    }

    fn distance(&self, id: &str) -> Option<u32> {
        self.node(id).and_then(|node| node.distance)
    }

    fn relax(&mut self, id: &str, distance: u32, parent: &str) {
        if let Some(node) = self.node_mut(id) {
            node.distance = Some(distance);
            node.parent = Some(parent.to_string());
        }
    }

    fn require(&self, start: &str) -> Result<()> {
        match self.node(start) {
            Some(_) => Ok(()),
            None => Err(VisualiserError::invalid(format!("graph has no node `{start}`"))),
        }
    }
}

fn highlight_nodes<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<Highlight> {
    ids.into_iter().map(Highlight::node).collect()
}

fn distance_key(graph: &Graph, id: &str) -> u64 {
    graph.distance(id).map_or(u64::MAX, u64::from)
}

fn format_distance(distance: Option<u32>) -> String {
    distance.map_or_else(|| "∞".to_string(), |d| d.to_string())
}

pub fn bfs_steps(graph: &Graph, start: &str) -> Result<Vec<Step<Graph>>> {
    graph.require(start)?;
    let mut state = graph.cleared();
    let mut steps = vec![Step::new(
        format!("Starting BFS from node {start}"),
        state.clone(),
    )];

    let mut queue = VecDeque::from([start.to_string()]);
    let mut visited = HashSet::new();
    let mut order: Vec<String> = Vec::new();

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        order.push(current.clone());
        state.mark_visited(&current);

        steps.push(
            Step::new(
                format!(
                    "Visiting node {current}. BFS order so far: {}",
                    order.join(" → ")
                ),
                state.clone(),
            )
            .with_highlights([Highlight::node(&current)]),
        );

        let neighbours: Vec<String> = state
            .neighbours(&current)
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| !visited.contains(id))
            .collect();

        if !neighbours.is_empty() {
            steps.push(
                Step::new(
                    format!(
                        "Adding neighbors of {current} to queue: {}",
                        neighbours.join(", ")
                    ),
                    state.clone(),
                )
                .with_highlights(highlight_nodes(std::iter::once(&current).chain(&neighbours))),
            );
        }
        queue.extend(neighbours);
    }

    steps.push(Step::new(
        format!("BFS completed! Final order: {}", order.join(" → ")),
        state,
    ));
    Ok(steps)
}

pub fn dfs_steps(graph: &Graph, start: &str) -> Result<Vec<Step<Graph>>> {
    graph.require(start)?;

    struct Walk {
        state: Graph,
        visited: HashSet<String>,
        order: Vec<String>,
        steps: Vec<Step<Graph>>,
    }

    impl Walk {
        fn visit(&mut self, id: &str) {
            if !self.visited.insert(id.to_string()) {
                return;
            }
            self.order.push(id.to_string());
            self.state.mark_visited(id);
            self.steps.push(
                Step::new(
                    format!(
                        "Visiting node {id}. DFS order so far: {}",
                        self.order.join(" → ")
                    ),
                    self.state.clone(),
                )
                .with_highlights([Highlight::node(id)]),
            );

            let neighbours: Vec<String> = self
                .state
                .neighbours(id)
                .into_iter()
                .map(|(id, _)| id)
                .filter(|id| !self.visited.contains(id))
                .collect();
            for neighbour in neighbours {
                self.visit(&neighbour);
            }
        }
    }

    let state = graph.cleared();
    let mut walk = Walk {
        steps: vec![Step::new(
            format!("Starting DFS from node {start}"),
            state.clone(),
        )],
        state,
        visited: HashSet::new(),
        order: Vec::new(),
    };
    walk.visit(start);

    let Walk {
        state,
        order,
        mut steps,
        ..
    } = walk;
    steps.push(Step::new(
        format!("DFS completed! Final order: {}", order.join(" → ")),
        state,
    ));
    Ok(steps)
}

/// Shortest distances from `start`. Ties between equally close nodes go to
/// the one declared first.
pub fn dijkstra_steps(graph: &Graph, start: &str) -> Result<Vec<Step<Graph>>> {
    graph.require(start)?;
    let mut state = graph.cleared();
    if let Some(node) = state.node_mut(start) {
        node.distance = Some(0);
    }

    let mut steps = vec![Step::new(
        format!("Starting Dijkstra's algorithm from node {start}"),
        state.clone(),
    )
    .with_highlights([Highlight::node(start)])];

    let mut unvisited: Vec<String> = state.nodes().iter().map(|node| node.id.clone()).collect();
    while !unvisited.is_empty() {
        let mut closest = 0;
        for i in 1..unvisited.len() {
            if distance_key(&state, &unvisited[i]) < distance_key(&state, &unvisited[closest]) {
                closest = i;
            }
        }
        let current = unvisited.remove(closest);
        state.mark_visited(&current);

        let base = state.distance(&current);
        steps.push(
            Step::new(
                format!(
                    "Processing node {current} (distance: {})",
                    format_distance(base)
                ),
                state.clone(),
            )
            .with_highlights([Highlight::node(&current)]),
        );

        let Some(base) = base else {
            continue;
        };
        for (neighbour, weight) in state.neighbours(&current) {
            if !unvisited.contains(&neighbour) {
                continue;
            }
            let candidate = base.saturating_add(weight);
            let improves = state
                .distance(&neighbour)
                .map_or(true, |known| candidate < known);
            if improves {
                state.relax(&neighbour, candidate, &current);
                steps.push(
                    Step::new(
                        format!("Updating distance to {neighbour}: {candidate} (via {current})"),
                        state.clone(),
                    )
                    .with_highlights([Highlight::node(&current), Highlight::node(&neighbour)]),
                );
            }
        }
    }

    steps.push(Step::new(
        "Dijkstra's algorithm completed! All shortest paths calculated.",
        state,
    ));
    Ok(steps)
}
