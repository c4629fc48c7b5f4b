//! Plain-text rendering of structure snapshots.
//!
//! Rendering is a pure function of a snapshot and its highlight set.
//! Highlighted elements are wrapped in `*`.

use std::fmt::Write as _;

use crate::{BinarySearchTree, Graph, Highlight, LinkedList, TreeNode};

const BAR_WIDTH: usize = 40;

/// How a plain integer sequence is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStyle {
    /// One horizontal bar per element, scaled to the largest value.
    Bars,
    /// Vertical, top of the stack first.
    Stack,
    /// Horizontal, front on the left.
    Queue,
}

pub trait TextRender {
    fn render(&self, highlights: &[Highlight]) -> String;
}

fn mark(label: impl std::fmt::Display, highlighted: bool) -> String {
    if highlighted {
        format!("*{label}*")
    } else {
        label.to_string()
    }
}

fn has_index(highlights: &[Highlight], index: usize) -> bool {
    highlights.contains(&Highlight::Index(index))
}

fn has_node(highlights: &[Highlight], id: &str) -> bool {
    highlights
        .iter()
        .any(|h| matches!(h, Highlight::Node(node) if node == id))
}

/// Bar length for `magnitude`, scaled so `max` fills [`BAR_WIDTH`].
fn bar_len(magnitude: u64, max: u64) -> usize {
    let scaled = u128::from(magnitude) * BAR_WIDTH as u128 / u128::from(max.max(1));
    usize::try_from(scaled).unwrap_or(BAR_WIDTH)
}

pub fn render_sequence(values: &[i64], style: SequenceStyle, highlights: &[Highlight]) -> String {
    if values.is_empty() {
        return "(empty)".to_string();
    }

    let mut out = String::new();
    match style {
        SequenceStyle::Bars => {
            let max = values.iter().map(|v| v.unsigned_abs()).max().unwrap_or(1).max(1);
            for (i, value) in values.iter().enumerate() {
                let len = bar_len(value.unsigned_abs(), max);
                let _ = writeln!(
                    out,
                    "[{i:>2}] {:>8} {}",
                    mark(value, has_index(highlights, i)),
                    "#".repeat(len.max(1))
                );
            }
        }
        SequenceStyle::Stack => {
            for (i, value) in values.iter().enumerate().rev() {
                let top = if i == values.len() - 1 { "  <- top" } else { "" };
                let _ = writeln!(out, "| {:^8} |{top}", mark(value, has_index(highlights, i)));
            }
            out.push_str("+----------+\n");
        }
        SequenceStyle::Queue => {
            let cells: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, value)| mark(value, has_index(highlights, i)))
                .collect();
            let _ = writeln!(out, "front -> | {} | <- rear", cells.join(" | "));
        }
    }
    out
}

impl TextRender for LinkedList {
    fn render(&self, highlights: &[Highlight]) -> String {
        let mut parts: Vec<String> = self
            .nodes()
            .iter()
            .map(|node| mark(node.value, has_node(highlights, &node.id.to_string())))
            .collect();
        parts.push("null".to_string());
        format!("head -> {}\n", parts.join(" -> "))
    }
}

impl TextRender for BinarySearchTree {
    /// Sideways outline: right subtree above, left subtree below.
    fn render(&self, highlights: &[Highlight]) -> String {
        if self.is_empty() {
            return "(empty tree)".to_string();
        }

        let mut out = String::new();
        let mut pending: Vec<(&TreeNode, usize)> = Vec::new();
        let mut current = self.root().map(|root| (root, 0));
        loop {
            while let Some((node, depth)) = current {
                pending.push((node, depth));
                current = node.right.as_deref().map(|right| (right, depth + 1));
            }
            let Some((node, depth)) = pending.pop() else {
                break;
            };
            let label = mark(node.value, has_node(highlights, &node.id.to_string()));
            let _ = writeln!(out, "{}{label}", "    ".repeat(depth));
            current = node.left.as_deref().map(|left| (left, depth + 1));
        }
        out
    }
}

impl TextRender for Graph {
    fn render(&self, highlights: &[Highlight]) -> String {
        let mut out = String::from("node  visited  distance  via\n");
        for node in self.nodes() {
            let distance = node
                .distance
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            let _ = writeln!(
                out,
                "{:<5} {:<8} {:<9} {}",
                mark(&node.id, has_node(highlights, &node.id)),
                if node.visited { "yes" } else { "no" },
                distance,
                node.parent.as_deref().unwrap_or("-"),
            );
        }

        let edges: Vec<String> = self
            .edges()
            .iter()
            .map(|e| format!("{}-{}:{}", e.from, e.to, e.weight))
            .collect();
        let _ = writeln!(out, "edges: {}", edges.join(", "));
        out
    }
}
