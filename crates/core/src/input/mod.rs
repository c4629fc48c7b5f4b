//! Validation of user-typed operation parameters.
//!
//! Everything here runs before a step producer is invoked. A rejected value
//! means no step sequence is built and no engine state changes.

use crate::{Graph, Result, VisualiserError};

/// Parses a single integer such as an insert, search or delete value.
pub fn parse_value(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(VisualiserError::invalid("a value is required"));
    }

    trimmed
        .parse()
        .map_err(|_| VisualiserError::invalid(format!("`{trimmed}` is not a number")))
}

/// Parses a comma or whitespace separated list, e.g. `"10, 5, 15"`.
pub fn parse_values(input: &str) -> Result<Vec<i64>> {
    let values = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(parse_value)
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Err(VisualiserError::invalid("at least one value is required"));
    }
    Ok(values)
}

/// Parses a position into a structure holding `len` elements.
pub fn parse_index(input: &str, len: usize) -> Result<usize> {
    let trimmed = input.trim();
    let index: usize = trimmed
        .parse()
        .map_err(|_| VisualiserError::invalid(format!("`{trimmed}` is not a valid index")))?;

    if index >= len {
        return Err(VisualiserError::invalid(format!(
            "index {index} is out of range for {len} elements"
        )));
    }
    Ok(index)
}

/// Resolves a node label against the graph, ignoring case.
pub fn parse_node_label(input: &str, graph: &Graph) -> Result<String> {
    let trimmed = input.trim();
    graph
        .nodes()
        .iter()
        .find(|node| node.id.eq_ignore_ascii_case(trimmed))
        .map(|node| node.id.clone())
        .ok_or_else(|| VisualiserError::invalid(format!("graph has no node `{trimmed}`")))
}
