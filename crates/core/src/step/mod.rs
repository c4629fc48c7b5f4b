use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a structure element a step wants emphasised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// Position in a sequential structure (array, stack, queue).
    Index(usize),
    /// Identifier of a node in a linked structure (list, tree, graph).
    Node(String),
}

impl Highlight {
    pub fn node(id: impl fmt::Display) -> Self {
        Self::Node(id.to_string())
    }
}

/// One immutable moment of an algorithm's execution.
///
/// `data` is a complete snapshot of the structure, never a diff. The engine
/// hands it back verbatim to the step callback and never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<T> {
    pub description: String,
    pub data: T,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    /// Per-step duration override in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl<T> Step<T> {
    pub fn new(description: impl Into<String>, data: T) -> Self {
        let description = description.into();
        debug_assert!(!description.is_empty(), "step descriptions are never empty");
        Self {
            description,
            data,
            highlights: Vec::new(),
            delay_ms: None,
        }
    }

    pub fn with_highlights(mut self, highlights: impl IntoIterator<Item = Highlight>) -> Self {
        self.highlights = highlights.into_iter().collect();
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Duration this step stays active during autoplay: its own override,
    /// otherwise the engine's current speed.
    pub fn effective_delay(&self, speed_ms: u64) -> u64 {
        self.delay_ms.unwrap_or(speed_ms)
    }
}

/// Highlights for a run of positions, e.g. the pair under comparison.
pub fn indices(positions: impl IntoIterator<Item = usize>) -> Vec<Highlight> {
    positions.into_iter().map(Highlight::Index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_delay_wins_over_speed() {
        let step = Step::new("compare", vec![1, 2]).with_delay(250);
        assert_eq!(step.effective_delay(1000), 250);

        let step = Step::new("compare", vec![1, 2]);
        assert_eq!(step.effective_delay(1000), 1000);
    }

    #[test]
    fn serialises_highlights_as_tagged_values() {
        let step = Step::new("visit", ())
            .with_highlights([Highlight::Index(2), Highlight::node("A")]);
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["highlights"][0]["index"], 2);
        assert_eq!(json["highlights"][1]["node"], "A");
        assert!(json.get("delay_ms").is_none());
    }
}
