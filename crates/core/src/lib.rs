//! Core library for the DSA Visualiser.
//!
//! Algorithms over classic data structures are expressed as ordered
//! sequences of immutable [`Step`] snapshots. An [`AnimationEngine`] plays a
//! sequence back under user control (play, pause, step, scrub, speed) and
//! reports every activated step to a callback, which a [`Visualizer`] uses
//! to update the [`Scene`] a renderer draws from.
//!
//! The structure modules (`array`, `stack`, `queue`, `list`, `tree`, `graph`)
//! hold the step producers: pure functions that never touch the structure
//! they are given and return the full sequence up front.

pub mod animation;
pub mod array;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod list;
pub mod queue;
pub mod render;
pub mod scene;
pub mod stack;
pub mod step;
pub mod timeline;
pub mod tree;

pub use animation::{AnimationEngine, PlaybackMode, PlaybackStatus, SpeedPreset, StepCallback};
pub use config::{AnimationConfig, AppConfig, GraphConfig, SampleData};
pub use error::{Result, VisualiserError};
pub use graph::{Edge, Graph, GraphNode};
pub use list::{LinkedList, ListNode};
pub use render::{render_sequence, SequenceStyle, TextRender};
pub use scene::{Scene, Visualizer};
pub use step::{Highlight, Step};
pub use timeline::{PendingAdvance, PlaybackClock};
pub use tree::{BinarySearchTree, TreeNode};
