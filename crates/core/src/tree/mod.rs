//! Binary search tree snapshots and their insert/delete step producers.
//!
//! Every step carries a full copy of the tree. Nodes keep a synthetic id for
//! their whole life so a highlight names the same node in every snapshot.
//! Duplicate values are routed to the right subtree.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Highlight, Step};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: u64,
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(id: u64, value: i64) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
        }
    }

    fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinarySearchTree {
    root: Option<Box<TreeNode>>,
    next_id: u64,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree by inserting `values` in order.
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        let mut pending: Vec<&TreeNode> = self.root().into_iter().collect();
        let mut count = 0;
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }
        count
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn in_order(&self) -> Vec<i64> {
        let mut values = Vec::new();
        let mut pending = Vec::new();
        let mut current = self.root();
        loop {
            while let Some(node) = current {
                pending.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = pending.pop() else {
                break;
            };
            values.push(node.value);
            current = node.right.as_deref();
        }
        values
    }

    /// Inserts `value` and returns the id of the new node.
    pub fn insert(&mut self, value: i64) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        insert_into(&mut self.root, TreeNode::leaf(id, value));
        id
    }

    /// Removes the first node holding `value`. Returns `false` on a miss.
    pub fn remove(&mut self, value: i64) -> bool {
        remove_from(&mut self.root, value)
    }
}

impl Drop for BinarySearchTree {
    // Unlinks nodes one by one so a degenerate tree never drops recursively.
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

fn insert_into(root: &mut Option<Box<TreeNode>>, leaf: TreeNode) {
    let mut slot = root;
    while let Some(node) = slot {
        slot = if leaf.value < node.value {
            &mut node.left
        } else {
            &mut node.right
        };
    }
    *slot = Some(Box::new(leaf));
}

fn remove_from(root: &mut Option<Box<TreeNode>>, value: i64) -> bool {
    let mut slot = root;
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => value.cmp(&node.value),
            None => return false,
        };
        if ordering == Ordering::Equal {
            break;
        }
        let Some(node) = slot else {
            return false;
        };
        slot = if ordering == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }

    let Some(node) = slot.as_mut() else {
        return false;
    };
    if node.left.is_some() && node.right.is_some() {
        if let Some(successor) = take_min(&mut node.right) {
            node.value = successor.value;
        }
    } else {
        let child = node.left.take().or_else(|| node.right.take());
        *slot = child;
    }
    true
}

fn take_min(root: &mut Option<Box<TreeNode>>) -> Option<Box<TreeNode>> {
    let mut slot = root;
    while slot.as_ref()?.left.is_some() {
        let Some(node) = slot else {
            return None;
        };
        slot = &mut node.left;
    }
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

fn min_node(node: &TreeNode) -> &TreeNode {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current
}

fn direction(value: i64, node: &TreeNode) -> &'static str {
    if value < node.value {
        "left"
    } else {
        "right"
    }
}

pub fn insert_steps(tree: &BinarySearchTree, value: i64) -> Vec<Step<BinarySearchTree>> {
    let mut updated = tree.clone();
    let id = updated.insert(value);

    let mut steps = vec![Step::new(
        format!("Inserting {value} into the tree"),
        tree.clone(),
    )];
    let mut parent = None;
    let mut current = tree.root();
    while let Some(node) = current {
        let side = direction(value, node);
        steps.push(
            Step::new(
                format!("Comparing {value} with {}: go {side}", node.value),
                tree.clone(),
            )
            .with_highlights([Highlight::node(node.id)]),
        );
        parent = Some((node.value, side));
        current = if value < node.value {
            node.left.as_deref()
        } else {
            node.right.as_deref()
        };
    }

    let description = match parent {
        Some((parent, side)) => format!("Inserted {value} as the {side} child of {parent}"),
        None => format!("Tree is empty, {value} becomes the root"),
    };
    steps.push(
        Step::new(description, updated)
            .with_highlights([Highlight::node(id)]),
    );
    steps
}

pub fn delete_steps(tree: &BinarySearchTree, value: i64) -> Vec<Step<BinarySearchTree>> {
    let mut steps = vec![Step::new(
        format!("Deleting {value} from the tree"),
        tree.clone(),
    )];

    let mut current = tree.root();
    let target = loop {
        let Some(node) = current else {
            break None;
        };
        if node.value == value {
            break Some(node);
        }
        let side = direction(value, node);
        steps.push(
            Step::new(
                format!("Comparing {value} with {}: go {side}", node.value),
                tree.clone(),
            )
            .with_highlights([Highlight::node(node.id)]),
        );
        current = if value < node.value {
            node.left.as_deref()
        } else {
            node.right.as_deref()
        };
    };

    let Some(target) = target else {
        steps.push(Step::new(
            format!("Value {value} not found in the tree"),
            tree.clone(),
        ));
        return steps;
    };

    let found = Highlight::node(target.id);
    let (description, highlights) = match (target.left.as_deref(), target.right.as_deref()) {
        (Some(_), Some(right)) => {
            let successor = min_node(right);
            (
                format!(
                    "Found {value} with two children, its in-order successor is {}",
                    successor.value
                ),
                vec![found.clone(), Highlight::node(successor.id)],
            )
        }
        (Some(child), None) | (None, Some(child)) => (
            format!(
                "Found {value} with one child, {} takes its place",
                child.value
            ),
            vec![found.clone(), Highlight::node(child.id)],
        ),
        (None, None) => (format!("Found leaf {value}, removing it"), vec![found.clone()]),
    };
    steps.push(
        Step::new(description, tree.clone())
            .with_highlights(highlights),
    );

    let mut updated = tree.clone();
    updated.remove(value);
    let size = updated.len();
    let final_step = Step::new(
        format!("Deleted {value}. Tree now has {size} nodes"),
        updated,
    );
    steps.push(if target.child_count() == 2 {
        final_step.with_highlights([found])
    } else {
        final_step
    });
    steps
}
