use serde::{Deserialize, Serialize};

use crate::{Highlight, Step};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    pub id: u64,
    pub value: i64,
}

/// Singly linked list snapshot, nodes stored head first.
///
/// Node ids are synthetic and stable across snapshots so highlights keep
/// pointing at the same node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedList {
    nodes: Vec<ListNode>,
    next_id: u64,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[i64]) -> Self {
        let mut list = Self::new();
        for &value in values {
            list.push_back(value);
        }
        list
    }

    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }

    pub fn values(&self) -> Vec<i64> {
        self.nodes.iter().map(|node| node.value).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<&ListNode> {
        self.nodes.first()
    }

    pub fn push_front(&mut self, value: i64) -> u64 {
        let id = self.allocate_id();
        self.nodes.insert(0, ListNode { id, value });
        id
    }

    pub fn push_back(&mut self, value: i64) -> u64 {
        let id = self.allocate_id();
        self.nodes.push(ListNode { id, value });
        id
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub fn insert_head_steps(list: &LinkedList, value: i64) -> Vec<Step<LinkedList>> {
    let mut updated = list.clone();
    let id = updated.push_front(value);

    let mut steps = Vec::new();
    match list.head() {
        Some(head) => steps.push(
            Step::new(
                format!(
                    "Creating node {value} that points to the current head {}",
                    head.value
                ),
                list.clone(),
            )
            .with_highlights([Highlight::node(head.id)]),
        ),
        None => steps.push(Step::new(
            format!("List is empty, node {value} becomes the head"),
            list.clone(),
        )),
    }
    steps.push(
        Step::new(format!("Node {value} is now the head of the list"), updated)
            .with_highlights([Highlight::node(id)]),
    );
    steps
}

/// Walks node by node to the tail before linking the new node.
pub fn insert_tail_steps(list: &LinkedList, value: i64) -> Vec<Step<LinkedList>> {
    let mut updated = list.clone();
    let id = updated.push_back(value);

    let mut steps = vec![Step::new(
        format!("Inserting {value} at the tail"),
        list.clone(),
    )];

    for node in list.nodes() {
        steps.push(
            Step::new(format!("Visiting node {}", node.value), list.clone())
                .with_highlights([Highlight::node(node.id)]),
        );
    }

    let description = match list.nodes().last() {
        Some(tail) => format!("Linked node {value} after tail {}", tail.value),
        None => format!("List was empty, node {value} becomes the head"),
    };
    steps.push(
        Step::new(description, updated)
            .with_highlights([Highlight::node(id)]),
    );
    steps
}
