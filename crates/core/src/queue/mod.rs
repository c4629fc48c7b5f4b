use crate::{step::indices, Step};

/// Enqueue at the rear (end) of the queue.
pub fn enqueue_steps(queue: &[i64], value: i64) -> Vec<Step<Vec<i64>>> {
    let mut data = queue.to_vec();
    data.push(value);
    let rear = data.len() - 1;
    let size = data.len();

    vec![
        Step::new(format!("Enqueuing {value} at the rear"), queue.to_vec()),
        Step::new(format!("Enqueued {value}. Queue size is now {size}"), data)
            .with_highlights(indices([rear])),
    ]
}

/// Dequeue from the front. An empty queue yields a single narrating step.
pub fn dequeue_steps(queue: &[i64]) -> Vec<Step<Vec<i64>>> {
    let Some((&value, rest)) = queue.split_first() else {
        return vec![Step::new("Queue is empty, nothing to dequeue", Vec::new())];
    };

    vec![
        Step::new(format!("Dequeuing {value} from the front"), queue.to_vec())
            .with_highlights(indices([0])),
        Step::new(
            format!("Dequeued {value}. Queue size is now {}", rest.len()),
            rest.to_vec(),
        ),
    ]
}
