//! Step producers for a plain integer array.

use crate::{step::indices, Result, Step, VisualiserError};

pub type ArraySteps = Vec<Step<Vec<i64>>>;

/// Bubble sort narrated pass by pass, one step per comparison and swap.
pub fn bubble_sort_steps(array: &[i64]) -> ArraySteps {
    let mut arr = array.to_vec();
    let n = arr.len();
    let mut steps = vec![Step::new(
        format!("Starting Bubble Sort with {n} elements"),
        arr.clone(),
    )];

    for i in 0..n.saturating_sub(1) {
        steps.push(Step::new(
            format!(
                "Outer loop iteration {}: Sorting the largest {} elements",
                i + 1,
                i + 1
            ),
            arr.clone(),
        ));

        for j in 0..n - i - 1 {
            let pair = indices([j, j + 1]);
            steps.push(
                Step::new(
                    format!(
                        "Comparing elements at positions {j} and {}: {} vs {}",
                        j + 1,
                        arr[j],
                        arr[j + 1]
                    ),
                    arr.clone(),
                )
                .with_highlights(pair.clone()),
            );

            let description = if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                format!("Swapping {} and {}", arr[j + 1], arr[j])
            } else {
                format!("No swap needed: {} <= {}", arr[j], arr[j + 1])
            };
            steps.push(Step::new(description, arr.clone()).with_highlights(pair));
        }
    }

    steps.push(Step::new("Bubble Sort completed! Array is now sorted.", arr));
    steps
}

/// Scans left to right. A miss still ends with a step narrating it.
pub fn linear_search_steps(array: &[i64], target: i64) -> ArraySteps {
    let data = array.to_vec();
    let mut steps = vec![Step::new(
        format!("Starting linear search for value {target}"),
        data.clone(),
    )];

    for (i, &value) in array.iter().enumerate() {
        steps.push(
            Step::new(
                format!("Checking element at index {i}: {value}"),
                data.clone(),
            )
            .with_highlights(indices([i])),
        );

        if value == target {
            steps.push(
                Step::new(format!("Found {target} at index {i}!"), data)
                    .with_highlights(indices([i])),
            );
            return steps;
        }
    }

    steps.push(Step::new(
        format!("Value {target} not found in the array"),
        data,
    ));
    steps
}

/// Appends `value` to the end of the array.
pub fn insert_steps(array: &[i64], value: i64) -> ArraySteps {
    let mut data = array.to_vec();
    data.push(value);
    let last = data.len() - 1;

    vec![Step::new(format!("Inserting {value} at the end of the array"), data)
        .with_highlights(indices([last]))]
}

/// Removes the element at `index`.
pub fn delete_steps(array: &[i64], index: usize) -> Result<ArraySteps> {
    let Some(&value) = array.get(index) else {
        return Err(VisualiserError::invalid(format!(
            "index {index} is out of range for {} elements",
            array.len()
        )));
    };

    let mut remaining = array.to_vec();
    remaining.remove(index);
    let size = remaining.len();

    Ok(vec![
        Step::new(
            format!("Deleting element {value} at index {index}"),
            array.to_vec(),
        )
        .with_highlights(indices([index])),
        Step::new(
            format!("Element {value} removed. Array size is now {size}"),
            remaining,
        ),
    ])
}
