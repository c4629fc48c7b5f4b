use crate::{step::indices, Step};

/// Push onto the top (end) of the stack.
pub fn push_steps(stack: &[i64], value: i64) -> Vec<Step<Vec<i64>>> {
    let mut data = stack.to_vec();
    data.push(value);
    let top = data.len() - 1;
    let size = data.len();

    vec![
        Step::new(format!("Pushing {value} onto the stack"), stack.to_vec()),
        Step::new(
            format!("Pushed {value}. Stack size is now {size}"),
            data,
        )
        .with_highlights(indices([top])),
    ]
}

/// Pop from the top. An empty stack yields a single narrating step.
pub fn pop_steps(stack: &[i64]) -> Vec<Step<Vec<i64>>> {
    let Some((&value, rest)) = stack.split_last() else {
        return vec![Step::new("Stack is empty, nothing to pop", Vec::new())];
    };

    let top = stack.len() - 1;
    vec![
        Step::new(
            format!("Popping {value} from the top of the stack"),
            stack.to_vec(),
        )
        .with_highlights(indices([top])),
        Step::new(
            format!("Popped {value}. Stack size is now {}", rest.len()),
            rest.to_vec(),
        ),
    ]
}
