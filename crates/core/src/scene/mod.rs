use std::{
    cell::{Ref, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::{AnimationEngine, Highlight, PlaybackStatus, Result, Step};

/// Displayed state of one visualizer: the structure as the learner currently
/// sees it plus the elements to emphasise.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<T> {
    pub data: T,
    pub highlights: Vec<Highlight>,
    /// Bumped on every change so renderers can tell when to redraw.
    pub revision: u64,
}

impl<T: Clone> Scene<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            highlights: Vec::new(),
            revision: 0,
        }
    }

    pub fn apply_step(&mut self, step: &Step<T>) {
        self.data = step.data.clone();
        self.highlights.clone_from(&step.highlights);
        self.revision += 1;
    }

    fn restore(&mut self, data: T) {
        self.data = data;
        self.highlights.clear();
        self.revision += 1;
    }
}

/// Wires a structure's displayed scene to an [`AnimationEngine`].
///
/// Step producers always read from the displayed structure, so the result of
/// one animation is the starting point of the next.
pub struct Visualizer<T> {
    baseline: T,
    scene: Rc<RefCell<Scene<T>>>,
    engine: AnimationEngine<T>,
}

impl<T: Clone + 'static> Visualizer<T> {
    pub fn new(baseline: T, speed_ms: u64) -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::new(baseline.clone()))),
            baseline,
            engine: AnimationEngine::with_speed(speed_ms),
        }
    }

    /// Submits `steps` to the engine; each activation updates the scene.
    pub fn run(&mut self, steps: Vec<Step<T>>) {
        let scene = Rc::clone(&self.scene);
        self.engine.submit(steps, move |step, _| {
            scene.borrow_mut().apply_step(step);
        });
    }

    /// Runs `producer` against the displayed structure and submits its steps.
    ///
    /// A producer error leaves both the scene and the engine untouched.
    pub fn animate<F>(&mut self, producer: F) -> Result<usize>
    where
        F: FnOnce(&T) -> Result<Vec<Step<T>>>,
    {
        let steps = {
            let scene = self.scene.borrow();
            producer(&scene.data)?
        };
        let total = steps.len();
        self.run(steps);
        Ok(total)
    }

    /// Restores the baseline structure and rewinds the engine.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.scene.borrow_mut().restore(self.baseline.clone());
    }

    pub fn scene(&self) -> Ref<'_, Scene<T>> {
        self.scene.borrow()
    }

    /// Clone of the structure currently on display.
    pub fn current(&self) -> T {
        self.scene.borrow().data.clone()
    }

    pub fn revision(&self) -> u64 {
        self.scene.borrow().revision
    }

    pub fn engine(&self) -> &AnimationEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AnimationEngine<T> {
        &mut self.engine
    }

    pub fn status(&self) -> PlaybackStatus {
        self.engine.status()
    }

    pub fn play(&mut self) {
        self.engine.play();
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.engine.tick(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array, tree, BinarySearchTree, PlaybackMode};

    const SAMPLE: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];

    #[test]
    fn bubble_sort_plays_to_sorted_array() {
        let mut visualizer = Visualizer::new(SAMPLE.to_vec(), 1);
        visualizer
            .animate(|data| Ok(array::bubble_sort_steps(data)))
            .unwrap();

        visualizer.play();
        visualizer.engine_mut().run_to_completion();

        assert_eq!(visualizer.current(), vec![11, 12, 22, 25, 34, 64, 90]);
        assert_eq!(visualizer.engine().mode(), PlaybackMode::Idle);
        assert!(visualizer.scene().highlights.is_empty());
    }

    #[test]
    fn submit_shows_first_step_immediately() {
        let mut visualizer = Visualizer::new(SAMPLE.to_vec(), 1000);
        visualizer.animate(|data| Ok(array::insert_steps(data, 5))).unwrap();

        assert_eq!(visualizer.current().len(), 8);
        assert_eq!(visualizer.scene().highlights, vec![Highlight::Index(7)]);
        assert_eq!(visualizer.revision(), 1);
    }

    #[test]
    fn rejected_input_leaves_state_untouched() {
        let mut visualizer = Visualizer::new(SAMPLE.to_vec(), 1000);
        let err = visualizer
            .animate(|data| array::delete_steps(data, 99))
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(visualizer.revision(), 0);
        assert_eq!(visualizer.engine().total_steps(), 0);
    }

    #[test]
    fn results_carry_over_to_next_operation() {
        let mut visualizer = Visualizer::new(BinarySearchTree::from_values(&[10, 5]), 1);
        visualizer.animate(|t| Ok(tree::insert_steps(t, 7))).unwrap();
        visualizer.play();
        visualizer.engine_mut().run_to_completion();

        visualizer.animate(|t| Ok(tree::delete_steps(t, 5))).unwrap();
        visualizer.play();
        visualizer.engine_mut().run_to_completion();

        assert_eq!(visualizer.current().in_order(), vec![7, 10]);
    }

    #[test]
    fn reset_restores_baseline() {
        let mut visualizer = Visualizer::new(SAMPLE.to_vec(), 1);
        visualizer
            .animate(|data| Ok(array::bubble_sort_steps(data)))
            .unwrap();
        visualizer.play();
        visualizer.tick(Duration::from_millis(5));

        visualizer.reset();

        assert_eq!(visualizer.current(), SAMPLE.to_vec());
        assert!(visualizer.scene().highlights.is_empty());
        assert_eq!(visualizer.status().current_step, 0);
        assert!(!visualizer.engine().has_pending_advance());
    }

    #[test]
    fn scrubbing_back_keeps_displayed_data() {
        let mut visualizer = Visualizer::new(vec![2, 1], 1000);
        visualizer
            .animate(|data| Ok(array::bubble_sort_steps(data)))
            .unwrap();
        for _ in 0..3 {
            visualizer.engine_mut().next_step();
        }
        assert_eq!(visualizer.current(), vec![1, 2]);

        visualizer.engine_mut().go_to_step(0);

        assert_eq!(visualizer.status().current_step, 0);
        assert_eq!(visualizer.current(), vec![1, 2]);
    }
}
