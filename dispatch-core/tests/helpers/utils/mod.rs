use crate::utils::{Float, Random};
use std::cell::RefCell;

/// Returns predefined values in the order they were given.
pub struct FakeRandom {
    indices: RefCell<Vec<usize>>,
    reals: RefCell<Vec<Float>>,
}

impl FakeRandom {
    pub fn new(indices: Vec<usize>, reals: Vec<Float>) -> Self {
        fn reverse<T>(mut values: Vec<T>) -> Vec<T> {
            values.reverse();
            values
        }

        Self { indices: RefCell::new(reverse(indices)), reals: RefCell::new(reverse(reals)) }
    }
}

impl Random for FakeRandom {
    fn uniform_index(&self, len: usize) -> usize {
        let index = self.indices.borrow_mut().pop().expect("no more fake indices");
        assert!(index < len);

        index
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        assert!(min <= max);
        self.reals.borrow_mut().pop().expect("no more fake reals")
    }
}
