//! Fixed-capacity LIFO stack of integers.
//!
//! This is the object exercised by the bundled `test_driver` suite. The
//! harness itself never looks inside it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of elements a [`Stack`] can hold.
pub const STACK_MAX: usize = 10;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("stack is full")]
    Full,
    #[error("stack holds {0} element(s), at least two are required")]
    TooFewElements(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    elements: Vec<i32>,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            elements: Vec::with_capacity(STACK_MAX),
        }
    }

    pub fn push(&mut self, value: i32) -> Result<(), StackError> {
        if self.elements.len() >= STACK_MAX {
            return Err(StackError::Full);
        }
        self.elements.push(value);
        Ok(())
    }

    /// Removes and returns the most recently pushed element.
    pub fn pop(&mut self) -> Option<i32> {
        self.elements.pop()
    }

    /// Pushes values in order until the stack is full.
    ///
    /// Returns how many values were inserted; the rest of the iterator is
    /// left unconsumed.
    pub fn push_many<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = i32>,
    {
        let room = STACK_MAX - self.elements.len();
        let before = self.elements.len();
        self.elements.extend(values.into_iter().take(room));
        self.elements.len() - before
    }

    /// Exchanges the two topmost elements.
    pub fn swap_top_elts(&mut self) -> Result<(), StackError> {
        let len = self.elements.len();
        if len < 2 {
            return Err(StackError::TooFewElements(len));
        }
        self.elements.swap(len - 1, len - 2);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_full(&self) -> bool {
        self.elements.len() == STACK_MAX
    }

    pub fn size_is_even(&self) -> bool {
        self.elements.len() % 2 == 0
    }
}
