//! Inference-mode guard
//!
//! Tracing must see the model in inference mode. [`InferenceGuard`] switches
//! training off and restores the previous mode when dropped, so the flag is
//! put back on every exit path, including early returns and panics.

use std::ops::{Deref, DerefMut};

use crate::traits::TracedModel;

/// RAII guard that holds a model in inference mode
pub struct InferenceGuard<'a, M: TracedModel + ?Sized> {
    model: &'a mut M,
    prev: bool,
}

impl<'a, M: TracedModel + ?Sized> InferenceGuard<'a, M> {
    /// Switch `model` to inference mode until the guard is dropped
    pub fn new(model: &'a mut M) -> Self {
        let prev = model.is_training();
        model.set_training(false);
        Self { model, prev }
    }

    /// Training mode the model will be restored to
    pub fn previous_mode(&self) -> bool {
        self.prev
    }
}

impl<M: TracedModel + ?Sized> Deref for InferenceGuard<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: TracedModel + ?Sized> DerefMut for InferenceGuard<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<M: TracedModel + ?Sized> Drop for InferenceGuard<'_, M> {
    fn drop(&mut self) {
        self.model.set_training(self.prev);
    }
}
