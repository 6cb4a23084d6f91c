//! Handle given to the renderable of the current step.

use super::{NavigateOptions, Navigator};
use crate::selector::{NextSelector, PreviousSelector};

/// Borrowed view of a [`Navigator`] scoped to its current step.
///
/// The handle is the only thing a step needs: it reads the step's data and
/// error and issues moves. It holds the navigator mutably, so no other code
/// can change navigation state while a step is being driven.
pub struct StepContext<'a, R, T, E> {
    navigator: &'a mut Navigator<R, T, E>,
}

impl<'a, R: Clone, T: Clone, E> StepContext<'a, R, T, E> {
    pub(super) fn new(navigator: &'a mut Navigator<R, T, E>) -> Self {
        Self { navigator }
    }

    /// Renderable of the current step.
    pub fn renderable(&self) -> &R {
        &self.navigator.current_node().renderable
    }

    /// Name the current step was declared under.
    pub fn name(&self) -> &str {
        &self.navigator.current_node().name
    }

    /// See [`Navigator::to_next`].
    pub fn next_node(&mut self, selector: &NextSelector, options: NavigateOptions) -> bool {
        self.navigator.to_next(selector, options)
    }

    /// See [`Navigator::to_previous`].
    pub fn previous_node(&mut self, selector: &PreviousSelector, options: NavigateOptions) -> bool {
        self.navigator.to_previous(selector, options)
    }

    /// See [`Navigator::to_root`].
    pub fn root_node(&mut self, options: NavigateOptions) -> bool {
        self.navigator.to_root(options)
    }

    /// Data of the current step.
    pub fn data(&self) -> &T {
        self.navigator.data()
    }

    /// Data of the parent step.
    pub fn previous_data(&self) -> &T {
        self.navigator.previous_data()
    }

    /// See [`Navigator::commit`].
    pub fn commit(&mut self, value: T) {
        self.navigator.commit(value);
    }

    /// See [`Navigator::commit_with`].
    pub fn commit_with(&mut self, update: impl FnOnce(&T) -> T) {
        self.navigator.commit_with(update);
    }

    /// Pending error.
    pub fn error(&self) -> Option<&E> {
        self.navigator.error()
    }

    /// See [`Navigator::set_error`].
    pub fn set_error(&mut self, error: E) {
        self.navigator.set_error(error);
    }

    /// See [`Navigator::update_error`].
    pub fn update_error(&mut self, update: impl FnOnce(Option<E>) -> Option<E>, ttl: Option<u32>) {
        self.navigator.update_error(update, ttl);
    }
}
