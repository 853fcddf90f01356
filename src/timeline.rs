//! # Timeline Driver
//!
//! Fixed sequences of `(state, duration)` steps advanced by an explicit tick.
//!
//! A timeline is either idle, showing its resting state, or busy, walking
//! through its steps. Starting is refused while busy, and a running sequence
//! cannot be cancelled. `tick` reports when the last step elapses so callers
//! can re-enable the control that started it.

use std::time::Duration;

/// One frame of a scripted sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    pub state: S,
    pub duration: Duration,
}

impl<S> Step<S> {
    pub fn new(state: S, duration: Duration) -> Self {
        Self { state, duration }
    }
}

/// Result of advancing a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing running.
    Idle,
    /// Still inside a step; `changed` is set when a new step became current.
    Running { changed: bool },
    /// The final step elapsed during this tick.
    Completed,
}

#[derive(Debug, Clone)]
pub struct Timeline<S> {
    steps: Vec<Step<S>>,
    resting: S,
    current: Option<usize>,
    elapsed_in_step: Duration,
}

impl<S: Clone> Timeline<S> {
    pub fn new(steps: Vec<Step<S>>, resting: S) -> Self {
        Self {
            steps,
            resting,
            current: None,
            elapsed_in_step: Duration::ZERO,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// The state to display right now.
    pub fn state(&self) -> &S {
        match self.current {
            Some(index) => &self.steps[index].state,
            None => &self.resting,
        }
    }

    pub fn current_step(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Starts from the first step. Returns `false` if already running or there
    /// is nothing to play.
    pub fn start(&mut self) -> bool {
        if self.is_busy() || self.steps.is_empty() {
            return false;
        }
        self.current = Some(0);
        self.elapsed_in_step = Duration::ZERO;
        true
    }

    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let Some(mut index) = self.current else {
            return TickOutcome::Idle;
        };

        let mut changed = false;
        self.elapsed_in_step += dt;
        while self.elapsed_in_step >= self.steps[index].duration {
            self.elapsed_in_step -= self.steps[index].duration;
            index += 1;
            if index == self.steps.len() {
                self.current = None;
                self.elapsed_in_step = Duration::ZERO;
                return TickOutcome::Completed;
            }
            changed = true;
        }

        self.current = Some(index);
        TickOutcome::Running { changed }
    }
}
