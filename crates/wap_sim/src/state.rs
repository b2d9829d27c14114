//! Push-down game state stack
//!
//! States receive synchronous `enter`, `exit` and `update` calls. Transitions
//! that need setup time (loading a level, fading) are parked as a visible
//! pending transition and applied later with `complete_transition`. While one
//! is pending every other transition request is refused.

use thiserror::Error;
use tracing::debug;

/// A state on the stack
pub trait GameState {
    fn name(&self) -> &str;

    /// Called when the state becomes part of the stack
    fn enter(&mut self) {}

    /// Called when the state leaves the stack
    fn exit(&mut self) {}

    /// Called once per logic step while the state is on top
    fn update(&mut self, _dt: f32) {}
}

/// A transition waiting for `complete_transition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTransition<S> {
    Push(S),
    Replace(S),
}

impl<S> PendingTransition<S> {
    pub fn target(&self) -> &S {
        match self {
            PendingTransition::Push(state) | PendingTransition::Replace(state) => state,
        }
    }
}

/// Errors from state stack transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a state transition is already pending")]
    TransitionPending,
    #[error("the state stack is empty")]
    Empty,
    #[error("no state transition is pending")]
    NothingPending,
}

/// Explicit stack of game states with at most one pending transition
#[derive(Debug)]
pub struct StateStack<S: GameState> {
    states: Vec<S>,
    pending: Option<PendingTransition<S>>,
}

impl<S: GameState> Default for StateStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> StateStack<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            pending: None,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The active state
    pub fn top(&self) -> Option<&S> {
        self.states.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut S> {
        self.states.last_mut()
    }

    /// All states, bottom first
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn pending(&self) -> Option<&PendingTransition<S>> {
        self.pending.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    fn ensure_idle(&self) -> Result<(), TransitionError> {
        if self.pending.is_some() {
            return Err(TransitionError::TransitionPending);
        }
        Ok(())
    }

    fn apply_push(&mut self, mut state: S) {
        debug!("Entering state '{}'", state.name());
        state.enter();
        self.states.push(state);
    }

    fn apply_replace(&mut self, state: S) -> Option<S> {
        let previous = self.states.pop().map(|mut old| {
            debug!("Exiting state '{}'", old.name());
            old.exit();
            old
        });
        self.apply_push(state);
        previous
    }

    /// Enter a state on top of the current one
    pub fn push(&mut self, state: S) -> Result<(), TransitionError> {
        self.ensure_idle()?;
        self.apply_push(state);
        Ok(())
    }

    /// Exit and remove the top state
    pub fn pop(&mut self) -> Result<S, TransitionError> {
        self.ensure_idle()?;
        let mut state = self.states.pop().ok_or(TransitionError::Empty)?;
        debug!("Exiting state '{}'", state.name());
        state.exit();
        Ok(state)
    }

    /// Swap the top state for another; returns the state that was replaced
    pub fn replace(&mut self, state: S) -> Result<Option<S>, TransitionError> {
        self.ensure_idle()?;
        Ok(self.apply_replace(state))
    }

    /// Park a push until `complete_transition`
    pub fn begin_push(&mut self, state: S) -> Result<(), TransitionError> {
        self.ensure_idle()?;
        self.pending = Some(PendingTransition::Push(state));
        Ok(())
    }

    /// Park a replace until `complete_transition`
    pub fn begin_replace(&mut self, state: S) -> Result<(), TransitionError> {
        self.ensure_idle()?;
        self.pending = Some(PendingTransition::Replace(state));
        Ok(())
    }

    /// Apply the pending transition; returns the replaced state, if any
    pub fn complete_transition(&mut self) -> Result<Option<S>, TransitionError> {
        match self.pending.take() {
            Some(PendingTransition::Push(state)) => {
                self.apply_push(state);
                Ok(None)
            }
            Some(PendingTransition::Replace(state)) => Ok(self.apply_replace(state)),
            None => Err(TransitionError::NothingPending),
        }
    }

    /// Drop the pending transition without applying it
    pub fn cancel_transition(&mut self) -> Option<PendingTransition<S>> {
        self.pending.take()
    }

    /// Update the top state
    pub fn update(&mut self, dt: f32) {
        if let Some(state) = self.states.last_mut() {
            state.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Debug)]
    struct Recording {
        name: &'static str,
        log: Log,
        updates: u32,
    }

    impl Recording {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                updates: 0,
            }
        }
    }

    impl GameState for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn enter(&mut self) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn exit(&mut self) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }

        fn update(&mut self, _dt: f32) {
            self.updates += 1;
        }
    }

    fn names(stack: &StateStack<Recording>) -> Vec<&str> {
        stack.states().iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_push_pop_replace() {
        let log = Log::default();
        let mut stack = StateStack::new();

        stack.push(Recording::new("title", &log)).unwrap();
        stack.push(Recording::new("pause", &log)).unwrap();
        assert_eq!(names(&stack), vec!["title", "pause"]);

        let popped = stack.pop().unwrap();
        assert_eq!(popped.name(), "pause");

        let replaced = stack.replace(Recording::new("level", &log)).unwrap();
        assert_eq!(replaced.map(|s| s.name), Some("title"));
        assert_eq!(names(&stack), vec!["level"]);

        assert_eq!(
            *log.borrow(),
            vec![
                "enter title",
                "enter pause",
                "exit pause",
                "exit title",
                "enter level"
            ]
        );
    }

    #[test]
    fn test_pop_empty_stack() {
        let mut stack: StateStack<Recording> = StateStack::new();
        assert_eq!(stack.pop().unwrap_err(), TransitionError::Empty);
    }

    #[test]
    fn test_update_reaches_top_only() {
        let log = Log::default();
        let mut stack = StateStack::new();
        stack.push(Recording::new("level", &log)).unwrap();
        stack.push(Recording::new("menu", &log)).unwrap();

        stack.update(1.0 / 60.0);
        stack.update(1.0 / 60.0);
        assert_eq!(stack.states()[0].updates, 0);
        assert_eq!(stack.top().map(|s| s.updates), Some(2));
    }

    #[test]
    fn test_pending_transition_is_visible_and_locks() {
        let log = Log::default();
        let mut stack = StateStack::new();
        stack.push(Recording::new("title", &log)).unwrap();

        stack.begin_replace(Recording::new("level", &log)).unwrap();
        assert!(stack.is_transitioning());
        assert_eq!(stack.pending().map(|p| p.target().name), Some("level"));
        // Nothing entered or exited yet
        assert_eq!(*log.borrow(), vec!["enter title"]);

        assert_eq!(
            stack.push(Recording::new("pause", &log)),
            Err(TransitionError::TransitionPending)
        );
        assert_eq!(
            stack.begin_push(Recording::new("pause", &log)),
            Err(TransitionError::TransitionPending)
        );
        assert_eq!(stack.pop().unwrap_err(), TransitionError::TransitionPending);

        let replaced = stack.complete_transition().unwrap();
        assert_eq!(replaced.map(|s| s.name), Some("title"));
        assert_eq!(names(&stack), vec!["level"]);
        assert!(!stack.is_transitioning());
        assert_eq!(
            stack.complete_transition().unwrap_err(),
            TransitionError::NothingPending
        );
    }

    #[test]
    fn test_cancel_transition() {
        let log = Log::default();
        let mut stack = StateStack::new();
        stack.begin_push(Recording::new("loading", &log)).unwrap();

        let cancelled = stack.cancel_transition();
        assert!(matches!(cancelled, Some(PendingTransition::Push(ref s)) if s.name == "loading"));
        assert!(stack.is_empty());
        assert!(log.borrow().is_empty());

        stack.push(Recording::new("title", &log)).unwrap();
        assert_eq!(stack.len(), 1);
    }
}
