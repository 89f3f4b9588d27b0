//! Generic single-state machine
//!
//! Holds exactly one active state and drives it with a caller-supplied
//! context. States never run concurrently: the outgoing state's `on_exit`
//! returns before the incoming state's `on_enter` starts.

use std::fmt::Debug;

use super::events::EventBus;
use crate::error::{ArenaError, ArenaResult};

/// Identity of a state variant, compared by value
pub trait StateKind {
    type Kind: Copy + Eq + Debug;

    fn kind(&self) -> Self::Kind;
}

/// Lifecycle hooks, all optional. `C` is the context the state drives.
pub trait TurnState<C>: StateKind {
    fn on_enter(&mut self, _ctx: &mut C) {}
    fn on_update(&mut self, _ctx: &mut C, _dt: f32) {}
    fn on_exit(&mut self, _ctx: &mut C) {}
}

pub struct TurnStateMachine<S: StateKind> {
    current: Option<S>,
    on_state_changed: EventBus<S::Kind>,
    transitions: u64,
}

impl<S: StateKind> Default for TurnStateMachine<S> {
    fn default() -> Self {
        Self {
            current: None,
            on_state_changed: EventBus::new(),
            transitions: 0,
        }
    }
}

impl<S: StateKind> TurnStateMachine<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind of the active state, if initialized
    pub fn current_kind(&self) -> Option<S::Kind> {
        self.current.as_ref().map(StateKind::kind)
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Number of successful `change_state` calls
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Subscribe here to observe every state entry
    pub fn on_state_changed(&mut self) -> &mut EventBus<S::Kind> {
        &mut self.on_state_changed
    }

    /// Enter the first state. Only valid once per machine.
    pub fn initialize<C>(&mut self, mut state: S, ctx: &mut C) -> ArenaResult<()>
    where
        S: TurnState<C>,
    {
        if self.current.is_some() {
            return Err(ArenaError::AlreadyInitialized);
        }
        state.on_enter(ctx);
        let kind = state.kind();
        self.current = Some(state);
        self.on_state_changed.publish(&kind);
        Ok(())
    }

    /// Swap to `next` unless it is the same variant as the active state.
    ///
    /// Returns true if a transition happened.
    pub fn change_state<C>(&mut self, mut next: S, ctx: &mut C) -> bool
    where
        S: TurnState<C>,
    {
        let Some(current) = self.current.as_mut() else {
            log::debug!("change_state to {:?} before initialize; ignored", next.kind());
            return false;
        };
        if current.kind() == next.kind() {
            return false;
        }

        current.on_exit(ctx);
        next.on_enter(ctx);
        let kind = next.kind();
        self.current = Some(next);
        self.transitions += 1;
        self.on_state_changed.publish(&kind);
        true
    }

    /// Forward one scheduling step to the active state
    pub fn tick<C>(&mut self, ctx: &mut C, dt: f32)
    where
        S: TurnState<C>,
    {
        if let Some(state) = self.current.as_mut() {
            state.on_update(ctx, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
    }

    struct LightState {
        light: Light,
        updates: u32,
    }

    impl LightState {
        fn new(light: Light) -> Self {
            Self { light, updates: 0 }
        }
    }

    impl StateKind for LightState {
        type Kind = Light;

        fn kind(&self) -> Light {
            self.light
        }
    }

    impl TurnState<Vec<String>> for LightState {
        fn on_enter(&mut self, log: &mut Vec<String>) {
            log.push(format!("enter {:?}", self.light));
        }

        fn on_update(&mut self, log: &mut Vec<String>, _dt: f32) {
            self.updates += 1;
            log.push(format!("update {:?} #{}", self.light, self.updates));
        }

        fn on_exit(&mut self, log: &mut Vec<String>) {
            log.push(format!("exit {:?}", self.light));
        }
    }

    #[test]
    fn test_tick_before_initialize_is_noop() {
        let mut machine = TurnStateMachine::<LightState>::new();
        let mut log = Vec::new();
        machine.tick(&mut log, 0.1);
        assert!(log.is_empty());
        assert!(!machine.change_state(LightState::new(Light::Red), &mut log));
    }

    #[test]
    fn test_initialize_once() {
        let mut machine = TurnStateMachine::new();
        let mut log = Vec::new();
        machine
            .initialize(LightState::new(Light::Red), &mut log)
            .unwrap();
        assert!(matches!(
            machine.initialize(LightState::new(Light::Green), &mut log),
            Err(ArenaError::AlreadyInitialized)
        ));
        assert_eq!(machine.current_kind(), Some(Light::Red));
        assert_eq!(log, vec!["enter Red"]);
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let mut machine = TurnStateMachine::new();
        let mut log = Vec::new();
        machine
            .initialize(LightState::new(Light::Red), &mut log)
            .unwrap();
        machine.tick(&mut log, 0.1);
        assert!(machine.change_state(LightState::new(Light::Green), &mut log));
        machine.tick(&mut log, 0.1);
        assert_eq!(
            log,
            vec!["enter Red", "update Red #1", "exit Red", "enter Green", "update Green #1"]
        );
    }

    #[test]
    fn test_same_variant_is_ignored() {
        let mut machine = TurnStateMachine::new();
        let mut log = Vec::new();
        machine
            .initialize(LightState::new(Light::Red), &mut log)
            .unwrap();
        machine.tick(&mut log, 0.1);

        assert!(!machine.change_state(LightState::new(Light::Red), &mut log));
        machine.tick(&mut log, 0.1);

        // The first state instance survives, so its counter keeps going
        assert_eq!(machine.current().map(|s| s.updates), Some(2));
        assert_eq!(machine.transitions(), 0);
    }

    #[test]
    fn test_state_changed_notifications() {
        let mut machine = TurnStateMachine::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        machine
            .on_state_changed()
            .subscribe(move |kind: &Light| sink.borrow_mut().push(*kind));

        let mut log = Vec::new();
        machine
            .initialize(LightState::new(Light::Red), &mut log)
            .unwrap();
        machine.change_state(LightState::new(Light::Red), &mut log);
        machine.change_state(LightState::new(Light::Green), &mut log);

        assert_eq!(*seen.borrow(), vec![Light::Red, Light::Green]);
    }
}
