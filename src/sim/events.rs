//! Notifications out of the core, input events into it
//!
//! Notifications are delivered synchronously, inside the call that produced
//! them, to every subscriber in subscription order. Input events are queued
//! per subscriber and drained by whichever phase is listening; with no
//! listener they are dropped.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::EffectTotal;
use super::phases::PhaseKind;
use super::state::{BattleOutcome, EnemyId, ProjectileId, Side};

/// Stat that changed on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    Health,
    Defense,
    Attack,
}

/// Everything the presentation layer can observe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    TurnStarted { turn: u32 },
    TurnEnded { turn: u32 },
    PhaseChanged { phase: PhaseKind },
    BallsInHandChanged { balls: u32 },
    /// Charge bar fill in [0, 1]
    ChargeProgressChanged { progress: f32 },
    /// Board window remaining in [0, 1]
    BoardTimerProgress { progress: f32 },
    BoardTimerEnded,
    /// Pending (not yet committed) bonuses for every side
    AccumulatedBonusChanged { totals: Vec<EffectTotal> },
    ProjectileSpawned { projectile: ProjectileId, owner: Side },
    ProjectileLaunched { projectile: ProjectileId },
    ProjectileRetired { projectile: ProjectileId },
    StatChanged { combatant: Side, stat: StatKind, value: i32 },
    EnemySpawned { enemy: EnemyId },
    Defeated { combatant: Side },
    EnemyAttacked { enemy: EnemyId, damage: i32 },
    ActionPauseChanged { paused: bool },
    BattleEnded { outcome: BattleOutcome },
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Synchronous multicast of `E`
pub struct EventBus<E> {
    listeners: Vec<(SubscriptionId, Listener<E>)>,
    next_id: u32,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Resolved player input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    LaunchRequested { projectile: ProjectileId, impulse: Vec2 },
    TargetSelected { enemy: EnemyId },
}

/// Per-subscriber input queues
#[derive(Debug, Default)]
pub struct InputQueue {
    queues: Vec<(SubscriptionId, VecDeque<InputEvent>)>,
    next_id: u32,
}

impl InputQueue {
    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.queues.push((id, VecDeque::new()));
        id
    }

    /// Drops anything still queued for `id`
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.queues.len();
        self.queues.retain(|(sub, _)| *sub != id);
        self.queues.len() != before
    }

    /// Returns false when nobody is listening and the event was dropped
    pub fn push(&mut self, event: InputEvent) -> bool {
        for (_, queue) in &mut self.queues {
            queue.push_back(event);
        }
        !self.queues.is_empty()
    }

    pub fn pop(&mut self, id: SubscriptionId) -> Option<InputEvent> {
        self.queues
            .iter_mut()
            .find(|(sub, _)| *sub == id)
            .and_then(|(_, queue)| queue.pop_front())
    }

    pub fn has_subscribers(&self) -> bool {
        !self.queues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_bus_delivers_in_order_to_all() {
        let mut bus = EventBus::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        bus.subscribe(move |e| first.borrow_mut().push(("a", *e)));
        let second = seen.clone();
        let id = bus.subscribe(move |e| second.borrow_mut().push(("b", *e)));

        bus.publish(&1);
        assert_eq!(bus.subscriber_count(), 2);
        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 1);
        assert!(!bus.unsubscribe(id));
        bus.publish(&2);

        assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("a", 2)]);
    }

    #[test]
    fn test_input_dropped_without_listener() {
        let mut input = InputQueue::default();
        let event = InputEvent::TargetSelected { enemy: EnemyId(1) };
        assert!(!input.push(event));
        assert!(!input.has_subscribers());

        let id = input.subscribe();
        assert!(input.has_subscribers());
        assert!(input.push(event));
        assert_eq!(input.pop(id), Some(event));
        assert_eq!(input.pop(id), None);

        input.push(event);
        assert!(input.unsubscribe(id));
        assert_eq!(input.pop(id), None);
    }

    #[test]
    fn test_notification_json_is_tagged() {
        let json = serde_json::to_string(&Notification::BallsInHandChanged { balls: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"BallsInHandChanged","balls":2}"#);
    }
}
