//! Physics collaborator
//!
//! The core never integrates motion. It asks whether bodies are at rest,
//! hands out impulses, freezes the board, and reads which effect regions
//! each body overlaps.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::{EffectKind, EffectRegion};
use super::state::{ProjectileId, Side};

/// What the turn core needs from the physics engine
pub trait Physics {
    /// Unknown (retired) units count as at rest
    fn is_at_rest(&self, unit: ProjectileId) -> bool;
    fn apply_impulse(&mut self, unit: ProjectileId, impulse: Vec2);
    fn zero_velocity(&mut self, unit: ProjectileId);
    fn overlapping_regions(&self, unit: ProjectileId) -> Vec<EffectRegion>;

    /// A projectile entered the board
    fn spawn(&mut self, _unit: ProjectileId, _owner: Side) {}
    /// A projectile left the board
    fn despawn(&mut self, _unit: ProjectileId) {}
}

/// Regions the seeded driver drops balls into
const REGION_TABLE: [EffectRegion; 4] = [
    EffectRegion {
        kind: EffectKind::Attack,
        base_value: 2,
    },
    EffectRegion {
        kind: EffectKind::Defense,
        base_value: 2,
    },
    EffectRegion {
        kind: EffectKind::Heal,
        base_value: 3,
    },
    EffectRegion {
        kind: EffectKind::None,
        base_value: 0,
    },
];

#[derive(Debug, Clone)]
struct Body {
    velocity: Vec2,
    /// Ticks of motion left (seeded mode only)
    moving_ticks: u32,
    regions: Vec<EffectRegion>,
}

/// Deterministic stand-in for a real physics engine.
///
/// In manual mode bodies only move or settle when told to, which is what
/// tests want. In seeded mode each impulse produces a short pseudo-random
/// flight that ends on a random set of regions.
#[derive(Debug, Clone)]
pub struct ScriptedPhysics {
    bodies: BTreeMap<ProjectileId, Body>,
    rng: Option<Pcg32>,
    impulses: Vec<(ProjectileId, Vec2)>,
    frozen: Vec<ProjectileId>,
}

impl Default for ScriptedPhysics {
    fn default() -> Self {
        Self::manual()
    }
}

impl ScriptedPhysics {
    pub fn manual() -> Self {
        Self {
            bodies: BTreeMap::new(),
            rng: None,
            impulses: Vec::new(),
            frozen: Vec::new(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Pcg32::seed_from_u64(seed)),
            ..Self::manual()
        }
    }

    /// Advance seeded flights by one tick. Returns units that bounced off
    /// something this tick.
    pub fn step(&mut self) -> Vec<ProjectileId> {
        let Some(rng) = self.rng.as_mut() else {
            return Vec::new();
        };
        let mut bounced = Vec::new();
        for (&id, body) in &mut self.bodies {
            if body.moving_ticks == 0 {
                continue;
            }
            body.moving_ticks -= 1;
            if rng.random_bool(0.02) {
                bounced.push(id);
            }
            if body.moving_ticks == 0 {
                body.velocity = Vec2::ZERO;
                let count = rng.random_range(0..=2);
                body.regions = (0..count)
                    .map(|_| REGION_TABLE[rng.random_range(0..REGION_TABLE.len())])
                    .collect();
            } else {
                body.velocity *= 0.98;
            }
        }
        bounced
    }

    /// Stop a body and place it on `regions`
    pub fn settle(&mut self, unit: ProjectileId, regions: Vec<EffectRegion>) {
        let body = self.body_mut(unit);
        body.velocity = Vec2::ZERO;
        body.moving_ticks = 0;
        body.regions = regions;
    }

    /// Put a body back in motion without an impulse record
    pub fn set_moving(&mut self, unit: ProjectileId, velocity: Vec2) {
        self.body_mut(unit).velocity = velocity;
    }

    /// Impulses received, in order
    pub fn impulses(&self) -> &[(ProjectileId, Vec2)] {
        &self.impulses
    }

    /// Units whose velocity was zeroed by the core, in order
    pub fn frozen(&self) -> &[ProjectileId] {
        &self.frozen
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn body_mut(&mut self, unit: ProjectileId) -> &mut Body {
        self.bodies.entry(unit).or_insert_with(|| Body {
            velocity: Vec2::ZERO,
            moving_ticks: 0,
            regions: Vec::new(),
        })
    }
}

impl Physics for ScriptedPhysics {
    fn is_at_rest(&self, unit: ProjectileId) -> bool {
        self.bodies
            .get(&unit)
            .is_none_or(|body| body.velocity == Vec2::ZERO)
    }

    fn apply_impulse(&mut self, unit: ProjectileId, impulse: Vec2) {
        self.impulses.push((unit, impulse));
        let flight = match self.rng.as_mut() {
            Some(rng) => rng.random_range(30..180),
            None => 0,
        };
        let body = self.body_mut(unit);
        body.velocity += impulse;
        body.moving_ticks = flight;
        body.regions.clear();
    }

    fn zero_velocity(&mut self, unit: ProjectileId) {
        self.frozen.push(unit);
        if let Some(body) = self.bodies.get_mut(&unit) {
            body.velocity = Vec2::ZERO;
            body.moving_ticks = 0;
        }
    }

    fn overlapping_regions(&self, unit: ProjectileId) -> Vec<EffectRegion> {
        self.bodies
            .get(&unit)
            .map(|body| body.regions.clone())
            .unwrap_or_default()
    }

    fn spawn(&mut self, unit: ProjectileId, _owner: Side) {
        self.body_mut(unit);
    }

    fn despawn(&mut self, unit: ProjectileId) {
        self.bodies.remove(&unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_impulse_keeps_moving() {
        let mut physics = ScriptedPhysics::manual();
        let id = ProjectileId(1);
        physics.spawn(id, Side::Player);
        assert!(physics.is_at_rest(id));

        physics.apply_impulse(id, Vec2::new(0.0, 10.0));
        assert!(!physics.is_at_rest(id));
        assert!(physics.step().is_empty());
        assert!(!physics.is_at_rest(id));

        let region = EffectRegion {
            kind: EffectKind::Attack,
            base_value: 4,
        };
        physics.settle(id, vec![region]);
        assert!(physics.is_at_rest(id));
        assert_eq!(physics.overlapping_regions(id), vec![region]);
    }

    #[test]
    fn test_unknown_unit_is_at_rest() {
        let physics = ScriptedPhysics::manual();
        assert!(physics.is_at_rest(ProjectileId(99)));
        assert!(physics.overlapping_regions(ProjectileId(99)).is_empty());
    }

    #[test]
    fn test_seeded_flight_settles() {
        let mut physics = ScriptedPhysics::seeded(7);
        let id = ProjectileId(1);
        physics.spawn(id, Side::Player);
        physics.apply_impulse(id, Vec2::new(5.0, 5.0));
        for _ in 0..200 {
            physics.step();
        }
        assert!(physics.is_at_rest(id));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let run = |seed| {
            let mut physics = ScriptedPhysics::seeded(seed);
            let id = ProjectileId(3);
            physics.spawn(id, Side::Player);
            physics.apply_impulse(id, Vec2::X);
            let mut ticks = 0;
            while !physics.is_at_rest(id) {
                physics.step();
                ticks += 1;
            }
            (ticks, physics.overlapping_regions(id))
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_zero_velocity_and_despawn() {
        let mut physics = ScriptedPhysics::manual();
        let id = ProjectileId(2);
        physics.spawn(id, Side::Player);
        physics.apply_impulse(id, Vec2::Y);
        physics.zero_velocity(id);
        assert!(physics.is_at_rest(id));
        assert_eq!(physics.frozen(), &[id]);
        physics.despawn(id);
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn test_set_moving_unsettles_body() {
        let mut physics = ScriptedPhysics::manual();
        let id = ProjectileId(4);
        physics.settle(id, Vec::new());
        assert!(physics.is_at_rest(id));
        physics.set_moving(id, Vec2::new(3.0, 0.0));
        assert!(!physics.is_at_rest(id));
        assert!(physics.impulses().is_empty());
    }
}
