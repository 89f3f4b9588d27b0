//! Effect sources and their per-side aggregation
//!
//! Aggregation is a snapshot of what is overlapping right now. Calling it
//! twice on the same board yields the same totals; nothing accumulates here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::Side;

/// Board effect carried by a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum EffectKind {
    #[default]
    None,
    Attack,
    Defense,
    Heal,
}

/// An effect-bearing board region as reported by physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRegion {
    pub kind: EffectKind,
    pub base_value: i32,
}

/// A live contribution: one projectile overlapping one region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSource {
    pub owner: Side,
    pub kind: EffectKind,
    pub base_value: i32,
    pub level: u32,
}

impl EffectSource {
    pub fn new(owner: Side, kind: EffectKind, base_value: i32, level: u32) -> Self {
        Self {
            owner,
            kind,
            base_value,
            level,
        }
    }

    /// base + level
    pub fn value(&self) -> i32 {
        let level = i32::try_from(self.level).unwrap_or(i32::MAX);
        self.base_value.saturating_add(level)
    }
}

/// One (side, kind) total, flattened for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTotal {
    pub side: Side,
    pub kind: EffectKind,
    pub value: i32,
}

/// Summed contributions keyed by (side, kind)
///
/// Ordered map so iteration (and therefore commit order) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectTotals(BTreeMap<(Side, EffectKind), i32>);

impl EffectTotals {
    pub fn get(&self, side: Side, kind: EffectKind) -> i32 {
        self.0.get(&(side, kind)).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = EffectTotal> + '_ {
        self.0.iter().map(|(&(side, kind), &value)| EffectTotal { side, kind, value })
    }

    /// Totals for one side only
    pub fn for_side(&self, side: Side) -> impl Iterator<Item = EffectTotal> + '_ {
        self.iter().filter(move |total| total.side == side)
    }

    pub fn to_vec(&self) -> Vec<EffectTotal> {
        self.iter().collect()
    }
}

/// Stateless summing of effect sources
pub struct EffectAggregator;

impl EffectAggregator {
    /// Sum every source once. `EffectKind::None` contributes nothing; enemy
    /// contributions stay keyed by the owning enemy.
    pub fn aggregate<'a, I>(sources: I) -> EffectTotals
    where
        I: IntoIterator<Item = &'a EffectSource>,
    {
        let mut totals = BTreeMap::new();
        for source in sources {
            if source.kind == EffectKind::None {
                continue;
            }
            let entry = totals.entry((source.owner, source.kind)).or_insert(0i32);
            *entry = entry.saturating_add(source.value());
        }
        EffectTotals(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyId;
    use proptest::prelude::*;

    #[test]
    fn test_mixed_sides_scenario() {
        let enemy = Side::Enemy(EnemyId(7));
        let sources = [
            EffectSource::new(Side::Player, EffectKind::Attack, 2, 3),
            EffectSource::new(enemy, EffectKind::Defense, 1, 0),
        ];
        let totals = EffectAggregator::aggregate(&sources);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get(Side::Player, EffectKind::Attack), 5);
        assert_eq!(totals.get(enemy, EffectKind::Defense), 1);
    }

    #[test]
    fn test_none_contributes_nothing() {
        let sources = [EffectSource::new(Side::Player, EffectKind::None, 9, 9)];
        assert!(EffectAggregator::aggregate(&sources).is_empty());
    }

    #[test]
    fn test_enemies_kept_separate() {
        let a = Side::Enemy(EnemyId(1));
        let b = Side::Enemy(EnemyId(2));
        let sources = [
            EffectSource::new(a, EffectKind::Attack, 1, 1),
            EffectSource::new(b, EffectKind::Attack, 3, 0),
            EffectSource::new(a, EffectKind::Attack, 0, 2),
        ];
        let totals = EffectAggregator::aggregate(&sources);
        assert_eq!(totals.get(a, EffectKind::Attack), 4);
        assert_eq!(totals.get(b, EffectKind::Attack), 3);
        assert_eq!(totals.for_side(a).count(), 1);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let sources = [
            EffectSource::new(Side::Player, EffectKind::Heal, 4, 1),
            EffectSource::new(Side::Player, EffectKind::Defense, 2, 2),
        ];
        assert_eq!(
            EffectAggregator::aggregate(&sources),
            EffectAggregator::aggregate(&sources)
        );
    }

    fn arb_source() -> impl Strategy<Value = EffectSource> {
        let side = prop_oneof![
            Just(Side::Player),
            (0u32..4).prop_map(|id| Side::Enemy(EnemyId(id))),
        ];
        let kind = prop_oneof![
            Just(EffectKind::None),
            Just(EffectKind::Attack),
            Just(EffectKind::Defense),
            Just(EffectKind::Heal),
        ];
        (side, kind, 0i32..20, 0u32..10)
            .prop_map(|(owner, kind, base, level)| EffectSource::new(owner, kind, base, level))
    }

    proptest! {
        #[test]
        fn prop_order_independent(
            (sources, shuffled) in proptest::collection::vec(arb_source(), 0..24)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            prop_assert_eq!(
                EffectAggregator::aggregate(&sources),
                EffectAggregator::aggregate(&shuffled)
            );
        }
    }
}
