//! Actors and their bounded resource pools.
//!
//! An actor is a `Copy` value holding one `(current, max)` pool per
//! [`Resource`]. Construction rejects `current > max`; every later change
//! clamps into `[0, max]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::TileGroup;
use super::tile::Tile;
use crate::error::{Result, SimError};

/// Attack dealt per destroyed plain skull.
pub const SKULL_ATTACK: u32 = 1;
/// Attack dealt per destroyed skullbomb.
pub const SKULLBOMB_ATTACK: u32 = 5;

/// Which participant an actor is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// The other participant.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

impl FromStr for Side {
    type Err = SimError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "player" => Ok(Side::Player),
            "opponent" => Ok(Side::Opponent),
            other => Err(SimError::UnknownSide(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tracked resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Health,
    Red,
    Green,
    Blue,
    Yellow,
    Experience,
    Money,
}

impl Resource {
    /// Every resource, in storage order.
    pub const ALL: [Resource; 7] = [
        Resource::Health,
        Resource::Red,
        Resource::Green,
        Resource::Blue,
        Resource::Yellow,
        Resource::Experience,
        Resource::Money,
    ];

    /// The four mana colors.
    pub const MANA: [Resource; 4] = [
        Resource::Red,
        Resource::Green,
        Resource::Blue,
        Resource::Yellow,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    /// The resource a destroyed tile feeds, if any.
    #[must_use]
    pub const fn for_tile(tile: Tile) -> Option<Self> {
        match tile {
            Tile::Red => Some(Resource::Red),
            Tile::Green => Some(Resource::Green),
            Tile::Blue => Some(Resource::Blue),
            Tile::Yellow => Some(Resource::Yellow),
            Tile::Experience => Some(Resource::Experience),
            Tile::Money => Some(Resource::Money),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Health => "health",
            Resource::Red => "red",
            Resource::Green => "green",
            Resource::Blue => "blue",
            Resource::Yellow => "yellow",
            Resource::Experience => "experience",
            Resource::Money => "money",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bounded counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pool {
    current: u32,
    max: u32,
}

impl Pool {
    #[inline]
    #[must_use]
    pub const fn current(self) -> u32 {
        self.current
    }

    #[inline]
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Set the current value, clamped to `[0, max]`.
    pub fn set(&mut self, value: i64) {
        self.current = value.clamp(0, i64::from(self.max)) as u32;
    }

    /// Shift the current value, clamped to `[0, max]`.
    pub fn add(&mut self, delta: i64) {
        self.set(i64::from(self.current).saturating_add(delta));
    }
}

/// A participant and its resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    side: Side,
    pools: [Pool; 7],
}

impl Actor {
    /// Start building an actor with every pool at `0/0`.
    #[must_use]
    pub fn builder(side: Side) -> ActorBuilder {
        ActorBuilder {
            side,
            pools: [(0, 0); 7],
        }
    }

    /// An actor with no resources at all.
    #[must_use]
    pub fn empty(side: Side) -> Self {
        Self {
            side,
            pools: [Pool::default(); 7],
        }
    }

    /// Stand-in actor when real values are unknown: health 50/100 and
    /// every mana color 20/40.
    #[must_use]
    pub fn generic_versus(side: Side) -> Self {
        let mut pools = [Pool::default(); 7];
        pools[Resource::Health.index()] = Pool { current: 50, max: 100 };
        for mana in Resource::MANA {
            pools[mana.index()] = Pool { current: 20, max: 40 };
        }
        Self { side, pools }
    }

    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline]
    #[must_use]
    pub fn pool(&self, resource: Resource) -> Pool {
        self.pools[resource.index()]
    }

    #[inline]
    #[must_use]
    pub fn current(&self, resource: Resource) -> u32 {
        self.pool(resource).current
    }

    #[inline]
    #[must_use]
    pub fn max(&self, resource: Resource) -> u32 {
        self.pool(resource).max
    }

    /// Set a resource, clamped to its pool.
    pub fn set(&mut self, resource: Resource, value: i64) {
        self.pools[resource.index()].set(value);
    }

    /// Shift a resource, clamped to its pool.
    pub fn add(&mut self, resource: Resource, delta: i64) {
        self.pools[resource.index()].add(delta);
    }

    /// Collect destroyed groups and return the attack they deal.
    ///
    /// A group takes the type of its first non-wildcard tile. Its value is
    /// its length times the sum of its wildcard ranks (1 without
    /// wildcards). Skull groups give no resource and deal
    /// [`SKULL_ATTACK`] per skull and [`SKULLBOMB_ATTACK`] per skullbomb.
    ///
    /// # Wildcard-only groups
    ///
    /// A group made only of wildcards has no type to collect into. Such a
    /// group never comes out of [`Board::find_matches`](crate::core::Board::find_matches),
    /// so a hand-built one is skipped: it adds nothing and deals no attack.
    /// This is not an error.
    pub fn apply_tile_groups(&mut self, groups: &[TileGroup]) -> u32 {
        let mut attack = 0;
        for group in groups {
            let Some(anchor) = group.iter().copied().find(|t| !t.is_wildcard()) else {
                continue;
            };
            if anchor.is_skull() {
                attack += group
                    .iter()
                    .map(|t| match t {
                        Tile::Skull => SKULL_ATTACK,
                        Tile::Skullbomb => SKULLBOMB_ATTACK,
                        _ => 0,
                    })
                    .sum::<u32>();
                continue;
            }
            let Some(resource) = Resource::for_tile(anchor) else {
                continue;
            };
            let ranks: u32 = group.iter().filter_map(|t| t.wildcard_rank()).map(u32::from).sum();
            let multiplier = ranks.max(1);
            self.add(resource, i64::from((group.len() as u32).saturating_mul(multiplier)));
        }
        attack
    }

    /// Lose health.
    pub fn apply_attack(&mut self, attack: u32) {
        self.add(Resource::Health, -i64::from(attack));
    }

    /// Empty every mana pool.
    pub fn apply_mana_drain(&mut self) {
        for mana in Resource::MANA {
            self.set(mana, 0);
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.side)?;
        for resource in Resource::ALL {
            let pool = self.pool(resource);
            write!(f, " {} {}/{}", resource, pool.current, pool.max)?;
        }
        Ok(())
    }
}

/// Validating builder for [`Actor`].
#[derive(Clone, Debug)]
pub struct ActorBuilder {
    side: Side,
    pools: [(u32, u32); 7],
}

impl ActorBuilder {
    /// Set one pool.
    #[must_use]
    pub fn pool(mut self, resource: Resource, current: u32, max: u32) -> Self {
        self.pools[resource.index()] = (current, max);
        self
    }

    #[must_use]
    pub fn health(self, current: u32, max: u32) -> Self {
        self.pool(Resource::Health, current, max)
    }

    /// Set all four mana pools to the same values.
    #[must_use]
    pub fn mana(mut self, current: u32, max: u32) -> Self {
        for mana in Resource::MANA {
            self = self.pool(mana, current, max);
        }
        self
    }

    /// Fails if any pool starts above its maximum.
    pub fn build(self) -> Result<Actor> {
        let mut pools = [Pool::default(); 7];
        for resource in Resource::ALL {
            let (current, max) = self.pools[resource.index()];
            if current > max {
                return Err(SimError::ResourceOverMax {
                    resource,
                    current,
                    max,
                });
            }
            pools[resource.index()] = Pool { current, max };
        }
        Ok(Actor {
            side: self.side,
            pools,
        })
    }
}
