//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Collision layer an entity belongs to. Queries filter by [`LayerMask`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Default,
    Environment,
    Player,
    Enemy,
    Projectile,
}

impl Layer {
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Bit set of layers accepted by a spatial query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub fn of(layers: &[Layer]) -> Self {
        Self(layers.iter().fold(0, |mask, layer| mask | layer.bit()))
    }

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        Self(layer.bit())
    }
}

/// Weapon salvo phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalvoPhase {
    /// Eligible to fire.
    #[default]
    Ready,
    /// Cooling down between shots of a salvo.
    Firing,
    /// Waiting for the reload timer; slots are refilled when it elapses.
    Reloading,
}

/// How many slots a single fire command releases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolleyMode {
    /// One slot per shot, first loaded slot in mount order.
    #[default]
    Single,
    /// First loaded slot of every mount per shot.
    PerMount,
}

/// Simulation run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Active,
    Paused,
}

/// What the HUD is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HudIndicator {
    /// Lock-on marker at a screen point.
    Lock { x: f32, y: f32 },
    /// Free-aim reticle at a screen point.
    Reticle { x: f32, y: f32 },
}
