//! Weapon salvo state machine.
//!
//! Tracks slot occupancy across mounts, the shot cooldown and the reload
//! timer. At most one timer is pending; starting one replaces the other.
//! Generic over the missile handle `M` stored in a loaded slot.

use glam::Quat;
use rand::Rng;

use hoverstrike_core::enums::{SalvoPhase, VolleyMode};

use crate::math::from_euler_degrees;

/// Position of a slot: mount index, then slot index within the mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub mount: usize,
    pub slot: usize,
}

/// The single pending timer, in remaining seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalvoTimer {
    Cooldown(f32),
    Reload(f32),
}

/// A missile released from a slot by a fire command.
#[derive(Debug)]
pub struct Shot<M> {
    pub slot: SlotId,
    pub missile: M,
}

/// Result of a fire command.
#[derive(Debug)]
pub struct FireOutcome<M> {
    pub shots: Vec<Shot<M>>,
    /// The command emptied the salvo (or found it empty) and started a reload.
    pub reload_started: bool,
}

impl<M> FireOutcome<M> {
    fn none() -> Self {
        Self {
            shots: Vec::new(),
            reload_started: false,
        }
    }

    /// Nothing happened.
    pub fn is_noop(&self) -> bool {
        self.shots.is_empty() && !self.reload_started
    }
}

/// Result of advancing the timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The cooldown ended on an empty salvo and a reload started.
    pub reload_started: bool,
    /// The reload finished; number of slots refilled.
    pub reloaded: Option<usize>,
}

/// Salvo state for every mount of one vehicle.
#[derive(Debug, Clone)]
pub struct Salvo<M> {
    mounts: Vec<Vec<Option<M>>>,
    phase: SalvoPhase,
    timer: Option<SalvoTimer>,
    shoot_interval: f32,
    reload_time: f32,
    volley: VolleyMode,
}

impl<M> Salvo<M> {
    /// Empty salvo with `slots_per_mount[i]` slots on mount `i`.
    ///
    /// `shoot_interval` and `reload_time` must be positive.
    pub fn new(slots_per_mount: &[usize], shoot_interval: f32, reload_time: f32, volley: VolleyMode) -> Self {
        Self {
            mounts: slots_per_mount
                .iter()
                .map(|&count| std::iter::repeat_with(|| None).take(count).collect())
                .collect(),
            phase: SalvoPhase::Ready,
            timer: None,
            shoot_interval,
            reload_time,
            volley,
        }
    }

    pub fn phase(&self) -> SalvoPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn timer(&self) -> Option<SalvoTimer> {
        self.timer
    }

    pub fn cooldown_remaining(&self) -> Option<f32> {
        match self.timer {
            Some(SalvoTimer::Cooldown(remaining)) => Some(remaining),
            _ => None,
        }
    }

    pub fn reload_remaining(&self) -> Option<f32> {
        match self.timer {
            Some(SalvoTimer::Reload(remaining)) => Some(remaining),
            _ => None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.mounts.iter().map(Vec::len).sum()
    }

    pub fn loaded_count(&self) -> usize {
        self.mounts.iter().flatten().filter(|slot| slot.is_some()).count()
    }

    /// No timer pending and at least one slot loaded.
    pub fn is_ready(&self) -> bool {
        self.timer.is_none() && self.loaded_count() > 0
    }

    #[cfg(test)]
    pub fn slot(&self, id: SlotId) -> Option<&M> {
        self.mounts.get(id.mount)?.get(id.slot)?.as_ref()
    }

    /// Loaded slots in mount-major order.
    pub fn loaded_slots(&self) -> impl Iterator<Item = (SlotId, &M)> {
        self.mounts.iter().enumerate().flat_map(|(mount, slots)| {
            slots.iter().enumerate().filter_map(move |(slot, missile)| {
                missile.as_ref().map(|m| (SlotId { mount, slot }, m))
            })
        })
    }

    /// Fire at a target. A no-op without a target or while a timer is pending.
    pub fn fire(&mut self, target_present: bool) -> FireOutcome<M> {
        if !target_present || self.timer.is_some() || self.phase != SalvoPhase::Ready {
            return FireOutcome::none();
        }

        if self.loaded_count() == 0 {
            self.start_reload();
            return FireOutcome {
                shots: Vec::new(),
                reload_started: true,
            };
        }

        let shots = match self.volley {
            VolleyMode::Single => self.take_first(0..self.mounts.len()).into_iter().collect(),
            VolleyMode::PerMount => (0..self.mounts.len())
                .filter_map(|mount| self.take_first(mount..mount + 1))
                .collect(),
        };

        let reload_started = self.loaded_count() == 0;
        if reload_started {
            self.start_reload();
        } else {
            self.phase = SalvoPhase::Firing;
            self.timer = Some(SalvoTimer::Cooldown(self.shoot_interval));
        }

        FireOutcome {
            shots,
            reload_started,
        }
    }

    /// Manual reload. Returns false when already reloading or nothing is missing.
    /// Cancels a pending cooldown.
    pub fn request_reload(&mut self) -> bool {
        if self.phase == SalvoPhase::Reloading {
            return false;
        }
        if self.loaded_count() == self.capacity() {
            return false;
        }
        self.start_reload();
        true
    }

    /// Advance the pending timer by `dt`. When the reload elapses, `load` is
    /// called for every empty slot; slots it returns `None` for stay empty.
    pub fn tick(&mut self, dt: f32, load: impl FnMut(SlotId) -> Option<M>) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        match self.timer {
            None => {}
            Some(SalvoTimer::Cooldown(remaining)) => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.timer = Some(SalvoTimer::Cooldown(remaining));
                } else if self.loaded_count() > 0 {
                    self.timer = None;
                    self.phase = SalvoPhase::Ready;
                } else {
                    self.start_reload();
                    outcome.reload_started = true;
                }
            }
            Some(SalvoTimer::Reload(remaining)) => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.timer = Some(SalvoTimer::Reload(remaining));
                } else {
                    self.timer = None;
                    outcome.reloaded = Some(self.fill_empty(load));
                    self.phase = SalvoPhase::Ready;
                }
            }
        }
        outcome
    }

    /// Load every empty slot immediately. Loaded slots are untouched.
    pub fn fill_empty(&mut self, mut load: impl FnMut(SlotId) -> Option<M>) -> usize {
        let mut loaded = 0;
        for (mount, slots) in self.mounts.iter_mut().enumerate() {
            for (slot, missile) in slots.iter_mut().enumerate() {
                if missile.is_some() {
                    continue;
                }
                *missile = load(SlotId { mount, slot });
                if missile.is_some() {
                    loaded += 1;
                }
            }
        }
        loaded
    }

    fn start_reload(&mut self) {
        self.phase = SalvoPhase::Reloading;
        self.timer = Some(SalvoTimer::Reload(self.reload_time));
    }

    fn take_first(&mut self, mounts: std::ops::Range<usize>) -> Option<Shot<M>> {
        for mount in mounts {
            for (slot, missile) in self.mounts[mount].iter_mut().enumerate() {
                if let Some(missile) = missile.take() {
                    return Some(Shot {
                        slot: SlotId { mount, slot },
                        missile,
                    });
                }
            }
        }
        None
    }
}

/// Random launch orientation offset: ±`spread` degrees of pitch and yaw.
pub fn launch_spread<R: Rng>(rng: &mut R, spread: f32) -> Quat {
    let spread = spread.abs();
    if spread == 0.0 {
        return Quat::IDENTITY;
    }
    let pitch = rng.gen_range(-spread..=spread);
    let yaw = rng.gen_range(-spread..=spread);
    from_euler_degrees(yaw, pitch, 0.0)
}
