//! Physics bodies and their storage
//!
//! Bodies live in a [`BodyArena`], a struct-of-arrays keyed by generational
//! [`BodyId`]s. A freed slot is reused with a bumped generation, so an id held
//! past `despawn` resolves to nothing instead of to the slot's new occupant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kinematic state of one axis-aligned body.
///
/// Units are pixels and seconds; y grows downward; `position` is the centre
/// of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec2,
    /// Position at the start of the last step, for render interpolation
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub on_ground: bool,
    /// Suppresses gravity while set
    pub on_ladder: bool,
    pub gravity_scale: f32,
    /// Bounding box width and height
    pub size: Vec2,
}

impl Default for BodyState {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO)
    }
}

impl BodyState {
    /// A resting body with unit gravity
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec2::ZERO,
            on_ground: false,
            on_ladder: false,
            gravity_scale: 1.0,
            size,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Position blended between the previous and current step
    pub fn interpolated(&self, alpha: f32) -> Vec2 {
        self.previous_position.lerp(self.position, alpha)
    }
}

/// Stable handle to a body in a [`BodyArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId {
    index: u32,
    generation: u32,
}

impl BodyId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Struct-of-arrays body storage
#[derive(Debug, Clone, Default)]
pub struct BodyArena {
    positions: Vec<Vec2>,
    previous_positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    on_ground: Vec<bool>,
    on_ladder: Vec<bool>,
    gravity_scales: Vec<f32>,
    sizes: Vec<Vec2>,
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    len: usize,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live body count
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot(&self, id: BodyId) -> Option<usize> {
        let idx = id.index as usize;
        let live = self.alive.get(idx).copied().unwrap_or(false);
        (live && self.generations[idx] == id.generation).then_some(idx)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.slot(id).is_some()
    }

    pub fn spawn(&mut self, state: BodyState) -> BodyId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let idx = index as usize;
            self.alive[idx] = true;
            self.write(idx, state);
            return BodyId {
                index,
                generation: self.generations[idx],
            };
        }

        let index = self.positions.len() as u32;
        self.positions.push(state.position);
        self.previous_positions.push(state.previous_position);
        self.velocities.push(state.velocity);
        self.on_ground.push(state.on_ground);
        self.on_ladder.push(state.on_ladder);
        self.gravity_scales.push(state.gravity_scale);
        self.sizes.push(state.size);
        self.generations.push(0);
        self.alive.push(true);
        BodyId {
            index,
            generation: 0,
        }
    }

    /// Remove a body. Returns `false` for stale or unknown ids.
    pub fn despawn(&mut self, id: BodyId) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        true
    }

    /// Live ids in slot order
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| BodyId {
                index: idx as u32,
                generation: self.generations[idx],
            })
    }

    /// Copy out a body's full state
    pub fn get(&self, id: BodyId) -> Option<BodyState> {
        let idx = self.slot(id)?;
        Some(BodyState {
            position: self.positions[idx],
            previous_position: self.previous_positions[idx],
            velocity: self.velocities[idx],
            on_ground: self.on_ground[idx],
            on_ladder: self.on_ladder[idx],
            gravity_scale: self.gravity_scales[idx],
            size: self.sizes[idx],
        })
    }

    /// Overwrite a body's full state. Returns `false` for stale ids.
    pub fn set(&mut self, id: BodyId, state: BodyState) -> bool {
        match self.slot(id) {
            Some(idx) => {
                self.write(idx, state);
                true
            }
            None => false,
        }
    }

    fn write(&mut self, idx: usize, state: BodyState) {
        self.positions[idx] = state.position;
        self.previous_positions[idx] = state.previous_position;
        self.velocities[idx] = state.velocity;
        self.on_ground[idx] = state.on_ground;
        self.on_ladder[idx] = state.on_ladder;
        self.gravity_scales[idx] = state.gravity_scale;
        self.sizes[idx] = state.size;
    }

    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.slot(id).map(|idx| self.positions[idx])
    }

    /// Teleport a body; the previous position follows so nothing interpolates
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };
        self.positions[idx] = position;
        self.previous_positions[idx] = position;
        true
    }

    pub fn previous_position(&self, id: BodyId) -> Option<Vec2> {
        self.slot(id).map(|idx| self.previous_positions[idx])
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.slot(id).map(|idx| self.velocities[idx])
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };
        self.velocities[idx] = velocity;
        true
    }

    pub fn on_ground(&self, id: BodyId) -> Option<bool> {
        self.slot(id).map(|idx| self.on_ground[idx])
    }

    pub fn on_ladder(&self, id: BodyId) -> Option<bool> {
        self.slot(id).map(|idx| self.on_ladder[idx])
    }

    pub fn set_on_ladder(&mut self, id: BodyId, on_ladder: bool) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };
        self.on_ladder[idx] = on_ladder;
        true
    }

    pub fn gravity_scale(&self, id: BodyId) -> Option<f32> {
        self.slot(id).map(|idx| self.gravity_scales[idx])
    }

    pub fn set_gravity_scale(&mut self, id: BodyId, scale: f32) -> bool {
        let Some(idx) = self.slot(id) else {
            return false;
        };
        self.gravity_scales[idx] = scale;
        true
    }

    pub fn size(&self, id: BodyId) -> Option<Vec2> {
        self.slot(id).map(|idx| self.sizes[idx])
    }

    /// Render position of a body, `alpha` of the way through the current step
    pub fn interpolated(&self, id: BodyId, alpha: f32) -> Option<Vec2> {
        self.slot(id)
            .map(|idx| self.previous_positions[idx].lerp(self.positions[idx], alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f32, y: f32) -> BodyState {
        BodyState::new(Vec2::new(x, y), Vec2::new(32.0, 64.0))
    }

    #[test]
    fn test_spawn_and_get() {
        let mut arena = BodyArena::new();
        let a = arena.spawn(body(10.0, 20.0));
        let b = arena.spawn(body(30.0, 40.0).with_velocity(Vec2::new(5.0, 0.0)));

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.position(a), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(arena.velocity(b), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(arena.get(b).map(|s| s.size), Some(Vec2::new(32.0, 64.0)));
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_stale_ids_resolve_to_nothing() {
        let mut arena = BodyArena::new();
        let a = arena.spawn(body(0.0, 0.0));
        assert!(arena.despawn(a));
        assert!(!arena.despawn(a));

        let b = arena.spawn(body(1.0, 1.0));
        assert_eq!(b.index(), a.index());
        assert_ne!(b.generation(), a.generation());

        assert!(arena.get(a).is_none());
        assert!(!arena.set_velocity(a, Vec2::ONE));
        assert_eq!(arena.position(b), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_typed_accessors() {
        let mut arena = BodyArena::new();
        let id = arena.spawn(body(0.0, 0.0));

        assert!(arena.set_on_ladder(id, true));
        assert!(arena.set_gravity_scale(id, 0.5));
        assert!(arena.set_velocity(id, Vec2::new(1.0, 2.0)));

        let state = arena.get(id).unwrap();
        assert!(state.on_ladder);
        assert_eq!(state.gravity_scale, 0.5);
        assert_eq!(state.velocity, Vec2::new(1.0, 2.0));
        assert_eq!(arena.on_ground(id), Some(false));
    }

    #[test]
    fn test_interpolation() {
        let mut arena = BodyArena::new();
        let mut state = body(0.0, 0.0);
        state.position = Vec2::new(10.0, 0.0);
        let id = arena.spawn(state);

        assert_eq!(arena.interpolated(id, 0.25), Some(Vec2::new(2.5, 0.0)));

        arena.set_position(id, Vec2::new(100.0, 0.0));
        assert_eq!(arena.interpolated(id, 0.5), Some(Vec2::new(100.0, 0.0)));
    }
}
