//! Axis-separated tile collision integrator
//!
//! One logic step per body, in a fixed order:
//! 1. Gravity (skipped on ladders), clamped to the terminal fall speed
//! 2. Remember the pre-step position for interpolation
//! 3. Integrate the full velocity (no substeps, no sweeping)
//! 4. Resolve X at the new x and old y
//! 5. Resolve Y at the resolved x and new y
//!
//! Each axis probes its leading edge at two points inset from the corners.
//! A blocking cell snaps the body to the near side of that cell with one
//! pixel of clearance. Lookups outside the grid are Solid.

use crate::body::{BodyArena, BodyState};
use crate::config::PhysicsConfig;
use crate::event::{EventQueue, LandingEvent, SimEvent};
use glam::Vec2;
use tracing::trace;
use wap_core::{CollisionGrid, TileAttribute};

/// Inset of the edge probes from the box corners, in pixels
pub const PROBE_INSET: f32 = 1.0;

/// Gap left between a snapped body and the cell that blocked it, in pixels
pub const CLEARANCE: f32 = 1.0;

/// Snaps closer than this to the pre-step position become a one pixel nudge
pub const STUCK_THRESHOLD: f32 = 2.0;

/// What happened to a body during one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    /// Downward speed at touchdown, when the body just became grounded
    pub landed: Option<f32>,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Fixed-step integrator for axis-aligned bodies on a collision grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsIntegrator {
    gravity: f32,
    max_fall_speed: f32,
}

impl Default for PhysicsIntegrator {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}

impl PhysicsIntegrator {
    pub fn new(gravity: f32, max_fall_speed: f32) -> Self {
        Self {
            gravity,
            max_fall_speed,
        }
    }

    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self::new(config.gravity, config.max_fall_speed)
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn max_fall_speed(&self) -> f32 {
        self.max_fall_speed
    }

    /// Advance every body in the arena by `dt` seconds, reporting landings
    pub fn step(
        &self,
        bodies: &mut BodyArena,
        grid: &CollisionGrid,
        dt: f32,
        events: &mut EventQueue<SimEvent>,
    ) {
        let ids: Vec<_> = bodies.ids().collect();
        for id in ids {
            let Some(mut state) = bodies.get(id) else {
                continue;
            };
            let outcome = self.step_body(&mut state, grid, dt);
            bodies.set(id, state);

            if let Some(impact_speed) = outcome.landed {
                trace!("Body {:?} landed at {} px/s", id, impact_speed);
                events.send(SimEvent::Landed(LandingEvent {
                    body: id,
                    impact_speed,
                }));
            }
        }
    }

    /// Advance a single body by `dt` seconds
    pub fn step_body(&self, body: &mut BodyState, grid: &CollisionGrid, dt: f32) -> StepOutcome {
        let was_on_ground = body.on_ground;

        if !body.on_ladder {
            body.velocity.y =
                (body.velocity.y + self.gravity * body.gravity_scale * dt).min(self.max_fall_speed);
        }

        body.previous_position = body.position;
        let old = body.position;
        let target = old + body.velocity * dt;
        let half = body.half_size();
        let tile = grid.tile_size() as f32;
        let mut outcome = StepOutcome::default();

        let mut x = target.x;
        if body.velocity.x != 0.0 {
            if let Some(col) = horizontal_hit(grid, target.x, old.y, half, body.velocity.x) {
                x = snap(col, tile, half.x, old.x, body.velocity.x);
                outcome.blocked_x = true;
            }
        }

        let mut y = target.y;
        if body.velocity.y != 0.0 {
            let previous_bottom = old.y + half.y;
            let hit = vertical_hit(grid, x, target.y, half, body.velocity.y, previous_bottom);
            if let Some(row) = hit {
                y = snap(row, tile, half.y, old.y, body.velocity.y);
                outcome.blocked_y = true;
            }
        }

        body.position = Vec2::new(x, y);

        if outcome.blocked_y && body.velocity.y > 0.0 {
            body.on_ground = true;
            if !was_on_ground {
                outcome.landed = Some(body.velocity.y);
            }
        } else {
            body.on_ground = false;
        }

        if outcome.blocked_x {
            body.velocity.x = 0.0;
        }
        if outcome.blocked_y {
            body.velocity.y = 0.0;
        }
        outcome
    }
}

/// Column of the first Solid cell under the leading vertical edge
fn horizontal_hit(grid: &CollisionGrid, x: f32, y: f32, half: Vec2, vx: f32) -> Option<i32> {
    let edge = if vx > 0.0 { x + half.x } else { x - half.x };
    [y - half.y + PROBE_INSET, y + half.y - PROBE_INSET]
        .into_iter()
        .find_map(|probe_y| {
            let (col, row) = grid.cell_at(edge, probe_y);
            grid.get(col, row).is_solid().then_some(col)
        })
}

/// Row of the first blocking cell under the leading horizontal edge.
///
/// One-way platforms block only a downward move whose bottom edge started at
/// or above the platform's top.
fn vertical_hit(
    grid: &CollisionGrid,
    x: f32,
    y: f32,
    half: Vec2,
    vy: f32,
    previous_bottom: f32,
) -> Option<i32> {
    let edge = if vy > 0.0 { y + half.y } else { y - half.y };
    let tile = grid.tile_size() as f32;
    [x - half.x + PROBE_INSET, x + half.x - PROBE_INSET]
        .into_iter()
        .find_map(|probe_x| {
            let (col, row) = grid.cell_at(probe_x, edge);
            let blocks = match grid.get(col, row) {
                TileAttribute::Solid => true,
                TileAttribute::OneWayPlatform => vy > 0.0 && previous_bottom <= row as f32 * tile,
                TileAttribute::Empty | TileAttribute::Ladder => false,
            };
            blocks.then_some(row)
        })
}

/// Resolved coordinate on one axis after hitting `cell`
fn snap(cell: i32, tile: f32, half: f32, old: f32, velocity: f32) -> f32 {
    let snapped = if velocity > 0.0 {
        cell as f32 * tile - half - CLEARANCE
    } else {
        (cell + 1) as f32 * tile + half + CLEARANCE
    };
    if (snapped - old).abs() < STUCK_THRESHOLD {
        old - velocity.signum()
    } else {
        snapped
    }
}
