//! Deterministic simulation core for legacy WAP levels
//!
//! This crate drives bodies through a level's collision grid at a fixed
//! logic rate:
//! - `SimulationClock` - Fixed-timestep accumulator with interpolation alpha
//! - `PhysicsIntegrator` - Gravity plus axis-separated tile collision
//! - `BodyArena` - Struct-of-arrays body storage keyed by `BodyId`
//! - `SimEvent` / `EventQueue` - Typed notifications (landings, level loads)
//! - `StateStack` - Push-down game states with explicit pending transitions
//! - `SimConfig` - TOML configuration for the clock and integrator

pub mod body;
pub mod clock;
pub mod config;
pub mod event;
pub mod physics;
pub mod state;

pub use body::{BodyArena, BodyId, BodyState};
pub use clock::{
    ClockStats, FixedStepHandler, FrameAdvance, FrameRequest, FrameScheduler, SimulationClock,
};
pub use config::{ClockConfig, ConfigError, PhysicsConfig, SimConfig};
pub use event::{EventQueue, LandingEvent, LevelLoadedEvent, SimEvent};
pub use physics::{PhysicsIntegrator, StepOutcome};
pub use state::{GameState, PendingTransition, StateStack, TransitionError};

use std::sync::Arc;
use wap_core::{CollisionGrid, Level};

/// The bodies of one level and the integrator that moves them. Plugs into a
/// [`SimulationClock`] as its step handler.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    pub integrator: PhysicsIntegrator,
    pub bodies: BodyArena,
    pub events: EventQueue<SimEvent>,
    grid: Arc<CollisionGrid>,
}

impl Simulation {
    pub fn new(integrator: PhysicsIntegrator) -> Self {
        Self {
            integrator,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    /// Make a level's collision grid active and announce it
    pub fn load_level(&mut self, level: &Level) {
        self.grid = Arc::new(level.collision.clone());
        self.events.send(SimEvent::LevelLoaded(LevelLoadedEvent {
            name: level.header.name.clone(),
            start: level.header.start,
            grid: Arc::clone(&self.grid),
        }));
    }
}

impl FixedStepHandler for Simulation {
    fn update(&mut self, dt: f32) {
        self.integrator
            .step(&mut self.bodies, &self.grid, dt, &mut self.events);
    }

    fn render(&mut self, _alpha: f32) {}
}
