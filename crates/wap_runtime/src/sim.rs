//! Fixed-step simulation driven by Bevy's frame clock
//!
//! Bevy's `Update` schedule plays the role of the frame scheduler: every
//! frame `advance_simulation` feeds `Time::elapsed` to the [`SimulationClock`]
//! and runs the whole steps it owes over every [`Body`]. The leftover fraction
//! is stored in [`RenderAlpha`] and used to place `Transform`s between steps.

use std::sync::Arc;

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::log::info;
use bevy::prelude::*;
use wap_core::{CollisionGrid, IVec2};
use wap_sim::{BodyState, PhysicsIntegrator, SimConfig, SimulationClock};

/// The logic clock
#[derive(Resource, Debug, Clone)]
pub struct SimClock(pub SimulationClock);

/// The integrator every body is stepped with
#[derive(Resource, Debug, Clone)]
pub struct SimIntegrator(pub PhysicsIntegrator);

/// Collision grid of the active level; empty until a level is activated
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveGrid(pub Arc<CollisionGrid>);

/// Fraction of a logic step elapsed since the last one, in `[0, 1)`
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RenderAlpha(pub f32);

/// A simulated body. Positions are level pixels with y pointing down.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Body(pub BodyState);

/// Written when a body touches down after falling
#[derive(Message, Debug, Clone)]
pub struct BodyLanded {
    pub entity: Entity,
    /// Downward speed at impact, in px/s
    pub impact_speed: f32,
}

/// Written to make a level's collision grid the active one
#[derive(Message, Debug, Clone)]
pub struct LevelLoaded {
    pub name: String,
    pub start: IVec2,
    pub grid: Arc<CollisionGrid>,
}

impl LevelLoaded {
    pub fn from_level(level: &wap_core::Level) -> Self {
        Self {
            name: level.header.name.clone(),
            start: level.header.start,
            grid: Arc::new(level.collision.clone()),
        }
    }
}

/// Plugin running the WAP simulation inside a Bevy app
///
/// Requires a `Time` resource, provided by `MinimalPlugins` or
/// `DefaultPlugins`.
#[derive(Default)]
pub struct WapSimPlugin {
    pub config: SimConfig,
}

impl WapSimPlugin {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }
}

impl Plugin for WapSimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimClock(SimulationClock::from_config(&self.config.clock)))
            .insert_resource(SimIntegrator(PhysicsIntegrator::from_config(
                &self.config.physics,
            )))
            .init_resource::<ActiveGrid>()
            .init_resource::<RenderAlpha>()
            .add_message::<BodyLanded>()
            .add_message::<LevelLoaded>()
            .add_systems(
                Update,
                (activate_level, advance_simulation, sync_body_transforms).chain(),
            );
    }
}

/// Swap in the grid of the most recently loaded level
fn activate_level(mut loaded: MessageReader<LevelLoaded>, mut grid: ResMut<ActiveGrid>) {
    for level in loaded.read() {
        info!(
            "Activating level '{}' ({}x{} cells)",
            level.name,
            level.grid.width(),
            level.grid.height()
        );
        grid.0 = Arc::clone(&level.grid);
    }
}

/// Run the logic steps owed for this frame
fn advance_simulation(
    time: Res<Time>,
    mut clock: ResMut<SimClock>,
    integrator: Res<SimIntegrator>,
    grid: Res<ActiveGrid>,
    mut alpha: ResMut<RenderAlpha>,
    mut bodies: Query<(Entity, &mut Body)>,
    mut landed: MessageWriter<BodyLanded>,
) {
    let advance = clock.0.advance(time.elapsed());
    for _ in 0..advance.steps {
        for (entity, mut body) in &mut bodies {
            let outcome = integrator.0.step_body(&mut body.0, &grid.0, advance.dt);
            if let Some(impact_speed) = outcome.landed {
                landed.write(BodyLanded {
                    entity,
                    impact_speed,
                });
            }
        }
    }
    alpha.0 = advance.alpha;
}

/// Place bodies between their last two steps. Bevy's y axis points up.
fn sync_body_transforms(alpha: Res<RenderAlpha>, mut bodies: Query<(&Body, &mut Transform)>) {
    for (body, mut transform) in &mut bodies {
        let position = body.0.interpolated(alpha.0);
        transform.translation.x = position.x;
        transform.translation.y = -position.y;
    }
}
