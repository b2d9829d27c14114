//! Engine core for the legacy WAP platformer
//!
//! Re-exports the member crates:
//! - [`wap_core`] - levels, layers, collision grids, sprite frames
//! - [`wap_assets`] - REZ archive reader, WWD level parser, PID sprite decoder
//! - [`wap_sim`] - fixed-step clock, bodies and the tile-collision integrator
//! - `wap_runtime` - Bevy asset loaders and simulation plugin (`runtime` feature)

pub use wap_assets;
pub use wap_core;
pub use wap_sim;

#[cfg(feature = "runtime")]
pub use wap_runtime;

/// Commonly used types
pub mod prelude {
    pub use wap_assets::{parse_level, Archive, ArchiveEntry, SpriteDecoder};
    pub use wap_core::{CollisionGrid, Level, TileAttribute};
    pub use wap_sim::{
        BodyArena, BodyId, BodyState, FixedStepHandler, PhysicsIntegrator, SimConfig, Simulation,
        SimulationClock,
    };

    #[cfg(feature = "runtime")]
    pub use wap_runtime::{Body, BodyLanded, LevelLoaded, WapAssetsPlugin, WapSimPlugin};
}
