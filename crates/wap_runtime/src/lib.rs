//! Bevy integration for the WAP engine core
//!
//! - [`WapAssetsPlugin`] registers loaders for `.rez` archives, `.wwd` levels
//!   and `.pid` sprite frames, and announces finished levels as
//!   [`LevelLoaded`] messages.
//! - [`WapSimPlugin`] runs the fixed-step simulation from Bevy's `Time`,
//!   moving every [`Body`] and writing [`BodyLanded`] messages.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use wap_runtime::{Body, WapAssetsPlugin, WapSimPlugin};
//! use wap_sim::BodyState;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins((WapAssetsPlugin::default(), WapSimPlugin::default()))
//!     .add_systems(Startup, |mut commands: Commands, assets: Res<AssetServer>| {
//!         commands.insert_resource(Level(assets.load("levels/retail01.wwd")));
//!         commands.spawn((
//!             Body(BodyState::new(Vec2::new(320.0, 200.0), Vec2::new(32.0, 64.0))),
//!             Transform::default(),
//!         ));
//!     })
//!     .run();
//! ```

mod loader;
mod sim;

pub use loader::{
    LevelAsset, LoadError, PidLoader, RezAsset, RezLoader, SpriteAsset, WapAssetsPlugin,
    WwdLoader, WwdLoaderSettings,
};
pub use sim::{
    ActiveGrid, Body, BodyLanded, LevelLoaded, RenderAlpha, SimClock, SimIntegrator,
    WapSimPlugin,
};
