//! Asset loaders for legacy WAP files
//!
//! Each loader reads the whole file and hands the bytes to the matching
//! decoder in `wap_assets`. Recoverable anomalies are logged as warnings and
//! kept on the decoded value; fatal ones fail the load.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use wap_runtime::{LevelAsset, WapAssetsPlugin};
//!
//! fn setup(asset_server: Res<AssetServer>, mut commands: Commands) {
//!     let level: Handle<LevelAsset> = asset_server.load("levels/retail01.wwd");
//!     commands.insert_resource(CurrentLevel(level));
//! }
//! ```

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::log::{info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wap_assets::{parse_level_with, Archive, ParseError, SpriteDecoder};
use wap_core::{CollisionPolicy, Level, Palette, ParseWarning, SpriteFrame};

use crate::sim::LevelLoaded;

/// Error type for WAP asset loading failures
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A decoded REZ archive
#[derive(Asset, TypePath, Debug, Clone)]
pub struct RezAsset(pub Archive);

impl RezAsset {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let archive = Archive::load(bytes)?;
        log_warnings("archive", archive.warnings());
        Ok(Self(archive))
    }
}

/// A parsed WWD level with its derived collision grid
#[derive(Asset, TypePath, Debug, Clone)]
pub struct LevelAsset(pub Level);

impl LevelAsset {
    pub fn from_bytes(bytes: &[u8], policy: &CollisionPolicy) -> Result<Self, LoadError> {
        let level = parse_level_with(bytes, policy)?;
        log_warnings("level", &level.warnings);
        Ok(Self(level))
    }
}

/// A decoded PID frame as RGBA pixels
#[derive(Asset, TypePath, Debug, Clone)]
pub struct SpriteAsset(pub SpriteFrame);

impl SpriteAsset {
    pub fn from_bytes(bytes: &[u8], decoder: &SpriteDecoder) -> Result<Self, LoadError> {
        let sprite = decoder.parse(bytes)?;
        log_warnings("sprite", &sprite.warnings);
        Ok(Self(sprite.frame))
    }
}

fn log_warnings(kind: &str, warnings: &[ParseWarning]) {
    for warning in warnings {
        warn!("{} decoded with warning: {:?}", kind, warning);
    }
}

/// Loader for `.rez` archives
#[derive(Default, TypePath)]
pub struct RezLoader;

impl AssetLoader for RezLoader {
    type Asset = RezAsset;
    type Settings = ();
    type Error = LoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let asset = RezAsset::from_bytes(bytes)?;
        info!(
            "Loaded archive {:?}: {} files",
            load_context.path(),
            asset.0.file_count()
        );
        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["rez"]
    }
}

/// Per-asset settings for [`WwdLoader`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WwdLoaderSettings {
    /// How tile ids of the collision layer become attributes
    pub collision: CollisionPolicy,
}

/// Loader for `.wwd` level maps
#[derive(Default, TypePath)]
pub struct WwdLoader;

impl AssetLoader for WwdLoader {
    type Asset = LevelAsset;
    type Settings = WwdLoaderSettings;
    type Error = LoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let asset = LevelAsset::from_bytes(&bytes, &settings.collision)?;
        info!(
            "Loaded level '{}' from {:?}: {} layers, {} objects",
            asset.0.header.name,
            load_context.path(),
            asset.0.layers.len(),
            asset.0.objects.len()
        );
        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["wwd"]
    }
}

/// Loader for `.pid` sprite frames
///
/// Frames without an embedded palette are coloured with the loader's default
/// palette, grayscale unless replaced with [`PidLoader::with_palette`].
#[derive(Default, TypePath)]
pub struct PidLoader {
    decoder: SpriteDecoder,
}

impl PidLoader {
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            decoder: SpriteDecoder::new(palette),
        }
    }
}

impl AssetLoader for PidLoader {
    type Asset = SpriteAsset;
    type Settings = ();
    type Error = LoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        SpriteAsset::from_bytes(&bytes, &self.decoder)
    }

    fn extensions(&self) -> &[&str] {
        &["pid"]
    }
}

/// Registers the WAP asset types and their loaders
#[derive(Default)]
pub struct WapAssetsPlugin {
    /// Default palette for sprite frames that carry none
    pub palette: Option<Palette>,
}

impl Plugin for WapAssetsPlugin {
    fn build(&self, app: &mut App) {
        let pid_loader = match &self.palette {
            Some(palette) => PidLoader::with_palette(palette.clone()),
            None => PidLoader::default(),
        };

        app.init_asset::<RezAsset>()
            .init_asset::<LevelAsset>()
            .init_asset::<SpriteAsset>()
            .register_asset_loader(RezLoader)
            .register_asset_loader(WwdLoader)
            .register_asset_loader(pid_loader)
            .add_message::<LevelLoaded>()
            .add_systems(PreUpdate, announce_loaded_levels);
    }
}

/// Announce every level asset that finishes loading
fn announce_loaded_levels(
    mut asset_events: MessageReader<AssetEvent<LevelAsset>>,
    levels: Res<Assets<LevelAsset>>,
    mut loaded: MessageWriter<LevelLoaded>,
) {
    for event in asset_events.read() {
        if let AssetEvent::LoadedWithDependencies { id } = event {
            if let Some(level) = levels.get(*id) {
                loaded.write(LevelLoaded::from_level(&level.0));
            }
        }
    }
}
