//! Campaign configuration
//!
//! Which actors spawn where, per level, lives in RON files so content can
//! change without a recompile. Files are validated on load: a bad file is a
//! content bug and fails immediately with enough context to fix it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::ActorKind;

/// Hard limits applied during validation
mod limits {
    /// Maximum levels in a campaign
    pub const MAX_LEVELS: usize = 64;
    /// Maximum actors spawned per level
    pub const MAX_SPAWNS_PER_LEVEL: usize = 256;
    /// Maximum coordinate magnitude (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for campaign loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One actor to create when a level starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub kind: ActorKind,
    /// World-space anchor (feet point)
    pub position: [f32; 2],
    /// Sprite and collision-box dimensions
    pub size: [f32; 2],
}

/// Everything needed to populate the world for one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub spawns: Vec<SpawnConfig>,
}

/// A whole campaign: levels in play order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub levels: Vec<LevelConfig>,
}

impl GameConfig {
    /// Levels are numbered from 1 to match what the player sees.
    pub fn level(&self, number: u32) -> Option<&LevelConfig> {
        self.levels.get(number.saturating_sub(1) as usize)
    }
}

/// Check if a float is usable as a coordinate (not NaN/Inf, bounded)
fn is_valid_coord(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_spawn(spawn: &SpawnConfig, context: &str) -> Result<(), String> {
    for (i, c) in spawn.position.iter().enumerate() {
        if !is_valid_coord(*c) {
            return Err(format!("{}: invalid position[{}] = {}", context, i, c));
        }
    }
    for (i, s) in spawn.size.iter().enumerate() {
        if !s.is_finite() || *s <= 0.0 || *s > limits::MAX_COORD {
            return Err(format!(
                "{}: size[{}] = {} (must be positive and bounded)",
                context, i, s
            ));
        }
    }
    Ok(())
}

fn validate_level(level: &LevelConfig, level_idx: usize) -> Result<(), String> {
    let context = format!("level[{}] \"{}\"", level_idx, level.name);

    if level.spawns.len() > limits::MAX_SPAWNS_PER_LEVEL {
        return Err(format!(
            "{}: too many spawns ({} > {})",
            context,
            level.spawns.len(),
            limits::MAX_SPAWNS_PER_LEVEL
        ));
    }

    let heroes = level
        .spawns
        .iter()
        .filter(|s| s.kind == ActorKind::Hero)
        .count();
    if heroes != 1 {
        return Err(format!(
            "{}: expected exactly one hero spawn, found {}",
            context, heroes
        ));
    }

    for (i, spawn) in level.spawns.iter().enumerate() {
        validate_spawn(spawn, &format!("{} spawn[{}]", context, i))?;
    }

    Ok(())
}

pub fn validate_config(config: &GameConfig) -> Result<(), ConfigError> {
    if config.levels.is_empty() {
        return Err(ConfigError::ValidationError(
            "campaign has no levels".to_string(),
        ));
    }
    if config.levels.len() > limits::MAX_LEVELS {
        return Err(ConfigError::ValidationError(format!(
            "too many levels ({} > {})",
            config.levels.len(),
            limits::MAX_LEVELS
        )));
    }
    for (i, level) in config.levels.iter().enumerate() {
        validate_level(level, i).map_err(ConfigError::ValidationError)?;
    }
    Ok(())
}

/// Load a campaign from a RON file.
pub fn load_game_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_game_config_from_str(&contents)
}

/// Load a campaign from RON text (for embedded defaults or testing).
pub fn load_game_config_from_str(s: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(s)?;
    validate_config(&config)?;
    Ok(config)
}

/// The built-in campaign, used when no config file is present.
pub fn default_config() -> GameConfig {
    fn hero() -> SpawnConfig {
        SpawnConfig {
            kind: ActorKind::Hero,
            position: [40.0, 50.0],
            size: [60.0, 150.0],
        }
    }
    fn enemy(x: f32, y: f32) -> SpawnConfig {
        SpawnConfig {
            kind: ActorKind::Enemy,
            position: [x, y],
            size: [50.0, 90.0],
        }
    }
    fn crate_prop(x: f32, y: f32) -> SpawnConfig {
        SpawnConfig {
            kind: ActorKind::Prop,
            position: [x, y],
            size: [120.0, 60.0],
        }
    }

    GameConfig {
        levels: vec![
            LevelConfig {
                name: "Boot Sector".to_string(),
                spawns: vec![hero()],
            },
            LevelConfig {
                name: "Firewall".to_string(),
                spawns: vec![hero(), enemy(640.0, 400.0), crate_prop(400.0, 500.0)],
            },
            LevelConfig {
                name: "Data Vault".to_string(),
                spawns: vec![
                    hero(),
                    enemy(520.0, 300.0),
                    enemy(900.0, 450.0),
                    crate_prop(700.0, 560.0),
                ],
            },
            LevelConfig {
                name: "Viral Core".to_string(),
                spawns: vec![
                    hero(),
                    enemy(420.0, 260.0),
                    enemy(760.0, 380.0),
                    enemy(1080.0, 520.0),
                    crate_prop(600.0, 620.0),
                ],
            },
        ],
    }
}
