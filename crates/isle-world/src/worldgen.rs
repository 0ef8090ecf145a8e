use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldGenConfig {
    /// Half extent of the square map; the grid spans `[-half, half)` on X and Z.
    #[serde(default = "default_half")]
    pub half: i32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    /// Lowest Y that stone columns extend down to.
    #[serde(default = "default_floor_y")]
    pub floor_y: i32,
    #[serde(default = "default_dirt_depth")]
    pub dirt_depth: i32,
    #[serde(default)]
    pub height: Height,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Height {
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    /// Normalized noise is multiplied by this before flooring to a block height.
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
}

fn default_half() -> i32 {
    32
}
fn default_sea_level() -> i32 {
    0
}
fn default_floor_y() -> i32 {
    -8
}
fn default_dirt_depth() -> i32 {
    2
}
fn default_frequency() -> f32 {
    0.05
}
fn default_octaves() -> i32 {
    4
}
fn default_amplitude() -> f32 {
    12.0
}

impl Default for Height {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            octaves: default_octaves(),
            amplitude: default_amplitude(),
        }
    }
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            half: default_half(),
            sea_level: default_sea_level(),
            floor_y: default_floor_y(),
            dirt_depth: default_dirt_depth(),
            height: Height::default(),
        }
    }
}

impl WorldGenConfig {
    /// Side length of the column grid.
    #[inline]
    pub fn size(&self) -> usize {
        (self.half.max(0) as usize) * 2
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldGenConfig = toml::from_str(s)?;
        Ok(cfg)
    }
}

pub fn load_worldgen_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    WorldGenConfig::from_toml_str(&s)
}
