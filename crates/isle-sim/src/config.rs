use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use isle_world::WorldGenConfig;

/// All tunables of one run. Every section falls back to its defaults when absent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldGenConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub fish: FishConfig,
    #[serde(default)]
    pub pirates: PirateConfig,
    #[serde(default)]
    pub beam: BeamConfig,
    #[serde(default)]
    pub collectibles: CollectibleConfig,
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SimConfig = toml::from_str(s)?;
        Ok(cfg)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<SimConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    SimConfig::from_toml_str(&s)
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PlayerConfig {
    #[serde(default = "default_player_speed")]
    pub speed: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_jump_speed")]
    pub jump_speed: f32,
    /// Half of the body's visual height; the position is the body center.
    #[serde(default = "default_half_height")]
    pub half_height: f32,
    /// Global shift of the body center (negative sinks the body).
    #[serde(default = "default_y_adjust")]
    pub y_adjust: f32,
    #[serde(default = "default_lives")]
    pub lives: u32,
    #[serde(default = "default_submerge_depth")]
    pub submerge_depth: f32,
    #[serde(default = "default_swim_accel")]
    pub swim_accel: f32,
    #[serde(default = "default_swim_max")]
    pub swim_max: f32,
    #[serde(default = "default_bob_amp")]
    pub bob_amp: f32,
    /// Angular frequency (rad/s) of the surface bob.
    #[serde(default = "default_bob_freq")]
    pub bob_freq: f32,
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
    #[serde(default = "default_walk_rate")]
    pub walk_rate: f32,
    #[serde(default = "default_flash_secs")]
    pub flash_secs: f32,
}

fn default_player_speed() -> f32 {
    3.0
}
fn default_gravity() -> f32 {
    -9.8
}
fn default_jump_speed() -> f32 {
    5.0
}
fn default_half_height() -> f32 {
    0.5
}
fn default_y_adjust() -> f32 {
    -0.8
}
fn default_lives() -> u32 {
    5
}
fn default_submerge_depth() -> f32 {
    1.5
}
fn default_swim_accel() -> f32 {
    20.0
}
fn default_swim_max() -> f32 {
    4.0
}
fn default_bob_amp() -> f32 {
    0.03
}
fn default_bob_freq() -> f32 {
    4.0
}
fn default_turn_rate() -> f32 {
    12.0
}
fn default_walk_rate() -> f32 {
    6.0
}
fn default_flash_secs() -> f32 {
    1.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: default_player_speed(),
            gravity: default_gravity(),
            jump_speed: default_jump_speed(),
            half_height: default_half_height(),
            y_adjust: default_y_adjust(),
            lives: default_lives(),
            submerge_depth: default_submerge_depth(),
            swim_accel: default_swim_accel(),
            swim_max: default_swim_max(),
            bob_amp: default_bob_amp(),
            bob_freq: default_bob_freq(),
            turn_rate: default_turn_rate(),
            walk_rate: default_walk_rate(),
            flash_secs: default_flash_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FishConfig {
    #[serde(default = "default_fish_count")]
    pub count: usize,
    #[serde(default = "default_fish_speed")]
    pub speed: f32,
    /// Offsets from the column surface a fish may swim at.
    #[serde(default = "default_fish_layers")]
    pub layers: Vec<f32>,
    #[serde(default = "default_fish_margin")]
    pub margin: i32,
    #[serde(default = "default_cohesion_radius")]
    pub cohesion_radius: f32,
    #[serde(default = "default_cohesion_strength")]
    pub cohesion_strength: f32,
    #[serde(default = "default_fish_jitter")]
    pub jitter: f32,
    /// Spawn attempts per requested fish.
    #[serde(default = "default_fish_attempts")]
    pub attempts_per_fish: usize,
}

fn default_fish_count() -> usize {
    50
}
fn default_fish_speed() -> f32 {
    1.6
}
fn default_fish_layers() -> Vec<f32> {
    vec![0.2, -0.8, -1.8]
}
fn default_fish_margin() -> i32 {
    10
}
fn default_cohesion_radius() -> f32 {
    4.0
}
fn default_cohesion_strength() -> f32 {
    1.5
}
fn default_fish_jitter() -> f32 {
    0.6
}
fn default_fish_attempts() -> usize {
    20
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            count: default_fish_count(),
            speed: default_fish_speed(),
            layers: default_fish_layers(),
            margin: default_fish_margin(),
            cohesion_radius: default_cohesion_radius(),
            cohesion_strength: default_cohesion_strength(),
            jitter: default_fish_jitter(),
            attempts_per_fish: default_fish_attempts(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PirateConfig {
    #[serde(default = "default_spawn_interval")]
    pub spawn_interval: f32,
    #[serde(default = "default_pirate_max")]
    pub max: usize,
    #[serde(default = "default_pirate_attempts")]
    pub spawn_attempts: usize,
    /// Pirates never spawn within this XZ distance of the player.
    #[serde(default = "default_exclusion_radius")]
    pub exclusion_radius: f32,
    #[serde(default = "default_pirate_speed")]
    pub base_speed: f32,
    #[serde(default = "default_pirate_max_speed")]
    pub max_speed: f32,
    /// Seconds of age after which a pirate moves at `max_speed`.
    #[serde(default = "default_grow_time")]
    pub grow_time: f32,
    #[serde(default = "default_flock_radius")]
    pub flock_radius: f32,
    #[serde(default = "default_cohere_rate")]
    pub cohere_rate: f32,
    #[serde(default = "default_align_rate")]
    pub align_rate: f32,
    #[serde(default = "default_separate_rate")]
    pub separate_rate: f32,
    #[serde(default = "default_attract_rate")]
    pub attract_rate: f32,
    #[serde(default = "default_attract_weight")]
    pub attract_weight: f32,
    #[serde(default = "default_attack_radius")]
    pub attack_radius: f32,
    #[serde(default = "default_lift_secs")]
    pub lift_secs: f32,
    #[serde(default = "default_strike_secs")]
    pub strike_secs: f32,
    #[serde(default = "default_hold_secs")]
    pub hold_secs: f32,
    /// Vertical offset below the player's riding height.
    #[serde(default = "default_ride_offset")]
    pub ride_offset: f32,
    #[serde(default = "default_edge_pad")]
    pub edge_pad: f32,
    #[serde(default = "default_removals_per_step")]
    pub removals_per_step: u32,
    #[serde(default = "default_interval_factor")]
    pub interval_factor: f32,
    #[serde(default = "default_min_interval")]
    pub min_interval: f32,
    #[serde(default = "default_kill_bonus")]
    pub kill_bonus: u32,
}

fn default_spawn_interval() -> f32 {
    3.0
}
fn default_pirate_max() -> usize {
    15
}
fn default_pirate_attempts() -> usize {
    30
}
fn default_exclusion_radius() -> f32 {
    10.0
}
fn default_pirate_speed() -> f32 {
    2.4
}
fn default_pirate_max_speed() -> f32 {
    4.5
}
fn default_grow_time() -> f32 {
    200.0
}
fn default_flock_radius() -> f32 {
    4.0
}
fn default_cohere_rate() -> f32 {
    0.6
}
fn default_align_rate() -> f32 {
    0.8
}
fn default_separate_rate() -> f32 {
    1.2
}
fn default_attract_rate() -> f32 {
    0.6
}
fn default_attract_weight() -> f32 {
    0.6
}
fn default_attack_radius() -> f32 {
    0.9
}
fn default_lift_secs() -> f32 {
    0.25
}
fn default_strike_secs() -> f32 {
    0.15
}
fn default_hold_secs() -> f32 {
    0.45
}
fn default_ride_offset() -> f32 {
    0.2
}
fn default_edge_pad() -> f32 {
    0.5
}
fn default_removals_per_step() -> u32 {
    10
}
fn default_interval_factor() -> f32 {
    0.85
}
fn default_min_interval() -> f32 {
    0.6
}
fn default_kill_bonus() -> u32 {
    5
}

impl Default for PirateConfig {
    fn default() -> Self {
        Self {
            spawn_interval: default_spawn_interval(),
            max: default_pirate_max(),
            spawn_attempts: default_pirate_attempts(),
            exclusion_radius: default_exclusion_radius(),
            base_speed: default_pirate_speed(),
            max_speed: default_pirate_max_speed(),
            grow_time: default_grow_time(),
            flock_radius: default_flock_radius(),
            cohere_rate: default_cohere_rate(),
            align_rate: default_align_rate(),
            separate_rate: default_separate_rate(),
            attract_rate: default_attract_rate(),
            attract_weight: default_attract_weight(),
            attack_radius: default_attack_radius(),
            lift_secs: default_lift_secs(),
            strike_secs: default_strike_secs(),
            hold_secs: default_hold_secs(),
            ride_offset: default_ride_offset(),
            edge_pad: default_edge_pad(),
            removals_per_step: default_removals_per_step(),
            interval_factor: default_interval_factor(),
            min_interval: default_min_interval(),
            kill_bonus: default_kill_bonus(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BeamConfig {
    #[serde(default = "default_max_ammo")]
    pub max_ammo: u32,
    #[serde(default = "default_beam_duration")]
    pub duration: f32,
    #[serde(default = "default_beam_length")]
    pub length: f32,
    #[serde(default = "default_beam_cooldown")]
    pub cooldown: f32,
    #[serde(default = "default_kill_radius")]
    pub kill_radius: f32,
    /// Half the spacing of the synthesized eye pair.
    #[serde(default = "default_eye_offset")]
    pub eye_offset: f32,
    #[serde(default = "default_band_below")]
    pub band_below: f32,
    #[serde(default = "default_band_above")]
    pub band_above: f32,
}

fn default_max_ammo() -> u32 {
    5
}
fn default_beam_duration() -> f32 {
    3.0
}
fn default_beam_length() -> f32 {
    5.0
}
fn default_beam_cooldown() -> f32 {
    2.0
}
fn default_kill_radius() -> f32 {
    0.75
}
fn default_eye_offset() -> f32 {
    0.072
}
fn default_band_below() -> f32 {
    0.2
}
fn default_band_above() -> f32 {
    1.4
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            max_ammo: default_max_ammo(),
            duration: default_beam_duration(),
            length: default_beam_length(),
            cooldown: default_beam_cooldown(),
            kill_radius: default_kill_radius(),
            eye_offset: default_eye_offset(),
            band_below: default_band_below(),
            band_above: default_band_above(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CollectibleConfig {
    #[serde(default = "default_collect_interval")]
    pub spawn_interval: f32,
    #[serde(default = "default_collect_max")]
    pub max: usize,
    #[serde(default = "default_collect_attempts")]
    pub spawn_attempts: usize,
    #[serde(default = "default_prob_gold")]
    pub prob_gold: f32,
    #[serde(default = "default_prob_diamond")]
    pub prob_diamond: f32,
    #[serde(default = "default_pickup_radius")]
    pub pickup_radius: f32,
    /// Height above the top face of the column's top solid block.
    #[serde(default = "default_rest_height")]
    pub rest_height: f32,
}

fn default_collect_interval() -> f32 {
    1.0
}
fn default_collect_max() -> usize {
    50
}
fn default_collect_attempts() -> usize {
    40
}
fn default_prob_gold() -> f32 {
    0.65
}
fn default_prob_diamond() -> f32 {
    0.30
}
fn default_pickup_radius() -> f32 {
    0.8
}
fn default_rest_height() -> f32 {
    0.32
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            spawn_interval: default_collect_interval(),
            max: default_collect_max(),
            spawn_attempts: default_collect_attempts(),
            prob_gold: default_prob_gold(),
            prob_diamond: default_prob_diamond(),
            pickup_radius: default_pickup_radius(),
            rest_height: default_rest_height(),
        }
    }
}
