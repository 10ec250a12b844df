//! Linker configuration.
//!
//! All tunables of edge extraction, link placement and bake scheduling live in a
//! single [`LinkerConfig`]. It deserializes from JSON with every field optional.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NavLinkError, Result};
use crate::traits::Validate;

/// Which jump probes run at each sample point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkDirection {
    Horizontal,
    #[default]
    Vertical,
    Both,
}

impl LinkDirection {
    pub fn runs_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    pub fn runs_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    pub direction: LinkDirection,

    // Jump thresholds
    pub min_jump_height: f64,
    pub max_jump_height: f64,
    /// Forward reach of the vertical probe, also the X/Z perimeter threshold.
    pub jump_dist_vertical: f64,

    // Horizontal probe
    pub max_jump_dist_horizontal: f64,
    pub link_start_point_offset: f64,
    pub obstacle_check_y_offset: f64,
    pub sphere_cast_radius: f64,
    /// Landing points closer than this to the sample point are rejected.
    pub horizontal_min_link_distance: f64,
    pub horizontal_bidirectional: bool,

    // Connector values
    pub link_width: f64,
    pub link_area: u32,
    pub link_bidirectional: bool,
    pub link_cost_modifier: i32,
    pub link_auto_update_position: bool,

    // Edge normal
    pub invert_facing_normal: bool,
    pub dont_align_y_axis: bool,

    /// Debounce window between the last change notification and the bake.
    pub bake_delay_secs: f64,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            direction: LinkDirection::Vertical,
            min_jump_height: 0.15,
            max_jump_height: 1.0,
            jump_dist_vertical: 0.035,
            max_jump_dist_horizontal: 5.0,
            link_start_point_offset: 0.25,
            obstacle_check_y_offset: 0.5,
            sphere_cast_radius: 1.0,
            horizontal_min_link_distance: 1.1,
            horizontal_bidirectional: false,
            link_width: 0.25,
            link_area: 0,
            link_bidirectional: false,
            link_cost_modifier: -1,
            link_auto_update_position: true,
            invert_facing_normal: false,
            dont_align_y_axis: false,
            bake_delay_secs: 2.0,
        }
    }
}

impl LinkerConfig {
    /// Parse and validate a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn bake_delay(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.bake_delay_secs)
            .map_err(|e| NavLinkError::InvalidConfig(format!("bake_delay_secs: {e}")))
    }
}

impl Validate for LinkerConfig {
    fn validate(&self) -> Result<()> {
        let distances = [
            ("min_jump_height", self.min_jump_height),
            ("max_jump_height", self.max_jump_height),
            ("jump_dist_vertical", self.jump_dist_vertical),
            ("max_jump_dist_horizontal", self.max_jump_dist_horizontal),
            ("link_start_point_offset", self.link_start_point_offset),
            ("sphere_cast_radius", self.sphere_cast_radius),
            ("horizontal_min_link_distance", self.horizontal_min_link_distance),
            ("bake_delay_secs", self.bake_delay_secs),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(NavLinkError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !self.obstacle_check_y_offset.is_finite() {
            return Err(NavLinkError::InvalidConfig(format!(
                "obstacle_check_y_offset must be finite, got {}",
                self.obstacle_check_y_offset
            )));
        }

        if !(self.link_width.is_finite() && self.link_width > 0.0) {
            return Err(NavLinkError::InvalidConfig(format!(
                "link_width must be positive, got {}",
                self.link_width
            )));
        }

        Ok(())
    }
}
