use crate::{ default, Simulator, SimulationResult };

use std::path::{ Path, PathBuf };

use glam::DVec2;
use serde::{ Deserialize, Serialize };
use thiserror::Error;

pub const TABLE_WIDTH: f64 = 12.;
pub const TABLE_HEIGHT: f64 = 6.;
pub const BALL_RADIUS: f64 = 0.15;
/// Number of integration steps per simulated time unit
pub const STEPS_PER_TIME_UNIT: f64 = 60.;
pub const WHITE_START: DVec2 = DVec2::new(1., 3.);
pub const BLACK_START: DVec2 = DVec2::new(3., 3.);
pub const DEFAULT_MAX_STEPS: usize = 500;

/// Fixed geometry of the table and the integration rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConstants {
    pub width: f64,
    pub height: f64,
    pub ball_radius: f64,
    pub steps_per_time_unit: f64,
    pub white_start: DVec2,
    pub black_start: DVec2,
}

impl Default for TableConstants {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            ball_radius: BALL_RADIUS,
            steps_per_time_unit: STEPS_PER_TIME_UNIT,
            white_start: WHITE_START,
            black_start: BLACK_START,
        }
    }
}

impl TableConstants {
    /// Converts a point from the user-facing convention (origin at the top)
    /// to the simulation convention by flipping it against the table height
    pub fn flip_vertical(&self, point: DVec2) -> DVec2 {
        DVec2::new(point.x, self.height - point.y)
    }

    /// Centers closer than this are overlapping
    pub fn contact_distance(&self) -> f64 {
        self.ball_radius * 2.
    }
}

/// Inputs of a single run.
///
/// No value is validated: out of range coefficients simply produce
/// physically implausible trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_speed: f64,
    /// Clockwise-positive
    pub launch_angle_degrees: f64,
    pub restitution_coefficient: f64,
    /// Fraction of the velocity lost at every step
    pub friction_coefficient: f64,
    pub min_speed_threshold: f64,
    /// In user-facing coordinates, see [`TableConstants::flip_vertical`]
    pub target_location: DVec2,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_speed: 5.,
            launch_angle_degrees: 0.,
            restitution_coefficient: 0.9,
            friction_coefficient: 0.01,
            min_speed_threshold: 0.01,
            target_location: DVec2::new(6., 3.),
        }
    }
}

impl SimulationConfig {
    pub fn simulate(&self, max_steps: usize) -> SimulationResult {
        Simulator::new(*self).run(max_steps)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read scenario file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

/// A scenario file: the run configuration, its step budget and optionally a
/// custom table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub table: TableConstants,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            simulation: default(),
            table: default(),
        }
    }
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::from_toml_str(&source)
    }

    pub fn simulator(&self) -> Simulator {
        Simulator::with_table(self.simulation, self.table)
    }

    pub fn simulate(&self) -> SimulationResult {
        self.simulator().run(self.max_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_scenario() {
        let scenario = Scenario::from_toml_str(r#"
            max_steps = 250

            [simulation]
            initial_speed = 3.5
            launch_angle_degrees = 15.0
            restitution_coefficient = 0.8
            friction_coefficient = 0.02
            min_speed_threshold = 0.05
            target_location = [9.0, 1.5]

            [table]
            ball_radius = 0.2
        "#).unwrap();

        assert_eq!(scenario, Scenario {
            max_steps: 250,
            simulation: SimulationConfig {
                initial_speed: 3.5,
                launch_angle_degrees: 15.,
                restitution_coefficient: 0.8,
                friction_coefficient: 0.02,
                min_speed_threshold: 0.05,
                target_location: DVec2::new(9., 1.5),
            },
            table: TableConstants {
                ball_radius: 0.2,
                ..default()
            },
        });
    }

    #[test]
    fn test_optional_sections() {
        let scenario = Scenario::from_toml_str(r#"
            [simulation]
            initial_speed = 5.0
            launch_angle_degrees = 0.0
            restitution_coefficient = 0.9
            friction_coefficient = 0.01
            min_speed_threshold = 0.01
            target_location = [6.0, 3.0]
        "#).unwrap();

        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let err = Scenario::from_toml_str(r#"
            [simulation]
            initial_speed = 5.0
        "#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_values_are_accepted() {
        let scenario = Scenario::from_toml_str(r#"
            [simulation]
            initial_speed = -2.0
            launch_angle_degrees = 720.0
            restitution_coefficient = 1.5
            friction_coefficient = -0.1
            min_speed_threshold = 0.0
            target_location = [-1.0, 100.0]
        "#).unwrap();
        assert_eq!(scenario.simulation.restitution_coefficient, 1.5);
        assert_eq!(scenario.simulation.friction_coefficient, -0.1);
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::load("/nonexistent/scenario.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/scenario.toml")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_flip_vertical() {
        let table = TableConstants::default();
        assert_eq!(table.flip_vertical(DVec2::new(6., 1.)), DVec2::new(6., 5.));
        assert_eq!(table.flip_vertical(DVec2::new(2., 3.)), DVec2::new(2., 3.));
        assert_eq!(table.contact_distance(), 0.3);
    }
}
