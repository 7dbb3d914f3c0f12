use crate::{ resolve_contact, velocity_from_polar, Body, BodyRole, SimulationConfig, TableConstants, Trajectory, DEFAULT_MAX_STEPS };

use std::time::Instant;

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Both bodies reached an exact zero velocity
    AtRest,
    StepBudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub collided: bool,
    pub at_rest: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    pub white: Trajectory,
    pub black: Trajectory,
    /// Number of executed steps, the trajectories have one more entry
    pub steps: usize,
    pub collisions: usize,
    pub stop_reason: StopReason,
}

impl SimulationResult {
    pub fn trajectory(&self, role: BodyRole) -> &Trajectory {
        match role {
            BodyRole::White => &self.white,
            BodyRole::Black => &self.black,
        }
    }

    pub fn into_trajectories(self) -> (Trajectory, Trajectory) {
        (self.white, self.black)
    }

    /// Distance between the black ball's resting place and `target`
    /// (in simulation coordinates)
    pub fn final_distance_to_target(&self, target: DVec2) -> Option<f64> {
        self.black.final_position().map(|pos| pos.distance(target))
    }
}

pub struct Simulator {
    config: SimulationConfig,
    table: TableConstants,
    /// Already flipped into simulation coordinates
    target: DVec2,
    white: Body,
    black: Body,
    white_trajectory: Trajectory,
    black_trajectory: Trajectory,
    steps: usize,
    collisions: usize,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_table(config, TableConstants::default())
    }

    pub fn with_table(config: SimulationConfig, table: TableConstants) -> Self {
        let white = Body::new(
            table.white_start,
            velocity_from_polar(config.initial_speed, config.launch_angle_degrees),
            table.ball_radius,
        );
        let black = Body::at_rest(table.black_start, table.ball_radius);
        Self::from_bodies(config, table, white, black)
    }

    /// Starts from arbitrary bodies, ignoring the launch parameters of
    /// `config`
    pub fn from_bodies(config: SimulationConfig, table: TableConstants, white: Body, black: Body) -> Self {
        Self {
            config,
            table,
            target: table.flip_vertical(config.target_location),
            white_trajectory: Trajectory::starting_at(white.pos),
            black_trajectory: Trajectory::starting_at(black.pos),
            white,
            black,
            steps: 0,
            collisions: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn table(&self) -> &TableConstants {
        &self.table
    }

    pub fn target_location(&self) -> DVec2 {
        self.target
    }

    pub fn body(&self, role: BodyRole) -> &Body {
        match role {
            BodyRole::White => &self.white,
            BodyRole::Black => &self.black,
        }
    }

    pub fn white(&self) -> &Body {
        &self.white
    }

    pub fn black(&self) -> &Body {
        &self.black
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Friction, integration, then a single overlap check.
    /// A contact that still overlaps on the next step is resolved again.
    pub fn advance_one_step(&mut self) -> StepOutcome {
        let SimulationConfig { friction_coefficient, min_speed_threshold, .. } = self.config;

        self.white.apply_friction(friction_coefficient, min_speed_threshold);
        self.black.apply_friction(friction_coefficient, min_speed_threshold);

        self.white.integrate(self.table.steps_per_time_unit);
        self.black.integrate(self.table.steps_per_time_unit);

        let collided = self.white.overlaps(&self.black);
        if collided {
            let (white_vel, black_vel) = resolve_contact(
                self.white.pos, self.white.vel,
                self.black.pos, self.black.vel,
                self.config.restitution_coefficient,
            );
            self.white.vel = white_vel;
            self.black.vel = black_vel;
            self.collisions += 1;
            tracing::debug!(
                step = self.steps,
                ?white_vel,
                ?black_vel,
                "contact resolved"
            );
        }

        self.white_trajectory.push(self.white.pos);
        self.black_trajectory.push(self.black.pos);
        self.steps += 1;

        StepOutcome {
            collided,
            at_rest: self.white.is_at_rest() && self.black.is_at_rest(),
        }
    }

    pub fn run(mut self, max_steps: usize) -> SimulationResult {
        let start_instant = Instant::now();

        let mut stop_reason = StopReason::StepBudgetExhausted;
        for _ in 0..max_steps {
            if self.advance_one_step().at_rest {
                stop_reason = StopReason::AtRest;
                break;
            }
        }

        tracing::debug!(
            steps = self.steps,
            collisions = self.collisions,
            ?stop_reason,
            elapsed = ?start_instant.elapsed(),
            "simulation finished"
        );

        SimulationResult {
            white: self.white_trajectory,
            black: self.black_trajectory,
            steps: self.steps,
            collisions: self.collisions,
            stop_reason,
        }
    }

    pub fn run_default(self) -> SimulationResult {
        self.run(DEFAULT_MAX_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn still_config() -> SimulationConfig {
        SimulationConfig {
            friction_coefficient: 0.,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let sim = Simulator::new(SimulationConfig {
            initial_speed: 2.,
            launch_angle_degrees: 45.,
            target_location: DVec2::new(6., 1.),
            ..SimulationConfig::default()
        });
        assert_eq!(sim.white().pos, DVec2::new(1., 3.));
        assert_relative_eq!(sim.white().vel.x, 2. * (-45f64.to_radians()).cos());
        assert_relative_eq!(sim.white().vel.y, 2. * (-45f64.to_radians()).sin());
        assert_eq!(sim.black().pos, DVec2::new(3., 3.));
        assert_eq!(sim.black().vel, DVec2::ZERO);
        assert_eq!(sim.target_location(), DVec2::new(6., 5.));
        assert_eq!(sim.body(BodyRole::White).radius, 0.15);
    }

    #[test]
    fn test_first_step() {
        let mut sim = Simulator::new(SimulationConfig::default());
        let outcome = sim.advance_one_step();
        assert_eq!(outcome, StepOutcome { collided: false, at_rest: false });

        assert_relative_eq!(sim.white().vel.x, 4.95, epsilon = 1e-12);
        assert_eq!(sim.white().vel.y, 0.);
        assert_relative_eq!(sim.white().pos.x, 1.0825, epsilon = 1e-12);
        assert_eq!(sim.white().pos.y, 3.);
        assert_eq!(sim.black().pos, DVec2::new(3., 3.));
        assert_eq!(sim.steps(), 1);
        assert_eq!(sim.collisions(), 0);
    }

    #[test]
    fn test_contact_swaps_normal_speeds() {
        let table = TableConstants::default();
        let mut sim = Simulator::from_bodies(
            still_config(),
            table,
            Body::new(DVec2::new(1., 3.), DVec2::new(1., 0.), table.ball_radius),
            Body::at_rest(DVec2::new(1.29, 3.), table.ball_radius),
        );

        let outcome = sim.advance_one_step();
        assert!(outcome.collided);
        assert_relative_eq!(sim.white().vel.x, 0.);
        assert_relative_eq!(sim.white().vel.y, 0.);
        assert_relative_eq!(sim.black().vel.x, 0.9, epsilon = 1e-12);
        assert_relative_eq!(sim.black().vel.y, 0.);
        assert_eq!(sim.collisions(), 1);
    }

    #[test]
    fn test_persisting_overlap_is_resolved_again() {
        let table = TableConstants::default();
        let mut sim = Simulator::from_bodies(
            SimulationConfig {
                restitution_coefficient: 0.5,
                ..still_config()
            },
            table,
            Body::new(DVec2::new(1., 3.), DVec2::new(1., 0.), table.ball_radius),
            Body::at_rest(DVec2::new(1.29, 3.), table.ball_radius),
        );

        assert!(sim.advance_one_step().collided);
        assert!(sim.advance_one_step().collided);
        // Second impulse sent the white ball back against the black one
        assert_relative_eq!(sim.white().vel.x, 0.25);
        assert_relative_eq!(sim.black().vel.x, 0.);
    }

    #[test]
    fn test_run_stops_when_both_at_rest() {
        let result = Simulator::new(SimulationConfig {
            friction_coefficient: 0.2,
            ..SimulationConfig::default()
        }).run(500);

        assert_eq!(result.stop_reason, StopReason::AtRest);
        assert!(result.steps < 500);
        assert_eq!(result.white.len(), result.steps + 1);
        assert_eq!(result.black.len(), result.steps + 1);
        assert_eq!(result.collisions, 0);
    }

    #[test]
    fn test_run_exhausts_budget_without_friction() {
        let result = Simulator::new(still_config()).run(40);
        assert_eq!(result.stop_reason, StopReason::StepBudgetExhausted);
        assert_eq!(result.steps, 40);
        assert_eq!(result.white.len(), 41);
        assert_eq!(result.black.len(), 41);
    }

    #[test]
    fn test_zero_budget_keeps_initial_positions() {
        let result = Simulator::new(SimulationConfig::default()).run(0);
        assert_eq!(result.steps, 0);
        assert_eq!(result.white.points(), &[DVec2::new(1., 3.)]);
        assert_eq!(result.black.points(), &[DVec2::new(3., 3.)]);

        let (white, black) = result.into_trajectories();
        assert_eq!(white.len(), black.len());
    }

    #[test]
    fn test_config_simulate_matches_simulator_run() {
        let config = SimulationConfig {
            launch_angle_degrees: 3.,
            ..SimulationConfig::default()
        };
        for max_steps in [0, 1, 120, 700] {
            assert_eq!(config.simulate(max_steps), Simulator::new(config).run(max_steps));
        }
    }

    #[test]
    fn test_resting_start_stops_after_one_step() {
        let result = Simulator::new(SimulationConfig {
            initial_speed: 0.,
            ..SimulationConfig::default()
        }).run_default();
        assert_eq!(result.stop_reason, StopReason::AtRest);
        assert_eq!(result.steps, 1);
        assert_eq!(result.white.len(), 2);
    }
}
