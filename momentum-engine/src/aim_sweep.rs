use crate::{ SimulationConfig, Simulator, TableConstants, DEFAULT_MAX_STEPS };

use itertools::Itertools;
use ordered_float::OrderedFloat;
use rayon::prelude::*;

/// Score of a single launch angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimCandidate {
    pub launch_angle_degrees: f64,
    /// Distance between the black ball's last position and the target
    pub final_distance: f64,
    /// Closest the black ball ever got to the target
    pub closest_distance: f64,
}

/// Runs one independent simulation per launch angle, evenly spaced between
/// `angle_start` and `angle_end` (both included), everything else taken
/// from `base`.
#[derive(Debug, Clone, Copy)]
pub struct AimSweep {
    pub base: SimulationConfig,
    pub table: TableConstants,
    pub angle_start: f64,
    pub angle_end: f64,
    pub samples: usize,
    pub max_steps: usize,
}

impl AimSweep {
    pub fn new(base: SimulationConfig, angle_start: f64, angle_end: f64, samples: usize) -> Self {
        Self {
            base,
            table: TableConstants::default(),
            angle_start,
            angle_end,
            samples,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn angles(&self) -> Vec<f64> {
        match self.samples {
            0 => vec![],
            1 => vec![self.angle_start],
            n => {
                let step = (self.angle_end - self.angle_start) / (n - 1) as f64;
                (0..n).map(|i| self.angle_start + step * i as f64).collect_vec()
            }
        }
    }

    fn evaluate(&self, launch_angle_degrees: f64) -> AimCandidate {
        let sim = Simulator::with_table(
            SimulationConfig { launch_angle_degrees, ..self.base },
            self.table,
        );
        let target = sim.target_location();
        let result = sim.run(self.max_steps);

        AimCandidate {
            launch_angle_degrees,
            final_distance: result.final_distance_to_target(target).unwrap_or(f64::INFINITY),
            closest_distance: result.black.closest_approach(target)
                .map_or(f64::INFINITY, |(_, dist)| dist),
        }
    }

    /// Candidates in angle order
    pub fn run(&self) -> Vec<AimCandidate> {
        let candidates: Vec<AimCandidate> = self.angles()
            .into_par_iter()
            .map(|angle| self.evaluate(angle))
            .collect();
        tracing::debug!(samples = candidates.len(), "aim sweep finished");
        candidates
    }

    /// Candidate leaving the black ball closest to the target.
    /// NaN distances rank last.
    pub fn best(&self) -> Option<AimCandidate> {
        self.run().into_iter()
            .min_by_key(|candidate| {
                let dist = candidate.final_distance;
                (dist.is_nan(), OrderedFloat(dist))
            })
    }
}
