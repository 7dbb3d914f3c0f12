use glam::DVec2;
use ordered_float::OrderedFloat;

/// Positions of one body, the initial one followed by one entry per step
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Trajectory {
    points: Vec<DVec2>,
}

impl Trajectory {
    pub(crate) fn starting_at(pos: DVec2) -> Self {
        Self { points: vec![pos] }
    }

    pub(crate) fn push(&mut self, pos: DVec2) {
        self.points.push(pos);
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn initial_position(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    pub fn final_position(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    /// Position at the given step, clamped to the last recorded one
    pub fn position_at(&self, step: usize) -> Option<DVec2> {
        self.points.get(step.min(self.points.len().saturating_sub(1))).copied()
    }

    /// Step and distance of the point closest to `target`.
    /// Ties keep the earliest step.
    pub fn closest_approach(&self, target: DVec2) -> Option<(usize, f64)> {
        self.points.iter()
            .map(|point| point.distance(target))
            .enumerate()
            .min_by_key(|&(idx, dist)| (OrderedFloat(dist), idx))
    }
}

impl From<Trajectory> for Vec<DVec2> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.points
    }
}
