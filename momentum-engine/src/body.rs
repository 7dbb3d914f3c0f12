use crate::damp_velocity;

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRole {
    /// The launched ball
    White,
    /// Starts at rest
    Black,
}

impl BodyRole {
    pub fn name(self) -> &'static str {
        match self {
            BodyRole::White => "White Ball",
            BodyRole::Black => "Black Ball",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Body {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }

    pub fn at_rest(pos: DVec2, radius: f64) -> Self {
        Self::new(pos, DVec2::ZERO, radius)
    }

    /// Exact comparison, only a friction snap can bring a body to rest
    pub fn is_at_rest(&self) -> bool {
        self.vel == DVec2::ZERO
    }

    pub fn apply_friction(&mut self, friction_coefficient: f64, min_speed_threshold: f64) {
        self.vel = damp_velocity(self.vel, friction_coefficient, min_speed_threshold);
    }

    pub fn integrate(&mut self, steps_per_time_unit: f64) {
        self.pos += self.vel / steps_per_time_unit;
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }
}
