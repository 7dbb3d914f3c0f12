use glam::DVec2;

/// Polar to cartesian with the angle measured clockwise, matching the
/// vertical flip of the target location
pub fn velocity_from_polar(speed: f64, angle_degrees: f64) -> DVec2 {
    let angle = -angle_degrees.to_radians();
    DVec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Applies one step of friction, snapping to rest once both axes are
/// individually below the threshold
pub fn damp_velocity(vel: DVec2, friction_coefficient: f64, min_speed_threshold: f64) -> DVec2 {
    let vel = vel * (1. - friction_coefficient);
    if vel.x.abs() < min_speed_threshold && vel.y.abs() < min_speed_threshold {
        DVec2::ZERO
    }
    else {
        vel
    }
}

/// Exchanges the normal components of the two velocities, scaled by the
/// restitution coefficient. Tangential components are kept as is.
/// Both disks are assumed to have the same mass.
///
/// Coincident centers have no normal and produce NaN velocities.
pub fn resolve_contact(
    pos1: DVec2,
    vel1: DVec2,
    pos2: DVec2,
    vel2: DVec2,
    restitution: f64,
) -> (DVec2, DVec2) {
    let delta_pos = pos2 - pos1;
    let dist = delta_pos.length();
    if dist == 0. {
        tracing::warn!(?pos1, "resolving a contact between coincident centers");
    }

    let normal = delta_pos / dist;
    let tangent = normal.perp();

    let v1n = normal.dot(vel1);
    let v1t = tangent.dot(vel1);
    let v2n = normal.dot(vel2);
    let v2t = tangent.dot(vel2);

    let v1n_new = v2n * restitution;
    let v2n_new = v1n * restitution;

    (
        v1n_new * normal + v1t * tangent,
        v2n_new * normal + v2t * tangent,
    )
}
