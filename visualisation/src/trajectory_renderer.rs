use macroquad::prelude::*;
use itertools::Itertools;
use momentum_engine as me;

const FELT: Color = Color::new(0., 150. / 255., 0., 1.);

/// Camera framing the table with a small border around it.
/// Without a render target macroquad flips the zoom's y again, so world y
/// points up on screen, like the simulation.
pub fn table_camera(table: &me::TableConstants, screen_w: f32, screen_h: f32) -> Camera2D {
    let (table_w, table_h) = (table.width as f32, table.height as f32);
    let (cw, ch) = if screen_w / screen_h > table_w / table_h {
        ((screen_w / screen_h) * table_h, table_h)
    } else {
        (table_w, (screen_h / screen_w) * table_w)
    };
    // Leave a small border around the table
    Camera2D::from_display_rect(Rect {
        x: (table_w - cw * 1.1) / 2.,
        y: (table_h - ch * 1.1) / 2.,
        w: cw * 1.1,
        h: ch * 1.1,
    })
}

/// Simulation positions are drawn as is under [table_camera]
pub fn to_world(point: me::DVec2) -> Vec2 {
    vec2(point.x as f32, point.y as f32)
}

fn draw_path(trajectory: &me::Trajectory, up_to: usize, color: Color) {
    let points = trajectory.iter()
        .take(up_to + 1)
        .map(to_world)
        .collect_vec();

    for (from, to) in points.iter().tuple_windows() {
        draw_line(from.x, from.y, to.x, to.y, 0.02, color);
    }
    for point in &points {
        draw_circle(point.x, point.y, 0.025, color);
    }
}

pub fn render_trajectories(
    table: &me::TableConstants,
    target: me::DVec2,
    result: &me::SimulationResult,
    step: usize,
) {
    clear_background(BLACK);

    // Table
    draw_rectangle(0., 0., table.width as f32, table.height as f32, FELT);
    draw_rectangle_lines(-0.05, -0.05, table.width as f32 + 0.1, table.height as f32 + 0.1, 0.1, WHITE);

    // Target marker
    let target = to_world(target);
    draw_circle(target.x, target.y, table.contact_distance() as f32, RED);

    let radius = table.ball_radius as f32;
    for (role, color) in [(me::BodyRole::White, WHITE), (me::BodyRole::Black, BLACK)] {
        let trajectory = result.trajectory(role);
        draw_path(trajectory, step, color);

        let Some(pos) = trajectory.position_at(step)
        else { continue };
        let pos = to_world(pos);
        draw_circle(pos.x, pos.y, radius, color);
        draw_circle_lines(pos.x, pos.y, radius, 0.01, GRAY);
    }
}

/// Drawn in screen space
pub fn render_legend() {
    let x = screen_width() - 160.;
    draw_rectangle(x - 10., 10., 160., 60., Color::new(1., 1., 1., 0.8));
    for (idx, (role, color)) in [(me::BodyRole::White, WHITE), (me::BodyRole::Black, BLACK)].into_iter().enumerate() {
        let y = 30. + idx as f32 * 25.;
        draw_line(x, y, x + 30., y, 2., color);
        draw_circle(x + 15., y, 4., color);
        draw_circle_lines(x + 15., y, 4., 1., GRAY);
        draw_text(role.name(), x + 40., y + 5., 20., BLACK);
    }
}
