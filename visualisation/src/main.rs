mod step_controls;
use step_controls::*;
mod trajectory_renderer;
use trajectory_renderer::*;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use macroquad::{ prelude::*, ui::{ self, root_ui } };
use momentum_engine as me;
use tracing_subscriber::EnvFilter;

const CAMERA_ZOOM_SPEED: f32 = 1.25;
/// Recorded steps played per second
const PLAYBACK_RATE: f32 = 60.;

#[derive(Parser, Debug)]
#[command(about = "Simulate and replay a two ball shot", version)]
struct Args {
    /// TOML scenario, the built-in break shot is used otherwise
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long)]
    speed: Option<f64>,
    /// Launch angle in degrees, clockwise
    #[arg(long)]
    angle: Option<f64>,
    #[arg(long)]
    restitution: Option<f64>,
    #[arg(long)]
    friction: Option<f64>,
    #[arg(long)]
    min_speed: Option<f64>,
    #[arg(long)]
    target_x: Option<f64>,
    #[arg(long)]
    target_y: Option<f64>,
    #[arg(long)]
    max_steps: Option<usize>,
    /// Replace the launch angle by the best of this many angles around it
    #[arg(long)]
    aim_samples: Option<usize>,
    /// Half width of the aim sweep, in degrees
    #[arg(long, default_value_t = 10.)]
    aim_spread: f64,
}

fn load_scenario(args: &Args) -> anyhow::Result<me::Scenario> {
    let mut scenario = match &args.scenario {
        Some(path) => me::Scenario::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => me::Scenario::default(),
    };

    let sim = &mut scenario.simulation;
    if let Some(speed) = args.speed { sim.initial_speed = speed; }
    if let Some(angle) = args.angle { sim.launch_angle_degrees = angle; }
    if let Some(restitution) = args.restitution { sim.restitution_coefficient = restitution; }
    if let Some(friction) = args.friction { sim.friction_coefficient = friction; }
    if let Some(min_speed) = args.min_speed { sim.min_speed_threshold = min_speed; }
    if let Some(x) = args.target_x { sim.target_location.x = x; }
    if let Some(y) = args.target_y { sim.target_location.y = y; }
    if let Some(max_steps) = args.max_steps { scenario.max_steps = max_steps; }

    if let Some(samples) = args.aim_samples {
        let angle = scenario.simulation.launch_angle_degrees;
        let sweep = me::AimSweep {
            table: scenario.table,
            max_steps: scenario.max_steps,
            ..me::AimSweep::new(scenario.simulation, angle - args.aim_spread, angle + args.aim_spread, samples)
        };
        let best = sweep.best().context("aim sweep needs at least one sample")?;
        tracing::info!(
            angle = best.launch_angle_degrees,
            final_distance = best.final_distance,
            "picked launch angle"
        );
        scenario.simulation.launch_angle_degrees = best.launch_angle_degrees;
    }

    Ok(scenario)
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Momentum simulation".to_owned(),
        window_width: 1200,
        window_height: 700,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let scenario = match load_scenario(&args) {
        Ok(scenario) => scenario,
        Err(err) => {
            tracing::error!("{err:#}");
            return;
        }
    };

    let table = scenario.table;
    let sim = scenario.simulator();
    let target = sim.target_location();
    tracing::info!(config = ?scenario.simulation, max_steps = scenario.max_steps, "simulating");
    let result = sim.run(scenario.max_steps);
    tracing::info!(
        steps = result.steps,
        collisions = result.collisions,
        stop_reason = ?result.stop_reason,
        "finished simulation"
    );
    let final_distance = result.final_distance_to_target(target).unwrap_or(f64::NAN);

    let last_step = result.steps;
    let mut playhead: f32 = 0.;
    let mut paused = true;
    let mut controls = StepControls::new();

    let mut cam_offset = Vec2::ZERO;
    let mut zoom = 1.;

    let mouse_pos = |camera: &Camera2D| {
        camera.screen_to_world(Vec2::new(mouse_position().0, mouse_position().1))
    };

    {
        let label_style = root_ui().style_builder()
            .font_size(24)
            .text_color(WHITE)
            .build();
        let skin = ui::Skin {
            label_style,
            ..root_ui().default_skin()
        };
        root_ui().push_skin(&skin);
    }

    loop {
        let mut camera = table_camera(&table, screen_width(), screen_height());
        let cam_centering_zoom = camera.zoom;
        let cam_centering_offset = camera.target;

        if is_key_pressed(KeyCode::R) {
            cam_offset = Vec2::ZERO;
            zoom = 1.;
            playhead = 0.;
        }
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }

        let over_controls = controls.handle_input(&mut playhead, last_step, &mut paused);

        if !paused {
            playhead += get_frame_time() * PLAYBACK_RATE;
            if playhead >= last_step as f32 {
                playhead = last_step as f32;
                paused = true;
            }
        }

        camera.target = cam_offset + cam_centering_offset;
        camera.zoom = cam_centering_zoom * zoom;

        if !over_controls && is_mouse_button_down(MouseButton::Left) {
            cam_offset += mouse_delta_position() / camera.zoom;
            camera.target = cam_offset + cam_centering_offset;
        }

        let scroll = mouse_wheel().1;
        if scroll != 0. {
            let mouse_world_before = mouse_pos(&camera);
            zoom *= CAMERA_ZOOM_SPEED.powf(scroll.signum());
            camera.zoom = cam_centering_zoom * zoom;
            let mouse_world_after = mouse_pos(&camera);
            cam_offset += mouse_world_before - mouse_world_after;
            camera.target = cam_offset + cam_centering_offset;
        }

        set_camera(&camera);
        render_trajectories(&table, target, &result, playhead as usize);

        set_default_camera();
        render_legend();
        controls.draw(playhead, last_step, paused);

        root_ui().label(None, &format!("fps: {}", get_fps()));
        root_ui().label(None, &format!("collisions: {}", result.collisions));
        root_ui().label(None, &format!("stop: {:?}", result.stop_reason));
        root_ui().label(None, &format!("black to target: {final_distance:.03}"));
        if paused {
            root_ui().label(None, "PAUSED");
        }

        next_frame().await;
    }
}
