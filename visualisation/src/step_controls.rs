use macroquad::prelude::*;

/// Play button and scrubber over the recorded steps, drawn at the bottom of
/// the screen
pub struct StepControls {
    dragging: bool,

    height: f32,
    margin: f32,
    play_button_size: f32,
    bar_height: f32,
    scrubber_size: f32,
}

impl StepControls {
    pub fn new() -> Self {
        Self {
            dragging: false,

            height: 60.0,
            margin: 40.0,
            play_button_size: 32.0,
            bar_height: 6.0,
            scrubber_size: 16.0,
        }
    }

    fn bar_y(&self) -> f32 {
        screen_height() - self.height + 25.0
    }

    fn bar_x(&self) -> f32 {
        self.margin + self.play_button_size + 15.0
    }

    fn bar_width(&self) -> f32 {
        screen_width() - self.bar_x() - self.margin
    }

    /// Fraction of the playback in `0..=1`
    fn progress(playhead: f32, last_step: usize) -> f32 {
        if last_step == 0 { 1.0 } else { (playhead / last_step as f32).clamp(0.0, 1.0) }
    }

    /// Returns true when the mouse is over the controls so the caller does not
    /// treat the click as a camera drag
    pub fn handle_input(&mut self, playhead: &mut f32, last_step: usize, paused: &mut bool) -> bool {
        let (mouse_x, mouse_y) = mouse_position();
        let bar_y = self.bar_y();
        let bar_x = self.bar_x();
        let bar_width = self.bar_width();

        let mouse_in_controls = mouse_y >= screen_height() - self.height;
        let mouse_on_play_button = (mouse_x - self.margin).abs() <= self.play_button_size / 2.0 &&
                                   (mouse_y - bar_y).abs() <= self.play_button_size / 2.0;
        let mouse_on_bar = mouse_x >= bar_x - self.scrubber_size / 2.0 &&
                           mouse_x <= bar_x + bar_width + self.scrubber_size / 2.0 &&
                           (mouse_y - bar_y).abs() <= self.scrubber_size / 2.0;

        if mouse_in_controls && is_mouse_button_pressed(MouseButton::Left) {
            if mouse_on_play_button {
                *paused = !*paused;
            } else if mouse_on_bar {
                self.dragging = true;
            }
        }

        if self.dragging && is_mouse_button_down(MouseButton::Left) {
            let normalized_x = ((mouse_x - bar_x) / bar_width).clamp(0.0, 1.0);
            *playhead = (normalized_x * last_step as f32).round();
        }

        if is_mouse_button_released(MouseButton::Left) {
            self.dragging = false;
        }

        mouse_in_controls || self.dragging
    }

    pub fn draw(&self, playhead: f32, last_step: usize, paused: bool) {
        let top = screen_height() - self.height;
        let bar_y = self.bar_y();
        let bar_x = self.bar_x();
        let bar_width = self.bar_width();

        draw_rectangle(0.0, top, screen_width(), self.height, Color::new(0.1, 0.1, 0.1, 0.9));

        draw_circle(self.margin, bar_y, self.play_button_size / 2.0, Color::new(0.7, 0.7, 0.7, 1.0));
        if paused {
            let size = 8.0;
            draw_triangle(
                Vec2::new(self.margin - size / 2.0, bar_y - size / 2.0),
                Vec2::new(self.margin - size / 2.0, bar_y + size / 2.0),
                Vec2::new(self.margin + size / 2.0, bar_y),
                BLACK,
            );
        } else {
            draw_rectangle(self.margin - 5.0, bar_y - 5.0, 3.0, 10.0, BLACK);
            draw_rectangle(self.margin + 2.0, bar_y - 5.0, 3.0, 10.0, BLACK);
        }

        let progress = Self::progress(playhead, last_step);
        draw_rectangle(bar_x, bar_y - self.bar_height / 2.0, bar_width, self.bar_height, Color::new(0.3, 0.3, 0.3, 1.0));
        draw_rectangle(bar_x, bar_y - self.bar_height / 2.0, progress * bar_width, self.bar_height, Color::new(0.8, 0.2, 0.2, 1.0));

        let scrubber_x = bar_x + progress * bar_width;
        let scrubber_color = if self.dragging { Color::new(1.0, 0.4, 0.4, 1.0) } else { Color::new(0.9, 0.3, 0.3, 1.0) };
        draw_circle(scrubber_x, bar_y, self.scrubber_size / 2.0, scrubber_color);
        draw_circle(scrubber_x, bar_y, self.scrubber_size / 2.0 - 2.0, WHITE);

        let label = format!("step {}/{last_step}", playhead as usize);
        draw_text(&label, bar_x, top + 50.0, 16.0, LIGHTGRAY);
    }
}
