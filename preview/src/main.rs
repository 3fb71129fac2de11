//! Desktop preview of the countdown prop
//!
//! Simulates the five lanes on a window, with buttons standing in for the
//! lane triggers. All state changes go through the intent channel, the same
//! way the firmware's input handling talks to the tick driver.

use std::time::Instant as StdInstant;

use countdown_light_composer::{
    CountdownConfig, CountdownDriver, DEFAULT_TICK_PERIOD, Duration, Instant, IntentChannel,
    IntentSender, OutputDriver, Palette, Rgb, color::BLACK,
};
use eframe::egui::{self};

/// Number of lanes on the prop
const LANES: usize = 5;

/// Lights per lane, also the soldered segment length
const POSITIONS: usize = 5;

/// Lights on the strip
const LEDS: usize = LANES * POSITIONS;

/// Intent channel size
const INTENT_CHANNEL_SIZE: usize = 16;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 28.0;

/// Gap between LEDs
const LED_GAP: f32 = 4.0;

/// Longest stall before the simulated clock skips ahead, in milliseconds
const MAX_CATCH_UP_MS: u64 = 1000;

/// Static intent channel for communication between UI and driver
static INTENTS_CHANNEL: IntentChannel<INTENT_CHANNEL_SIZE> =
    IntentChannel::<INTENT_CHANNEL_SIZE>::new();

type PreviewDriver =
    CountdownDriver<'static, FrameCapture, LANES, POSITIONS, LEDS, INTENT_CHANNEL_SIZE>;

/// Keeps the last frame the driver pushed out
struct FrameCapture {
    frame: [Rgb; LEDS],
}

impl OutputDriver for FrameCapture {
    fn write(&mut self, colors: &[Rgb]) {
        for (led, color) in self.frame.iter_mut().zip(colors) {
            *led = *color;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// One row per lane, as the player sees the prop
    Panel,
    /// Lights in wire order, as the strip receives them
    Strip,
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 520.0])
            .with_title("Countdown Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "countdown-light-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// The driver instance
    driver: PreviewDriver,
    /// Intent sender for UI changes
    intent_sender: IntentSender<'static, INTENT_CHANNEL_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Synthetic time of the next tick
    next_tick_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether time is running
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,

    /// Countdown length requested by lane buttons, in seconds
    reload_secs: f32,
    /// Active color (RGB)
    color: [u8; 3],
    /// Whether a finished color is configured
    finished_enabled: bool,
    /// Finished color (RGB)
    finished_color: [u8; 3],

    /// Display layout
    layout: Layout,
}

impl PreviewApp {
    fn new() -> Self {
        let initial_color = Rgb {
            r: 255,
            g: 140,
            b: 40,
        };
        let config = CountdownConfig {
            tick_period: DEFAULT_TICK_PERIOD,
            palette: Palette {
                active: initial_color,
                finished: None,
            },
        };
        let output = FrameCapture {
            frame: [BLACK; LEDS],
        };

        Self {
            driver: PreviewDriver::new(INTENTS_CHANNEL.receiver(), output, &config),
            intent_sender: INTENTS_CHANNEL.sender(),
            t_ms: 0,
            next_tick_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            reload_secs: 15.0,
            color: [initial_color.r, initial_color.g, initial_color.b],
            finished_enabled: false,
            finished_color: [0, 160, 0],
            layout: Layout::Panel,
        }
    }

    /// Send a reload intent for one lane
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn send_reload(&self, lane: usize) {
        let millis = (self.reload_secs * 1000.0).max(0.0) as u64;
        let _ = self
            .intent_sender
            .reload(lane, Duration::from_millis(millis));
    }

    /// Send an active color change intent
    fn send_color_change(&self) {
        let [r, g, b] = self.color;
        let _ = self.intent_sender.set_active_color(Rgb { r, g, b });
    }

    /// Send a finished color change intent
    fn send_finished_change(&self) {
        let color = self.finished_enabled.then(|| {
            let [r, g, b] = self.finished_color;
            Rgb { r, g, b }
        });
        let _ = self.intent_sender.set_finished_color(color);
    }

    fn send_clear(&self) {
        let _ = self.intent_sender.clear_lanes();
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                delta_ms_f64.max(0.0)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.saturating_add(delta_ms);
        }
    }

    /// Run every tick that is due at the current synthetic time
    fn run_ticks(&mut self) {
        if self.t_ms.saturating_sub(self.next_tick_ms) > MAX_CATCH_UP_MS {
            self.next_tick_ms = self.t_ms;
        }
        while self.next_tick_ms <= self.t_ms {
            let result = self.driver.tick(Instant::from_millis(self.next_tick_ms));
            self.next_tick_ms = result.next_deadline.as_millis();
        }
    }

    /// Color of a lane position as shown on the strip
    fn panel_color(&self, lane: usize, position: usize) -> Rgb {
        let address = self.driver.layout().lane_position(lane, position, POSITIONS);
        self.driver.output().frame[address]
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                .clicked()
            {
                self.playing = !self.playing;
            }
            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=10.0).logarithmic(true));
            let secs = self.t_ms / 1000;
            let ms = self.t_ms % 1000;
            ui.label(format!("Time: {secs}.{ms:03}s"));
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Reload:");
            ui.add(egui::Slider::new(&mut self.reload_secs, 0.0..=60.0).suffix(" s"));
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            for lane in 0..LANES {
                if ui.button(format!("Lane {}", lane + 1)).clicked() {
                    self.send_reload(lane);
                }
            }
            ui.add_space(8.0);
            if ui.button("All").clicked() {
                for lane in 0..LANES {
                    self.send_reload(lane);
                }
            }
            if ui.button("Clear").clicked() {
                self.send_clear();
            }
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Color:");
            let old_color = self.color;
            if ui.color_edit_button_srgb(&mut self.color).changed() && old_color != self.color {
                self.send_color_change();
            }

            ui.add_space(8.0);

            let old_enabled = self.finished_enabled;
            let old_finished = self.finished_color;
            ui.checkbox(&mut self.finished_enabled, "Finished color");
            ui.color_edit_button_srgb(&mut self.finished_color);
            if old_enabled != self.finished_enabled || old_finished != self.finished_color {
                self.send_finished_change();
            }
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Layout:");
            ui.selectable_value(&mut self.layout, Layout::Panel, "panel");
            ui.selectable_value(&mut self.layout, Layout::Strip, "strip");
        });
    }

    fn status(&self, ui: &mut egui::Ui) {
        let lanes = self.driver.lanes();
        for (index, lane) in lanes.lanes().iter().enumerate() {
            ui.label(format!(
                "Lane {}: {} / {} ms",
                index + 1,
                lane.remaining(),
                lane.full_scale()
            ));
        }
        let state = if lanes.all_running() {
            "solved"
        } else if lanes.is_finished() {
            "finished"
        } else if lanes.is_running() {
            "running"
        } else {
            "idle"
        };
        ui.label(format!("State: {state}"));
    }

    #[allow(clippy::cast_precision_loss)]
    fn leds(&self, ui: &mut egui::Ui) {
        let pitch = LED_SIZE + LED_GAP;
        let (columns, rows) = match self.layout {
            Layout::Panel => (POSITIONS, LANES),
            Layout::Strip => (LEDS, 1),
        };
        let (response, painter) = ui.allocate_painter(
            egui::vec2(columns as f32 * pitch, rows as f32 * pitch),
            egui::Sense::hover(),
        );
        let origin = response.rect.min;

        for row in 0..rows {
            for column in 0..columns {
                let pixel = match self.layout {
                    Layout::Panel => self.panel_color(row, column),
                    Layout::Strip => self.driver.output().frame[column],
                };
                let rect = egui::Rect::from_min_size(
                    egui::pos2(
                        origin.x + column as f32 * pitch,
                        origin.y + row as f32 * pitch,
                    ),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                painter.rect_filled(rect, 3.0, egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b));
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_ticks();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls(ui);
            ui.add_space(16.0);
            self.leds(ui);
            ui.add_space(16.0);
            self.status(ui);
        });
    }
}
