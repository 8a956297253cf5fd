// ui.rs - eframe front end: draws the current generation and forwards controls to the driver

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use life_core::patterns;

use crate::config::AppConfig;
use crate::driver::{Driver, StepMode};

pub struct GameOfLife {
    driver: Driver,
    runtime: tokio::runtime::Runtime,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub cell_size: f32,
    pub selected_pattern: usize,
}

impl GameOfLife {
    pub fn new(driver: Driver, config: &AppConfig) -> Result<Self> {
        let [lr, lg, lb] = config.display.live_color;
        let [dr, dg, db] = config.display.dead_color;
        Ok(Self {
            driver,
            runtime: tokio::runtime::Runtime::new()?,
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
            cell_size: config.display.cell_size,
            selected_pattern: 0,
        })
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let ticked = match self.driver.mode() {
            StepMode::Sequential => self.driver.poll(now),
            StepMode::Concurrent => self.runtime.block_on(self.driver.poll_async(now)),
        };
        // The driver has already halted and kept the message for the panel.
        if let Err(e) = ticked {
            tracing::debug!(error = %e, "tick failed");
        }
    }

    fn step_once(&mut self) {
        let stepped = match self.driver.mode() {
            StepMode::Sequential => self.driver.advance(),
            StepMode::Concurrent => self.runtime.block_on(self.driver.advance_async()),
        };
        if let Err(e) = stepped {
            tracing::debug!(error = %e, "manual step failed");
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.driver.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                if self.driver.is_running() {
                    self.driver.stop();
                } else {
                    self.driver.start();
                }
            }

            if ui.add_enabled(!self.driver.is_running(), egui::Button::new("⏭ Step")).clicked() {
                self.step_once();
            }

            if ui.button("⏹ Clear").clicked() {
                self.driver.clear();
            }

            if ui.button("🎲 Random").clicked() {
                if let Err(e) = self.driver.reseed() {
                    tracing::warn!(error = %e, "reseed failed");
                }
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.driver.apply_pattern(&patterns::PATTERNS[self.selected_pattern]);
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.driver.generation()));
        });

        ui.separator();

        // Speed control
        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1000.0 / self.driver.interval().as_millis().max(1) as f32;
            if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                self.driver.set_interval(Duration::from_millis((1000.0 / speed) as u64));
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let spacing = 0.5;
        let pitch = self.cell_size + spacing;
        let (rows, cols) = (self.driver.grid().rows(), self.driver.grid().cols());

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(
            (pitch * cols as f32 - spacing).max(0.0),
            (pitch * rows as f32 - spacing).max(0.0),
        );

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        for (row, cells) in self.driver.grid().iter_rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let x = start_pos.x + col as f32 * pitch;
                let y = start_pos.y + row as f32 * pitch;
                let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(self.cell_size));

                let cell_color = if cell.is_alive() { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, cell_color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }
        }

        // Clicking toggles a cell, only while paused
        if !self.driver.is_running() && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - start_pos;
                if offset.x >= 0.0 && offset.y >= 0.0 {
                    let col = (offset.x / pitch) as usize;
                    let row = (offset.y / pitch) as usize;
                    self.driver.toggle_cell(row, col);
                }
            }
        }
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let grid = self.driver.grid();
        let total = grid.rows() * grid.cols();
        let live_cells = grid.live_count();
        let population = if total == 0 { 0.0 } else { live_cells as f32 / total as f32 * 100.0 };

        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live_cells}"));
            ui.label(format!("Dead cells: {}", total - live_cells));
            ui.label(format!("Population: {population:.1}%"));
            if self.driver.is_settled() {
                ui.label(format!(
                    "Settled: generation repeated within the last {} generations",
                    self.driver.history_window()
                ));
            }
        });

        if let Some(message) = self.driver.last_error() {
            ui.colored_label(Color32::RED, format!("Halted: {message}"));
        }
    }
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.driver.is_running() {
            self.tick();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.separator();
            ui.label("Click cells to toggle them alive/dead while paused.");
            ui.separator();
            self.board(ui);
            ui.separator();
            self.statistics(ui);
        });

        // Keep ticking while running
        if self.driver.is_running() {
            ctx.request_repaint_after(Duration::from_millis(10).min(self.driver.interval()));
        }
    }
}

/// Opens the window and runs until it is closed.
pub fn run(driver: Driver, config: &AppConfig) -> Result<()> {
    let app = GameOfLife::new(driver, config)?;

    let pitch = config.display.cell_size + 0.5;
    let width = (pitch * app.driver.grid().cols() as f32 + 40.0).max(800.0);
    let height = pitch * app.driver.grid().rows() as f32 + 220.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native("Conway's Game of Life", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("window closed with error: {e}"))
}
