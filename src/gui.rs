//! Single-label demo window (feature `gui`)

use anyhow::{anyhow, Result};
use eframe::egui;

struct HelloApp {
    label: String,
}

impl eframe::App for HelloApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(&self.label);
            });
        });
    }
}

/// Open one window showing `label`; returns when the window is closed.
pub fn run_hello_window(label: &str) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([320.0, 120.0])
            .with_title("utilkit"),
        ..Default::default()
    };

    let label = label.to_string();
    eframe::run_native(
        "utilkit",
        native_options,
        Box::new(move |_cc| Ok(Box::new(HelloApp { label }))),
    )
    .map_err(|e| anyhow!("Window failed: {}", e))
}
