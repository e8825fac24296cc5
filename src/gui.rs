// LootSleuth - gui.rs
//
// Top-level eframe::App for the chart viewer window.
// The window is a passive display: it renders one precomputed layout and
// returns control to `main` when the user closes it.

use crate::core::chart::ChartLayout;
use crate::ui;

/// Viewer for one loot chart.
pub struct LootChartApp {
    layout: ChartLayout,
}

impl LootChartApp {
    pub fn new(layout: ChartLayout) -> Self {
        Self { layout }
    }
}

impl eframe::App for LootChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::chart::render(ui, &self.layout);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn show_chart(layout: ChartLayout) -> Result<(), eframe::Error> {
    use crate::util::constants;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{} - {}",
                constants::APP_NAME,
                constants::APP_VERSION,
                layout.title
            ))
            .with_inner_size(constants::CHART_WINDOW_SIZE)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    tracing::info!(bars = layout.items.len(), "Opening chart viewer");

    eframe::run_native(
        constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(LootChartApp::new(layout)))),
    )
}
