// LootSleuth - ui/chart.rs
//
// Stacked loot bar chart drawn with egui_plot.
//
// egui_plot cannot rotate axis tick labels, so the x axis is hidden and the
// item names are painted below the plot at 45 degrees, right-aligned to their
// tick (the end of each name touches the tick), followed by the axis title.

use crate::core::chart::ChartLayout;
use crate::ui::theme;
use crate::util::constants;
use egui::epaint::TextShape;
use egui::{Align2, FontId, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Text};

/// Render the chart (title, plot, rotated item labels) into `ui`.
pub fn render(ui: &mut Ui, layout: &ChartLayout) {
    ui.vertical_centered(|ui| {
        ui.heading(&layout.title);
    });

    let angle = -constants::CHART_TICK_LABEL_ROTATION_DEG.to_radians();
    let (sin, cos) = (angle.sin().abs(), angle.cos());
    let text_colour = ui.visuals().text_color();
    let tick_font = FontId::proportional(theme::TICK_LABEL_FONT_SIZE);
    let axis_font = FontId::proportional(theme::AXIS_LABEL_FONT_SIZE);

    let galleys: Vec<_> = layout
        .items
        .iter()
        .map(|item| {
            ui.painter()
                .layout_no_wrap(item.clone(), tick_font.clone(), text_colour)
        })
        .collect();
    let longest = galleys.iter().map(|g| g.size().x).fold(0.0_f32, f32::max);
    let line_height = ui.fonts(|f| f.row_height(&axis_font));

    let available = ui.available_height();
    let band_height = (longest * sin + line_height * 2.0 + theme::TICK_LABEL_GAP)
        .min(available * theme::MAX_TICK_BAND_FRACTION);
    let plot_height = (available - band_height).max(theme::MIN_PLOT_HEIGHT);

    let bar_count = layout.items.len() as f64;
    let half = layout.bar_width / 2.0;
    let response = Plot::new("loot_chart")
        .height(plot_height)
        .legend(Legend::default())
        .show_axes([false, true])
        .y_axis_label(layout.y_label.clone())
        .include_x(-half - 0.1)
        .include_x(bar_count - 1.0 + half + 0.1)
        .include_y(0.0)
        .include_y(layout.max_total() * 1.05)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{:.0}", value.y)
            }
        })
        .show(ui, |plot_ui| {
            for series in &layout.series {
                let bars: Vec<Bar> = series
                    .values
                    .iter()
                    .zip(series.bases.iter())
                    .enumerate()
                    .map(|(x, (&value, &base))| {
                        let name = layout.items.get(x).cloned().unwrap_or_default();
                        Bar::new(x as f64, value)
                            .base_offset(base)
                            .width(layout.bar_width)
                            .name(name)
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(series.rarity.label())
                        .color(theme::rarity_colour(series.rarity)),
                );
            }

            for label in &layout.labels {
                plot_ui.text(Text::new(
                    PlotPoint::new(label.x, label.y),
                    RichText::new(&label.text)
                        .size(theme::SEGMENT_LABEL_FONT_SIZE)
                        .color(theme::SEGMENT_LABEL_COLOUR),
                ));
            }
        });

    // Rotated tick labels in a band directly under the plot frame.
    let transform = response.transform;
    let frame = *transform.frame();
    let (band, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), band_height),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(band.union(frame));
    let y_min = transform.bounds().min()[1];

    for (x, galley) in galleys.into_iter().enumerate() {
        let tick = transform.position_from_point(&PlotPoint::new(x as f64, y_min));
        if !frame.x_range().contains(tick.x) {
            continue;
        }
        let width = galley.size().x;
        let height = galley.size().y;
        // Top-left corner such that the rotated text ends at the tick.
        let pos = egui::pos2(
            tick.x - width * cos - height * sin * 0.5,
            band.top() + theme::TICK_LABEL_GAP + width * sin,
        );
        painter.add(TextShape::new(pos, galley, text_colour).with_angle(angle));
    }

    painter.text(
        egui::pos2(frame.center().x, band.bottom()),
        Align2::CENTER_BOTTOM,
        &layout.x_label,
        axis_font,
        text_colour,
    );
}
