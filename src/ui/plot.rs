use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use crate::color::{variable_color, TemperatureScale};
use crate::config::DISPLAY_DATE_FORMAT;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;
const SCATTER_BINS: usize = 8;

// ---------------------------------------------------------------------------
// Central panel – three stacked charts
// ---------------------------------------------------------------------------

/// Render the time series, annual mean and correlation charts.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.dataset().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Sin observaciones cargadas");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(format!("Evolución de {}", state.variable));
            time_series_plot(ui, state);
            ui.add_space(12.0);

            ui.strong("Temperatura media anual");
            annual_mean_plot(ui, state);
            ui.add_space(12.0);

            ui.strong("Correlación entre Temperatura Mínima y Humedad Máxima");
            correlation_plot(ui, state);
        });
}

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn time_series_plot(ui: &mut Ui, state: &AppState) {
    let points: PlotPoints = state
        .charts
        .time_series
        .iter()
        .map(|o| [date_to_x(o.date), o.value])
        .collect();

    let line = Line::new(points)
        .name(state.variable.label())
        .color(variable_color(state.variable))
        .width(1.5);

    Plot::new("time_series_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Fecha")
        .y_axis_label("Valor")
        .x_axis_formatter(|mark: GridMark, _range| x_to_label(mark.value))
        .label_formatter(|name, value: &PlotPoint| {
            format!("{name}\n{}: {:.2}", x_to_label(value.x), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| plot_ui.line(line));
}

fn annual_mean_plot(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .charts
        .annual_means
        .iter()
        .map(|row| {
            Bar::new(row.year as f64, row.mean_avg)
                .width(0.6)
                .name(format!(
                    "{}: mín {:.1}, máx {:.1}",
                    row.year, row.mean_min, row.mean_max
                ))
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("Media de mínima y máxima")
        .color(Color32::from_rgb(230, 126, 34));

    Plot::new("annual_mean_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Año")
        .y_axis_label("Temperatura media")
        .x_axis_formatter(|mark: GridMark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{}", mark.value as i32)
            } else {
                String::new()
            }
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn correlation_plot(ui: &mut Ui, state: &AppState) {
    let pairs = &state.charts.correlation;
    let Some(scale) = TemperatureScale::from_values(pairs.iter().map(|p| p.temperature), SCATTER_BINS)
    else {
        ui.label("Sin fechas comunes en el rango seleccionado.");
        return;
    };

    // One point series per colour bin so each bin gets its own legend entry.
    let mut binned: Vec<Vec<[f64; 2]>> = vec![Vec::new(); scale.bins()];
    for p in pairs {
        binned[scale.bin_of(p.temperature)].push([p.temperature, p.humidity]);
    }

    Plot::new("correlation_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Temperatura Mínima")
        .y_axis_label("Humedad Máxima")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (bin, points) in binned.into_iter().enumerate() {
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(points)
                        .name(format!("≥ {:.1}", scale.bin_start(bin)))
                        .color(scale.bin_color(bin))
                        .radius(3.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips() {
        let d = NaiveDate::from_ymd_opt(2019, 7, 14).unwrap();
        assert_eq!(x_to_label(date_to_x(d)), "2019-07-14");
        assert_eq!(x_to_label(date_to_x(d) + 0.3), "2019-07-14");
    }
}
