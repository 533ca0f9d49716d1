use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::config::DISPLAY_DATE_FORMAT;
use crate::data::model::Variable;
use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the variable dropdown, the date range pickers and load defects.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selección");
    ui.separator();

    ui.strong("Selecciona una variable:");
    let mut variable = state.variable;
    egui::ComboBox::from_id_salt("variable_dropdown")
        .selected_text(variable.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for v in Variable::ALL {
                let text = if state.available.contains(&v) {
                    RichText::new(v.label())
                } else {
                    RichText::new(format!("{} (sin datos)", v.label())).color(Color32::GRAY)
                };
                ui.selectable_value(&mut variable, v, text);
            }
        });
    state.set_variable(variable);

    ui.add_space(8.0);
    ui.strong("Rango de fechas");

    let mut start = state.start_date;
    let mut end = state.end_date;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Desde");
        ui.add(
            DatePickerButton::new(&mut start)
                .id_salt("start_date")
                .format(DISPLAY_DATE_FORMAT),
        );
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Hasta");
        ui.add(
            DatePickerButton::new(&mut end)
                .id_salt("end_date")
                .format(DISPLAY_DATE_FORMAT),
        );
    });
    if let Some((min, max)) = state.dataset().date_bounds() {
        if ui.small_button("Todo el periodo").clicked() {
            start = min;
            end = max;
        }
    }
    state.set_range(start, end);

    if state.range().is_empty() {
        ui.label(RichText::new("La fecha inicial es posterior a la final.").color(Color32::YELLOW));
    }

    ui.separator();
    ui.strong("Fuentes");
    ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for name in &state.loaded_sources {
                ui.label(format!("✔ {name}"));
            }
            for defect in &state.defects {
                ui.label(RichText::new(format!("⚠ {defect}")).color(Color32::YELLOW));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Exportar datos de los gráficos…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} observaciones, {} fuentes",
            state.dataset().len(),
            state.loaded_sources.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar datos de los gráficos")
        .add_filter("JSON", &["json"])
        .set_file_name("chart_data.json")
        .save_file();

    if let Some(path) = file {
        match export::write_json(&path, &state.charts) {
            Ok(()) => {
                log::info!("Exported chart data to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export chart data: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
