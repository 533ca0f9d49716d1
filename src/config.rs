use std::path::PathBuf;

use crate::data::model::Variable;

// ---------------------------------------------------------------------------
// Source files
// ---------------------------------------------------------------------------

/// One of the five observation files read at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFile {
    /// Name used in logs and error messages.
    pub name: &'static str,
    /// File name relative to the data directory.
    pub file_name: &'static str,
}

/// The fixed set of sources, in concatenation order.
pub const SOURCES: [SourceFile; 5] = [
    SourceFile { name: "HumedadMinima", file_name: "HumedadMinima.txt" },
    SourceFile { name: "HumedadMaxima", file_name: "HumedadMaxima.txt" },
    SourceFile { name: "TemperaturaMinima", file_name: "TemperaturaMinima.txt" },
    SourceFile { name: "TemperaturaMaxima", file_name: "TemperaturaMaxima.txt" },
    SourceFile { name: "Lluvia", file_name: "lluvia.txt" },
];

/// Field separator of every source file.
pub const DELIMITER: u8 = b';';

pub const DATE_COLUMN: &str = "Fecha";
pub const VALUE_COLUMN: &str = "Valor";
pub const VARIABLE_COLUMN: &str = "Nombre de la variable";

/// Date pattern used inside the source files.
pub const SOURCE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Date pattern for everything user facing (pickers, axes, query boundaries).
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding the five source files.
    pub data_dir: PathBuf,
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Variable selected in the dropdown on startup.
    pub default_variable: Variable,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            title: "Dashboard Meteorológico de Torla (2014-2024)".to_string(),
            inner_size: [1200.0, 900.0],
            min_inner_size: [700.0, 500.0],
            default_variable: Variable::TemperaturaMinima,
        }
    }
}
