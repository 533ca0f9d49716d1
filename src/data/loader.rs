use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{info, warn};

use crate::config::{SourceFile, DATE_COLUMN, DELIMITER, SOURCES, VALUE_COLUMN, VARIABLE_COLUMN};

use super::error::DataError;
use super::model::Dataset;
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Raw tables
// ---------------------------------------------------------------------------

/// Positions of the required columns within a source's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumns {
    pub date: usize,
    pub value: usize,
    pub variable: usize,
}

/// One source file as read from disk: trimmed headers plus untyped records.
///
/// Records may be ragged; their width is checked during normalization.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub source_name: String,
    pub headers: Vec<String>,
    pub columns: RequiredColumns,
    pub records: Vec<StringRecord>,
}

/// The successfully loaded tables, concatenated by column name.
#[derive(Debug, Clone)]
pub struct CombinedTable {
    /// Union of the column names of every table, in first-seen order.
    pub columns: Vec<String>,
    pub tables: Vec<RawTable>,
}

/// Outcome of loading the five sources.
#[derive(Debug)]
pub struct LoadReport {
    pub dataset: Dataset,
    /// Names of the sources that made it into the dataset.
    pub loaded: Vec<String>,
    /// Per-source defects that caused a source to be skipped.
    pub defects: Vec<DataError>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the five fixed sources from `dir`.
pub fn load_dir(dir: &Path) -> Result<LoadReport, DataError> {
    load_sources(dir, &SOURCES)
}

/// Load `sources` from `dir`, skipping (and reporting) any source that can't
/// be read or lacks a required column.
///
/// Errors only when nothing usable is left after concatenation, or when a row
/// fails to normalize: a single short row, malformed date or malformed value
/// aborts the whole load.
pub fn load_sources(dir: &Path, sources: &[SourceFile]) -> Result<LoadReport, DataError> {
    let mut tables = Vec::with_capacity(sources.len());
    let mut defects = Vec::new();

    for source in sources {
        match load_source(dir, source) {
            Ok(table) => {
                info!(
                    "Loaded {} ({} rows) from {}",
                    source.name,
                    table.records.len(),
                    source.file_name
                );
                tables.push(table);
            }
            Err(e) => {
                warn!("Skipping source {}: {e}", source.name);
                defects.push(e);
            }
        }
    }

    let loaded = tables.iter().map(|t| t.source_name.clone()).collect();
    let combined = concat(tables)?;
    let dataset = normalize(&combined)?;

    Ok(LoadReport {
        dataset,
        loaded,
        defects,
    })
}

fn load_source(dir: &Path, source: &SourceFile) -> Result<RawTable, DataError> {
    let path = dir.join(source.file_name);
    let file = File::open(&path).map_err(|e| DataError::FileLoad {
        source_name: source.name.to_string(),
        path: path.clone(),
        source: e,
    })?;
    read_table(source.name, file)
}

// ---------------------------------------------------------------------------
// Delimited reader
// ---------------------------------------------------------------------------

/// Read one `;`-separated UTF-8 table and locate its required columns.
///
/// Rows with a missing or extra field are kept as they are so normalization
/// can reject them with their row number.
pub fn read_table<R: Read>(source_name: &str, reader: R) -> Result<RawTable, DataError> {
    let csv_err = |e: csv::Error| DataError::Csv {
        source_name: source_name.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    let position = |column: &str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataError::MissingColumn {
                source_name: source_name.to_string(),
                column: column.to_string(),
                found: headers.clone(),
            })
    };
    let columns = RequiredColumns {
        date: position(DATE_COLUMN)?,
        value: position(VALUE_COLUMN)?,
        variable: position(VARIABLE_COLUMN)?,
    };

    Ok(RawTable {
        source_name: source_name.to_string(),
        headers,
        columns,
        records,
    })
}

// ---------------------------------------------------------------------------
// Concatenation
// ---------------------------------------------------------------------------

/// Stack the tables by column name. Fails if the union of their columns lacks
/// a required one, which happens when no source could be loaded at all.
pub fn concat(tables: Vec<RawTable>) -> Result<CombinedTable, DataError> {
    let mut columns: Vec<String> = Vec::new();
    for table in &tables {
        for header in &table.headers {
            if !columns.contains(header) {
                columns.push(header.clone());
            }
        }
    }

    for column in [DATE_COLUMN, VALUE_COLUMN, VARIABLE_COLUMN] {
        if !columns.iter().any(|c| c == column) {
            return Err(DataError::Schema {
                column: column.to_string(),
            });
        }
    }

    Ok(CombinedTable { columns, tables })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "Fecha ; Valor;Nombre de la variable ";

    fn write_source(dir: &Path, file_name: &str, body: &str) {
        fs::write(dir.join(file_name), body).unwrap();
    }

    fn write_all_sources(dir: &Path) {
        for (source, label) in SOURCES.iter().zip([
            "Humedad Mínima",
            "Humedad Máxima",
            "Temperatura Mínima",
            "Temperatura Máxima",
            "Lluvia máxima",
        ]) {
            let body = format!("{HEADER}\n01-01-2020;10,5;{label}\n02-01-2020;11;{label}\n");
            write_source(dir, source.file_name, &body);
        }
    }

    #[test]
    fn read_table_trims_headers() {
        let body = format!("{HEADER}\n01-01-2020;1,5;Lluvia máxima\n");
        let table = read_table("Lluvia", body.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Fecha", "Valor", "Nombre de la variable"]);
        assert_eq!(table.records.len(), 1);
    }

    #[test]
    fn read_table_strips_byte_order_mark() {
        let body = "\u{feff}Fecha;Valor;Nombre de la variable\n01-01-2020;1;Lluvia máxima\n";
        let table = read_table("Lluvia", body.as_bytes()).unwrap();
        assert_eq!(table.headers[0], "Fecha");
        assert_eq!(table.columns.date, 0);
    }

    #[test]
    fn read_table_locates_required_columns() {
        let body = "Estacion;Valor;Fecha;Nombre de la variable\n";
        let table = read_table("Lluvia", body.as_bytes()).unwrap();
        assert_eq!(
            table.columns,
            RequiredColumns { date: 2, value: 1, variable: 3 }
        );
    }

    #[test]
    fn read_table_keeps_ragged_rows() {
        let body = "Fecha;Valor;Nombre de la variable\n02-01-2020;Humedad Máxima\n";
        let table = read_table("HumedadMaxima", body.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].len(), 2);
    }

    #[test]
    fn read_table_reports_missing_date_column() {
        let body = "Dia;Valor;Nombre de la variable\n01-01-2020;1;Lluvia máxima\n";
        let err = read_table("TemperaturaMinima", body.as_bytes()).unwrap_err();
        match err {
            DataError::MissingColumn { source_name, column, found } => {
                assert_eq!(source_name, "TemperaturaMinima");
                assert_eq!(column, "Fecha");
                assert_eq!(found, vec!["Dia", "Valor", "Nombre de la variable"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn concat_of_nothing_is_a_schema_error() {
        let err = concat(Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::Schema { column } if column == "Fecha"));
    }

    #[test]
    fn concat_unions_columns_in_first_seen_order() {
        let a = read_table("A", "Fecha;Valor;Nombre de la variable\n".as_bytes()).unwrap();
        let b = read_table("B", "Estacion;Fecha;Valor;Nombre de la variable\n".as_bytes()).unwrap();
        let combined = concat(vec![a, b]).unwrap();
        assert_eq!(
            combined.columns,
            vec!["Fecha", "Valor", "Nombre de la variable", "Estacion"]
        );
        assert_eq!(combined.tables.len(), 2);
    }

    #[test]
    fn loads_all_five_sources() {
        let dir = tempfile::tempdir().unwrap();
        write_all_sources(dir.path());

        let report = load_dir(dir.path()).unwrap();
        assert!(report.defects.is_empty());
        assert_eq!(report.loaded.len(), 5);
        assert_eq!(report.dataset.len(), 10);
        assert_eq!(report.dataset.variables().len(), 5);
    }

    #[test]
    fn missing_date_column_skips_only_that_source() {
        let dir = tempfile::tempdir().unwrap();
        write_all_sources(dir.path());
        write_source(
            dir.path(),
            "TemperaturaMinima.txt",
            "Dia;Valor;Nombre de la variable\n01-01-2020;3,0;Temperatura Mínima\n",
        );

        let report = load_dir(dir.path()).unwrap();
        assert_eq!(report.defects.len(), 1);
        assert!(matches!(
            &report.defects[0],
            DataError::MissingColumn { source_name, column, .. }
                if source_name == "TemperaturaMinima" && column == "Fecha"
        ));
        assert_eq!(report.loaded.len(), 4);
        assert!(!report.loaded.iter().any(|s| s == "TemperaturaMinima"));
        assert_eq!(report.dataset.len(), 8);
        assert!(!report.dataset.variables().contains("Temperatura Mínima"));
    }

    #[test]
    fn missing_file_is_a_file_load_defect() {
        let dir = tempfile::tempdir().unwrap();
        write_all_sources(dir.path());
        fs::remove_file(dir.path().join("lluvia.txt")).unwrap();

        let report = load_dir(dir.path()).unwrap();
        assert_eq!(report.defects.len(), 1);
        assert!(matches!(&report.defects[0], DataError::FileLoad { source_name, .. } if source_name == "Lluvia"));
        assert_eq!(report.dataset.len(), 8);
    }

    #[test]
    fn empty_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Schema { .. }));
    }

    #[test]
    fn short_row_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_all_sources(dir.path());
        write_source(
            dir.path(),
            "HumedadMaxima.txt",
            "Fecha;Valor;Nombre de la variable\n01-01-2020;80;Humedad Máxima\n02-01-2020;Humedad Máxima\n",
        );

        let err = load_dir(dir.path()).unwrap_err();
        match err {
            DataError::MalformedRow { source_name, row, expected, found } => {
                assert_eq!(source_name, "HumedadMaxima");
                assert_eq!(row, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_row_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_all_sources(dir.path());
        write_source(
            dir.path(),
            "HumedadMaxima.txt",
            "Fecha;Valor;Nombre de la variable\n01-01-2020;80;Humedad Máxima\n2020/01/02;81;Humedad Máxima\n",
        );

        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DataError::DateParse { source_name, row, .. } if source_name == "HumedadMaxima" && row == 2
        ));
    }
}
