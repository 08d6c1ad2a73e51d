use crate::error::{CliError, Result};
use optiscope::core::io::table::{ImportedTable, import_table};
use std::path::Path;
use tracing::{debug, info};

/// Reads a CSV file whose first row holds column labels and every further row
/// holds one numeric value per column. Empty cells are read as NaN.
pub fn read_table(path: &Path, delimiter: u8) -> Result<ImportedTable> {
    let parse_error = |source: anyhow::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| parse_error(e.into()))?;

    let labels: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(e.into()))?
        .iter()
        .map(str::to_string)
        .collect();
    if labels.is_empty() {
        return Err(parse_error(anyhow::anyhow!("the header row is empty")));
    }
    debug!(columns = labels.len(), "Read table header.");

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| parse_error(e.into()))?;
        let values = record
            .iter()
            .zip(&labels)
            .map(|(field, label)| parse_cell(field, row, label))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(parse_error)?;
        rows.push(values);
    }

    let table = import_table(&labels, rows)?;
    info!(
        rows = table.list.len(),
        columns = table.columns.len(),
        "Loaded table from {:?}",
        path
    );
    Ok(table)
}

fn parse_cell(field: &str, row: usize, label: &str) -> anyhow::Result<f64> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|e| {
        anyhow::anyhow!(
            "data row {}, column '{}': invalid number '{}' ({})",
            row + 1,
            label,
            field,
            e
        )
    })
}
