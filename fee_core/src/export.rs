//! CSV export of a projection's monthly breakdown.

use crate::{CalculationResult, MonthNumber, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    month: u8,
    visits: u64,
    medications: u64,
    total: u64,
}

fn rows(result: &CalculationResult) -> impl Iterator<Item = CsvRow> + '_ {
    MonthNumber::all().map(move |month| {
        let m = month.index();
        CsvRow {
            month: month.get(),
            visits: result.breakdown.visits[m],
            medications: result.breakdown.medications[m],
            total: result.monthly_totals[m],
        }
    })
}

/// Write the monthly breakdown to any writer, January first
pub fn write_breakdown<W: std::io::Write>(result: &CalculationResult, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows(result) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the monthly breakdown to a CSV file, replacing any existing file
pub fn write_breakdown_csv(result: &CalculationResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_breakdown(result, file)?;

    tracing::info!("Exported monthly breakdown to {:?}", path);
    Ok(())
}
