//! CSV encoding of merged records

use std::path::Path;

use common::error::{Error, Result};
use common::MergedRecord;
use csv::{Terminator, WriterBuilder};
use tracing::info;

/// Encode `records` as CSV: header row from the record's field names, then
/// one line per record. Fields containing a comma, quote or newline are
/// quoted with inner quotes doubled.
pub fn to_csv_bytes(records: &[MergedRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| Error::Csv(format!("Failed to encode {}: {}", record.inst_id, e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Csv(format!("Failed to flush CSV buffer: {}", e)))
}

/// Write `records` to `path`. Nothing is written for an empty set; returns
/// whether a file was produced.
pub async fn write_csv(path: &Path, records: &[MergedRecord]) -> Result<bool> {
    if records.is_empty() {
        info!("No data to save for {}", path.display());
        return Ok(false);
    }

    let bytes = to_csv_bytes(records)?;
    tokio::fs::write(path, bytes).await?;

    info!("Saved {} records to {}", records.len(), path.display());
    Ok(true)
}
