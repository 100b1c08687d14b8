// 🚚 Orchestrator
// Load the source once, run it through each table builder and write every
// result next to the source file.

use crate::builders::{CampaignBuilder, ClientBuilder, EconomicsBuilder, TableBuilder};
use crate::config::{DATA_DIR, SOURCE_FILE};
use crate::table::{load_csv, Table};
use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// WrittenTable - what one output file ended up holding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub name: &'static str,
    pub path: PathBuf,
    pub rows_read: usize,
    pub rows_written: usize,
    /// SHA-256 of the written bytes, hex encoded
    pub digest: String,
}

impl WrittenTable {
    /// Line printed once the file exists
    pub fn confirmation(&self) -> String {
        format!("{} file was created at {}.", self.name, self.path.display())
    }
}

/// Run the pipeline on the fixed data directory
pub fn run<F>(on_written: F) -> Result<Vec<WrittenTable>>
where
    F: FnMut(&WrittenTable),
{
    run_in(Path::new(DATA_DIR), on_written)
}

/// Run the pipeline on `dir`: read `bank_marketing.csv`, write the three tables.
///
/// `on_written` fires right after each file lands, so a later failure still
/// leaves the earlier files (and their notifications) behind.
pub fn run_in<F>(dir: &Path, mut on_written: F) -> Result<Vec<WrittenTable>>
where
    F: FnMut(&WrittenTable),
{
    let source_path = dir.join(SOURCE_FILE);
    let source = load_csv(&source_path)?;
    info!(
        path = %source_path.display(),
        rows = source.height(),
        columns = source.width(),
        "source loaded"
    );

    let mut written = Vec::with_capacity(3);

    let table = write_table(&ClientBuilder, &source, dir)?;
    on_written(&table);
    written.push(table);

    let table = write_table(&CampaignBuilder, &source, dir)?;
    on_written(&table);
    written.push(table);

    let table = write_table(&EconomicsBuilder, &source, dir)?;
    on_written(&table);
    written.push(table);

    Ok(written)
}

/// Build one table and overwrite its output file in `dir`
pub fn write_table<B: TableBuilder>(builder: &B, source: &Table, dir: &Path) -> Result<WrittenTable> {
    let spec = builder.spec();
    let (table, records) = builder.records(source)?;

    let bytes = encode_csv(&table.header_record(), &records)
        .with_context(|| format!("Failed to encode {} table", spec.name))?;

    let path = dir.join(spec.file_name);
    fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    let written = WrittenTable {
        name: spec.name,
        path,
        rows_read: source.height(),
        rows_written: records.len(),
        digest: sha256_hex(&bytes),
    };

    info!(
        table = written.name,
        path = %written.path.display(),
        rows = written.rows_written,
        digest = %written.digest,
        "table written"
    );
    Ok(written)
}

/// Header row followed by one serialized record per row.
/// The header is written explicitly so an empty table still gets one.
pub fn encode_csv<T: Serialize>(header: &StringRecord, records: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV buffer: {}", e.error()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
