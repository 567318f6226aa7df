#![deny(rust_2018_idioms)]

// This module contains the definition of `BenchmarkFile` and
// `BenchmarkRecord`.
pub mod bench;

// This module contains the definition of `ConsolidateConfig`.
pub mod config;

// This module contains the definition of `ResultsDB`.
pub mod db;

// This module contains the definition of `GroupKey` and `TimeType`.
pub mod key;

// This module contains the definition of `Row` and `Origin`.
pub mod row;

// This module contains the functions writing tables as CSV.
pub mod writer;

// Re-exports.
pub use bench::{BenchmarkFile, BenchmarkRecord};
pub use config::ConsolidateConfig;
pub use db::ResultsDB;
pub use key::{GroupKey, TimeType};
pub use row::{MissingField, Origin, Row, COLUMNS};

use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// input files that contributed records
    pub files: usize,
    /// input files left out because they could not be loaded
    pub malformed: usize,
    pub consolidated: usize,
    pub skipped: usize,
    /// tables written, in write order
    pub tables: Vec<PathBuf>,
}

/// Loads every file in `paths`, groups their records and writes one table
/// per group. Every input is loaded before any table is written.
pub fn consolidate<P>(
    paths: &[P],
    config: &ConsolidateConfig,
) -> Result<Summary, Report>
where
    P: AsRef<Path>,
{
    let mut files = Vec::with_capacity(paths.len());
    let mut malformed = 0;
    for path in paths {
        let path = path.as_ref();
        tracing::info!("processing {} ...", path.display());

        // a file whose name can't be decoded is always fatal
        let origin = Origin::from_path(path)
            .wrap_err_with(|| format!("decode file name {}", path.display()))?;

        match BenchmarkFile::load(path) {
            Ok(file) => files.push((origin, file)),
            Err(e) if config.skip_malformed() => {
                tracing::warn!("skipping {}: {:?}", path.display(), e);
                malformed += 1;
            }
            Err(e) => return Err(e.wrap_err("load benchmark file")),
        }
    }

    let mut db = ResultsDB::new();
    for (origin, file) in files.iter() {
        db.add_file(file, origin);
    }

    let tables = writer::write_all(&db, config.output_dir())?;
    Ok(Summary {
        files: files.len(),
        malformed,
        consolidated: db.consolidated(),
        skipped: db.skipped(),
        tables,
    })
}
