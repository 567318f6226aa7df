use crate::db::ResultsDB;
use crate::key::GroupKey;
use crate::row::{Row, COLUMNS};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a header line followed by one line per row.
pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> Result<(), Report> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(COLUMNS).wrap_err("write header")?;
    for row in rows {
        writer.write_record(row.cells()).wrap_err("write row")?;
    }
    writer.flush().wrap_err("flush table")?;
    Ok(())
}

/// Writes the table of `key` into `output_dir`, replacing any file of the
/// same name. Returns the path written.
pub fn write_table(
    output_dir: &Path,
    key: &GroupKey,
    rows: &[Row],
) -> Result<PathBuf, Report> {
    let path = output_dir.join(table_name(key)?);
    write_file(&path, rows)?;
    Ok(path)
}

/// Writes one table per group, in the order groups were first seen. Every
/// table name is computed before the first file is created, so a group that
/// can't be named fails the run without leaving other tables behind.
pub fn write_all(
    db: &ResultsDB,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, Report> {
    let tables = db
        .tables()
        .map(|(key, rows)| -> Result<_, Report> {
            Ok((output_dir.join(table_name(key)?), rows))
        })
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::create_dir_all(output_dir).wrap_err_with(|| {
        format!("create output directory {}", output_dir.display())
    })?;

    let mut written = Vec::with_capacity(tables.len());
    for (path, rows) in tables {
        write_file(&path, rows)?;
        tracing::info!("wrote {} ({} rows)", path.display(), rows.len());
        written.push(path);
    }
    Ok(written)
}

fn table_name(key: &GroupKey) -> Result<String, Report> {
    key.file_name()
        .wrap_err_with(|| format!("name table for {}", key))
}

fn write_file(path: &Path, rows: &[Row]) -> Result<(), Report> {
    // if the file does not exist it will be created, otherwise truncated
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("create {}", path.display()))?;
    let buf = std::io::BufWriter::new(file);
    write_rows(buf, rows).wrap_err_with(|| format!("write {}", path.display()))
}
