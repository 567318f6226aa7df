use crate::bench::{BenchmarkFile, BenchmarkRecord};
use crate::key::GroupKey;
use crate::row::{MissingField, Origin, Row};
use indexmap::IndexMap;

/// Rows of every loaded benchmark file, grouped by `GroupKey`. Groups are
/// kept in the order their key was first seen and rows in the order they
/// were added.
#[derive(Debug, Default)]
pub struct ResultsDB {
    tables: IndexMap<GroupKey, Vec<Row>>,
    consolidated: usize,
    skipped: usize,
}

impl ResultsDB {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every record in `file`; records missing a required field are
    /// logged and skipped.
    pub fn add_file(&mut self, file: &BenchmarkFile, origin: &Origin) {
        for record in file.benchmarks() {
            if let Err(MissingField(field)) = self.add_record(record, origin) {
                let record = serde_json::to_string(record)
                    .unwrap_or_else(|e| format!("<unprintable: {}>", e));
                tracing::warn!(
                    "skipping record of {}: missing field {:?}: {}",
                    file.path().display(),
                    field,
                    record
                );
            }
        }
    }

    pub fn add_record(
        &mut self,
        record: &BenchmarkRecord,
        origin: &Origin,
    ) -> Result<(), MissingField> {
        // build both before touching the tables so that no partial row is kept
        let built = GroupKey::from_record(record)
            .and_then(|key| Row::build(record, origin).map(|row| (key, row)));
        match built {
            Ok((key, row)) => {
                self.tables.entry(key).or_default().push(row);
                self.consolidated += 1;
                Ok(())
            }
            Err(e) => {
                self.skipped += 1;
                Err(e)
            }
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = (&GroupKey, &[Row])> {
        self.tables.iter().map(|(key, rows)| (key, rows.as_slice()))
    }

    pub fn rows(&self, key: &GroupKey) -> Option<&[Row]> {
        self.tables.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Number of records that made it into a table.
    pub fn consolidated(&self) -> usize {
        self.consolidated
    }

    /// Number of records dropped for lacking a required field.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
