use crate::row::MissingField;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// One benchmark result file, as produced by a benchmark run with JSON
/// output enabled.
#[derive(Debug, Clone)]
pub struct BenchmarkFile {
    path: PathBuf,
    benchmarks: Vec<BenchmarkRecord>,
}

// Only the `benchmarks` field matters; `context` and anything else is ignored.
#[derive(Deserialize)]
struct Document {
    benchmarks: Vec<BenchmarkRecord>,
}

impl BenchmarkFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        // open the file in read-only
        let file = File::open(path)
            .wrap_err_with(|| format!("open {}", path.display()))?;
        // create a buf reader
        let buf = BufReader::new(file);
        Self::from_reader(path, buf)
    }

    pub fn from_reader<R: Read>(
        path: impl Into<PathBuf>,
        reader: R,
    ) -> Result<Self, Report> {
        let path = path.into();
        let document: Document = serde_json::from_reader(reader)
            .wrap_err_with(|| format!("parse {}", path.display()))?;
        Ok(Self {
            path,
            benchmarks: document.benchmarks,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn benchmarks(&self) -> &[BenchmarkRecord] {
        &self.benchmarks
    }
}

/// A single benchmark entry. Fields are kept loosely typed since which ones
/// are present depends on how the benchmark was run (aggregates, threads,
/// user counters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkRecord {
    fields: Map<String, Value>,
}

impl BenchmarkRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Whether `field` is present at all (a `null` value counts as present).
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn require(&self, field: &'static str) -> Result<&Value, MissingField> {
        self.get(field).ok_or(MissingField(field))
    }

    /// The benchmark name, e.g. `cube/build/0/real_time`. A non-string name
    /// is as good as none.
    pub fn name(&self) -> Result<&str, MissingField> {
        self.require(NAME)?.as_str().ok_or(MissingField(NAME))
    }

    pub fn run_type(&self) -> Option<String> {
        match self.get(RUN_TYPE)? {
            Value::Null => None,
            Value::String(run_type) => Some(run_type.clone()),
            other => Some(other.to_string()),
        }
    }
}

pub const NAME: &str = "name";
pub const RUN_TYPE: &str = "run_type";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> BenchmarkRecord {
        serde_json::from_value(value).expect("record should deserialize")
    }

    #[test]
    fn parse_document() {
        let input = r#"{
            "context": {"num_cpus": 8},
            "benchmarks": [
                {"name": "cube/build/0/real_time", "real_time": 100},
                {"name": "sphere/build", "run_type": "aggregate"}
            ]
        }"#;
        let path = "impl=foo+procs=4+ext=.json";
        let file = BenchmarkFile::from_reader(path, input.as_bytes())
            .expect("document should parse");
        assert_eq!(file.path(), Path::new(path));
        assert_eq!(file.benchmarks().len(), 2);
        assert_eq!(file.benchmarks()[0].name(), Ok("cube/build/0/real_time"));
        assert_eq!(file.benchmarks()[1].run_type(), Some("aggregate".into()));
    }

    #[test]
    fn parse_rejects_bad_documents() {
        let inputs = [
            "not json",
            "{}",
            r#"{"benchmarks": 3}"#,
            r#"{"benchmarks": [1]}"#,
        ];
        for input in inputs {
            assert!(BenchmarkFile::from_reader("x", input.as_bytes()).is_err());
        }
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("impl=a+procs=1+ext=.json");
        let err = BenchmarkFile::load(path).unwrap_err();
        assert!(format!("{:?}", err).contains("open"));
    }

    #[test]
    fn field_access() {
        let r = record(json!({"name": 7, "run_type": null, "threads": null}));
        assert!(r.has("threads"));
        assert!(!r.has("Latency"));
        assert_eq!(r.name(), Err(MissingField(NAME)));
        assert_eq!(r.run_type(), None);
        assert_eq!(r.require("Latency"), Err(MissingField("Latency")));

        let r = record(json!({"name": "a", "run_type": 2}));
        assert_eq!(r.run_type(), Some("2".to_string()));
    }
}
