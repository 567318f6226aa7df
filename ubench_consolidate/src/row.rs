use crate::bench::BenchmarkRecord;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use ubench_keyname::{Keyname, KeynameError};

/// Column names, in output order.
pub const COLUMNS: [&str; 9] = [
    "Mesh",
    "Implementation",
    "Threads",
    "Processes",
    "Statistic",
    "Wall Nanoseconds",
    "CPU Nanoseconds",
    "Latency",
    "Lossiness",
];

// record fields read by `Row::build`
const THREADS: &str = "threads";
const BENCHMARK: &str = "benchmark";
const AGGREGATE_NAME: &str = "aggregate_name";
const REAL_TIME: &str = "real_time";
const CPU_TIME: &str = "cpu_time";
const LATENCY: &str = "Latency";
const LOSSINESS: &str = "Lossiness";

// file name keys
const IMPL: &str = "impl";
const PROCS: &str = "procs";

const DEFAULT_THREADS: u64 = 1;
const DEFAULT_STATISTIC: &str = "measurement";

/// A record lacks a field that has no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing field {0:?}")]
pub struct MissingField(pub &'static str);

/// What a benchmark file's name says about the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub path: PathBuf,
    pub implementation: String,
    pub processes: String,
}

impl Origin {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KeynameError> {
        let path = path.as_ref();
        let keyname = Keyname::unpack(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            implementation: keyname.require(IMPL)?.to_string(),
            processes: keyname.require(PROCS)?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub mesh: String,
    pub implementation: String,
    pub threads: Value,
    pub processes: String,
    pub statistic: Value,
    pub wall_nanoseconds: Value,
    pub cpu_nanoseconds: Value,
    pub latency: Value,
    pub lossiness: Value,
}

impl Row {
    /// Flattens `record` into a row; either every column is filled or the
    /// first field found missing is returned.
    pub fn build(
        record: &BenchmarkRecord,
        origin: &Origin,
    ) -> Result<Self, MissingField> {
        let mesh = record.name()?.split('/').next().unwrap_or_default();

        // the thread count is reported under `benchmark` whenever the record
        // has a `threads` field at all
        let threads = if record.has(THREADS) {
            record.require(BENCHMARK)?.clone()
        } else {
            Value::from(DEFAULT_THREADS)
        };

        let statistic = record
            .get(AGGREGATE_NAME)
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_STATISTIC));

        Ok(Self {
            mesh: mesh.to_string(),
            implementation: origin.implementation.clone(),
            threads,
            processes: origin.processes.clone(),
            statistic,
            wall_nanoseconds: record.require(REAL_TIME)?.clone(),
            cpu_nanoseconds: record.require(CPU_TIME)?.clone(),
            latency: record.require(LATENCY)?.clone(),
            lossiness: record.require(LOSSINESS)?.clone(),
        })
    }

    /// Cells as written to a table, in `COLUMNS` order.
    pub fn cells(&self) -> [String; 9] {
        [
            self.mesh.clone(),
            self.implementation.clone(),
            render(&self.threads),
            self.processes.clone(),
            render(&self.statistic),
            render(&self.wall_nanoseconds),
            render(&self.cpu_nanoseconds),
            render(&self.latency),
            render(&self.lossiness),
        ]
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn origin() -> Origin {
        Origin::from_path("out/impl=foo+procs=4+ext=.json").unwrap()
    }

    fn build(value: Value) -> Result<Row, MissingField> {
        let record: BenchmarkRecord = serde_json::from_value(value).unwrap();
        Row::build(&record, &origin())
    }

    fn full() -> Value {
        json!({
            "name": "cube/build/0/real_time",
            "real_time": 100,
            "cpu_time": 80,
            "Latency": 1.5,
            "Lossiness": 0.01,
            "run_type": "A",
        })
    }

    #[test]
    fn origin_from_path() {
        let origin = origin();
        assert_eq!(origin.implementation, "foo");
        assert_eq!(origin.processes, "4");
        assert_eq!(origin.path, Path::new("out/impl=foo+procs=4+ext=.json"));

        assert!(matches!(
            Origin::from_path("impl=foo+ext=.json"),
            Err(KeynameError::MissingKey { key, .. }) if key == "procs"
        ));
        assert!(Origin::from_path("bench.json").is_err());
    }

    #[test]
    fn build_with_defaults() {
        let row = build(full()).unwrap();
        assert_eq!(
            row.cells(),
            ["cube", "foo", "1", "4", "measurement", "100", "80", "1.5", "0.01"]
        );
    }

    #[test]
    fn build_with_optional_fields() {
        let mut value = full();
        value["aggregate_name"] = json!("median");
        value["threads"] = json!(8);
        value["benchmark"] = json!("cube/build");
        let row = build(value).unwrap();
        assert_eq!(row.statistic, json!("median"));
        // `benchmark` is read, not `threads`
        assert_eq!(row.threads, json!("cube/build"));
    }

    #[test]
    fn threads_without_benchmark_is_missing() {
        let mut value = full();
        value["threads"] = json!(8);
        assert_eq!(build(value), Err(MissingField("benchmark")));
    }

    #[test]
    fn required_fields() {
        for field in ["name", "real_time", "cpu_time", "Latency", "Lossiness"] {
            let mut value = full();
            value.as_object_mut().unwrap().remove(field);
            assert_eq!(build(value), Err(MissingField(field)), "{}", field);
        }
    }

    #[test]
    fn render_cells() {
        assert_eq!(render(&Value::Null), "");
        assert_eq!(render(&json!(true)), "true");
        assert_eq!(render(&json!("a,b")), "a,b");
        assert_eq!(render(&json!(12345678901u64)), "12345678901");
    }
}
