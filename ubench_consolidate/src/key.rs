use crate::bench::{BenchmarkRecord, RUN_TYPE};
use crate::row::MissingField;
use std::fmt;
use ubench_keyname::{Keyname, KeynameError, EXT_KEY};

const TIME_TYPE: &str = "time_type";
const TABLE_EXT: &str = ".csv";

/// Benchmarks timed in real time carry it as the fourth name segment, e.g.
/// `cube/build/0/real_time`.
const REAL_TIME_SEGMENT: usize = 3;
const REAL_TIME: &str = "real_time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeType {
    WallTime,
    CpuTime,
}

impl TimeType {
    pub fn from_name(name: &str) -> Self {
        match name.split('/').nth(REAL_TIME_SEGMENT) {
            Some(REAL_TIME) => TimeType::WallTime,
            _ => TimeType::CpuTime,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeType::WallTime => "wall_time",
            TimeType::CpuTime => "cpu_time",
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies the output table a benchmark record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub run_type: Option<String>,
    pub time_type: TimeType,
}

impl GroupKey {
    pub fn new(run_type: Option<String>, time_type: TimeType) -> Self {
        Self {
            run_type,
            time_type,
        }
    }

    pub fn from_record(record: &BenchmarkRecord) -> Result<Self, MissingField> {
        let time_type = TimeType::from_name(record.name()?);
        Ok(Self::new(record.run_type(), time_type))
    }

    pub fn keyname(&self) -> Keyname {
        let mut keyname = Keyname::new();
        // an absent run type is left out of the name altogether
        if let Some(run_type) = &self.run_type {
            keyname.insert(RUN_TYPE, run_type.as_str());
        }
        keyname
            .insert(TIME_TYPE, self.time_type.as_str())
            .insert(EXT_KEY, TABLE_EXT);
        keyname
    }

    /// Name of the file this group's table is written to.
    pub fn file_name(&self) -> Result<String, KeynameError> {
        self.keyname().pack()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.run_type {
            Some(run_type) => write!(f, "{}/{}", run_type, self.time_type),
            None => write!(f, "{}", self.time_type),
        }
    }
}
