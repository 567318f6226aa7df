use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = ".";
const DEFAULT_SKIP_MALFORMED: bool = false;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateConfig {
    /// directory where tables are written
    output_dir: PathBuf,
    /// if set, input files that cannot be loaded are logged and left out
    /// instead of failing the run
    skip_malformed: bool,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            skip_malformed: DEFAULT_SKIP_MALFORMED,
        }
    }
}

impl ConsolidateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(
        &mut self,
        output_dir: impl Into<PathBuf>,
    ) -> &mut Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn skip_malformed(&self) -> bool {
        self.skip_malformed
    }

    pub fn set_skip_malformed(&mut self, skip_malformed: bool) -> &mut Self {
        self.skip_malformed = skip_malformed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_write_to_working_directory() {
        let config = ConsolidateConfig::new();
        assert_eq!(config.output_dir(), Path::new("."));
        assert!(!config.skip_malformed());
    }

    #[test]
    fn setters() {
        let mut config = ConsolidateConfig::new();
        config.set_output_dir("tables").set_skip_malformed(true);
        assert_eq!(config.output_dir(), Path::new("tables"));
        assert!(config.skip_malformed());
    }
}
