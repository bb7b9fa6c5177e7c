//! Simulation files.
//!
//! A simulation file names a policy, an optional quantum and the process
//! set. TOML and JSON are accepted, chosen by file extension:
//!
//! ```toml
//! policy = "Round Robin"
//! quantum = 3
//!
//! [[processes]]
//! pid = 1
//! arrival = 0
//! burst = 5
//! priority = 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{run_checked, RunOutcome};
use crate::error::{Error, Result};
use crate::models::Process;
use crate::validation::validate_processes;

/// A simulation request loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Policy name ("FCFS", "SJF", "SRTF", "Round Robin", "Priority").
    #[serde(default = "default_policy")]
    pub policy: String,

    /// Round Robin quantum; the engine default applies when absent.
    #[serde(default)]
    pub quantum: Option<i64>,

    /// Processes to schedule.
    #[serde(default)]
    pub processes: Vec<Process>,
}

fn default_policy() -> String {
    "FCFS".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            quantum: None,
            processes: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Loads a simulation file. `.json` files are parsed as JSON,
    /// everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        debug!(
            path = %path.display(),
            policy = %config.policy,
            processes = config.processes.len(),
            "loaded simulation file"
        );
        Ok(config)
    }

    /// Parses a TOML simulation description.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Parses a JSON simulation description.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Checks the process set.
    pub fn validate(&self) -> Result<()> {
        validate_processes(&self.processes).map_err(Error::InvalidInput)
    }

    /// Validates and runs the simulation.
    pub fn run(&self) -> Result<RunOutcome> {
        run_checked(&self.policy, &self.processes, self.quantum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_TOML: &str = r#"
policy = "Round Robin"
quantum = 2

[[processes]]
pid = 1
arrival = 0
burst = 5

[[processes]]
pid = 2
arrival = 1
burst = 3
priority = 1
"#;

    #[test]
    fn test_parse_toml() {
        let config = SimulationConfig::from_toml_str(SAMPLE_TOML).unwrap();
        assert_eq!(config.policy, "Round Robin");
        assert_eq!(config.quantum, Some(2));
        assert_eq!(config.processes.len(), 2);
        assert_eq!(config.processes[1], Process::new(2, 1, 3).with_priority(1));
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.policy, "FCFS");
    }

    #[test]
    fn test_parse_json() {
        let config = SimulationConfig::from_json_str(
            r#"{"policy":"SJF","processes":[{"pid":1,"arrival":0,"burst":2}]}"#,
        )
        .unwrap();
        assert_eq!(config.policy, "SJF");
        assert_eq!(config.quantum, None);
        assert_eq!(config.processes, vec![Process::new(1, 0, 2)]);
    }

    #[test]
    fn test_non_numeric_field_is_config_error() {
        let err = SimulationConfig::from_toml_str(
            "[[processes]]\npid = 1\narrival = \"soon\"\nburst = 2\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("sim.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(SAMPLE_TOML.as_bytes())
            .unwrap();
        let from_toml = SimulationConfig::load(&toml_path).unwrap();

        let json_path = dir.path().join("sim.JSON");
        std::fs::write(&json_path, serde_json::to_string(&from_toml).unwrap()).unwrap();
        let from_json = SimulationConfig::load(&json_path).unwrap();

        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimulationConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_run_validates() {
        let mut config = SimulationConfig::from_toml_str(SAMPLE_TOML).unwrap();
        let outcome = config.run().unwrap();
        assert_eq!(outcome.schedule().len(), 5);

        config.processes.push(Process::new(1, 0, 1));
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
        assert!(config.run().is_err());
    }
}
