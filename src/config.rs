//! Run configuration, loadable from YAML.
//!
//! ```yaml
//! parameters:
//!   generations: 1000
//!   time_step: 75.0
//!   theta: 0.5
//!   gravitational_constant: 1.334816e-10   # optional, defaults to G
//!   execution: single_threaded             # or `!multithreaded { num_threads: 4 }`
//! system:
//!   width: 4.0e9
//!   bodies:
//!     - position: [2.0e9, 2.0e9]
//!       velocity: [0.0, 0.0]
//!       mass: 1.898e27
//!       radius: 7.1e7
//!       color: [223, 227, 202]
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{BarnesHut, Execution, Gravity, Result, SimulationError, System, G};

/// Numeric settings of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub generations: usize,
    /// Simulated time per generation.
    pub time_step: f64,
    /// Opening threshold of the Barnes-Hut approximation.
    pub theta: f64,
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    #[serde(default)]
    pub execution: Execution,
}

fn default_gravitational_constant() -> f64 {
    G
}

impl Parameters {
    #[must_use]
    pub fn new(generations: usize, time_step: f64, theta: f64) -> Self {
        Self {
            generations,
            time_step,
            theta,
            gravitational_constant: G,
            execution: Execution::default(),
        }
    }

    #[must_use]
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    #[must_use]
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.time_step.is_finite() || self.time_step < 0. {
            return Err(SimulationError::InvalidTimeStep(self.time_step));
        }
        if !self.gravitational_constant.is_finite() || self.gravitational_constant <= 0. {
            return Err(SimulationError::InvalidGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        self.execution.validate()?;
        self.barnes_hut().map(|_| ())
    }

    pub fn barnes_hut(&self) -> Result<BarnesHut> {
        BarnesHut::new(self.theta, Gravity::new(self.gravitational_constant))
    }
}

/// Parameters together with the initial snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub parameters: Parameters,
    pub system: System,
}

impl SimulationConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.parameters.validate()?;
        config.system.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;

    use super::*;

    const CONFIG: &str = "
parameters:
  generations: 10
  time_step: 0.5
  theta: 0.7
  execution: !multithreaded
    num_threads: 3
system:
  width: 100.0
  bodies:
    - position: [10.0, 20.0]
      velocity: [0.0, 1.0]
      mass: 5.0
      color: [10, 20, 30]
    - position: [80.0, 20.0]
      velocity: [0.0, -1.0]
      mass: 3.0
      radius: 2.0
";

    #[test]
    fn load_yaml() {
        let config = SimulationConfig::from_yaml_str(CONFIG).unwrap();

        assert_eq!(config.parameters.generations, 10);
        assert_eq!(config.parameters.time_step, 0.5);
        assert_eq!(config.parameters.theta, 0.7);
        assert_eq!(config.parameters.gravitational_constant, G);
        assert_eq!(
            config.parameters.execution,
            Execution::Multithreaded { num_threads: 3 }
        );
        assert_eq!(config.system.len(), 2);
        assert_eq!(config.system.bodies[0].color, [10, 20, 30]);
        assert_eq!(config.system.bodies[1].position, Vector2::new(80., 20.));
        assert_eq!(config.system.bodies[1].radius, 2.);
    }

    #[test]
    fn defaults() {
        let parameters: Parameters =
            serde_yaml::from_str("generations: 1\ntime_step: 1.0\ntheta: 0.0\n").unwrap();

        assert_eq!(parameters, Parameters::new(1, 1., 0.));
        assert_eq!(parameters.execution, Execution::SingleThreaded);
    }

    #[test]
    fn rejects_invalid_values() {
        let invalid_mass = CONFIG.replace("mass: 3.0", "mass: 0.0");
        assert!(matches!(
            SimulationConfig::from_yaml_str(&invalid_mass),
            Err(SimulationError::InvalidMass { index: 1, .. })
        ));

        let invalid_theta = CONFIG.replace("theta: 0.7", "theta: -1.0");
        assert!(matches!(
            SimulationConfig::from_yaml_str(&invalid_theta),
            Err(SimulationError::InvalidTheta(_))
        ));

        let invalid_threads = CONFIG.replace("num_threads: 3", "num_threads: 0");
        assert!(matches!(
            SimulationConfig::from_yaml_str(&invalid_threads),
            Err(SimulationError::InvalidThreadCount)
        ));

        assert!(matches!(
            SimulationConfig::from_yaml_str("parameters: 3"),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn rejects_negative_time_step() {
        let parameters = Parameters::new(1, -1., 0.5);
        assert!(matches!(
            parameters.validate(),
            Err(SimulationError::InvalidTimeStep(_))
        ));
    }
}
