use std::{panic, thread};

use log::{debug, info};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{integrate, BarnesHut, Body, Parameters, QuadTree, Result, SimulationError, System};

/// How the bodies of one generation are updated once its tree is built.
///
/// The tree is always built on the calling thread. Every body then only reads
/// the frozen tree and writes its own successor, so the updates can run in any order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    #[default]
    SingleThreaded,
    /// Split the bodies into `num_threads` contiguous chunks on scoped threads.
    Multithreaded { num_threads: usize },
    /// Let Rayon distribute the bodies over its global pool.
    #[cfg(feature = "rayon")]
    RayonIter,
}

impl Execution {
    pub fn validate(&self) -> Result<()> {
        match self {
            Execution::Multithreaded { num_threads: 0 } => {
                Err(SimulationError::InvalidThreadCount)
            }
            _ => Ok(()),
        }
    }
}

/// Receives every snapshot the driver produces.
pub trait Observer {
    fn on_generation(&mut self, generation: usize, system: &System);
}

impl<F: FnMut(usize, &System)> Observer for F {
    fn on_generation(&mut self, generation: usize, system: &System) {
        self(generation, system)
    }
}

/// Logs progress at `info` level every `every` generations.
#[derive(Clone, Debug)]
pub struct LogProgress {
    every: usize,
    total: usize,
}

impl LogProgress {
    #[must_use]
    pub fn new(every: usize, total: usize) -> Self {
        Self {
            every: every.max(1),
            total,
        }
    }
}

impl Observer for LogProgress {
    fn on_generation(&mut self, generation: usize, system: &System) {
        if generation % self.every == 0 || generation == self.total {
            info!(
                "{generation} out of {} generations done ({} bodies).",
                self.total,
                system.len()
            );
        }
    }
}

/// Compute the next snapshot from `system`.
///
/// Builds the quadtree of `system`, then evaluates and integrates every body against it.
/// The tree is dropped before returning.
pub fn advance(
    system: &System,
    barnes_hut: &BarnesHut,
    time_step: f64,
    execution: Execution,
) -> Result<System> {
    execution.validate()?;
    advance_validated(system, barnes_hut, time_step, execution)
}

fn advance_validated(
    system: &System,
    barnes_hut: &BarnesHut,
    time_step: f64,
    execution: Execution,
) -> Result<System> {
    let tree = QuadTree::new(system)?;
    let n = system.len();

    let update = |i: usize| -> Result<Body> {
        let force = barnes_hut.net_force(&tree, &system.bodies, tree.leaf_of(i))?;
        Ok(integrate(&system.bodies[i], force, time_step))
    };

    let bodies = match execution {
        Execution::SingleThreaded => (0..n).map(update).collect::<Result<Vec<_>>>()?,
        Execution::Multithreaded { num_threads } => {
            let chunk_size = n.div_ceil(num_threads).max(1);
            let chunks = thread::scope(|s| {
                let handles: Vec<_> = (0..n)
                    .step_by(chunk_size)
                    .map(|start| {
                        let update = &update;
                        let end = (start + chunk_size).min(n);
                        s.spawn(move || (start..end).map(update).collect::<Result<Vec<_>>>())
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                    .collect::<Result<Vec<_>>>()
            })?;
            chunks.into_iter().flatten().collect()
        }
        #[cfg(feature = "rayon")]
        Execution::RayonIter => (0..n)
            .into_par_iter()
            .map(&update)
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(System {
        bodies,
        width: system.width,
    })
}

/// Drives a system through its generations.
pub struct Simulation {
    current: System,
    generation: usize,
    parameters: Parameters,
    barnes_hut: BarnesHut,
    observer: Option<Box<dyn Observer>>,
}

impl Simulation {
    /// Validate `initial` and `parameters` and start at generation 0.
    pub fn new(initial: System, parameters: Parameters) -> Result<Self> {
        initial.validate()?;
        parameters.validate()?;
        let barnes_hut = parameters.barnes_hut()?;
        Ok(Self {
            current: initial,
            generation: 0,
            parameters,
            barnes_hut,
            observer: None,
        })
    }

    /// Update the bodies of a generation on `num_threads` scoped threads.
    pub fn multithreaded(mut self, num_threads: usize) -> Result<Self> {
        let execution = Execution::Multithreaded { num_threads };
        execution.validate()?;
        self.parameters.execution = execution;
        Ok(self)
    }

    /// Update the bodies of a generation with Rayon.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(mut self) -> Self {
        self.parameters.execution = Execution::RayonIter;
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    #[must_use]
    pub fn system(&self) -> &System {
        &self.current
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Advance by one generation.
    ///
    /// On error the current snapshot is left untouched.
    pub fn step(&mut self) -> Result<&System> {
        let next = advance_validated(
            &self.current,
            &self.barnes_hut,
            self.parameters.time_step,
            self.parameters.execution,
        )?;
        self.current = next;
        self.generation += 1;
        debug!("generation {} done", self.generation);

        if let Some(observer) = &mut self.observer {
            observer.on_generation(self.generation, &self.current);
        }
        Ok(&self.current)
    }

    /// Run all configured generations.
    ///
    /// Returns `generations + 1` snapshots, starting with the current one.
    /// Any error aborts the run without returning partial results.
    pub fn simulate(&mut self) -> Result<Vec<System>> {
        let generations = self.parameters.generations;
        let mut snapshots = Vec::with_capacity(generations + 1);
        snapshots.push(self.current.clone());
        for _ in 0..generations {
            snapshots.push(self.step()?.clone());
        }
        Ok(snapshots)
    }
}
