//! Scenario execution engine

use anyhow::{Result, bail};
use sandfall_core::{SimRng, Simulator, StepCounters};
use sandfall_simulation::Material;
use std::time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::ExecutionReport;

/// Configuration for scenario executor
#[derive(Debug, Clone, Default)]
pub struct ScenarioExecutorConfig {
    /// Log every action before running it
    pub verbose: bool,
}

/// Executes scenario actions against a simulator
pub struct ScenarioExecutor {
    /// Configuration
    config: ScenarioExecutorConfig,

    /// Action execution log
    log: Vec<String>,

    /// Steps run in the current scenario
    steps_run: u64,

    /// Events collected across all steps
    counters: StepCounters,

    /// Per-step timings (milliseconds)
    step_times: Vec<f64>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            config,
            log: Vec::new(),
            steps_run: 0,
            counters: StepCounters::default(),
            step_times: Vec::new(),
        }
    }

    /// Build a simulator from the scenario's config and run the scenario on it
    pub fn run_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
    ) -> Result<(ExecutionReport, Simulator)> {
        let mut sim = Simulator::new(scenario.config.clone())?;
        let report = self.execute_scenario(scenario, &mut sim)?;
        Ok((report, sim))
    }

    /// Execute a complete scenario
    pub fn execute_scenario<R: SimRng>(
        &mut self,
        scenario: &ScenarioDefinition,
        sim: &mut Simulator<R>,
    ) -> Result<ExecutionReport> {
        let start_time = Instant::now();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.log.clear();
        self.steps_run = 0;
        self.counters = StepCounters::default();
        self.step_times.clear();

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }

        // Execute setup actions
        let setup_start = Instant::now();
        if !scenario.setup.is_empty() {
            self.log(&format!("Running {} setup actions", scenario.setup.len()));
            for (idx, action) in scenario.setup.iter().enumerate() {
                if let Err(e) = self.execute_action(action, sim) {
                    let msg = format!("Setup action {} failed: {}", idx, e);
                    self.log(&msg);
                    report.log = self.log.clone();
                    bail!(msg);
                }
            }
        }
        report.performance.setup_duration_ms = setup_start.elapsed().as_secs_f64() * 1000.0;

        // Execute main actions
        let action_start = Instant::now();
        self.log(&format!("Running {} main actions", scenario.actions.len()));
        for (idx, action) in scenario.actions.iter().enumerate() {
            if let Err(e) = self.execute_action(action, sim) {
                let msg = format!("Action {} failed: {}", idx, e);
                self.log(&msg);
                report.log = self.log.clone();
                bail!(msg);
            }
        }
        report.performance.action_duration_ms = action_start.elapsed().as_secs_f64() * 1000.0;

        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        // Run verifications
        let verify_start = Instant::now();
        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(sim.grid());
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));

                if !result.passed {
                    report.verification_failures.push(result);
                }
            }
        }
        report.performance.verification_duration_ms =
            verify_start.elapsed().as_secs_f64() * 1000.0;

        // Finalize report
        report.steps_run = self.steps_run;
        report.counters = self.counters;
        report.passed = report.verification_failures.is_empty();
        report.performance.total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        if !self.step_times.is_empty() {
            let total: f64 = self.step_times.iter().sum();
            report.performance.avg_step_time_ms = total / self.step_times.len() as f64;
            report.performance.peak_step_time_ms =
                self.step_times.iter().copied().fold(0.0, f64::max);
        }

        self.log(&format!(
            "Scenario complete: {} ({} steps, {:.1}ms)",
            if report.passed { "PASSED" } else { "FAILED" },
            self.steps_run,
            report.performance.total_duration_ms
        ));
        self.log(&format!("  Events: {}", self.counters.summary()));
        self.log(&format!("  Performance: {}", report.performance.summary()));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action<R: SimRng>(
        &mut self,
        action: &ScenarioAction,
        sim: &mut Simulator<R>,
    ) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Step {}] {:?}", self.steps_run, action));
        }

        match action {
            ScenarioAction::Paint {
                x,
                y,
                radius,
                material,
            } => {
                let written = sim.paint_circle(*x, *y, *radius, *material);
                if written == 0 {
                    log::warn!("Paint at ({}, {}) r={} missed the grid", x, y, radius);
                }
                self.log(&format!(
                    "  Painted {} at ({}, {}) r={}: {} cells",
                    material, x, y, radius, written
                ));
            }

            ScenarioAction::Erase { x, y, radius } => {
                let written = sim.paint_circle(*x, *y, *radius, Material::Empty);
                self.log(&format!(
                    "  Erased at ({}, {}) r={}: {} cells",
                    x, y, radius, written
                ));
            }

            ScenarioAction::FillRect {
                min_x,
                min_y,
                max_x,
                max_y,
                material,
            } => {
                if min_x > max_x || min_y > max_y {
                    bail!(
                        "FillRect corners out of order: ({},{}) to ({},{})",
                        min_x,
                        min_y,
                        max_x,
                        max_y
                    );
                }
                let mut written = 0;
                for y in *min_y..=*max_y {
                    for x in *min_x..=*max_x {
                        written += sim.paint_circle(x, y, 0, *material);
                    }
                }
                self.log(&format!(
                    "  Filled ({},{}) to ({},{}) with {}: {} cells",
                    min_x, min_y, max_x, max_y, material, written
                ));
            }

            ScenarioAction::Clear => {
                sim.clear_grid();
                self.log("  Cleared grid");
            }

            ScenarioAction::Step { count } => {
                for _ in 0..*count {
                    let step_start = Instant::now();
                    sim.step_with_stats(&mut self.counters);
                    self.step_times
                        .push(step_start.elapsed().as_secs_f64() * 1000.0);
                }
                self.steps_run += count;
                self.log(&format!(
                    "  Stepped {} ({} total, {} non-empty cells)",
                    count,
                    self.steps_run,
                    sim.grid().non_empty_count()
                ));
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  [LOG] {}", message));
            }
        }

        Ok(())
    }

    /// Add message to execution log
    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}
