use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use sandfall::dump;
use sandfall::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use sandfall_core::{SimConfig, Simulator, StepCounters, TieBreak};
use sandfall_simulation::{Material, Materials};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run a RON scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Load simulation config from a RON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid height (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid width (overrides config)
    #[arg(long)]
    cols: Option<usize>,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Tie-break policy (overrides config)
    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,

    /// Steps to run without a scenario
    #[arg(long, default_value = "100")]
    steps: u64,

    /// Paint a disc before running: x,y,radius,material (repeatable)
    #[arg(long, value_parser = parse_paint)]
    paint: Vec<PaintArg>,

    /// Print the final grid as text
    #[arg(long)]
    dump: bool,

    /// Write the scenario report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every scenario action
    #[arg(long)]
    verbose: bool,

    /// List the material table and exit
    #[arg(long)]
    list_materials: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TieBreakArg {
    PerCell,
    PerStep,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::PerCell => TieBreak::PerCell,
            TieBreakArg::PerStep => TieBreak::PerStep,
        }
    }
}

#[derive(Clone, Debug)]
struct PaintArg {
    x: i32,
    y: i32,
    radius: u32,
    material: Material,
}

fn parse_paint(s: &str) -> Result<PaintArg> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, radius, material] = parts.as_slice() else {
        bail!("expected x,y,radius,material, got '{}'", s);
    };
    Ok(PaintArg {
        x: x.parse().with_context(|| format!("invalid x '{}'", x))?,
        y: y.parse().with_context(|| format!("invalid y '{}'", y))?,
        radius: radius
            .parse()
            .with_context(|| format!("invalid radius '{}'", radius))?,
        material: material.parse()?,
    })
}

impl Args {
    fn apply_overrides(&self, config: &mut SimConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break.into();
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Handle --list-materials flag
    if args.list_materials {
        list_materials();
        return Ok(());
    }

    if let Some(path) = &args.scenario {
        return run_scenario(&args, path);
    }

    run_free(&args)
}

fn list_materials() {
    println!("{:>3}  {:<10} {:<7} color", "id", "name", "type");
    for def in Materials::new().iter() {
        let [r, g, b, a] = def.color;
        println!(
            "{:>3}  {:<10} {:<7} #{:02x}{:02x}{:02x}{:02x}",
            def.material.id(),
            def.name,
            format!("{:?}", def.material_type),
            r,
            g,
            b,
            a
        );
    }
}

fn run_scenario(args: &Args, path: &Path) -> Result<()> {
    let mut scenario = ScenarioDefinition::from_file(path)?;
    args.apply_overrides(&mut scenario.config);

    log::info!("Running scenario '{}' from {}", scenario.name, path.display());

    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        verbose: args.verbose,
    });
    let (report, sim) = executor.run_scenario(&scenario)?;

    if args.dump {
        print!("{}", dump::render(sim.grid()));
    }

    if let Some(report_path) = &args.report {
        report.save_json(report_path)?;
        log::info!("Report written to {}", report_path.display());
    }

    if !report.passed {
        log::error!(
            "Scenario '{}' failed {} verification(s)",
            report.scenario_name,
            report.verification_failures.len()
        );
        std::process::exit(1);
    }
    Ok(())
}

fn run_free(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    args.apply_overrides(&mut config);

    let mut sim = Simulator::new(config)?;
    log::info!(
        "Simulating {}x{} grid for {} steps",
        sim.grid().rows(),
        sim.grid().cols(),
        args.steps
    );

    for paint in &args.paint {
        sim.paint_circle(paint.x, paint.y, paint.radius, paint.material);
    }

    let mut counters = StepCounters::default();
    for _ in 0..args.steps {
        sim.step_with_stats(&mut counters);
    }

    log::info!("Done after {} steps: {}", sim.step_count(), counters.summary());
    log::info!("{} non-empty cells", sim.grid().non_empty_count());

    if args.dump {
        print!("{}", dump::render(sim.grid()));
        println!("{}", dump::legend());
    }
    Ok(())
}
