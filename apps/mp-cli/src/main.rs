use clap::{Parser, Subcommand};
use mp_project::{ProjectError, ProjectFile};
use mp_sim::{SimError, run_closed_loop};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(about = "mixpid CLI - boiler pressure burner controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a controller configuration file
    Validate {
        /// Path to the YAML or JSON project file
        project_path: PathBuf,
    },
    /// Print a project file with default settings
    Defaults {
        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Run the controller against the boiler model
    Simulate {
        /// Path to the YAML or JSON project file
        project_path: PathBuf,
        /// Override the number of samples
        #[arg(long)]
        steps: Option<usize>,
        /// Override the sample period in seconds
        #[arg(long)]
        dt: Option<f64>,
        /// Write samples as CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Defaults { json } => cmd_defaults(json),
        Commands::Simulate {
            project_path,
            steps,
            dt,
            output,
        } => cmd_simulate(&project_path, steps, dt, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = mp_project::load(project_path)?;
    println!(
        "✓ Project '{}' is valid ({} gears)",
        project.name,
        project.controller.throttle_limits.len()
    );
    Ok(())
}

fn cmd_defaults(json: bool) -> CliResult<()> {
    let project = ProjectFile::new("default").with_simulation(Default::default());
    let text = if json {
        serde_json::to_string_pretty(&project)?
    } else {
        serde_yaml::to_string(&project)?
    };
    println!("{text}");
    Ok(())
}

fn cmd_simulate(
    project_path: &Path,
    steps: Option<usize>,
    dt: Option<f64>,
    output: Option<&Path>,
) -> CliResult<()> {
    let project = mp_project::load(project_path)?;
    info!(path = %project_path.display(), name = %project.name, "loaded project");
    let mut sim = project.simulation.clone().unwrap_or_default();
    if let Some(steps) = steps {
        sim.steps = steps;
    }
    if let Some(dt) = dt {
        sim.dt_s = dt;
    }

    println!(
        "Simulating '{}': {} samples at {} s",
        project.name, sim.steps, sim.dt_s
    );
    let run = run_closed_loop(&project.controller, &sim)?;

    if let Some(summary) = run.summary() {
        println!("✓ Simulation completed");
        println!(
            "  Final pressure: {:.4} (set point {})",
            summary.final_pressure, project.controller.set_point
        );
        println!(
            "  Pressure range: {:.4} .. {:.4}",
            summary.min_pressure, summary.max_pressure
        );
        println!(
            "  Final command:  gear {} angle {}",
            summary.final_command.gear, summary.final_command.angle
        );
        println!("  Gear changes:   {}", summary.gear_changes);
    }

    if let Some(path) = output {
        std::fs::write(path, run.to_csv())?;
        println!("Wrote {} samples to {}", run.samples.len(), path.display());
    }
    Ok(())
}
