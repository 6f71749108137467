use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use ft_factors::{FactorTable, Metric};
use ft_grid::{ExclusionReason, Snapshot, ValidityRule, ZoneStatus, classify, load_snapshots};
use ft_solver::{
    Attribution, Diagnostic, FlowAttributionSolver, SolverConfig, UntrackedImportPolicy,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowtrace")]
#[command(
    about = "Consumption-based carbon attribution for interconnected grid zones",
    long_about = None
)]
struct Cli {
    /// Log assembly and solve details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute every snapshot in a file
    Solve {
        /// Snapshot file (YAML, or JSON with a .json extension)
        snapshot_path: PathBuf,
        /// Factor table file used instead of a built-in table
        #[arg(long)]
        factors: Option<PathBuf>,
        /// Built-in table to use (default: carbon). With --factors, the file's
        /// metric must match.
        #[arg(long, value_enum)]
        metric: Option<MetricArg>,
        /// Value assumed for imports from zones outside the solved set
        #[arg(long, value_enum, default_value_t = PolicyArg::Zero)]
        policy: PolicyArg,
        /// Accept zones with no production of their own if they import
        #[arg(long)]
        allow_import_only: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show which zones would enter the solve
    Validate {
        snapshot_path: PathBuf,
        #[arg(long)]
        allow_import_only: bool,
    },
    /// Print a built-in factor table as YAML
    Factors {
        #[arg(long, value_enum, default_value_t = MetricArg::Carbon)]
        metric: MetricArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Carbon,
    Fossil,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Carbon => Metric::CarbonIntensity,
            MetricArg::Fossil => Metric::FossilFuelRatio,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Untracked imports carry no footprint
    Zero,
    /// Untracked imports carry the importer's own value
    #[value(name = "self")]
    Own,
}

impl From<PolicyArg> for UntrackedImportPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Zero => UntrackedImportPolicy::ZeroFootprint,
            PolicyArg::Own => UntrackedImportPolicy::SelfFootprint,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Grid(#[from] ft_grid::GridError),

    #[error("{0}")]
    Factors(#[from] ft_factors::FactorError),

    #[error("Failed to serialize output: {0}")]
    Output(String),

    #[error("--metric {flag} does not match the factor file, which holds {file}")]
    MetricMismatch { flag: Metric, file: Metric },

    #[error("{failed} of {total} snapshots could not be solved")]
    SolveFailed { failed: usize, total: usize },
}

type CliResult<T> = Result<T, CliError>;

/// One snapshot's result as written by `solve`.
#[derive(Serialize)]
struct SnapshotReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded: Vec<(String, ExclusionReason)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            snapshot_path,
            factors,
            metric,
            policy,
            allow_import_only,
            format,
        } => {
            let config = SolverConfig {
                validity: validity_rule(allow_import_only),
                untracked_imports: policy.into(),
                ..SolverConfig::default()
            };
            let metric = metric.map(Metric::from);
            cmd_solve(&snapshot_path, factors.as_deref(), metric, config, format)
        }
        Commands::Validate {
            snapshot_path,
            allow_import_only,
        } => cmd_validate(&snapshot_path, validity_rule(allow_import_only)),
        Commands::Factors { metric } => cmd_factors(metric.into()),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn validity_rule(allow_import_only: bool) -> ValidityRule {
    if allow_import_only {
        ValidityRule::AllowImportOnly
    } else {
        ValidityRule::RequireProduction
    }
}

fn cmd_solve(
    snapshot_path: &Path,
    factors_path: Option<&Path>,
    metric: Option<Metric>,
    config: SolverConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let snapshots = load_snapshots(snapshot_path)?;
    let factors = factor_table(factors_path, metric)?;
    let metric = factors.metric;

    let solver = FlowAttributionSolver::with_config(factors, config);
    let start = Instant::now();
    let results = solver.solve_batch(&snapshots);
    let elapsed = start.elapsed().as_secs_f64();

    let reports: Vec<SnapshotReport> = snapshots
        .iter()
        .zip(results)
        .map(|(snapshot, result)| report(snapshot, result))
        .collect();
    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    match format {
        OutputFormat::Table => print_table(&reports, metric, elapsed),
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&reports)
                .map_err(|e| CliError::Output(e.to_string()))?;
            println!("{out}");
        }
        OutputFormat::Yaml => {
            let out =
                serde_yaml::to_string(&reports).map_err(|e| CliError::Output(e.to_string()))?;
            print!("{out}");
        }
    }

    if failed > 0 {
        return Err(CliError::SolveFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

/// Table from `--factors` if given, else the built-in one for `--metric`.
fn factor_table(path: Option<&Path>, metric: Option<Metric>) -> CliResult<FactorTable> {
    let Some(path) = path else {
        return Ok(FactorTable::builtin(metric.unwrap_or_default()));
    };
    let table = ft_factors::load(path)?;
    match metric {
        Some(flag) if flag != table.metric => Err(CliError::MetricMismatch {
            flag,
            file: table.metric,
        }),
        _ => Ok(table),
    }
}

fn report(snapshot: &Snapshot, result: ft_solver::SolverResult<Attribution>) -> SnapshotReport {
    match result {
        Ok(attribution) => SnapshotReport {
            datetime: snapshot.datetime,
            values: Some(attribution.values),
            excluded: attribution.excluded,
            diagnostics: attribution.diagnostics,
            error: None,
        },
        Err(e) => SnapshotReport {
            datetime: snapshot.datetime,
            values: None,
            excluded: Vec::new(),
            diagnostics: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}

fn print_table(reports: &[SnapshotReport], metric: Metric, elapsed: f64) {
    for (i, report) in reports.iter().enumerate() {
        match report.datetime {
            Some(dt) => println!("Snapshot {} ({})", i, dt.to_rfc3339()),
            None => println!("Snapshot {}", i),
        }

        if let Some(error) = &report.error {
            println!("  ✗ {}", error);
            continue;
        }

        println!("  {:<16} {}", "zone", metric);
        for (zone, value) in report.values.iter().flatten() {
            println!("  {:<16} {:.4}", zone, value);
        }
        for (zone, reason) in &report.excluded {
            println!("  {:<16} - ({})", zone, reason);
        }
        if !report.diagnostics.is_empty() {
            println!("  Warnings:");
            for diagnostic in &report.diagnostics {
                println!("    {}", diagnostic);
            }
        }
    }
    println!(
        "\nSolved {} snapshot(s) in {:.3}s",
        reports.len(),
        elapsed
    );
}

fn cmd_validate(snapshot_path: &Path, rule: ValidityRule) -> CliResult<()> {
    let snapshots = load_snapshots(snapshot_path)?;
    let storage_keys = SolverConfig::default().storage_keys;

    for (i, snapshot) in snapshots.iter().enumerate() {
        println!("Snapshot {}:", i);
        let statuses = classify(snapshot, rule, storage_keys.as_slice());
        for (zone, status) in snapshot.zones().iter().zip(statuses) {
            match status {
                ZoneStatus::Valid => println!("  ✓ {}", zone.key),
                ZoneStatus::Excluded(reason) => println!("  ✗ {} ({})", zone.key, reason),
            }
        }
    }
    Ok(())
}

fn cmd_factors(metric: Metric) -> CliResult<()> {
    let table = FactorTable::builtin(metric);
    let out = serde_yaml::to_string(&table).map_err(|e| CliError::Output(e.to_string()))?;
    print!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fossil_table_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        ft_factors::save_yaml(&path, &FactorTable::builtin(Metric::FossilFuelRatio)).unwrap();
        path
    }

    #[test]
    fn builtin_table_follows_metric_flag() {
        let table = factor_table(None, Some(Metric::FossilFuelRatio)).unwrap();
        assert_eq!(table.metric, Metric::FossilFuelRatio);
        assert_eq!(factor_table(None, None).unwrap().metric, Metric::CarbonIntensity);
    }

    #[test]
    fn conflicting_metric_flag_is_rejected() {
        let path = fossil_table_file("ft_cli_metric_conflict.yaml");
        let err = factor_table(Some(path.as_path()), Some(Metric::CarbonIntensity)).unwrap_err();
        assert!(matches!(
            err,
            CliError::MetricMismatch {
                flag: Metric::CarbonIntensity,
                file: Metric::FossilFuelRatio,
            }
        ));
    }

    #[test]
    fn factor_file_alone_or_with_matching_metric() {
        let path = fossil_table_file("ft_cli_metric_match.yaml");
        let table = factor_table(Some(path.as_path()), None).unwrap();
        assert_eq!(table.metric, Metric::FossilFuelRatio);
        assert!(factor_table(Some(path.as_path()), Some(Metric::FossilFuelRatio)).is_ok());
    }
}
