use clap::Parser;
use jambiato::application::{Report, ReportService, ScanOptions, ScanService};
use jambiato::cli::{
    format_check, format_equation_list, format_locations, format_report, Cli, Commands,
    EquationLocations, OutputFormat, VersionEquations,
};
use jambiato::error::{JambiatoError, Result};
use jambiato::infrastructure::{Config, FileSystemSource};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();

    init_logging(&cli);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Everything needed to scan one root
struct Setup {
    source: FileSystemSource,
    options: ScanOptions,
    config: Config,
}

fn setup(cli: &Cli, path: &Path) -> Result<Setup> {
    let root = path.to_path_buf();
    FileSystemSource::ensure_root(&root)?;

    let mut config = Config::resolve(&root, cli.config.as_deref())?;
    if cli.permissive {
        config.permissive = true;
    }

    let source = FileSystemSource::open(root, config.exclude.clone())?;
    let options = ScanOptions::from_config(&config);
    Ok(Setup {
        source,
        options,
        config,
    })
}

fn build_report(cli: &Cli, path: &Path) -> Result<Report> {
    let Setup {
        source,
        options,
        config,
    } = setup(cli, path)?;
    ReportService::new(source, options, config.target_version).execute()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Report { path }) => report(&cli, path),
        Some(Commands::Check { path, strict }) => {
            let report = build_report(&cli, path)?;
            match cli.format {
                OutputFormat::Text => print!("{}", format_check(&report)),
                OutputFormat::Json => print_json(&CheckOutput::from(&report))?,
            }

            let blocking = report.blocking_issue_count();
            if *strict && blocking > 0 {
                return Err(JambiatoError::ChecksFailed(blocking));
            }
            Ok(())
        }
        Some(Commands::Locate {
            equation,
            path,
            spec_version,
        }) => {
            let Setup { source, options, .. } = setup(&cli, path)?;
            let outcome = ScanService::new(source, options).execute()?;

            let hits: Vec<EquationLocations> = outcome
                .index
                .find_equation(equation)
                .into_iter()
                .filter(|(version, _)| spec_version.as_deref().is_none_or(|v| v == *version))
                .map(|(version, locations)| EquationLocations {
                    equation: equation.clone(),
                    version: version.to_string(),
                    locations: locations.iter().cloned().collect(),
                })
                .collect();

            if hits.is_empty() {
                return Err(JambiatoError::EquationNotFound(equation.clone()));
            }

            match cli.format {
                OutputFormat::Text => print!("{}", format_locations(&hits)),
                OutputFormat::Json => print_json(&hits)?,
            }
            Ok(())
        }
        Some(Commands::Equations { path, spec_version }) => {
            let Setup { source, options, .. } = setup(&cli, path)?;
            let outcome = ScanService::new(source, options).execute()?;
            let index = &outcome.index;

            if let Some(version) = spec_version {
                if !index.has_version(version) {
                    return Err(JambiatoError::VersionNotFound(version.clone()));
                }
            }

            let versions: Vec<VersionEquations> = index
                .versions()
                .into_iter()
                .filter(|version| spec_version.as_deref().is_none_or(|v| v == *version))
                .map(|version| VersionEquations {
                    version: version.to_string(),
                    equations: index
                        .equations(version)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                })
                .collect();

            match cli.format {
                OutputFormat::Text => print!("{}", format_equation_list(&versions)),
                OutputFormat::Json => print_json(&versions)?,
            }
            Ok(())
        }
        None => {
            let path = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));
            report(&cli, &path)
        }
    }
}

fn report(cli: &Cli, path: &Path) -> Result<()> {
    let report = build_report(cli, path)?;
    match cli.format {
        OutputFormat::Text => print!("{}", format_report(&report)),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

/// JSON shape of `check`: the report without the per-version listing
#[derive(Serialize)]
struct CheckOutput<'a> {
    target_version: Option<&'a str>,
    blocking_issues: usize,
    conflicts: &'a [jambiato::domain::Conflict],
    outdated: &'a [jambiato::domain::OutdatedTag],
    parse_errors: &'a [jambiato::domain::tags::TagParseError],
    read_errors: &'a [jambiato::infrastructure::FileReadError],
}

impl<'a> From<&'a Report> for CheckOutput<'a> {
    fn from(report: &'a Report) -> Self {
        CheckOutput {
            target_version: report.target_version.as_deref(),
            blocking_issues: report.blocking_issue_count(),
            conflicts: &report.conflicts,
            outdated: &report.outdated,
            parse_errors: &report.parse_errors,
            read_errors: &report.read_errors,
        }
    }
}
