// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use care_search::utils::logging::{
    format_error, format_info, format_rank, format_success, format_warning,
};
use care_search::{
    ClinicRecord, Config, Dataset, Diagnostic, FixedOracle, Geocoder, Intent, IntentOracle,
    JsonExporter, ProviderRecord, QueryPlan, RankedResult, Record, ReplayOracle, SearchEngine,
    SearchOutcome, TableGeocoder, Validator, load_dataset, postal_distance,
};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "care_search")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Search and rank care providers and clinics", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IntentArg {
    Doctor,
    Clinic,
}

impl From<IntentArg> for Intent {
    fn from(arg: IntentArg) -> Self {
        match arg {
            IntentArg::Doctor => Intent::FindDoctor,
            IntentArg::Clinic => Intent::FindClinic,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search from a plan file, recorded plans, or plan flags
    Search {
        /// Free-text query, looked up in --replay and echoed in exports
        query: Option<String>,

        /// JSON query plan to run as-is
        #[arg(long, value_name = "FILE", conflicts_with = "replay")]
        plan: Option<PathBuf>,

        /// JSON object of recorded plans keyed by query text
        #[arg(long, value_name = "FILE")]
        replay: Option<PathBuf>,

        #[arg(long, value_enum)]
        intent: Option<IntentArg>,

        #[arg(short, long)]
        keywords: Option<String>,

        #[arg(short, long)]
        specialty: Option<String>,

        #[arg(short, long)]
        language: Option<String>,

        /// Area name or six digit postal code
        #[arg(short, long)]
        area: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Also write the outcome to a timestamped file in this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Show map coordinates for clinic results
        #[arg(long)]
        coordinates: bool,

        #[arg(long, value_name = "FILE")]
        clinics: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        doctors: Option<PathBuf>,
    },

    /// Postal proxy distance between two six digit codes
    Distance { from: String, to: String },

    /// Row counts and detected columns for both datasets
    Inspect {
        #[arg(long, value_name = "FILE")]
        clinics: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        doctors: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color);
    care_search::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Search {
            query,
            plan,
            replay,
            intent,
            keywords,
            specialty,
            language,
            area,
            json,
            export,
            coordinates,
            clinics,
            doctors,
        } => {
            let config = with_dataset_paths(config, clinics, doctors)?;
            let query = query.unwrap_or_default();

            let oracle: Box<dyn IntentOracle> = if let Some(replay) = replay {
                Validator::validate_query(&query)
                    .context("A query is required when replaying recorded plans")?;
                Box::new(ReplayOracle::load(&replay).context("Failed to load recorded plans")?)
            } else {
                let base = match plan {
                    Some(path) => read_plan(&path)?,
                    None => QueryPlan::default(),
                };
                let plan = apply_plan_flags(base, intent, keywords, specialty, language, area);
                Box::new(FixedOracle::new(plan))
            };

            cmd_search(&config, oracle.as_ref(), &query, json, export, coordinates)?;
        }
        Commands::Distance { from, to } => {
            cmd_distance(&from, &to)?;
        }
        Commands::Inspect { clinics, doctors } => {
            let config = with_dataset_paths(config, clinics, doctors)?;
            cmd_inspect(&config)?;
        }
    }

    Ok(())
}

fn with_dataset_paths(
    mut config: Config,
    clinics: Option<PathBuf>,
    doctors: Option<PathBuf>,
) -> Result<Config> {
    if let Some(path) = clinics {
        Validator::validate_dataset_path(&path)?;
        config.datasets.clinics_path = path;
    }
    if let Some(path) = doctors {
        Validator::validate_dataset_path(&path)?;
        config.datasets.providers_path = path;
    }
    Ok(config)
}

fn read_plan(path: &Path) -> Result<QueryPlan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file {}", path.display()))?;
    QueryPlan::from_json(&content)
        .with_context(|| format!("Plan file {} is not a valid query plan", path.display()))
}

fn apply_plan_flags(
    mut plan: QueryPlan,
    intent: Option<IntentArg>,
    keywords: Option<String>,
    specialty: Option<String>,
    language: Option<String>,
    area: Option<String>,
) -> QueryPlan {
    if let Some(intent) = intent {
        plan.intent = intent.into();
    }
    if let Some(keywords) = keywords {
        plan.keywords = keywords;
    }
    if let Some(specialty) = specialty {
        plan.filters.specialty = specialty;
    }
    if let Some(language) = language {
        plan.filters.languages = language;
    }
    if let Some(area) = area {
        plan.filters.area = area;
    }
    plan
}

fn cmd_search(
    config: &Config,
    oracle: &dyn IntentOracle,
    query: &str,
    json: bool,
    export: Option<PathBuf>,
    coordinates: bool,
) -> Result<()> {
    let engine =
        SearchEngine::from_config(config.clone()).context("Failed to load datasets")?;

    let outcome = engine.search_query(oracle, query);

    if let Some(dir) = export {
        let exporter = JsonExporter::new(dir).context("Failed to create export directory")?;
        let path = exporter
            .export_outcome(query, &outcome, true)
            .context("Failed to export search outcome")?;
        eprintln!("{}", format_success(&format!("Exported to {}", path.display())));
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
        );
    } else {
        print_outcome(&outcome, coordinates);
    }

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, coordinates: bool) {
    let plan = &outcome.plan;
    println!(
        "{}",
        format_info(&format!(
            "{} keywords='{}' specialty='{}' languages='{}' area='{}'",
            plan.intent.as_str(),
            plan.keywords,
            plan.filters.specialty,
            plan.filters.languages,
            plan.filters.area
        ))
    );
    if !plan.reasoning.is_empty() {
        println!("{}", format_info(&plan.reasoning));
    }

    for diagnostic in &outcome.diagnostics {
        println!("{}", format_warning(&describe(diagnostic)));
    }

    if outcome.is_empty() {
        println!("{}", format_error("No matching records"));
        return;
    }

    let geocoder = TableGeocoder::new();
    for (rank, result) in outcome.results.iter().enumerate() {
        println!(
            "{}",
            format_rank(rank + 1, result.name(), &detail(result, coordinates, &geocoder))
        );
    }

    println!(
        "{}",
        format_success(&format!("{} results", outcome.len()))
    );
}

fn detail(result: &RankedResult, coordinates: bool, geocoder: &dyn Geocoder) -> String {
    let mut parts = Vec::new();

    if let Some(provider) = result.as_provider() {
        parts.push(provider.specialty.clone());
        if !provider.languages.is_empty() {
            parts.push(provider.languages.clone());
        }
    }

    if let Some(clinic) = result.as_clinic() {
        parts.push(Validator::truncate_text(&clinic.address, 60));
        if coordinates {
            let area = Some(clinic.area.as_str()).filter(|a| !a.is_empty());
            match geocoder.coordinates(&clinic.address, area) {
                Some((lat, lng)) => parts.push(format!("({:.4}, {:.4})", lat, lng)),
                None => parts.push("(no coordinates)".to_string()),
            }
        }
    }

    if let Some(distance) = result.distance {
        parts.push(format!("distance {:.0}", distance));
    }
    if let Some(score) = result.score {
        parts.push(format!("score {:.1}", score));
    }

    parts.join(" | ")
}

fn describe(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        Diagnostic::PlanUnavailable { reason } => format!("No query plan: {}", reason),
        Diagnostic::EmptyFilterResult { stage } => {
            format!("The {} filter matched nothing", stage.as_str())
        }
        Diagnostic::UnclassifiableLocation { location } => {
            format!("Unknown location '{}'", location)
        }
        Diagnostic::MissingColumns { stage } => {
            format!("Dataset lacks the columns for the {} filter; skipped", stage.as_str())
        }
    }
}

fn cmd_distance(from: &str, to: &str) -> Result<()> {
    let from = Validator::validate_postal_code(from)?;
    let to = Validator::validate_postal_code(to)?;

    println!(
        "{}",
        format_success(&format!(
            "{:06} -> {:06}: {}",
            from,
            to,
            postal_distance(from, to)
        ))
    );

    Ok(())
}

fn cmd_inspect(config: &Config) -> Result<()> {
    let providers = load_dataset::<ProviderRecord>(&config.datasets.providers_path)
        .context("Failed to load provider dataset")?;
    let clinics = load_dataset::<ClinicRecord>(&config.datasets.clinics_path)
        .context("Failed to load clinic dataset")?;

    print_dataset(&config.datasets.providers_path, &providers);
    print_dataset(&config.datasets.clinics_path, &clinics);

    Ok(())
}

fn print_dataset<R: Record>(path: &Path, dataset: &Dataset<R>) {
    let columns: Vec<&str> = dataset.columns().map(|c| c.as_str()).collect();
    let missing: Vec<&str> = R::COLUMNS
        .iter()
        .filter(|c| !dataset.has_column(**c))
        .map(|c| c.as_str())
        .collect();

    println!(
        "{}",
        format_info(&format!(
            "{} ({}): {} rows, columns [{}]",
            R::KIND.as_str(),
            path.display(),
            dataset.len(),
            columns.join(", ")
        ))
    );

    if !missing.is_empty() {
        println!(
            "{}",
            format_warning(&format!("missing columns [{}]", missing.join(", ")))
        );
    }
}
