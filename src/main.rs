use std::path::PathBuf;

use admission_advisor::catalog::loader::{read_cutoffs_csv, source_for};
use admission_advisor::catalog::{
    Branch, Catalog, Category, College, CollegeType, Course, CutoffQuery, CutoffRepository,
    HistoricalCutoffRecord, InstituteBranch, Round,
};
use admission_advisor::config::{Config, ConfigOverrides, QueryConfig};
use admission_advisor::eligibility::{select_colleges, FilterValues};
use admission_advisor::output::csv::{colleges_to_csv, cutoffs_to_csv, recommendations_to_csv};
use admission_advisor::output::json::render_json;
use admission_advisor::output::table::{
    render_colleges_table, render_cutoffs_table, render_prediction_table,
    render_recommendations_table,
};
use admission_advisor::prediction::{estimate_admission_chance, PredictionResult};
use admission_advisor::ranking::{rank_recommendations, RankedRecommendation};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "admission-advisor",
    about = "Admission chance estimates and ranked college recommendations"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    dataset: Option<String>,
    #[arg(long = "cutoffs-csv")]
    cutoffs_csv: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(short, long)]
    limit: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct QueryArgs {
    #[arg(short, long)]
    rank: Option<u32>,
    #[arg(long)]
    course: Option<Course>,
    #[arg(long)]
    round: Option<Round>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long = "max-fee")]
    max_fee: Option<u32>,
    #[arg(long = "branch", value_delimiter = ',')]
    branches: Vec<String>,
    #[arg(long = "type", value_delimiter = ',')]
    college_types: Vec<CollegeType>,
    /// College id, institute code or name
    #[arg(long = "institute", value_delimiter = ',')]
    institutes: Vec<String>,
    /// `<college_id>-<branch_id>`
    #[arg(long = "institute-branch", value_delimiter = ',')]
    institute_branches: Vec<InstituteBranch>,
}

impl QueryArgs {
    fn into_filters(self, defaults: &QueryConfig, catalog: &Catalog) -> Result<FilterValues> {
        let mut institutes = Vec::with_capacity(self.institutes.len());
        for key in &self.institutes {
            let college = catalog
                .find_college(key)
                .ok_or_else(|| anyhow!("unknown institute: {key}"))?;
            institutes.push(college.id);
        }

        let mut filters = FilterValues::default()
            .with_course(self.course.unwrap_or(defaults.course))
            .with_round(self.round.unwrap_or(defaults.round))
            .with_category(self.category.unwrap_or(defaults.category))
            .with_branches(self.branches)
            .with_college_types(self.college_types)
            .with_institutes(institutes)
            .with_institute_branches(self.institute_branches);
        filters.acpc_rank = self.rank;
        filters.max_fee = self.max_fee.or(defaults.max_fee);
        Ok(filters)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Recommend {
        #[command(flatten)]
        query: QueryArgs,
    },
    Predict {
        #[arg(long)]
        college: String,
        #[arg(long = "for-branch")]
        branch: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    Filter {
        #[command(flatten)]
        query: QueryArgs,
    },
    Colleges,
    Cutoffs {
        #[arg(long)]
        college: Option<String>,
        #[arg(long = "for-branch")]
        branch: Option<String>,
        #[arg(long)]
        year: Option<u16>,
        #[arg(long)]
        round: Option<Round>,
        #[arg(long)]
        category: Option<Category>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Serialize)]
struct PredictionReport<'a> {
    college: &'a College,
    branch: &'a Branch,
    prediction: PredictionResult,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        dataset_path: cli.dataset.clone(),
        cutoffs_csv: cli.cutoffs_csv.clone(),
        limit: cli.limit,
    });

    if let Commands::Config { init, show } = &cli.command {
        return handle_config_command(*init, *show, &config, &config_path);
    }

    let catalog = load_catalog(&config).await?;

    match cli.command {
        Commands::Recommend { query } => {
            let filters = query.into_filters(&config.query, &catalog)?;
            if filters.rank().is_none() {
                warn!("no rank given; recommendations need --rank (try `filter` instead)");
            }
            let mut ranked = rank_recommendations(
                catalog.colleges(),
                catalog.branches(),
                &filters,
                catalog.cutoffs(),
            );
            info!(total = ranked.len(), "recommendations ranked");
            ranked.truncate(config.output.limit);
            print_recommendations(&ranked, cli.output)?;
        }
        Commands::Predict {
            college,
            branch,
            query,
        } => {
            let college = catalog
                .find_college(&college)
                .ok_or_else(|| anyhow!("unknown college: {college}"))?;
            let branch = catalog
                .find_branch(college.id, &branch)
                .ok_or_else(|| anyhow!("unknown branch {branch} for {}", college.name))?;
            let filters = query.into_filters(&config.query, &catalog)?;
            if filters.rank().is_none() {
                warn!("no rank given; reporting the neutral estimate");
            }
            let prediction =
                estimate_admission_chance(college, branch, &filters, catalog.cutoffs());
            let report = PredictionReport {
                college,
                branch,
                prediction,
            };
            print_prediction(&report, cli.output)?;
        }
        Commands::Filter { query } => {
            let filters = query.into_filters(&config.query, &catalog)?;
            let mut colleges = select_colleges(
                catalog.colleges(),
                catalog.branches(),
                &filters,
                catalog.cutoffs(),
            );
            colleges.truncate(config.output.limit);
            print_colleges(&colleges, cli.output)?;
        }
        Commands::Colleges => {
            let colleges = catalog.colleges_by_competitiveness();
            print_colleges(&colleges, cli.output)?;
        }
        Commands::Cutoffs {
            college,
            branch,
            year,
            round,
            category,
        } => {
            let query = build_cutoff_query(
                &catalog,
                college.as_deref(),
                branch.as_deref(),
                year,
                round,
                category,
            )?;
            let mut records = catalog.cutoffs().query(&query);
            records.truncate(config.output.limit);
            print_cutoffs(&records, cli.output)?;
        }
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    }

    Ok(())
}

async fn load_catalog(config: &Config) -> Result<Catalog> {
    let dataset_path = config.resolved_dataset_path();
    let mut catalog = source_for(dataset_path.as_deref()).load().await?;
    if let Some(csv_path) = config.resolved_cutoffs_csv() {
        let records = read_cutoffs_csv(&csv_path).await?;
        let added = catalog
            .merge_cutoffs(records)
            .with_context(|| format!("invalid cutoffs in {}", csv_path.display()))?;
        info!(added, path = %csv_path.display(), "merged historical cutoffs");
    }
    Ok(catalog)
}

fn build_cutoff_query(
    catalog: &Catalog,
    college: Option<&str>,
    branch: Option<&str>,
    year: Option<u16>,
    round: Option<Round>,
    category: Option<Category>,
) -> Result<CutoffQuery> {
    let college_id = college
        .map(|key| {
            catalog
                .find_college(key)
                .map(|c| c.id)
                .ok_or_else(|| anyhow!("unknown college: {key}"))
        })
        .transpose()?;
    let branch_id = match (college_id, branch) {
        (Some(college_id), Some(key)) => Some(
            catalog
                .find_branch(college_id, key)
                .map(|b| b.id)
                .ok_or_else(|| anyhow!("unknown branch: {key}"))?,
        ),
        (None, Some(key)) => Some(
            key.trim()
                .parse()
                .with_context(|| format!("branch {key} needs --college or a numeric id"))?,
        ),
        (_, None) => None,
    };
    Ok(CutoffQuery {
        college_id,
        branch_id,
        year,
        round,
        category,
    })
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &PathBuf,
) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_recommendations(items: &[RankedRecommendation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_recommendations_table(items)),
        OutputFormat::Json => println!("{}", render_json(items)?),
        OutputFormat::Csv => print!("{}", recommendations_to_csv(items)?),
    }
    Ok(())
}

fn print_prediction(report: &PredictionReport<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!(
            "{}",
            render_prediction_table(report.college, report.branch, &report.prediction)
        ),
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => {
            warn!("CSV output for predict not implemented, using JSON");
            println!("{}", render_json(report)?);
        }
    }
    Ok(())
}

fn print_colleges(colleges: &[&College], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_colleges_table(colleges)),
        OutputFormat::Json => println!("{}", render_json(colleges)?),
        OutputFormat::Csv => print!("{}", colleges_to_csv(colleges)?),
    }
    Ok(())
}

fn print_cutoffs(records: &[HistoricalCutoffRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_cutoffs_table(records)),
        OutputFormat::Json => println!("{}", render_json(records)?),
        OutputFormat::Csv => print!("{}", cutoffs_to_csv(records)?),
    }
    Ok(())
}
