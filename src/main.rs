use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use internship_portal::eligibility::{self, ApplicantProfile, EducationLevel};
use internship_portal::models::{FilterCriteria, Notice, OpportunityRecord, RankedResult};
use internship_portal::voice::{self, LineCapture, TracingSynthesis, VoiceAssistant};
use internship_portal::{catalog, config, filter, report};

#[derive(Parser)]
#[command(name = "internship-portal")]
#[command(about = "Internship scheme listings, filters and voice navigation", long_about = None)]
struct Cli {
    /// Catalog file (.json or .csv); overrides PORTAL_CATALOG and portal.toml
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    education: Option<String>,
    /// Comma-separated skills; any one may match
    #[arg(long)]
    skills: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    location: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            self.education.as_deref(),
            self.skills.as_deref(),
            self.sector.as_deref(),
            self.location.as_deref(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full listing with filters reset
    List,
    /// Filter the listing and flag recommended internships
    Filter {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown listing report
    Report {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value = "internships.md")]
        out: PathBuf,
    },
    /// Classify a typed command phrase
    Classify {
        #[arg(required = true, num_args = 1..)]
        utterance: Vec<String>,
    },
    /// Listen for one spoken (typed) command and act on it
    Voice,
    /// Apply to a listing
    Apply {
        #[arg(long)]
        id: String,
    },
    /// Sign in to the portal
    Login,
    /// Create a portal account
    Register,
    /// Quick eligibility check
    Eligibility {
        #[arg(long)]
        age: u8,
        /// Annual family income in lakh rupees
        #[arg(long)]
        income: f64,
        #[arg(long, value_enum)]
        education: EducationLevel,
        #[arg(long)]
        no_english_or_hindi: bool,
    },
    /// Load a catalog file and check it
    Validate {
        #[arg(long)]
        path: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_listing(settings: &config::Settings) -> anyhow::Result<Vec<OpportunityRecord>> {
    match &settings.catalog_path {
        Some(path) => catalog::load_catalog(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(catalog::seed_catalog()),
    }
}

fn print_results(results: &[RankedResult]) {
    if results.is_empty() {
        println!("No internships match these filters.");
        return;
    }

    for result in results {
        let record = &result.record;
        println!(
            "- [{}] {} at {} ({}, {}){}",
            record.id,
            record.title,
            record.organization,
            record.location,
            record.sector,
            if result.is_recommended {
                " *recommended*"
            } else {
                ""
            }
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = config::load_settings()?;
    if let Some(path) = cli.catalog {
        settings.catalog_path = Some(path);
    }

    match cli.command {
        Commands::List => {
            let listing = load_listing(&settings)?;
            print_results(&filter::reset_filters(&listing));
        }
        Commands::Filter { filters, json } => {
            let listing = load_listing(&settings)?;
            let outcome = settings.filter_engine().apply(&listing, &filters.criteria());
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                outcome.notice().emit();
                print_results(&outcome.results);
            }
        }
        Commands::Report { filters, out } => {
            let listing = load_listing(&settings)?;
            let criteria = filters.criteria();
            let outcome = settings.filter_engine().apply(&listing, &criteria);
            let report = report::build_report(
                &criteria,
                chrono::Local::now().date_naive(),
                &outcome.results,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            outcome.notice().emit();
            println!("Report written to {}.", out.display());
        }
        Commands::Classify { utterance } => {
            let utterance = utterance.join(" ");
            let action = voice::classify(&utterance);
            tracing::info!(%utterance, ?action, "classified");
            match action.route() {
                Some(route) => println!("{action:?} -> {route}"),
                None => println!("{action:?}"),
            }
        }
        Commands::Voice => {
            let assistant = match VoiceAssistant::new(
                LineCapture::new(settings.voice_input),
                TracingSynthesis,
                settings.listen_timeout(),
            ) {
                Ok(assistant) => assistant,
                Err(err) => {
                    err.notice().emit();
                    return Ok(());
                }
            };

            Notice::info(
                "Voice Recognition Active",
                "Listening... Please speak your command.",
            )
            .emit();
            match assistant.listen_and_classify().await {
                Ok(outcome) => {
                    Notice::heard(&outcome.utterance).emit();
                    outcome.action.notice().emit();
                    if outcome.action.is_navigation() {
                        println!("Next: {}", outcome.action.route().unwrap_or("/"));
                    }
                }
                Err(err) => {
                    tracing::debug!(error = %err, "voice capture failed");
                    err.notice().emit();
                }
            }
        }
        Commands::Apply { id } => {
            let listing = load_listing(&settings)?;
            match catalog::find_by_id(&listing, &id) {
                Some(record) => {
                    tracing::info!(id = %record.id, title = %record.title, "apply requested");
                    Notice::login_required().emit();
                    println!("Next: /login");
                }
                None => Notice::destructive(
                    "Internship Not Found",
                    format!("No internship with id {id:?}."),
                )
                .emit(),
            }
        }
        Commands::Login => Notice::backend_not_connected("Login").emit(),
        Commands::Register => Notice::backend_not_connected("Registration").emit(),
        Commands::Eligibility {
            age,
            income,
            education,
            no_english_or_hindi,
        } => {
            let report = eligibility::check_eligibility(&ApplicantProfile {
                age,
                annual_family_income_lakhs: income,
                education,
                speaks_english_or_hindi: !no_english_or_hindi,
            });
            if report.is_eligible() {
                Notice::info("Eligible", "You meet the quick eligibility criteria.").emit();
            } else {
                let reasons = report
                    .failures()
                    .filter_map(|rule| rule.reason.as_deref())
                    .collect::<Vec<_>>()
                    .join("; ");
                Notice::destructive("Not Eligible", reasons).emit();
            }
        }
        Commands::Validate { path } => {
            let records = catalog::load_catalog(&path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            println!("{} holds {} listings.", path.display(), records.len());
        }
    }

    Ok(())
}
