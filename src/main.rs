//! Court Dashboard CLI
//!
//! Opens dashboard pages against the case management backend and prints them.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use court_dashboard::models::{CaseAnalysisRequest, CaseStatus, CourtLevel, Jurisdiction, UrgencyLevel};
use court_dashboard::notify::Level;
use court_dashboard::routes::Route;
use court_dashboard::views::calendar::CalendarMode;
use court_dashboard::views::courts::CourtsTab;
use court_dashboard::views::documents;
use court_dashboard::{Config, Dashboard, PageInput, Screen};

#[derive(Parser)]
#[command(name = "court-dashboard", version, about = "Court case management dashboard")]
struct Cli {
    /// Backend base URL (overrides COURT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Token file (overrides COURT_TOKEN_PATH)
    #[arg(long, global = true)]
    token_path: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Open a page by path, e.g. `/cases` or `/cases/42`
    Open {
        path: String,
        /// Case status filter
        #[arg(long)]
        status: Option<String>,
        /// Case urgency filter
        #[arg(long)]
        urgency: Option<String>,
        /// Judge specialization filter
        #[arg(long)]
        specialization: Option<String>,
        /// Client-side search text for lists
        #[arg(long, default_value = "")]
        search: String,
        /// Calendar reference date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Calendar mode: day, week or month
        #[arg(long, default_value = "week")]
        mode: String,
        /// Case to schedule
        #[arg(long)]
        case_id: Option<i64>,
        /// Courts tab: list, hierarchy or stats
        #[arg(long, default_value = "list")]
        tab: String,
        /// Court level filter
        #[arg(long)]
        level: Option<String>,
        /// Case facts to analyze on the predictions page
        #[arg(long)]
        facts: Option<String>,
        /// Case number for the delay portal
        #[arg(long)]
        case_number: Option<String>,
    },
    /// Upload a document to a case
    Upload {
        #[arg(long)]
        case_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "other")]
        document_type: String,
        #[arg(long)]
        public: bool,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(path) = cli.token_path {
        config.token_path = path;
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Backend: {}", config.api_url);
    tracing::debug!("Token file: {:?}", config.token_path);

    let dashboard = Dashboard::new(&config)?;

    let outcome = match cli.command {
        Command::Login { email, password } => {
            dashboard.mount().await;
            dashboard.login(&email, &password).await.map(|user| {
                println!("Signed in as {} ({})", user.full_name, user.role.label());
            })
        }
        Command::Logout => dashboard.logout().map(|()| println!("Signed out")),
        Command::Whoami => {
            match dashboard.mount().await.user() {
                Some(user) => println!("{} <{}> {}", user.full_name, user.email, user.role.label()),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Open {
            path,
            status,
            urgency,
            specialization,
            search,
            date,
            mode,
            case_id,
            tab,
            level,
            facts,
            case_number,
        } => {
            dashboard.mount().await;
            let route = Route::parse(&path);
            let mut input = PageInput {
                calendar_mode: CalendarMode::parse(&mode).unwrap_or_default(),
                selected_case: case_id,
                courts_tab: CourtsTab::parse(&tab).unwrap_or_default(),
                court_level: level.as_deref().and_then(CourtLevel::parse),
                analysis: facts.map(|facts_text| CaseAnalysisRequest {
                    facts_text,
                    ..CaseAnalysisRequest::default()
                }),
                case_number,
                ..PageInput::default()
            };
            input.case_filters.status = status.as_deref().and_then(CaseStatus::parse);
            input.case_filters.urgency = urgency.as_deref().and_then(UrgencyLevel::parse);
            input.case_filters.search = search.clone();
            input.judge_filters.specialization =
                specialization.as_deref().and_then(Jurisdiction::parse);
            input.judge_filters.search = search.clone();
            input.search = search;
            if let Some(date) = date {
                input.date = date;
            }

            match dashboard.open(&route, &input).await {
                Screen::Placeholder => println!("Loading..."),
                Screen::Redirect(target) => println!("Redirected to {}", target),
                Screen::Page(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
            }
            Ok(())
        }
        Command::Upload {
            case_id,
            title,
            document_type,
            public,
            file,
        } => {
            dashboard.mount().await;
            let ctx = dashboard.context();
            documents::upload(&ctx, case_id, &title, &document_type, public, &file)
                .await
                .map(|doc| println!("Uploaded document {} ({})", doc.id, doc.title))
        }
    };

    for note in dashboard.notifications().drain() {
        match note.level {
            Level::Error => eprintln!("error: {}", note.message),
            _ => eprintln!("{}", note.message),
        }
    }

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
