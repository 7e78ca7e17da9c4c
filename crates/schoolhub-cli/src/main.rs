mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use schoolhub_config::LogConfig;
use schoolhub_core::ListQuery;

use commands::{account, dashboard, policy, records};

#[derive(Parser)]
#[command(name = "schoolhub")]
#[command(about = "SchoolHub CLI - Manage your school from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show the signed-in account
    Whoami {
        /// Fetch the profile from the server instead of the saved session
        #[arg(long)]
        refresh: bool,
    },
    /// Change the password of the signed-in account
    ChangePassword,
    /// List the resources that can be managed
    Resources,
    /// List records of a resource
    List {
        /// Resource key, e.g. `students` or `hostel-buildings`
        resource: String,

        #[arg(short = 's', long)]
        search: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// Extra filter as key=value, e.g. `classId=c-1` (repeatable)
        #[arg(short = 'f', long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        #[arg(long)]
        page: Option<i64>,

        #[arg(long)]
        limit: Option<i64>,

        /// Bypass the cache
        #[arg(long)]
        refresh: bool,
    },
    /// Show one record
    Show {
        resource: String,
        id: String,
        #[arg(long)]
        refresh: bool,
    },
    /// Create a record from a JSON form file
    Create {
        resource: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a record from a JSON form file
    Update {
        resource: String,
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a record
    Delete {
        resource: String,
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show dashboard statistics
    Dashboard {
        #[arg(long)]
        refresh: bool,
    },
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let guard = match logging::init_tracing(&LogConfig::from_env()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("⚠️  Failed to initialize logging: {e}. Continuing without it...");
            None
        }
    };

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ {e:#}");
        drop(guard);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    if let Commands::Resources = command {
        records::print_catalogue();
        return Ok(());
    }

    let client = commands::connect()?;

    match command {
        Commands::Login { email, password } => account::login(&client, email, password).await,
        Commands::Logout => account::logout(&client).await,
        Commands::Whoami { refresh } => account::whoami(&client, refresh).await,
        Commands::ChangePassword => account::change_password(&client).await,
        Commands::Resources => Ok(()),
        Commands::List {
            resource,
            search,
            status,
            filters,
            page,
            limit,
            refresh,
        } => {
            let query = ListQuery {
                search,
                status,
                page,
                limit,
                filters: filters.into_iter().collect(),
            };
            records::list(&client, &resource, &query, policy(refresh)).await
        }
        Commands::Show {
            resource,
            id,
            refresh,
        } => records::show(&client, &resource, &id, policy(refresh)).await,
        Commands::Create { resource, file } => records::create(&client, &resource, &file).await,
        Commands::Update { resource, id, file } => {
            records::update(&client, &resource, &id, &file).await
        }
        Commands::Delete { resource, id, yes } => {
            records::delete(&client, &resource, &id, yes).await
        }
        Commands::Dashboard { refresh } => dashboard::show(&client, policy(refresh)).await,
    }
}
