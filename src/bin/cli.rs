//! DSA Tracker CLI
//!
//! Terminal front end over the same controller the web UI uses:
//! - Log in, register, log out
//! - Show the dashboard and leaderboard
//! - Record solved problems

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;

use dsa_tracker::config::generate_default_config;
use dsa_tracker::*;

#[derive(Parser)]
#[command(name = "dsa-tracker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track solved DSA problems and compare scores")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login { email: String, password: String },

    /// Create an account and log in
    Register {
        username: String,
        email: String,
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show your stats and recent problems
    Dashboard,

    /// Show the ranking
    Leaderboard,

    /// Record a solved problem
    Add {
        title: String,
        /// Easy, Medium or Hard
        #[arg(short, long, default_value = "Easy")]
        difficulty: Difficulty,
        /// Problem URL
        #[arg(short, long, default_value = "")]
        link: String,
    },

    /// Toggle the stored display theme
    Theme,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_with_env(path)?,
        None => ClientConfig::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    dsa_tracker::logging::init(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Wrote config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let store = Rc::new(FileStore::open_default()?);
    tracing::debug!("Session store: {:?}", store.path());
    let app = Controller::new(
        ReqwestTransport::new(),
        store,
        Rc::new(ManualScheduler::new()),
        &config,
    );
    app.bootstrap().await;

    let result = match cli.command {
        Commands::Login { email, password } => app.login(&email, &password).await,
        Commands::Register {
            username,
            email,
            password,
        } => app.register(&username, &email, &password).await,
        Commands::Logout => {
            app.logout();
            Ok(())
        }
        Commands::Dashboard => require_session(&app),
        Commands::Leaderboard => match require_session(&app) {
            Ok(()) => app.show_leaderboard().await,
            Err(e) => Err(e),
        },
        Commands::Add {
            title,
            difficulty,
            link,
        } => match require_session(&app) {
            Ok(()) => app
                .add_problem(NewProblem::new(title, difficulty, link))
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        },
        Commands::Theme => {
            println!("Theme: {}", app.toggle_theme());
            Ok(())
        }
        Commands::Config { .. } => Ok(()),
    };

    let snapshot = app.snapshot();
    for notification in &snapshot.notifications {
        match notification.kind {
            NotificationKind::Error => eprintln!("✕ {}", notification.message),
            _ => println!("✓ {}", notification.message),
        }
    }

    if let Err(e) = result {
        tracing::debug!("Command failed: {}", e);
        std::process::exit(1);
    }

    match snapshot.view {
        ViewState::Dashboard => {
            if let Some(dashboard) = &snapshot.dashboard {
                print_dashboard(dashboard);
            }
        }
        ViewState::Leaderboard => {
            if let Some(board) = &snapshot.leaderboard {
                print_leaderboard(board);
            }
        }
        ViewState::Auth => {}
    }

    Ok(())
}

/// Bootstrap left us on the auth screen: no usable session
fn require_session<T: HttpTransport, S: KeyValueStore>(
    app: &Controller<T, S>,
) -> ClientResult<()> {
    if app.view_state() == ViewState::Auth {
        eprintln!("Not logged in. Run `dsa-tracker login <email> <password>` first.");
        return Err(ClientError::NotAuthenticated);
    }
    Ok(())
}

fn print_dashboard(dashboard: &DashboardView) {
    println!();
    println!("Welcome back, {}!", dashboard.username);
    println!();
    for stat in &dashboard.stats {
        println!("  {:<16} {:>6}", stat.label, stat.value);
    }
    println!();
    println!("Recent problems:");
    match &dashboard.recent {
        RecentProblems::Placeholder(message) => println!("  {}", message),
        RecentProblems::Items(items) => {
            for item in items {
                println!(
                    "  [{:<6}] {:<40} {:>8}  {}",
                    item.difficulty.as_str(),
                    item.title,
                    item.points_label,
                    item.solved_on
                );
                if let Some(link) = &item.link {
                    println!("           {}", link);
                }
            }
        }
    }
}

fn print_leaderboard(board: &LeaderboardView) {
    println!();
    println!(
        "{:<6} {:<20} {:>7} {:>7} {:>5} {:>7} {:>5}",
        "Rank", "User", "Score", "Solved", "Easy", "Medium", "Hard"
    );
    println!("{}", "-".repeat(64));
    match board {
        LeaderboardView::Placeholder { message, .. } => println!("{}", message),
        LeaderboardView::Rows(rows) => {
            for row in rows {
                println!(
                    "{:<6} {:<20} {:>7} {:>7} {:>5} {:>7} {:>5}",
                    row.rank_label,
                    row.username,
                    row.total_score,
                    row.problems_solved,
                    row.easy_count,
                    row.medium_count,
                    row.hard_count
                );
            }
        }
    }
}
