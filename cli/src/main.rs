use std::path::PathBuf;
use std::sync::Arc;

use approval::config::ApprovalConfig;
use approval::net::api::{ApprovalClient, ApprovalError};
use approval::pages::request::RequestPage;
use approval::pages::result::ResultPage;
use clap::{Parser, Subcommand};
use client::app::Route;
use client::config::{ClientConfig, normalize_base_url};
use client::net::api::ApiClient;
use client::net::error::ApiError;
use client::net::session::SessionService;
use client::pages::home::HomePage;
use client::pages::login::LoginPage;
use client::state::auth::SessionContext;
use client::state::jar::FileJar;
use client::state::ui::Notices;
use client::util::auth::password_strength;
use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("session config: {0}")]
    Config(#[from] client::config::ConfigError),
    #[error("approval config: {0}")]
    ApprovalConfig(#[from] approval::config::ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("approval service unavailable: {0}")]
    Approval(#[from] ApprovalError),
    #[error("not logged in; run `lab-cli login` first")]
    NotLoggedIn,
    #[error("login failed")]
    LoginFailed,
    #[error("approval request not submitted")]
    NotSubmitted,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "lab-cli", about = "Session and approval lab client")]
struct Cli {
    /// Overrides `SESSION_API_BASE_URL` from the environment config.
    #[arg(long, env = "SESSION_API_BASE_URL")]
    base_url: Option<String>,

    /// Overrides `APPROVAL_BASE_URL` from the environment config.
    #[arg(long, env = "APPROVAL_BASE_URL")]
    approval_base_url: Option<String>,

    #[arg(long, env = "LAB_COOKIE_FILE", default_value = ".lab-session")]
    cookie_file: PathBuf,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token in the cookie file.
    Login {
        #[arg(long, required_unless_present = "test_account")]
        username: Option<String>,
        #[arg(long, required_unless_present = "test_account")]
        password: Option<String>,
        /// Use the demo account.
        #[arg(long, default_value_t = false)]
        test_account: bool,
    },
    /// Show user info, permissions and profile.
    Home,
    Logout,
    Validate,
    UserId,
    Health {
        #[arg(long, default_value_t = false)]
        detailed: bool,
    },
    /// Rate a password without contacting the server.
    Strength { password: String },
    /// Submit an approval request and show the decision.
    Approve {
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,
        #[arg(long, default_value = "")]
        purpose: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    match &cli.command {
        Command::Strength { password } => {
            run_strength(password);
            Ok(())
        }
        Command::Approve { amount, purpose } => run_approve(&cli, *amount, purpose).await,
        Command::Login { username, password, test_account } => {
            let (service, config) = session_service(&cli)?;
            run_login(&service, &config, username.as_deref(), password.as_deref(), *test_account).await
        }
        Command::Home => run_home(&session_service(&cli)?.0).await,
        Command::Logout => run_logout(&session_service(&cli)?.0).await,
        Command::Validate => {
            let ack = session_service(&cli)?.0.validate_token().await?;
            println!("{ack}");
            Ok(())
        }
        Command::UserId => {
            let id = session_service(&cli)?.0.current_user_id().await?;
            println!("{}", id.user_id);
            Ok(())
        }
        Command::Health { detailed } => run_health(&session_service(&cli)?.0, *detailed).await,
    }
}

fn session_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config.api_base_url = normalize_base_url(url);
    }
    Ok(config)
}

fn approval_config(cli: &Cli) -> Result<ApprovalConfig, CliError> {
    let mut config = ApprovalConfig::from_env()?;
    if let Some(url) = &cli.approval_base_url {
        config.base_url = url.trim().trim_end_matches('/').to_owned();
    }
    Ok(config)
}

fn print_notices(notices: &mut Notices) {
    for notice in notices.drain() {
        eprintln!("{notice}");
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

// =============================================================================
// SESSION COMMANDS
// =============================================================================

/// Session service over the cookie file, plus the config it was built from.
fn session_service(cli: &Cli) -> Result<(SessionService, ClientConfig), CliError> {
    let config = session_config(cli)?;
    let session = SessionContext::new(Arc::new(FileJar::new(&cli.cookie_file))).with_secure(config.cookie_secure);
    let service = SessionService::new(ApiClient::new(&config, session)?);
    Ok((service, config))
}

async fn run_logout(service: &SessionService) -> Result<(), CliError> {
    let mut page = HomePage::new();
    let route = page.logout(service).await;
    print_notices(&mut page.notices);
    println!("-> {route}");
    Ok(())
}

async fn run_health(service: &SessionService, detailed: bool) -> Result<(), CliError> {
    if detailed {
        return print_json(&service.detailed_health_check().await?);
    }
    let health = service.health_check().await?;
    print_json(&serde_json::to_value(&health)?)
}

async fn run_login(
    service: &SessionService,
    config: &ClientConfig,
    username: Option<&str>,
    password: Option<&str>,
    test_account: bool,
) -> Result<(), CliError> {
    if let Some(route) = LoginPage::mount(service.session()) {
        println!("already logged in -> {route}");
        return Ok(());
    }

    let mut page = LoginPage::new().with_token_ttl_days(config.token_ttl_days);
    if test_account {
        page.fill_test_account();
    }
    if let Some(username) = username {
        page.set_username(username);
    }
    if let Some(password) = password {
        page.set_password(password);
    }

    let route = page.submit(service).await;
    print_notices(&mut page.notices);
    match route {
        Some(Route::Home) => {
            println!("-> {}", Route::Home);
            Ok(())
        }
        _ => {
            let errors = page.errors();
            for msg in [errors.username, errors.password].into_iter().flatten() {
                eprintln!("{msg}");
            }
            Err(CliError::LoginFailed)
        }
    }
}

async fn run_home(service: &SessionService) -> Result<(), CliError> {
    if HomePage::mount(service.session()).is_some() {
        return Err(CliError::NotLoggedIn);
    }

    let mut page = HomePage::new();
    let redirect = page.load(service).await;
    print_notices(&mut page.notices);
    if redirect == Some(Route::Login) {
        return Err(CliError::NotLoggedIn);
    }
    print!("{}", page.render());
    Ok(())
}

fn run_strength(password: &str) {
    let strength = password_strength(password);
    println!("{strength} ({}%)", strength.meter_percent());
}

// =============================================================================
// APPROVAL COMMANDS
// =============================================================================

async fn run_approve(cli: &Cli, amount: Option<f64>, purpose: &str) -> Result<(), CliError> {
    let client = ApprovalClient::new(&approval_config(cli)?)?;

    let mut page = RequestPage::new();
    page.set_amount(amount);
    page.set_purpose(purpose);

    let Some(state) = page.submit(&client).await else {
        let errors = page.errors();
        for msg in [errors.amount, errors.purpose].into_iter().flatten() {
            eprintln!("{msg}");
        }
        if let Some(notice) = page.notice.take() {
            eprintln!("[error] {notice}");
        }
        return Err(CliError::NotSubmitted);
    };

    print!("{}", ResultPage::new(Some(state)).view());
    Ok(())
}
