mod backend;
mod store;
mod tasks;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use session::wire::DEFAULT_API_ORIGIN;
use session::{
    AuthError, Clock as _, Role, SessionError, SessionManager, SessionPhase, SessionSnapshot, SystemClock, TokenStatus,
};

use backend::{DEFAULT_TIMEOUT_SECS, ReqwestBackend};
use store::{FileStore, default_session_path};
use tasks::QueueSpawner;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `bms-cli login` first")]
    NotSignedIn,
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("login succeeded but the access token could not be decoded")]
    UnusableToken,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bms-cli", about = "Building-management console session CLI")]
struct Cli {
    #[arg(long, env = "BMS_API_ORIGIN", default_value = DEFAULT_API_ORIGIN)]
    api_origin: String,

    #[arg(long, env = "BMS_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "BMS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the token pair.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BMS_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "resident")]
        role: Role,
    },
    /// Print the profile returned by the IAM service.
    Whoami,
    /// Print the local session state without refreshing.
    Status,
    /// Settle the session, exchanging an expired access token if needed.
    Refresh,
    /// Clear the stored session and revoke the refresh token.
    Logout,
}

type CliSession = SessionManager<FileStore, ReqwestBackend, SystemClock, QueueSpawner>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let backend = ReqwestBackend::new(&cli.api_origin, Duration::from_secs(cli.timeout_secs));
    let store = FileStore::new(cli.session_file.unwrap_or_else(default_session_path));
    tracing::debug!(origin = %cli.api_origin, file = %store.path().display(), "session configured");

    let session = SessionManager::new(store, backend.clone(), SystemClock, QueueSpawner::new());
    let result = run(&session, &backend, cli.command).await;
    // Revoke and any other detached work must finish before the process exits.
    session.spawner().drain().await;
    result
}

async fn run(session: &CliSession, backend: &ReqwestBackend, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            session.restore();
            let pair = backend.login(email.trim(), &password).await?;
            session.login(pair.access_token, pair.refresh_token).await?;
            let user = session.user().ok_or(CliError::UnusableToken)?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Register { email, password, role } => {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(CliError::PasswordTooShort);
            }
            backend.register(email.trim(), &password, role).await?;
            println!("registered {} as {}", email.trim(), role.label());
            Ok(())
        }
        Command::Whoami => {
            session.start().await;
            let token = session.valid_access_token().await.ok_or(CliError::NotSignedIn)?;
            let me = backend.me(&token).await?;
            print_json(&Value::Object(me.user))
        }
        Command::Status => {
            session.restore();
            print_json(&status_json(&session.snapshot(), SystemClock.now_secs()))
        }
        Command::Refresh => {
            session.start().await;
            let snapshot = session.snapshot();
            print_json(&status_json(&snapshot, SystemClock.now_secs()))?;
            if snapshot.access_token.is_none() {
                return Err(CliError::NotSignedIn);
            }
            Ok(())
        }
        Command::Logout => {
            session.restore();
            session.logout();
            println!("signed out");
            Ok(())
        }
    }
}

fn phase_name(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Uninitialized => "uninitialized",
        SessionPhase::Restoring => "restoring",
        SessionPhase::Authenticated => "authenticated",
        SessionPhase::Anonymous => "anonymous",
        SessionPhase::Refreshing => "refreshing",
    }
}

/// Token-free summary of a session for printing.
///
/// The access token is classified locally against `now`; nothing is
/// refreshed or revoked.
fn status_json(snapshot: &SessionSnapshot, now: f64) -> Value {
    let (access_token, user) = match snapshot.access_token.as_deref().map(|t| TokenStatus::evaluate(t, now)) {
        None => ("absent", snapshot.user.clone()),
        Some(TokenStatus::Valid(identity)) => ("valid", Some(identity)),
        Some(TokenStatus::Expired) => ("expired", None),
        Some(TokenStatus::Malformed(_)) => ("malformed", None),
    };
    json!({
        "phase": phase_name(snapshot.phase),
        "accessToken": access_token,
        "hasRefreshToken": snapshot.refresh_token.is_some(),
        "user": user,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
