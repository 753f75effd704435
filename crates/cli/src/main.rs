//! Storefront CLI - sign in, manage the session and the guest cart.
//!
//! # Usage
//!
//! ```bash
//! # Add items to the guest cart before signing in
//! sf cart add P1 -q 2 --size M
//!
//! # Sign in (merges the guest cart into the server cart)
//! sf login -e sam@shop.example -p secret1
//!
//! # Who is signed in?
//! sf whoami
//!
//! # Show the server cart (signed in) or the guest cart (signed out)
//! sf cart show
//!
//! # Sign out
//! sf logout
//! ```
//!
//! # Commands
//!
//! - `login` - Run the login flow
//! - `logout` - End the session
//! - `whoami` - Show the restored session
//! - `cart add|show|clear` - Guest cart management

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use storefront_client::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod console;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "sf")]
#[command(author, version, about = "Storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and merge the guest cart
    Login {
        /// Email address or username
        #[arg(short, long)]
        email: String,

        /// Password (6-20 characters)
        #[arg(short, long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the guest cart
    Add {
        /// Product reference
        product: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Size or variant label
        #[arg(short, long)]
        size: Option<String>,

        /// Unit price
        #[arg(long)]
        price: Option<Decimal>,
    },
    /// Show the server cart when signed in, otherwise the guest cart
    Show,
    /// Empty the guest cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout carries command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_client=info,storefront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            console::failure(&e.to_string());
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config).await {
        tracing::debug!("Command failed: {e}");
        if !e.already_reported() {
            console::failure(&e.to_string());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), CliError> {
    let ctx = Context::new(config)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Cart { action } => match action {
            CartAction::Add {
                product,
                quantity,
                size,
                price,
            } => commands::cart::add(&ctx, product, quantity, size, price)?,
            CartAction::Show => commands::cart::show(&ctx).await?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
    }
    Ok(())
}
