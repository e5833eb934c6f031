use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_registry::workflow::{self, Console};
use user_registry::{Config, DuplicatePolicy, PhoneRule, UserStore};

#[derive(Parser)]
#[command(name = "user-registry")]
#[command(about = "Interactive in-memory user registry with file persistence")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Registry file to load from and save to")]
    file: Option<PathBuf>,

    #[arg(long, help = "Phone format to accept: digits or international")]
    phone_rule: Option<PhoneRule>,

    #[arg(long, help = "Require credit card numbers to pass the Luhn checksum")]
    enforce_luhn: bool,

    #[arg(long, help = "Duplicate Id handling on registration: reject or overwrite")]
    duplicates: Option<DuplicatePolicy>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the prompts on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_registry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    if let Some(file) = cli.file {
        config.registry_file = file;
    }
    if let Some(rule) = cli.phone_rule {
        config.phone_rule = rule;
    }
    if cli.enforce_luhn {
        config.enforce_luhn = true;
    }
    if let Some(policy) = cli.duplicates {
        config.duplicate_policy = policy;
    }

    tracing::info!(
        "Registry file: {:?}, phone rule: {:?} ({}), luhn: {}, duplicates: {:?}",
        config.registry_file,
        config.phone_rule,
        config.phone_rule.pattern(),
        config.enforce_luhn,
        config.duplicate_policy
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let mut store = UserStore::new();

    workflow::run(&mut console, &mut store, &config)?;

    Ok(())
}
