// CLI modules
mod args;
mod op;
mod ops;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Bootstrap, ContentKey, Hash, Init, LookupHash, Version};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use state::AppState;

command_enum! {
    (Bootstrap, Bootstrap),
    (ContentKey, ContentKey),
    (Hash, Hash),
    (Init, Init),
    (LookupHash, LookupHash),
    (Version, Version),
}

/// Log to stderr so stdout carries only command output
fn init_logging(level: &str) {
    let level = level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Warning: unknown log level '{}', using warn", level);
        LevelFilter::WARN
    });

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Flags win over config.toml; an uninitialized directory uses defaults
    let config = match AppState::load_config(args.config_path.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));

    let ctx = op::OpContext::new(
        args.config_path,
        args.passphrase,
        args.output.unwrap_or(config.output),
    );

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
