//! pulumi-resource-awsworkmail: lifecycle operations for AWS WorkMail resources
//!
//! Each subcommand performs one create, delete or diff and prints the result
//! as JSON on stdout. Logs go to stderr.

use anyhow::{Result, bail};
use awsworkmail_common::ResourceKind;
use awsworkmail_common::defaults::{
    DEFAULT_CREATE_TIMEOUT_SECS, DEFAULT_DELETE_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS,
};
use awsworkmail_provider::document::{STDIN, read_document};
use awsworkmail_provider::{PollConfig, Provider, ProviderConfig, ProviderError, classify_error};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "pulumi-resource-awsworkmail")]
#[command(about = "Lifecycle operations for AWS WorkMail resources")]
#[command(version)]
struct Args {
    /// AWS profile to use for credentials
    #[arg(long, env = "AWS_PROFILE", global = true)]
    aws_profile: Option<String>,

    /// Region for resources that don't specify one
    #[arg(long, env = "AWS_REGION", global = true)]
    region: Option<String>,

    /// Seconds between status checks while waiting on an organization
    #[arg(
        long,
        env = "AWSWORKMAIL_POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        global = true
    )]
    poll_interval: u64,

    /// Back off exponentially between checks, up to this many seconds
    #[arg(long, env = "AWSWORKMAIL_POLL_MAX_INTERVAL_SECS", global = true)]
    poll_max_interval: Option<u64>,

    /// Maximum seconds to wait for an organization to become active
    #[arg(
        long,
        env = "AWSWORKMAIL_CREATE_TIMEOUT_SECS",
        default_value_t = DEFAULT_CREATE_TIMEOUT_SECS,
        global = true
    )]
    create_timeout: u64,

    /// Maximum seconds to wait for an organization to be deleted
    #[arg(
        long,
        env = "AWSWORKMAIL_DELETE_TIMEOUT_SECS",
        default_value_t = DEFAULT_DELETE_TIMEOUT_SECS,
        global = true
    )]
    delete_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

impl From<&Args> for ProviderConfig {
    fn from(args: &Args) -> Self {
        Self {
            aws_profile: args.aws_profile.clone(),
            default_region: args.region.clone(),
            poll: PollConfig {
                interval: Duration::from_secs(args.poll_interval),
                max_interval: args.poll_max_interval.map(Duration::from_secs),
                create_timeout: Duration::from_secs(args.create_timeout),
                delete_timeout: Duration::from_secs(args.delete_timeout),
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a resource and print its id and properties
    Create {
        /// Resource type token, e.g. awsworkmail:index:Organization
        #[arg(long = "type")]
        type_token: String,

        /// Logical resource name, used as the id during preview
        #[arg(long)]
        name: String,

        /// JSON inputs file, or - for stdin
        #[arg(long, default_value = STDIN)]
        inputs: String,

        /// Validate and echo the inputs without calling AWS
        #[arg(long)]
        preview: bool,
    },

    /// Delete a resource given its id and stored state
    Delete {
        #[arg(long = "type")]
        type_token: String,

        #[arg(long)]
        id: String,

        /// JSON state file, or - for stdin
        #[arg(long, default_value = STDIN)]
        state: String,
    },

    /// Compare stored state against new inputs and print the diff
    Diff {
        #[arg(long = "type")]
        type_token: String,

        #[arg(long)]
        id: Option<String>,

        /// JSON file with the stored state
        #[arg(long)]
        olds: String,

        /// JSON file with the new inputs
        #[arg(long)]
        news: String,
    },

    /// Print the provider schema
    Schema,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(
        stderr,
        "\n\x1b[1;31mError ({}):\x1b[0m {e}",
        classify_error(e)
    );

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
                .add_directive("aws_config=warn".parse()?)
                .add_directive("aws_smithy_runtime=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(profile) = &args.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-progress wait");
            interrupt.cancel();
        }
    });

    let provider = Provider::new(ProviderConfig::from(&args)).with_cancellation(cancel);

    match args.command {
        Command::Create {
            type_token,
            name,
            inputs,
            preview,
        } => {
            let kind: ResourceKind = type_token.parse().map_err(ProviderError::from)?;
            let inputs = read_document(&inputs)?;
            let response = provider.create(kind, &name, inputs, preview).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Delete {
            type_token,
            id,
            state,
        } => {
            let kind: ResourceKind = type_token.parse().map_err(ProviderError::from)?;
            let state = read_document(&state)?;
            provider.delete(kind, &id, state).await?;
            info!(kind = %kind, id = %id, "Resource deleted");
        }

        Command::Diff {
            type_token,
            id,
            olds,
            news,
        } => {
            if olds == STDIN && news == STDIN {
                bail!("--olds and --news cannot both be read from stdin");
            }
            let kind: ResourceKind = type_token.parse().map_err(ProviderError::from)?;
            info!(kind = %kind, id = ?id, "Computing diff");
            let response =
                awsworkmail_provider::diff(kind, read_document(&olds)?, read_document(&news)?)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Schema => {
            let schema = awsworkmail_common::provider_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
