use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowgazer_cli::cli::replay::filters_to_json;
use flowgazer_cli::cli::{build_runtime, read_capture, replay, CliConfig};
use flowgazer_cli::tracing_setup::init_tracing;
use flowgazer_core::{FeedRuntime, Tab};
use nostr_sdk::PublicKey;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "flowgazer")]
#[command(about = "Replay captured relay traffic through the flowgazer timelines")]
struct Cli {
    /// Path to JSON config file (defaults to <config dir>/flowgazer/config.json)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Pubkey of the local identity, hex or npub (overrides the config)
    #[arg(long, global = true)]
    me: Option<String>,

    /// Accept events without checking signatures
    #[arg(long, global = true)]
    no_verify: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a tab after replaying a capture
    Timeline {
        /// File with one relay frame per line
        capture: PathBuf,
        /// global, following, myposts or likes
        #[arg(long, short, default_value = "global")]
        tab: String,
        /// Include channel messages in public tabs
        #[arg(long)]
        show_channels: bool,
        /// Only notes posted with this client
        #[arg(long)]
        client_only: bool,
        /// Restrict global to these authors (repeatable)
        #[arg(long = "author")]
        authors: Vec<String>,
        /// Hide public notes containing this word (repeatable)
        #[arg(long = "forbid")]
        forbidden_words: Vec<String>,
    },

    /// Print store statistics after replaying a capture
    Stats {
        capture: PathBuf,
    },

    /// Print the relay filter for the next older page of a tab
    LoadMore {
        capture: PathBuf,
        #[arg(long, short, default_value = "global")]
        tab: String,
    },

    /// Print the main timeline subscription filters
    Filters {
        capture: Option<PathBuf>,
    },

    /// Write the effective config to the config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_tab(name: &str) -> Result<Tab> {
    name.parse::<Tab>()
        .context("Expected one of: global, following, myposts, likes")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

async fn replay_capture(config: &CliConfig, capture: Option<&PathBuf>) -> Result<FeedRuntime> {
    let messages = match capture {
        Some(path) => read_capture(path)?,
        None => Vec::new(),
    };
    let (runtime, _) = build_runtime(config);
    Ok(replay(runtime, messages).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = CliConfig::resolve(cli.config.as_deref())?;
    if let Some(me) = &cli.me {
        let pubkey = PublicKey::parse(me).with_context(|| format!("Invalid pubkey: {}", me))?;
        config.me = Some(pubkey.to_hex());
    }
    if cli.no_verify {
        config.verify_signatures = false;
    }

    match cli.command {
        Commands::Timeline {
            capture,
            tab,
            show_channels,
            client_only,
            authors,
            forbidden_words,
        } => {
            let tab = parse_tab(&tab)?;
            if show_channels {
                config.feed.show_channel_messages = true;
            }
            config.feed.forbidden_words.extend(forbidden_words);

            let messages = read_capture(&capture)?;
            let (mut runtime, snapshot) = build_runtime(&config);
            if client_only {
                runtime.toggle_client_only();
            }
            if !authors.is_empty() {
                runtime.apply_author_filter(authors);
            }
            let mut runtime = replay(runtime, messages).await;
            runtime.switch_tab(tab);

            let snapshot = snapshot.borrow();
            if cli.json {
                print_json(&*snapshot)?;
            } else {
                for line in &snapshot.lines {
                    println!("{}", line.to_text());
                }
                eprintln!("{} events in {}", snapshot.lines.len(), tab);
            }
        }
        Commands::Stats { capture } => {
            let runtime = replay_capture(&config, Some(&capture)).await?;
            let stats = runtime.store().stats();
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("events:    {}", stats.total_events);
                println!("profiles:  {}", stats.profiles);
                println!("following: {}", stats.following);
                for (kind, count) in &stats.kind_counts {
                    println!("kind {:>5}: {}", kind, count);
                }
            }
        }
        Commands::LoadMore { capture, tab } => {
            let tab = parse_tab(&tab)?;
            let runtime = replay_capture(&config, Some(&capture)).await?;
            let router = runtime.router();
            let until = router.oldest_timestamp(tab);
            match router.build_load_more_filter(runtime.store(), tab, until) {
                Some(filter) => {
                    for json in filters_to_json(&[filter])? {
                        println!("{}", json);
                    }
                }
                None => {
                    eprintln!("{} cannot load more right now", tab);
                    std::process::exit(1);
                }
            }
        }
        Commands::Filters { capture } => {
            let runtime = replay_capture(&config, capture.as_ref()).await?;
            let filters = runtime.router().main_timeline_filters(runtime.store());
            for json in filters_to_json(&filters)? {
                println!("{}", json);
            }
        }
        Commands::InitConfig { force } => {
            let path = match cli.config.clone().or_else(CliConfig::default_path) {
                Some(path) => path,
                None => anyhow::bail!("No config directory available; pass --config"),
            };
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force)", path.display());
            }
            config.save(&path)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
