use anyhow::{Context as AnyhowContext, Result};
use atlas_cli::command::{
    AreaOutput, AreasOutput, CacheClearOutput, CacheStatusOutput, CommandAction, CommandDefaults,
    CommandHandler, CommandRequest, CommandResponse, CommandStatus, DescribeOutput, FindOutput,
    HintKind, MapOutput,
};
use atlas_protocol::{Dialect, RecoveryHint};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Project maps, feature areas and forgiving file lookup", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Render follow-up commands as JSON tool calls instead of shell commands
    #[arg(long, global = true)]
    agent: bool,

    /// Print the full JSON response
    #[arg(long, global = true)]
    json: bool,

    /// Maximum alternatives listed when a target is not found
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON Command API request
    Command(CommandArgs),

    /// Classify every source file and group it into feature areas
    Map(MapArgs),

    /// Feature areas with file counts
    Areas,

    /// Files in one feature area (id, name or alias)
    Area {
        reference: String,
    },

    /// Resolve a loose file reference to a project path
    Find {
        query: String,
    },

    /// Category, areas and description of one file
    Describe {
        target: String,
    },

    /// Inspect or reset the artifact cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show whether cached artifacts match the current tree
    Status,
    /// Drop cached artifacts and metadata
    Clear,
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(conflicts_with = "file")]
    request: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct MapArgs {
    /// Rebuild even when the cached map is fresh
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.target(env_logger::Target::Stderr).init();

    let dialect = match (&cli.command, cli.agent) {
        (Commands::Command(_), _) | (_, true) => Dialect::ToolCall,
        _ => Dialect::Terminal,
    };
    let handler = CommandHandler::new(CommandDefaults {
        root: cli.root.clone(),
        dialect,
        hint_limit: cli.limit,
    });

    match cli.command {
        Commands::Command(args) => run_command(&handler, args)?,
        Commands::Map(args) => {
            let request = CommandRequest::new(CommandAction::Map, json!({ "force": args.force }))?;
            present::<MapOutput>(&handler, request, cli.json, print_map)?;
        }
        Commands::Areas => {
            let request = CommandRequest::new(CommandAction::Areas, json!({}))?;
            present::<AreasOutput>(&handler, request, cli.json, print_areas)?;
        }
        Commands::Area { reference } => {
            let request = CommandRequest::new(CommandAction::Area, json!({ "area": reference }))?;
            present::<AreaOutput>(&handler, request, cli.json, print_area)?;
        }
        Commands::Find { query } => {
            let request = CommandRequest::new(CommandAction::Find, json!({ "query": query }))?;
            present::<FindOutput>(&handler, request, cli.json, |out| println!("{}", out.path))?;
        }
        Commands::Describe { target } => {
            let request = CommandRequest::new(CommandAction::Describe, json!({ "file": target }))?;
            present::<DescribeOutput>(&handler, request, cli.json, print_describe)?;
        }
        Commands::Cache { command } => match command {
            CacheCommands::Status => {
                let request = CommandRequest::new(CommandAction::CacheStatus, json!({}))?;
                present::<CacheStatusOutput>(&handler, request, cli.json, print_cache_status)?;
            }
            CacheCommands::Clear => {
                let request = CommandRequest::new(CommandAction::CacheClear, json!({}))?;
                present::<CacheClearOutput>(&handler, request, cli.json, |out| {
                    println!("Cleared {} ({})", out.cache_dir, out.hooks.join(", "));
                })?;
            }
        },
    }

    Ok(())
}

fn run_command(handler: &CommandHandler, args: CommandArgs) -> Result<()> {
    let raw = read_payload(&args)?;
    let response = match serde_json::from_str::<CommandRequest>(&raw) {
        Ok(request) => handler.respond(request),
        Err(err) => {
            let message = format!("Invalid command request: {err}");
            let hints = atlas_cli::command::classify_error(&message);
            CommandResponse::error_with_hints(message, hints)
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.request {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Pass it inline, with --file, or via stdin.");
    }

    Ok(buffer)
}

/// Run `request` and print the response as JSON or through `print`.
fn present<T: DeserializeOwned>(
    handler: &CommandHandler,
    request: CommandRequest,
    json: bool,
    print: impl FnOnce(T),
) -> Result<()> {
    let response = handler.respond(request);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        if response.is_error() {
            std::process::exit(1);
        }
        return Ok(());
    }

    for hint in &response.hints {
        match hint.kind {
            HintKind::Warn => eprintln!("warning: {}", hint.text),
            _ => log::info!("{}", hint.text),
        }
    }

    match response.status {
        CommandStatus::Error => {
            eprintln!(
                "Error: {}",
                response.message.as_deref().unwrap_or("Unknown error")
            );
            for hint in response.hints.iter().filter(|h| h.kind == HintKind::Action) {
                eprintln!("  {}", hint.text);
            }
            std::process::exit(1);
        }
        CommandStatus::NotFound => {
            let hint: RecoveryHint = serde_json::from_value(response.data)?;
            print!("{hint}");
        }
        CommandStatus::Ok => print(serde_json::from_value(response.data)?),
    }
    Ok(())
}

fn print_map(map: MapOutput) {
    println!("{} files, {} areas", map.files.len(), map.areas.len());
    for (category, count) in &map.categories {
        println!("  {:<12} {count}", category.label());
    }
    println!();
    for entry in &map.files {
        let areas: Vec<&str> = entry.areas.iter().map(String::as_str).collect();
        if areas.is_empty() {
            println!("{}  [{}]", entry.path, entry.category.label());
        } else {
            println!(
                "{}  [{}]  {}",
                entry.path,
                entry.category.label(),
                areas.join(", ")
            );
        }
    }
}

fn print_areas(out: AreasOutput) {
    if out.areas.is_empty() {
        println!("No areas detected.");
        return;
    }
    for area in &out.areas {
        let origin = if area.auto_detected { " (inferred)" } else { "" };
        println!(
            "{:<20} {:>5} files  {}{origin}",
            area.id, area.file_count, area.name
        );
    }
}

fn print_area(out: AreaOutput) {
    println!(
        "{} ({}): {} files",
        out.area.name, out.area.id, out.area.file_count
    );
    if let Some(description) = &out.area.description {
        println!("{description}");
    }
    for entry in &out.files {
        println!("  {}  [{}]", entry.path, entry.category.label());
    }
}

fn print_describe(out: DescribeOutput) {
    println!("{}", out.path);
    println!("  category: {}", out.category.label());
    if !out.areas.is_empty() {
        let areas: Vec<&str> = out.areas.iter().map(String::as_str).collect();
        println!("  areas: {}", areas.join(", "));
    }
    if let Some(description) = &out.description {
        println!("  {description}");
    }
    if !out.imports.is_empty() {
        println!("  imports: {}", out.imports.join(", "));
    }
    if !out.imported_by.is_empty() {
        println!("  imported by: {}", out.imported_by.join(", "));
    }
}

fn print_cache_status(out: CacheStatusOutput) {
    if out.fresh {
        println!("fresh ({})", out.fingerprint);
    } else {
        let reasons: Vec<&str> = out.reasons.iter().map(|r| r.describe()).collect();
        println!("stale: {}", reasons.join(", "));
        println!("  current: {}", out.fingerprint);
        if let Some(stored) = &out.stored_fingerprint {
            println!("  stored:  {stored}");
        }
    }
    println!("  cache: {}", out.cache_dir);
}
