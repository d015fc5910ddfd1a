//! relbridge - Main entry point.
//!
//! Runs the update bridge for one plugin against the local disk.
//!
//! Usage: relbridge [OPTIONS] <COMMAND>
//!
//! Options:
//!   --config <PATH>   Config file (default: ~/.relbridge.toml)
//!   --version, -v     Show version
//!   --help, -h        Show this help
//!
//! Commands:
//!   check             Print the update offer for the installed plugin
//!   info              Print the details descriptor
//!   relocate <DIR>    Move an extracted package into the plugin directory

use std::env;
use std::path::PathBuf;
use std::process;

use relbridge::config::BridgeConfig;
use relbridge::host::{
    HookExtra, InfoResult, InstallResult, PLUGIN_INFORMATION, PluginInfoArgs, UpdateCache,
};
use relbridge::{Bridge, UpdateHooks, logging};

/// Current version of relbridge.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: relbridge [--config <PATH>] <check|info|relocate <DIR>>";

/// Parsed command line.
struct Args {
    config: Option<PathBuf>,
    command: Command,
}

enum Command {
    Check,
    Info,
    Relocate(PathBuf),
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut config = None;
    let mut command = None;
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => command = Some(Command::Version),
            "--help" | "-h" => command = Some(Command::Help),
            "--config" => {
                let path = iter.next().ok_or("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "check" => command = Some(Command::Check),
            "info" => command = Some(Command::Info),
            "relocate" => {
                let dir = iter.next().ok_or("relocate requires a directory")?;
                command = Some(Command::Relocate(PathBuf::from(dir)));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Args {
        config,
        command: command.ok_or(USAGE)?,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    match args.command {
        Command::Version => {
            println!("relbridge v{}", VERSION);
            return Ok(());
        }
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        _ => {}
    }

    let config = match &args.config {
        Some(path) => BridgeConfig::load_from(path)?,
        None => BridgeConfig::load()?,
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let bridge = Bridge::from_config(&config)?;
    bridge.on_host_ready()?;

    match args.command {
        Command::Check => run_check(&bridge)?,
        Command::Info => run_info(&bridge)?,
        Command::Relocate(dir) => run_relocate(&bridge, dir)?,
        Command::Version | Command::Help => {}
    }

    Ok(())
}

fn run_check(bridge: &Bridge) -> Result<(), Box<dyn std::error::Error>> {
    let Some(identity) = bridge.identity() else {
        return Err("plugin identity unavailable".into());
    };

    let mut cache = UpdateCache {
        last_checked: Some(chrono::Utc::now().timestamp()),
        ..UpdateCache::default()
    };
    cache
        .checked
        .insert(identity.basename.clone(), identity.data.version.clone());

    let cache = bridge.filter_update_cache(cache);
    match cache.response.get(&identity.basename) {
        Some(offer) => println!("{}", serde_json::to_string_pretty(offer)?),
        None => println!(
            "{} v{} is up to date.",
            identity.basename, identity.data.version
        ),
    }
    Ok(())
}

fn run_info(bridge: &Bridge) -> Result<(), Box<dyn std::error::Error>> {
    let Some(identity) = bridge.identity() else {
        return Err("plugin identity unavailable".into());
    };

    let args = PluginInfoArgs::for_slug(identity.slug());
    match bridge.filter_plugin_info(InfoResult::NotHandled, PLUGIN_INFORMATION, &args) {
        InfoResult::Details(details) => println!("{}", serde_json::to_string_pretty(&details)?),
        InfoResult::NotHandled => {
            eprintln!("No release information available.");
            process::exit(1);
        }
    }
    Ok(())
}

fn run_relocate(bridge: &Bridge, dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let extra = HookExtra {
        plugin: bridge.identity().map(|i| i.basename.clone()),
        action: Some("update".to_string()),
    };
    let result = InstallResult {
        source: dir.clone(),
        destination_name: dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        destination: dir,
    };

    let result = bridge.after_install(true, &extra, result)?;
    println!("Installed to {}", result.destination.display());
    Ok(())
}
