use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use sysprompt::cli::{Cli, Command, ParamArgs};
use sysprompt::{Config, PromptTemplate, RawParams, RenderOptions, Renderer};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sysprompt")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("sysprompt.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let renderer = config.renderer(cli.catalog.as_deref())?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Roles => cmd_roles(&renderer),
        Command::Keys { role } => cmd_keys(&renderer, role.as_deref()),
        Command::Render {
            key,
            params,
            strict,
            json,
        } => {
            let renderer = if strict {
                renderer.with_options(RenderOptions::strict())
            } else {
                renderer
            };
            cmd_render(&renderer, &key, &params, json)
        }
        Command::Prompt {
            key,
            params,
            human,
            no_history,
            history_slot,
            input,
            json,
        } => {
            let mut options = config.prompt.clone();
            if let Some(slot) = human {
                options = options.human_slot(slot);
            }
            if let Some(slot) = history_slot {
                options = options.history_slot(slot);
            }
            if no_history {
                options = options.without_history();
            }
            let prompt = renderer.build_prompt_from_key(&key, &renderer.resolve(&load_params(&params)?), &options)?;
            cmd_prompt(&prompt, input, json)
        }
    }
}

fn load_params(args: &ParamArgs) -> Result<RawParams> {
    let base = match &args.params {
        Some(path) => {
            let content =
                fs::read_to_string(path).context(format!("Failed to read params file {}", path.display()))?;
            // YAML is a superset of JSON, so one parser covers both
            serde_yaml::from_str::<RawParams>(&content)
                .context(format!("Failed to parse params file {}", path.display()))?
        }
        None => RawParams::default(),
    };
    Ok(base.merge(RawParams::from_pairs(args.set.iter().map(|(k, v)| (k, v.clone())))))
}

fn cmd_roles(renderer: &Renderer) -> Result<()> {
    let catalog = renderer.catalog();
    for id in catalog.roles() {
        let spec = catalog.role(id)?;
        println!("{:<20} {}", id.cyan(), spec.title);
    }
    Ok(())
}

fn cmd_keys(renderer: &Renderer, role: Option<&str>) -> Result<()> {
    let catalog = renderer.catalog();
    if let Some(role) = role {
        // Surface a catalog miss instead of printing nothing
        for variant in catalog.variants_for(role)? {
            println!("{}.{}", role, variant.name);
        }
        return Ok(());
    }

    for key in catalog.list_keys() {
        println!("{}", key);
    }
    Ok(())
}

fn cmd_render(renderer: &Renderer, key: &str, args: &ParamArgs, json: bool) -> Result<()> {
    let params = renderer.resolve(&load_params(args)?);
    let message = renderer.render_system_message(key, &params)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!("{}", message.content);
    }
    Ok(())
}

fn cmd_prompt(prompt: &PromptTemplate, input: Option<String>, json: bool) -> Result<()> {
    match input {
        Some(input) => {
            let messages = prompt.format_input(input, &[])?;
            if json {
                println!("{}", serde_json::to_string_pretty(&messages)?);
            } else {
                for message in messages {
                    println!("{}", message);
                }
            }
        }
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(&prompt.turns())?);
            } else {
                println!("{}", prompt);
            }
        }
    }
    Ok(())
}
