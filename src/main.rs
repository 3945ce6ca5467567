use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use seo_insights::format::{failure_notice, format_metadata, format_report, GENERIC_NOTICE};
use seo_insights::{Config, InsightPipeline, ValidationLevel};

fn build_cli() -> Command {
    let command = Command::new("SEO Insights")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Generate SEO tags, timestamps and fixes for a YouTube video")
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("YouTube watch, short-link or embed URL"),
        )
        .arg(
            Arg::new("metadata-only")
                .short('m')
                .long("metadata-only")
                .help("Only fetch and print video metadata")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject AI output whose counts do not match the request")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print JSON instead of text")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Completion service API key (overrides OPENAI_API_KEY)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        );

    #[cfg(feature = "api")]
    let command = command
        .arg(
            Arg::new("serve")
                .long("serve")
                .help("Run the HTTP API instead of a single lookup")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port for the HTTP API")
                .value_parser(clap::value_parser!(u16)),
        );

    command
}

fn load_config(matches: &ArgMatches) -> Config {
    let loaded = match matches.get_one::<String>("config") {
        Some(path) => Config::load_from(&PathBuf::from(path)),
        None => Config::load(),
    };

    let mut config = loaded
        .unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {}", e);
            Config::default().with_env_overrides()
        })
        .with_api_key(matches.get_one::<String>("api-key").cloned());

    if matches.get_flag("strict") {
        config.validation.level = ValidationLevel::Strict;
    }
    if matches.get_flag("json") {
        config.output.json = true;
    }

    config
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("seo_insights=debug,seo_llm=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.output.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let matches = build_cli().get_matches();

    let config = load_config(&matches);
    init_logging(&config, matches.get_flag("verbose"));

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("{}", GENERIC_NOTICE);
        return Ok(ExitCode::FAILURE);
    }
    info!("🔧 {}", config.summary());

    let pipeline = match InsightPipeline::new(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Failed to initialize pipeline: {}", e);
            eprintln!("{}", GENERIC_NOTICE);
            return Ok(ExitCode::FAILURE);
        }
    };

    #[cfg(feature = "api")]
    if matches.get_flag("serve") {
        return serve(pipeline, config, &matches).await;
    }

    let Some(url) = matches.get_one::<String>("url") else {
        build_cli().print_help()?;
        return Ok(ExitCode::from(2));
    };

    info!("🚀 SEO Insights starting...");

    let outcome = if matches.get_flag("metadata-only") {
        pipeline.metadata(url).await.map(|metadata| {
            if config.output.json {
                serde_json::to_string_pretty(&metadata).unwrap_or_else(|_| format!("{:?}", metadata))
            } else {
                format_metadata(&metadata)
            }
        })
    } else {
        pipeline.run(url).await.map(|output| {
            if config.output.json {
                serde_json::to_string_pretty(&output).unwrap_or_else(|_| format!("{:?}", output))
            } else {
                format_report(&output.metadata, &output.insights)
            }
        })
    };

    match outcome {
        Ok(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("❌ {}", e);
            eprintln!("{}", failure_notice(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(feature = "api")]
async fn serve(pipeline: InsightPipeline, mut config: Config, matches: &ArgMatches) -> Result<ExitCode> {
    use seo_insights::api::ApiServer;
    use std::sync::Arc;

    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    if !pipeline.has_credential() {
        tracing::warn!("No API key configured; /api/insights requests must supply one");
    }

    ApiServer::new(Arc::new(pipeline), Arc::new(config)).start().await?;
    Ok(ExitCode::SUCCESS)
}
