use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod style;
mod util;

use cli::{Cli, Commands, OutputFormat};
use commands::{ReadingsArgs, SeriesArgs, SubmitArgs, WatchArgs};
use config::Config;
use format::FormatOptions;
use util::build_client;

/// Resolve the output format: --json wins, then the command flag, then config.
fn resolve_format(cmd_format: OutputFormat, json_flag: bool, config: &Config) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if cmd_format != OutputFormat::Text {
        return cmd_format;
    }
    match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        Some("csv") => OutputFormat::Csv,
        _ => OutputFormat::Text,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "airdash", &mut io::stdout());
        return Ok(());
    }

    // Initialize tracing
    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;
    let base_opts = FormatOptions::new(no_color).with_compact(cli.compact);

    match cli.command {
        Commands::Status { api, output } => {
            let format = resolve_format(output.format, cli.json, &config);
            let opts = base_opts.with_no_header(output.no_header);
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_status(&client, format, cli.output.as_ref(), &opts).await?;
        }

        Commands::Latest { api, output } => {
            let format = resolve_format(output.format, cli.json, &config);
            let opts = base_opts.with_no_header(output.no_header);
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_latest(&client, format, cli.output.as_ref(), &opts).await?;
        }

        Commands::Readings {
            api,
            window,
            output,
        } => {
            let format = resolve_format(output.format, cli.json, &config);
            let opts = base_opts.with_no_header(output.no_header);
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_readings(
                &client,
                &config,
                ReadingsArgs {
                    window: &window,
                    format,
                    output: cli.output.as_ref(),
                    opts: &opts,
                },
            )
            .await?;
        }

        Commands::Series {
            api,
            window,
            output,
        } => {
            let format = resolve_format(output.format, cli.json, &config);
            let opts = base_opts.with_no_header(output.no_header);
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_series(
                &client,
                &config,
                SeriesArgs {
                    window: &window,
                    format,
                    output: cli.output.as_ref(),
                    opts: &opts,
                },
            )
            .await?;
        }

        Commands::Critical { api, output } => {
            let format = resolve_format(output.format, cli.json, &config);
            let opts = base_opts.with_no_header(output.no_header);
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_critical(&client, format, cli.output.as_ref(), &opts).await?;
        }

        Commands::Watch {
            api,
            output,
            interval,
            count,
        } => {
            let format = resolve_format(output.format, cli.json, &config);
            let opts = base_opts.with_no_header(output.no_header);
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_watch(
                &client,
                WatchArgs {
                    interval,
                    count,
                    format,
                    output: cli.output.as_ref(),
                    opts: &opts,
                },
            )
            .await?;
        }

        Commands::Login {
            api,
            email,
            password,
        } => {
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_login(&client, email, password, &config, cli.quiet).await?;
        }

        Commands::Subscribe { api, email } => {
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_subscribe(&client, email, &config, cli.quiet).await?;
        }

        Commands::Submit {
            api,
            timestamp,
            temperature,
            humidity,
            co2,
            nh3,
            benzene,
            lpg,
            co,
        } => {
            let client = build_client(api.url, api.timeout, &config)?;
            commands::cmd_submit(
                &client,
                SubmitArgs {
                    timestamp,
                    temperature,
                    humidity,
                    co2,
                    nh3,
                    benzene,
                    lpg,
                    co,
                },
                cli.quiet,
            )
            .await?;
        }

        Commands::Config { action } => {
            commands::cmd_config(action, cli.quiet)?;
        }

        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
