use clap::Parser;
use sitewatch::api::{HttpMonitorApi, MonitorApi};
use sitewatch::cli::{
    export, handle_completions, handle_config_init, stats, targets, watch, Cli, Commands,
    ConfigCommands, GlobalArgs,
};
use sitewatch::config::SitewatchConfig;

/// Load config and start logging for commands that talk to the server.
fn prepare(global: &GlobalArgs) -> Result<SitewatchConfig, Box<dyn std::error::Error>> {
    let config = global.load_config()?;
    sitewatch::logging::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.command {
        Commands::Config(ConfigCommands::Init(args)) => return handle_config_init(args),
        Commands::Completions(args) => {
            handle_completions(args);
            return Ok(());
        }
        _ => prepare(&cli.global)?,
    };

    if let Commands::Watch = cli.command {
        return watch::run_watch(config).await;
    }

    let api = HttpMonitorApi::new(&config.server)?;
    let api: &dyn MonitorApi = &api;

    match cli.command {
        Commands::List(args) => println!("{}", targets::handle_list(&args, api).await?),
        Commands::Add(args) => println!("{}", targets::handle_add(&args, api).await?),
        Commands::Remove(args) => {
            let output =
                targets::handle_remove(&args, api, targets::prompt_confirmation).await?;
            println!("{}", output);
        }
        Commands::Stats(args) => println!("{}", stats::handle_stats(&args, api).await?),
        Commands::Export(args) => {
            let mut stdout = std::io::stdout();
            if let Some(message) = export::handle_export(&args, api, &mut stdout).await? {
                eprintln!("{}", message);
            }
        }
        Commands::Watch | Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
