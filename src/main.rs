use clap::Parser;
use contactview::cli::{run_add, run_browse, run_delete, run_list, run_update, Cli, Commands};
use contactview::{Config, ListView, RemoteContactsClient};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with table output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.api_url.clone())?;
    let client = RemoteContactsClient::new(&config)?;
    tracing::debug!("using contacts API at {}", config.api_url);
    let mut view = ListView::new(Box::new(client)).with_page_size(config.page_size);

    match cli.command {
        None => {
            run_browse(&mut view)?;
        }
        Some(Commands::List(args)) => {
            run_list(&mut view, args)?;
        }
        Some(Commands::Add(args)) => {
            run_add(&mut view, args)?;
        }
        Some(Commands::Edit(args)) => {
            run_update(&mut view, &args.id, args.fields)?;
        }
        Some(Commands::Delete(args)) => {
            run_delete(&mut view, &args.id, args.force)?;
        }
    }

    Ok(())
}
