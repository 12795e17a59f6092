use clap::Parser;
use habitquest_cli::{Cli, CliContext, dispatch, logging, readline, split_line};
use habitquest_core::ClientConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let cli = Cli::parse();
    let config = ClientConfig::load()
        .map_err(|e| e.to_string())?
        .with_api_base_url(cli.api_url.as_deref());
    let ctx = CliContext::new(config)?;

    // One-shot mode
    if let Some(command) = cli.command {
        dispatch(command, &ctx).await?;
        return Ok(());
    }

    // Interactive shell; the cache is shared between commands
    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let args = split_line(line)?;
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    match cli.command {
        Some(command) => dispatch(command, ctx).await,
        None => Ok(false),
    }
}
