use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use remops::cli::{Cli, Command};
use remops::output::{self, CheckReport};
use remops::{CheckOptions, RemoteOpsChecker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => {
            let project_dir = std::fs::canonicalize(&args.project_dir).wrap_err_with(|| {
                format!("resolving project directory {}", args.project_dir.display())
            })?;

            let options = CheckOptions {
                timeout: args.timeout(),
                credentials_file: args.credentials_file.clone(),
                api_base_url: args.api_url.clone(),
            };
            let checker = RemoteOpsChecker::new(options);

            let outcome = checker.inspect(&args.workspace, &project_dir).await?;
            tracing::info!(
                project = %project_dir.display(),
                using_remote_ops = outcome.using_remote_ops(),
                "remote ops check complete"
            );

            let report = CheckReport::new(&project_dir, &args.workspace, outcome);
            println!("{}", output::render(&report, args.output)?);
        }
    }

    Ok(())
}
