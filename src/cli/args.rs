use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report whether a project runs Terraform operations remotely
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Local Terraform CLI workspace
    #[arg(long, short = 'w', env = "TF_WORKSPACE", default_value = "default")]
    pub workspace: String,

    /// Project directory containing `.terraform/`
    #[arg(long, short = 'd', default_value = ".")]
    pub project_dir: PathBuf,

    /// Per-request deadline for remote API calls, 0 disables it
    #[arg(long, env = "REMOPS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// CLI config file holding `credentials` blocks
    #[arg(long, env = "TF_CLI_CONFIG_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// API address, instead of https://<backend hostname>
    #[arg(long, env = "REMOPS_API_URL")]
    pub api_url: Option<String>,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl CheckArgs {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    const ENV_VARS: [&str; 4] = [
        "TF_WORKSPACE",
        "REMOPS_TIMEOUT_SECS",
        "TF_CLI_CONFIG_FILE",
        "REMOPS_API_URL",
    ];

    fn parse_without_env(argv: &[&str]) -> CheckArgs {
        let backup: Vec<_> = ENV_VARS.iter().map(|k| std::env::var(k).ok()).collect();
        unsafe {
            for key in ENV_VARS {
                std::env::remove_var(key);
            }
        }

        let cli = Cli::parse_from(argv);

        unsafe {
            for (key, value) in ENV_VARS.iter().zip(backup) {
                if let Some(value) = value {
                    std::env::set_var(key, value);
                }
            }
        }

        let Command::Check(args) = cli.command;
        args
    }

    #[test]
    #[serial]
    fn test_check_defaults() {
        let args = parse_without_env(&["remops", "check"]);

        assert_eq!(args.workspace, "default");
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert_eq!(args.timeout(), Some(Duration::from_secs(30)));
        assert!(args.credentials_file.is_none());
        assert!(args.api_url.is_none());
        assert_eq!(args.output, OutputFormat::Table);
    }

    #[test]
    #[serial]
    fn test_check_flags() {
        let args = parse_without_env(&[
            "remops",
            "check",
            "--workspace=prod",
            "--project-dir=/srv/infra",
            "--timeout-secs=5",
            "--credentials-file=/etc/terraformrc",
            "--api-url=http://localhost:9000",
            "--output=json",
        ]);

        assert_eq!(args.workspace, "prod");
        assert_eq!(args.project_dir, PathBuf::from("/srv/infra"));
        assert_eq!(args.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(args.credentials_file, Some(PathBuf::from("/etc/terraformrc")));
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    #[serial]
    fn test_zero_timeout_disables_deadline() {
        let args = parse_without_env(&["remops", "check", "--timeout-secs", "0"]);
        assert!(args.timeout().is_none());
    }

    #[test]
    #[serial]
    fn test_workspace_from_env_var_fallback() {
        let backup = std::env::var("TF_WORKSPACE").ok();

        unsafe {
            std::env::set_var("TF_WORKSPACE", "staging");
        }

        let cli = Cli::parse_from(["remops", "check"]);

        unsafe {
            match backup {
                Some(ws) => std::env::set_var("TF_WORKSPACE", ws),
                None => std::env::remove_var("TF_WORKSPACE"),
            }
        }

        let Command::Check(args) = cli.command;
        assert_eq!(args.workspace, "staging");
    }

    #[test]
    #[serial]
    fn test_workspace_flag_takes_precedence_over_env() {
        let backup = std::env::var("TF_WORKSPACE").ok();

        unsafe {
            std::env::set_var("TF_WORKSPACE", "env_ws");
        }

        let cli = Cli::parse_from(["remops", "check", "-w", "cli_ws"]);

        unsafe {
            match backup {
                Some(ws) => std::env::set_var("TF_WORKSPACE", ws),
                None => std::env::remove_var("TF_WORKSPACE"),
            }
        }

        let Command::Check(args) = cli.command;
        assert_eq!(args.workspace, "cli_ws");
    }
}
