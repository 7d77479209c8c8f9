mod logging;
mod report;

use std::process::ExitCode;

use async_std::task;
use clap::{Parser, Subcommand};
use credentials_storage::{
    ACCESS_KEY_ENV, RepositoryCredentials, SECRET_KEY_ENV, credentials_from_lookup,
    delete_credentials, load_credentials_with_fallback, store_credentials,
};
use service::{
    error::Error,
    repository_connection::RepositoryConnection,
    settings::{BUCKET_VAR, DATABASE_URL_VAR, ENDPOINT_VAR, REGION_VAR, RepositorySettings},
};

use crate::report::Line;

#[derive(Parser, Debug)]
#[command(name = "snapshots", about = "Manage snapshots in the snapshot repository")]
struct Cli {
    /// Print backend error details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// S3 endpoint, overrides SNAPSHOTS_S3_ENDPOINT
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// S3 region, overrides SNAPSHOTS_S3_REGION
    #[arg(long, global = true)]
    region: Option<String>,

    /// S3 bucket, overrides SNAPSHOTS_S3_BUCKET
    #[arg(long, global = true)]
    bucket: Option<String>,

    /// Metadata database url, overrides DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete a snapshot's files and its record
    Delete {
        /// Id of the snapshot to delete
        snapshot_id: String,
    },
    /// Manage the S3 credentials kept in the system keyring
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
}

#[derive(Subcommand, Debug)]
enum CredentialsAction {
    /// Store S3 credentials in the system keyring
    Store {
        /// Access key id, defaults to AWS_ACCESS_KEY_ID
        #[arg(long)]
        access_key_id: Option<String>,

        /// Secret access key, defaults to AWS_SECRET_ACCESS_KEY
        #[arg(long)]
        secret_access_key: Option<String>,
    },
    /// Remove the stored credentials from the system keyring
    Clear,
}

impl Cli {
    fn setting_override(&self, name: &str) -> Option<String> {
        match name {
            ENDPOINT_VAR => self.endpoint.clone(),
            REGION_VAR => self.region.clone(),
            BUCKET_VAR => self.bucket.clone(),
            DATABASE_URL_VAR => self.database_url.clone(),
            _ => None,
        }
    }

    fn settings(&self) -> Result<RepositorySettings, Error> {
        RepositorySettings::from_lookup(|name| {
            self.setting_override(name)
                .or_else(|| std::env::var(name).ok())
        })
    }
}

async fn connect(cli: &Cli) -> Result<RepositoryConnection, Error> {
    let settings = cli.settings()?;
    let credentials = load_credentials_with_fallback()?;
    RepositoryConnection::connect(&settings, &credentials).await
}

/// Credentials from the store flags, a missing flag is read from the environment.
fn credentials_from_flags<F>(
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
    env: F,
) -> Option<RepositoryCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    credentials_from_lookup(|name| {
        let flag = match name {
            ACCESS_KEY_ENV => access_key_id,
            SECRET_KEY_ENV => secret_access_key,
            _ => None,
        };
        flag.map(str::to_string).or_else(|| env(name))
    })
}

fn print_lines(lines: Vec<Line>) {
    for line in lines {
        match line {
            Line::Info(text) => println!("{}", text),
            Line::Error(text) => eprintln!("{}", text),
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn delete(cli: &Cli, snapshot_id: &str) -> ExitCode {
    let connection = match connect(cli).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::debug!("Connecting to the repository failed: {}", e);
            print_lines(report::connection_failure_lines(&e, cli.verbose));
            return ExitCode::FAILURE;
        }
    };

    let outcome = connection
        .snapshot_deletion_service()
        .delete_snapshot(snapshot_id)
        .await;
    print_lines(report::outcome_lines(&outcome, cli.verbose));
    exit_code(outcome.is_success())
}

fn manage_credentials(action: &CredentialsAction, verbose: bool) -> ExitCode {
    match action {
        CredentialsAction::Store {
            access_key_id,
            secret_access_key,
        } => {
            let Some(credentials) = credentials_from_flags(
                access_key_id.as_deref(),
                secret_access_key.as_deref(),
                |name| std::env::var(name).ok(),
            ) else {
                print_lines(vec![Line::Error(report::MISSING_CREDENTIALS.to_string())]);
                return ExitCode::FAILURE;
            };

            match store_credentials(&credentials) {
                Ok(()) => {
                    print_lines(vec![Line::Info(report::CREDENTIALS_STORED.to_string())]);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::debug!("Storing credentials failed: {}", e);
                    print_lines(report::credentials_failure_lines(
                        report::COULD_NOT_STORE_CREDENTIALS,
                        &e,
                        verbose,
                    ));
                    ExitCode::FAILURE
                }
            }
        }
        CredentialsAction::Clear => match delete_credentials() {
            Ok(()) => {
                print_lines(vec![Line::Info(report::CREDENTIALS_REMOVED.to_string())]);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::debug!("Removing credentials failed: {}", e);
                print_lines(report::credentials_failure_lines(
                    report::COULD_NOT_REMOVE_CREDENTIALS,
                    &e,
                    verbose,
                ));
                ExitCode::FAILURE
            }
        },
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Command::Delete { snapshot_id } => task::block_on(delete(&cli, snapshot_id)),
        Command::Credentials { action } => manage_credentials(action, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delete() {
        let cli = Cli::parse_from(["snapshots", "delete", "abc123", "-v"]);

        assert!(cli.verbose);
        match cli.command {
            Command::Delete { snapshot_id } => assert_eq!(snapshot_id, "abc123"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_credentials_commands() {
        let cli = Cli::parse_from(["snapshots", "credentials", "store", "--access-key-id", "AKIA1"]);
        match cli.command {
            Command::Credentials {
                action:
                    CredentialsAction::Store {
                        access_key_id,
                        secret_access_key,
                    },
            } => {
                assert_eq!(access_key_id.as_deref(), Some("AKIA1"));
                assert_eq!(secret_access_key, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["snapshots", "credentials", "clear"]);
        assert!(matches!(
            cli.command,
            Command::Credentials {
                action: CredentialsAction::Clear
            }
        ));
    }

    #[test]
    fn test_credentials_flags_fall_back_to_env() {
        let env = |name: &str| match name {
            ACCESS_KEY_ENV => Some("env-key".to_string()),
            SECRET_KEY_ENV => Some("env-secret".to_string()),
            _ => None,
        };

        let credentials = credentials_from_flags(Some("flag-key"), None, env).unwrap();
        assert_eq!(credentials.access_key_id, "flag-key");
        assert_eq!(credentials.secret_access_key, "env-secret");

        assert!(credentials_from_flags(Some("flag-key"), None, |_| None).is_none());
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "snapshots",
            "--bucket",
            "other-bucket",
            "--database-url",
            "sqlite::memory:",
            "delete",
            "abc123",
        ]);

        assert!(!cli.verbose);
        assert_eq!(
            cli.setting_override(BUCKET_VAR),
            Some("other-bucket".to_string())
        );
        assert_eq!(
            cli.setting_override(DATABASE_URL_VAR),
            Some("sqlite::memory:".to_string())
        );
        assert_eq!(cli.setting_override(ENDPOINT_VAR), None);
    }
}
