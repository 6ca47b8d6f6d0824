use std::path::PathBuf;

use lib_core::{define_cli_error, CliError, Printer};
use serde::Serialize;

use crate::environment::Environment;

pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";
pub const AWS_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";
pub const AWS_USER_ID: &str = "AWS_USER_ID";
pub const AWS_PRINCIPAL_ARN: &str = "AWS_PRINCIPAL_ARN";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

define_cli_error!(
    AwsCredentialsNotFound,
    "Cannot find AWS credentials. No credentials file exists at '{path}', and AWS_ACCOUNT_ID, AWS_USER_ID and AWS_PRINCIPAL_ARN are not all set.",
    { path: &std::path::Display<'_> }
);

/// Who the session acts as. Values are taken verbatim, without any format
/// checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityDescriptor {
    pub account_id: String,
    pub user_id: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Shared credentials file, parsed by the SDK when the session is created.
    File(PathBuf),
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`.
    Environment,
}

#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub source: CredentialSource,
    /// Credentials file location that was checked, whether or not it exists.
    pub path: PathBuf,
    pub identity: IdentityDescriptor,
}

/// Location of the shared credentials file: `$AWS_SHARED_CREDENTIALS_FILE`,
/// or `~/.aws/credentials`.
pub fn shared_credentials_path(env: &dyn Environment) -> PathBuf {
    match env.var(AWS_SHARED_CREDENTIALS_FILE) {
        Some(path) => PathBuf::from(path),
        None => env
            .home_dir()
            .unwrap_or_default()
            .join(".aws")
            .join("credentials"),
    }
}

/// Decides where the session's credentials come from.
///
/// An existing credentials file always wins. Without one, all three identity
/// variables must be set, and the identity is built from them.
pub fn resolve_credentials(
    printer: &Printer,
    env: &dyn Environment,
) -> Result<ResolvedCredentials, CliError> {
    let path = shared_credentials_path(env);

    let (source, identity) = if env.exists(&path) {
        printer.info(&format!(
            "Creating session from AWS credentials file '{}'.",
            path.display()
        ));
        (
            CredentialSource::File(path.clone()),
            IdentityDescriptor {
                account_id: env.var(AWS_ACCOUNT_ID).unwrap_or_default(),
                user_id: env.var(AWS_USER_ID).unwrap_or_default(),
                arn: env.var(AWS_PRINCIPAL_ARN).unwrap_or_default(),
            },
        )
    } else {
        printer.info(&format!(
            "Cannot find AWS credentials file '{}'.",
            path.display()
        ));
        let identity = match (
            env.var(AWS_ACCOUNT_ID),
            env.var(AWS_USER_ID),
            env.var(AWS_PRINCIPAL_ARN),
        ) {
            (Some(account_id), Some(user_id), Some(arn)) => IdentityDescriptor {
                account_id,
                user_id,
                arn,
            },
            _ => return Err(AwsCredentialsNotFound::new(&path.display())),
        };
        if env.var(AWS_ACCESS_KEY_ID).is_none() || env.var(AWS_SECRET_ACCESS_KEY).is_none() {
            printer.warn(&format!(
                "{} / {} are not set; the SDK will have no access key to sign with.",
                AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY
            ));
        }
        printer.info("Creating session from environment variables.");
        (CredentialSource::Environment, identity)
    };

    printer.info(&format!(
        "AWS identity: account-id '{}', user-id '{}', arn '{}'.",
        identity.account_id, identity.user_id, identity.arn
    ));

    Ok(ResolvedCredentials {
        source,
        path,
        identity,
    })
}
