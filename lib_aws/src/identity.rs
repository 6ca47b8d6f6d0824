use aws_sdk_sts::Client;
use lib_core::{define_cli_error, CliError, Printer};

use crate::{credentials::IdentityDescriptor, session::AwsSession};

define_cli_error!(
    AwsIdentityLookupError,
    "Failed to look up the caller identity in region '{region}'. If a credentials file is used, check that its profile is valid and not expired.",
    { region: &str }
);

/// Asks STS who the session's credentials belong to.
///
/// Session creation never calls this; it is for callers that want the
/// identity confirmed by the provider rather than taken from the environment.
pub async fn lookup_caller_identity(
    printer: &Printer,
    session: &AwsSession,
) -> Result<IdentityDescriptor, CliError> {
    let client = Client::new(session.sdk_config());
    let output = client
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| AwsIdentityLookupError::with_debug(session.region(), &e))?;
    let identity = IdentityDescriptor {
        account_id: output.account().unwrap_or_default().to_string(),
        user_id: output.user_id().unwrap_or_default().to_string(),
        arn: output.arn().unwrap_or_default().to_string(),
    };
    printer.info(&format!(
        "Caller identity: account-id '{}', user-id '{}', arn '{}'.",
        identity.account_id, identity.user_id, identity.arn
    ));
    Ok(identity)
}
