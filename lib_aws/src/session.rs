use std::path::PathBuf;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials as _;
use aws_smithy_types::error::display::DisplayErrorContext;
use lib_core::{define_cli_error, CliError, Printer};
use tracing::Subscriber;
use tracing_subscriber::{
    filter::{Filtered, Targets},
    registry::LookupSpan,
};

use crate::{
    credentials::{resolve_credentials, CredentialSource, IdentityDescriptor},
    endpoints::{
        CustomEndpoint, EndpointResolver, ResolveServiceEndpoint as _, ResolvedEndpoint, OUTSCALE,
    },
    environment::{Environment, SystemEnvironment},
    sdk_logging::{SdkLogLayer, SdkLogLevel},
    shared_config::config_from_options,
};

define_cli_error!(
    AwsConfigurationError,
    "Invalid AWS session configuration: {details}.",
    { details: &str }
);
define_cli_error!(AwsSessionCreationError, "Failed to create AWS session.");

/// Caller-side description of the session to create.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Receives progress lines and, through the SDK log adapter, SDK logs.
    /// Required.
    pub logger: Option<Printer>,
    /// Log every SDK API call in detail.
    pub debug_api_calls: bool,
    /// Required.
    pub region: String,
    /// Custom endpoint for the service named `signing_name`. Both or neither.
    pub resolver_url: Option<String>,
    pub signing_name: Option<String>,
}

impl SessionConfig {
    pub fn new(logger: Printer, region: impl Into<String>) -> Self {
        SessionConfig {
            logger: Some(logger),
            region: region.into(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(Printer, Option<CustomEndpoint>), CliError> {
        let logger = self
            .logger
            .clone()
            .ok_or_else(|| AwsConfigurationError::new("missing logger"))?;
        if self.region.trim().is_empty() {
            return Err(AwsConfigurationError::new("missing region"));
        }
        let resolver_url = self.resolver_url.as_deref().filter(|url| !url.is_empty());
        let signing_name = self.signing_name.as_deref().filter(|name| !name.is_empty());
        let custom_endpoint = match (resolver_url, signing_name) {
            (Some(url), Some(signing_name)) => Some(CustomEndpoint {
                url: url.to_string(),
                signing_name: signing_name.to_string(),
            }),
            (None, None) => None,
            (Some(url), None) => {
                return Err(AwsConfigurationError::new(&format!(
                    "got empty signing name for resolver '{}'",
                    url
                )))
            }
            (None, Some(signing_name)) => {
                return Err(AwsConfigurationError::new(&format!(
                    "got signing name '{}' without a resolver URL",
                    signing_name
                )))
            }
        };
        Ok((logger, custom_endpoint))
    }
}

/// Everything the SDK is handed to create a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub region: String,
    /// Report the full error chain when credentials cannot be loaded.
    pub credentials_chain_verbose_errors: bool,
    pub logger: SdkLogLayer,
    pub log_level: SdkLogLevel,
    pub credentials: CredentialSource,
    pub endpoint_resolver: EndpointResolver,
}

#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn new_session(&self, options: SessionOptions) -> Result<AwsSession, CliError>;
}

/// Creates sessions with `aws-config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsSdk;

#[async_trait]
impl SessionFactory for AwsSdk {
    async fn new_session(&self, options: SessionOptions) -> Result<AwsSession, CliError> {
        let sdk_config = config_from_options(&options).await;
        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| AwsSessionCreationError::with_debug(&"no credentials provider"))?;
        provider.provide_credentials().await.map_err(|e| {
            if options.credentials_chain_verbose_errors {
                AwsSessionCreationError::with_debug(&DisplayErrorContext(&e).to_string())
            } else {
                AwsSessionCreationError::with_debug(&e)
            }
        })?;
        Ok(AwsSession::new(sdk_config, options))
    }
}

/// An authenticated, region-bound SDK configuration. Build service clients
/// from [`AwsSession::sdk_config`].
#[derive(Debug, Clone)]
pub struct AwsSession {
    sdk_config: SdkConfig,
    region: String,
    endpoint_resolver: EndpointResolver,
    log_layer: SdkLogLayer,
    log_level: SdkLogLevel,
}

impl AwsSession {
    pub fn new(sdk_config: SdkConfig, options: SessionOptions) -> Self {
        AwsSession {
            sdk_config,
            region: options.region,
            endpoint_resolver: options.endpoint_resolver,
            log_layer: options.logger,
            log_level: options.log_level,
        }
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn log_level(&self) -> SdkLogLevel {
        self.log_level
    }

    /// Endpoint that requests to `service` (an endpoint prefix such as
    /// "ec2") go to in this session's region.
    pub fn resolve_endpoint(&self, service: &str) -> Result<ResolvedEndpoint, CliError> {
        self.endpoint_resolver
            .resolve_endpoint(service, &self.region)
    }

    /// Adapter routing SDK logs to the session's logger, for installation in
    /// the caller's subscriber.
    pub fn log_layer<S>(&self) -> Filtered<SdkLogLayer, Targets, S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        self.log_layer.clone().filtered(self.log_level)
    }
}

#[derive(Debug, Clone)]
pub struct NewAwsSession {
    pub session: AwsSession,
    pub identity: IdentityDescriptor,
    /// Credentials file location that was checked.
    pub credentials_path: PathBuf,
}

/// Creates a session against the real process environment and SDK.
pub async fn new_session(config: &SessionConfig) -> Result<NewAwsSession, CliError> {
    new_session_with(config, &SystemEnvironment, &AwsSdk).await
}

pub async fn new_session_with<F>(
    config: &SessionConfig,
    env: &dyn Environment,
    factory: &F,
) -> Result<NewAwsSession, CliError>
where
    F: SessionFactory + ?Sized,
{
    let (logger, custom_endpoint) = config.validate()?;
    let credentials = resolve_credentials(&logger, env)?;

    let log_level = SdkLogLevel::from_debug_api_calls(config.debug_api_calls);
    if config.debug_api_calls {
        logger.debug("Debug logging enabled for AWS API calls.");
    }
    if let Some(custom) = &custom_endpoint {
        logger.info(&format!(
            "Using endpoint '{}' for service '{}'.",
            custom.url, custom.signing_name
        ));
    }

    let options = SessionOptions {
        region: config.region.clone(),
        credentials_chain_verbose_errors: true,
        logger: SdkLogLayer::new(logger.clone()),
        log_level,
        credentials: credentials.source,
        endpoint_resolver: EndpointResolver::new(&OUTSCALE).with_custom_endpoint(custom_endpoint),
    };
    let session = factory.new_session(options).await?;
    logger.success(&format!(
        "Created AWS session for region '{}'.",
        config.region
    ));

    Ok(NewAwsSession {
        session,
        identity: credentials.identity,
        credentials_path: credentials.path,
    })
}
