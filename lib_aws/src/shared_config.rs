use std::time::Duration;

#[allow(deprecated)]
use aws_config::{
    environment::credentials::EnvironmentVariableCredentialsProvider,
    profile::{
        profile_file::{ProfileFileKind, ProfileFiles},
        ProfileFileCredentialsProvider,
    },
    timeout::TimeoutConfig,
    BehaviorVersion, Region, SdkConfig,
};

use crate::{
    credentials::CredentialSource, service_config::EndpointServiceConfig, session::SessionOptions,
};

/// Loads the SDK configuration described by `options`, with the endpoint
/// resolver installed.
pub(crate) async fn config_from_options(options: &SessionOptions) -> SdkConfig {
    // Raise the default timeouts: the 5s connect timeout trips easily on slow
    // links against non-AWS endpoints.
    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(30))
        .operation_attempt_timeout(Duration::from_secs(300))
        .operation_timeout(Duration::from_secs(3600))
        .build();

    let loader = aws_config::defaults(BehaviorVersion::v2026_01_12())
        .region(Region::new(options.region.clone()))
        .timeout_config(timeout_config);
    #[allow(deprecated)]
    let loader = match &options.credentials {
        CredentialSource::File(path) => loader.credentials_provider(
            ProfileFileCredentialsProvider::builder()
                .profile_files(
                    ProfileFiles::builder()
                        .with_file(ProfileFileKind::Credentials, path)
                        .build(),
                )
                .build(),
        ),
        CredentialSource::Environment => {
            loader.credentials_provider(EnvironmentVariableCredentialsProvider::new())
        }
    };

    // The resolver answers for remapped services and defers to what was
    // loaded from the environment and profile for the rest.
    let loaded = loader.load().await;
    loaded
        .to_builder()
        .service_config(EndpointServiceConfig::new(
            options.endpoint_resolver.clone(),
            &options.region,
            Some(loaded.clone()),
        ))
        .build()
}
