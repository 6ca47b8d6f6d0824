use aws_config::SdkConfig;
use aws_types::service_config::{LoadServiceConfig, ServiceConfigKey};

use crate::endpoints::{endpoint_prefix, EndpointResolver};

const ENDPOINT_URL: &str = "endpoint_url";

/// Answers the SDK's per-service `endpoint_url` lookups from an
/// [`EndpointResolver`].
///
/// Remapped services get the resolver's URL. Every other lookup goes to the
/// service config `aws-config` loaded (`AWS_ENDPOINT_URL_<SERVICE>`, profile
/// `services` sections), and past that the SDK keeps its own endpoint rules.
#[derive(Debug, Clone)]
pub(crate) struct EndpointServiceConfig {
    resolver: EndpointResolver,
    region: String,
    loaded: Option<SdkConfig>,
}

impl EndpointServiceConfig {
    pub(crate) fn new(
        resolver: EndpointResolver,
        region: impl Into<String>,
        loaded: Option<SdkConfig>,
    ) -> Self {
        EndpointServiceConfig {
            resolver,
            region: region.into(),
            loaded,
        }
    }
}

impl LoadServiceConfig for EndpointServiceConfig {
    fn load_config(&self, key: ServiceConfigKey<'_>) -> Option<String> {
        if key.profile() == ENDPOINT_URL {
            if let Some(endpoint) = self
                .resolver
                .override_for(&endpoint_prefix(key.service_id()), &self.region)
            {
                return Some(endpoint.url);
            }
        }
        self.loaded.as_ref()?.service_config()?.load_config(key)
    }
}

#[cfg(test)]
pub(crate) fn endpoint_url_key(service_id: &str) -> ServiceConfigKey<'_> {
    ServiceConfigKey::builder()
        .service_id(service_id)
        .env("AWS_ENDPOINT_URL")
        .profile(ENDPOINT_URL)
        .build()
        .expect("all fields set")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{CustomEndpoint, OUTSCALE};

    /// Stands in for the env/profile service config `aws-config` loads.
    #[derive(Debug)]
    struct LoadedEndpoints(&'static [(&'static str, &'static str)]);

    impl LoadServiceConfig for LoadedEndpoints {
        fn load_config(&self, key: ServiceConfigKey<'_>) -> Option<String> {
            if key.profile() != ENDPOINT_URL {
                return None;
            }
            self.0
                .iter()
                .find(|(service_id, _)| *service_id == key.service_id())
                .map(|(_, url)| url.to_string())
        }
    }

    fn service_config() -> EndpointServiceConfig {
        EndpointServiceConfig::new(EndpointResolver::new(&OUTSCALE), "eu-west-2", None)
    }

    fn service_config_over(loaded: LoadedEndpoints) -> EndpointServiceConfig {
        EndpointServiceConfig::new(
            EndpointResolver::new(&OUTSCALE),
            "eu-west-2",
            Some(SdkConfig::builder().service_config(loaded).build()),
        )
    }

    #[test]
    fn mapped_sdk_services_get_provider_urls() {
        let config = service_config();
        assert_eq!(
            config.load_config(endpoint_url_key("EC2")).as_deref(),
            Some("https://fcu.eu-west-2.outscale.com")
        );
        assert_eq!(
            config
                .load_config(endpoint_url_key("Elastic Load Balancing v2"))
                .as_deref(),
            Some("https://lbu.eu-west-2.outscale.com")
        );
    }

    #[test]
    fn unmapped_sdk_services_are_left_to_the_sdk() {
        assert_eq!(service_config().load_config(endpoint_url_key("STS")), None);
    }

    #[test]
    fn unmapped_services_keep_loaded_endpoint_settings() {
        let config = service_config_over(LoadedEndpoints(&[("STS", "https://sts.local.test")]));
        assert_eq!(
            config.load_config(endpoint_url_key("STS")).as_deref(),
            Some("https://sts.local.test")
        );
        assert_eq!(config.load_config(endpoint_url_key("KMS")), None);
    }

    #[test]
    fn table_wins_over_loaded_endpoint_settings() {
        let config = service_config_over(LoadedEndpoints(&[("EC2", "https://ec2.local.test")]));
        assert_eq!(
            config.load_config(endpoint_url_key("EC2")).as_deref(),
            Some("https://fcu.eu-west-2.outscale.com")
        );
    }

    #[test]
    fn other_settings_are_not_answered() {
        let key = ServiceConfigKey::builder()
            .service_id("EC2")
            .env("AWS_MAX_ATTEMPTS")
            .profile("max_attempts")
            .build()
            .expect("all fields set");
        assert_eq!(service_config().load_config(key), None);
    }

    #[test]
    fn custom_endpoint_reaches_the_sdk() {
        let config = EndpointServiceConfig::new(
            EndpointResolver::new(&OUTSCALE).with_custom_endpoint(Some(CustomEndpoint {
                url: "https://api.beta.eu-west-2.example.com".to_string(),
                signing_name: "sts".to_string(),
            })),
            "eu-west-2",
            None,
        );
        assert_eq!(
            config.load_config(endpoint_url_key("STS")).as_deref(),
            Some("https://api.beta.eu-west-2.example.com")
        );
    }
}
