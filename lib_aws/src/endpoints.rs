use std::fmt::Debug;

use lib_core::{define_cli_error, CliError};

define_cli_error!(
    AwsEndpointResolutionError,
    "Cannot resolve endpoint for service '{service}' in region '{region}'.",
    { service: &str, region: &str }
);

/// A provider that speaks the AWS wire protocol under its own hostnames.
#[derive(Debug)]
pub struct AlternateProvider {
    pub name: &'static str,
    pub domain: &'static str,
    /// Service identifier (endpoint prefix) to the provider's subdomain label.
    labels: &'static [(&'static str, &'static str)],
}

pub static OUTSCALE: AlternateProvider = AlternateProvider {
    name: "outscale",
    domain: "outscale.com",
    labels: &[
        ("ec2", "fcu"),
        ("elasticloadbalancing", "lbu"),
        ("iam", "eim"),
        ("directconnect", "directlink"),
        ("s3", "osu"),
    ],
};

impl AlternateProvider {
    pub fn label_for(&self, service: &str) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|(id, _)| *id == service)
            .map(|(_, label)| *label)
    }

    pub fn services(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.labels.iter().map(|(id, _)| *id)
    }

    pub fn url_for(&self, label: &str, region: &str) -> String {
        format!("https://{}.{}.{}", label, region, self.domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub url: String,
    pub signing_region: String,
    pub signing_name: String,
}

pub trait ResolveServiceEndpoint: Debug + Send + Sync {
    fn resolve_endpoint(&self, service: &str, region: &str)
        -> Result<ResolvedEndpoint, CliError>;
}

/// Services served from one partition-wide host: (DNS suffix, service, host,
/// signing region).
const GLOBAL_ENDPOINTS: &[(&str, &str, &str, &str)] = &[
    ("amazonaws.com", "iam", "iam.amazonaws.com", "us-east-1"),
    ("amazonaws.com", "route53", "route53.amazonaws.com", "us-east-1"),
    ("amazonaws.com", "cloudfront", "cloudfront.amazonaws.com", "us-east-1"),
    ("amazonaws.com", "waf", "waf.amazonaws.com", "us-east-1"),
    ("amazonaws.com", "organizations", "organizations.us-east-1.amazonaws.com", "us-east-1"),
    ("amazonaws.com", "shield", "shield.us-east-1.amazonaws.com", "us-east-1"),
    ("amazonaws.com", "globalaccelerator", "globalaccelerator.us-west-2.amazonaws.com", "us-west-2"),
    ("amazonaws.com", "networkmanager", "networkmanager.us-west-2.amazonaws.com", "us-west-2"),
    ("amazonaws.com.cn", "iam", "iam.cn-north-1.amazonaws.com.cn", "cn-north-1"),
    ("amazonaws.com.cn", "route53", "route53.amazonaws.com.cn", "cn-northwest-1"),
    (
        "amazonaws.com.cn",
        "organizations",
        "organizations.cn-northwest-1.amazonaws.com.cn",
        "cn-northwest-1",
    ),
];

/// AWS's own endpoint naming: `<service>.<region>.<suffix>`, except for the
/// partition-global services, which have a single host and signing region.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEndpoints;

impl ResolveServiceEndpoint for StandardEndpoints {
    fn resolve_endpoint(
        &self,
        service: &str,
        region: &str,
    ) -> Result<ResolvedEndpoint, CliError> {
        if service.is_empty() || region.is_empty() {
            return Err(AwsEndpointResolutionError::new(service, region));
        }
        let dns_suffix = if region.starts_with("cn-") {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        };
        if let Some((_, _, host, signing_region)) = GLOBAL_ENDPOINTS
            .iter()
            .find(|(suffix, id, _, _)| *suffix == dns_suffix && *id == service)
        {
            return Ok(ResolvedEndpoint {
                url: format!("https://{}", host),
                signing_region: signing_region.to_string(),
                signing_name: service.to_string(),
            });
        }
        Ok(ResolvedEndpoint {
            url: format!("https://{}.{}.{}", service, region, dns_suffix),
            signing_region: region.to_string(),
            signing_name: service.to_string(),
        })
    }
}

/// Single endpoint used for the service named `signing_name`, typically a
/// test or beta stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEndpoint {
    pub url: String,
    pub signing_name: String,
}

/// Sends mapped services to an [`AlternateProvider`] and everything else to
/// the fallback resolver.
///
/// Lookup order is the custom endpoint, then the provider's label table, then
/// the fallback. Remapped endpoints keep the original service identifier as
/// signing name so requests still sign correctly.
#[derive(Debug, Clone)]
pub struct EndpointResolver<F = StandardEndpoints> {
    provider: &'static AlternateProvider,
    custom: Option<CustomEndpoint>,
    fallback: F,
}

impl EndpointResolver {
    pub fn new(provider: &'static AlternateProvider) -> Self {
        EndpointResolver {
            provider,
            custom: None,
            fallback: StandardEndpoints,
        }
    }
}

impl<F> EndpointResolver<F> {
    pub fn with_custom_endpoint(mut self, custom: Option<CustomEndpoint>) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_fallback<G>(self, fallback: G) -> EndpointResolver<G> {
        EndpointResolver {
            provider: self.provider,
            custom: self.custom,
            fallback,
        }
    }

    pub fn provider(&self) -> &'static AlternateProvider {
        self.provider
    }

    pub fn custom_endpoint(&self) -> Option<&CustomEndpoint> {
        self.custom.as_ref()
    }

    /// Endpoint replacing the fallback's answer, if `service` is remapped.
    pub fn override_for(&self, service: &str, region: &str) -> Option<ResolvedEndpoint> {
        if let Some(custom) = self.custom.as_ref().filter(|c| c.signing_name == service) {
            return Some(ResolvedEndpoint {
                url: custom.url.clone(),
                signing_region: region.to_string(),
                signing_name: custom.signing_name.clone(),
            });
        }
        self.provider
            .label_for(service)
            .map(|label| ResolvedEndpoint {
                url: self.provider.url_for(label, region),
                signing_region: region.to_string(),
                signing_name: service.to_string(),
            })
    }
}

impl<F: ResolveServiceEndpoint> ResolveServiceEndpoint for EndpointResolver<F> {
    fn resolve_endpoint(
        &self,
        service: &str,
        region: &str,
    ) -> Result<ResolvedEndpoint, CliError> {
        match self.override_for(service, region) {
            Some(endpoint) => Ok(endpoint),
            None => self.fallback.resolve_endpoint(service, region),
        }
    }
}

/// Maps an SDK service id ("EC2", "Elastic Load Balancing v2") to the
/// endpoint prefix used as key in the label tables ("ec2",
/// "elasticloadbalancing").
pub fn endpoint_prefix(service_id: &str) -> String {
    let prefix: String = service_id
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();
    match prefix.as_str() {
        "elasticloadbalancingv2" => "elasticloadbalancing".to_string(),
        _ => prefix,
    }
}
