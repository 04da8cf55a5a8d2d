use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use sqsbulk::QueueClient;

use crate::GlobalArgs;

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const FALLBACK_REGION: &str = "us-east-1";

/// Builds a [`QueueClient`] from the global flags.
///
/// `--local` pins LocalStack's static `test` credentials, its default
/// endpoint and a fixed region, so nothing is looked up from the
/// environment. Otherwise the standard AWS chain applies, with `--region`,
/// `--profile` and `--endpoint` layered on top.
pub async fn connect(args: &GlobalArgs) -> QueueClient {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if args.local {
        loader = loader
            .region(Region::new(
                args.region.clone().unwrap_or_else(|| FALLBACK_REGION.to_string()),
            ))
            .credentials_provider(aws_sdk_sqs::config::Credentials::new(
                "test", "test", None, None, "static",
            ))
            .endpoint_url(args.endpoint.as_deref().unwrap_or(LOCALSTACK_ENDPOINT));
    } else {
        let region = match &args.region {
            Some(region) => RegionProviderChain::first_try(Region::new(region.clone())),
            // supports loading region from known env variables
            None => RegionProviderChain::default_provider(),
        }
        .or_else(Region::from_static(FALLBACK_REGION));
        loader = loader.region(region);

        if let Some(profile) = &args.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &args.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
    }

    QueueClient::from_config(loader.load().await, args.queue.clone())
}
