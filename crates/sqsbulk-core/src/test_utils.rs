use aws_sdk_sqs::config::Credentials;
use testcontainers::ContainerAsync;
use testcontainers_modules::{
    localstack::LocalStack,
    testcontainers::{runners::AsyncRunner, ImageExt, TestcontainersError},
};
use tokio::sync::{Mutex, OnceCell};

use crate::QueueClient;

pub fn local_config(endpoint_url: &str, region: Option<&'static str>) -> aws_config::ConfigLoader {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(endpoint_url)
        .region(region.unwrap_or("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "static"))
}

/// Config with static credentials that never touches the network on load.
pub async fn static_config(endpoint_url: &str) -> aws_config::SdkConfig {
    local_config(endpoint_url, None).load().await
}

pub async fn localstack() -> Result<(String, ContainerAsync<LocalStack>), TestcontainersError> {
    let request = LocalStack::default()
        .with_tag("latest")
        .with_env_var("SERVICES", "sqs")
        .with_env_var("SKIP_SSL_CERT_DOWNLOAD", "1");
    let container = request.start().await?;

    let host_ip = container.get_host().await?;
    let host_port = container.get_host_port_ipv4(4566).await?;
    let endpoint_url = format!("http://{host_ip}:{host_port}");

    Ok((endpoint_url, container))
}

// One LocalStack container shared by every test in the process; testcontainers
// removes it when the process exits.
static SHARED_CONTAINER: OnceCell<Mutex<(String, ContainerAsync<LocalStack>)>> =
    OnceCell::const_new();

/// Get the shared LocalStack endpoint URL, starting the container if needed.
pub async fn get_shared_localstack() -> String {
    let container_data = SHARED_CONTAINER
        .get_or_init(|| async {
            let (endpoint_url, container) = localstack().await.unwrap();
            Mutex::new((endpoint_url, container))
        })
        .await;

    let guard = container_data.lock().await;
    guard.0.clone()
}

/// Generate a unique queue name for testing, using a UUID suffix.
pub fn unique_queue_name(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Creates a fresh queue on the shared container.
///
/// Returns a client whose default queue is the new queue, the queue URL and
/// the queue name.
pub async fn setup(name: &str) -> (QueueClient, String, String) {
    let endpoint_url = get_shared_localstack().await;
    let queue_name = unique_queue_name(name);

    let config = static_config(&endpoint_url).await;
    let client = aws_sdk_sqs::Client::new(&config);
    let queue_url = client
        .create_queue()
        .queue_name(&queue_name)
        .send()
        .await
        .unwrap()
        .queue_url
        .expect("CreateQueue returned no queue URL");

    let queue = QueueClient::from_config(config, Some(queue_url.clone()));
    (queue, queue_url, queue_name)
}

/// Drains up to 10 message bodies straight through the SDK.
pub async fn receive_bodies(queue: &QueueClient, queue_url: &str) -> Vec<String> {
    queue
        .client
        .receive_message()
        .queue_url(queue_url)
        .max_number_of_messages(10)
        .wait_time_seconds(1)
        .send()
        .await
        .unwrap()
        .messages
        .unwrap_or_default()
        .into_iter()
        .filter_map(|m| m.body)
        .collect()
}
