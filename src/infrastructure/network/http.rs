// HTTP client construction shared by every endpoint call.
use crate::domain::error::DirectoryError;
use crate::infrastructure::config::Config;
use reqwest::Client;

pub fn create_client(config: &Config) -> Result<Client, DirectoryError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("cardex/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = &config.http_proxy {
        if !proxy.is_empty() {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy)
                    .map_err(|e| DirectoryError::Config(format!("Invalid http_proxy: {}", e)))?,
            );
        }
    }

    Ok(builder.build()?)
}
