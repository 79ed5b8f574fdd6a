use localdrop_client_lib::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    localdrop_client_lib::init_tracing();
    let config = ClientConfig::from_env();
    localdrop_client_lib::run(config).await
}
