//! Label client command line
//!
//! Logs in (optionally), loads the labels of one project and prints them as JSON.

use std::env;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use label_client::models::DEFAULT_LIMIT;
use label_client::{ApiClient, AuthRepository, Config, LabelList, LabelRepository, SqliteTokenStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("API base URL: {}", config.base_url());
    tracing::info!("Token store: {:?}", config.token_db_path);

    let store = Arc::new(SqliteTokenStore::open(&config.token_db_path).await?);
    let client = ApiClient::from_config(&config, store)?;

    if let (Ok(username), Ok(password)) = (env::var("LABEL_USERNAME"), env::var("LABEL_PASSWORD")) {
        let auth = AuthRepository::new(client.clone());
        if auth.login(&username, &password).await?.is_none() {
            return Err("login failed: the server returned no token".into());
        }
    }

    let project_id = env::var("LABEL_PROJECT_ID").map_err(|_| "LABEL_PROJECT_ID is not set")?;
    let labels = LabelList::new(LabelRepository::new(client));

    match env::var("LABEL_SEARCH") {
        Ok(query) => labels.search_labels(&project_id, &query, DEFAULT_LIMIT).await?,
        Err(_) => {
            let source = labels.get_popular_labels(&project_id, DEFAULT_LIMIT).await;
            tracing::info!("Labels loaded from {:?}", source);
        }
    }

    println!("{}", serde_json::to_string_pretty(&labels.state().labels)?);

    Ok(())
}
