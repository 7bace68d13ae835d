pub mod memory_repo;
pub mod quote_repo;
pub mod repository_error;
pub mod workshop_repo;

use chrono::{SecondsFormat, Utc};

use crate::config::mongo_conf::MongoConfig;

/// Creation timestamp in a fixed-width RFC 3339 form, so stored values sort
/// lexically in time order.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Open the configured MongoDB database.
pub async fn connect_database(config: &MongoConfig) -> Result<mongodb::Database, mongodb::error::Error> {
    use mongodb::{options::{ClientOptions, Credential}, Client};

    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("SolarQuoteBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(config.connect_timeout);

    if let Some(creds) = &config.credentials {
        client_options.credential = Some(Credential::builder()
            .username(creds.username.clone())
            .password(creds.password.clone())
            .build());
    }

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_fixed_width_utc() {
        let ts = timestamp_now();
        // 2026-10-18T09:30:00.123Z
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
    }
}
