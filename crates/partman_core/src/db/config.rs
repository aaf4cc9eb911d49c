//! Connection target settings.

/// Hosted cluster URI with `<db_user>` / `<db_password>` placeholders.
pub const DEFAULT_URI_TEMPLATE: &str =
    "mongodb+srv://<db_user>:<db_password>@pieselaborator.snqtk.mongodb.net/";
pub const DEFAULT_DATABASE: &str = "data";
pub const DEFAULT_COLLECTION: &str = "parts";
pub const DEFAULT_APP_NAME: &str = "partman";

/// Where and how the connector reaches the store.
///
/// There is no file or environment source; `Default` holds the production
/// target and tests build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub uri_template: String,
    pub database: String,
    pub collection: String,
    pub app_name: Option<String>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            uri_template: DEFAULT_URI_TEMPLATE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
        }
    }
}
