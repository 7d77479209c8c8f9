use crate::error::Error;

pub const ENDPOINT_VAR: &str = "SNAPSHOTS_S3_ENDPOINT";
pub const REGION_VAR: &str = "SNAPSHOTS_S3_REGION";
pub const BUCKET_VAR: &str = "SNAPSHOTS_S3_BUCKET";
pub const PATH_STYLE_VAR: &str = "SNAPSHOTS_S3_PATH_STYLE";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Where the snapshot repository lives: the S3 bucket holding the snapshot
/// files and the database holding the snapshot records.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySettings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub path_style: bool,
    pub database_url: String,
}

impl RepositorySettings {
    /// Builds settings from a variable lookup.
    ///
    /// Endpoint, region and bucket are required. Path style addressing defaults to
    /// `true`, the database defaults to a file in the local data dir.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            value(name).ok_or_else(|| Error::SettingsError(format!("{} is not set", name)))
        };

        let path_style = match value(PATH_STYLE_VAR) {
            Some(flag) => parse_flag(PATH_STYLE_VAR, &flag)?,
            None => true,
        };

        let database_url = match value(DATABASE_URL_VAR) {
            Some(url) => url,
            None => database::default_database_url()
                .map_err(|e| Error::SettingsError(e.to_string()))?,
        };

        Ok(Self {
            endpoint: required(ENDPOINT_VAR)?,
            region: required(REGION_VAR)?,
            bucket: required(BUCKET_VAR)?,
            path_style,
            database_url,
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::SettingsError(format!(
            "{} must be true or false, got '{}'",
            name, other
        ))),
    }
}
