use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    ConnectionFailure(String),
    SettingsError(String),
    CredentialsError(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Error::ConnectionFailure(message) => write!(f, "Connection failure: {}", message),
            Error::SettingsError(message) => write!(f, "Settings error: {}", message),
            Error::CredentialsError(message) => write!(f, "Credentials error: {}", message),
        }
    }
}

impl From<database::database_error::DatabaseError> for Error {
    fn from(err: database::database_error::DatabaseError) -> Self {
        Error::ConnectionFailure(err.to_string())
    }
}

impl From<cloud_storage::CloudStorageError> for Error {
    fn from(err: cloud_storage::CloudStorageError) -> Self {
        Error::ConnectionFailure(err.to_string())
    }
}

impl From<credentials_storage::CredentialsError> for Error {
    fn from(err: credentials_storage::CredentialsError) -> Self {
        Error::CredentialsError(err.to_string())
    }
}
