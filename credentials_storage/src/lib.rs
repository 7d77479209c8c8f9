use keyring::Entry;
use serde::{Deserialize, Serialize};

#[cfg(not(test))]
const SERVICE_NAME: &str = "snapshots-repository";
const USERNAME: &str = "s3-credentials"; // Fixed username for all credentials

// Test-specific service name to avoid polluting production keyring
#[cfg(test)]
const TEST_SERVICE_NAME: &str = "snapshots-repository-test";

pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";

fn get_service_name() -> &'static str {
    #[cfg(test)]
    {
        TEST_SERVICE_NAME
    }
    #[cfg(not(test))]
    {
        SERVICE_NAME
    }
}

/// Credentials for the S3-compatible object store of the snapshot repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("No credentials stored")]
    NoCredentials,

    #[error("Failed to serialize/deserialize credentials: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Store repository credentials as JSON in the system keyring.
///
/// # Errors
///
/// Returns an error if the keyring is not accessible or the credentials cannot be serialized.
pub fn store_credentials(credentials: &RepositoryCredentials) -> Result<(), CredentialsError> {
    let entry = Entry::new(get_service_name(), USERNAME)?;
    let json = serde_json::to_string(credentials)?;
    entry.set_password(&json)?;
    Ok(())
}

/// Load repository credentials from the system keyring.
///
/// # Errors
///
/// Returns `CredentialsError::NoCredentials` if nothing is stored.
pub fn load_credentials() -> Result<RepositoryCredentials, CredentialsError> {
    let entry = Entry::new(get_service_name(), USERNAME)?;
    match entry.get_password() {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(keyring::Error::NoEntry) => Err(CredentialsError::NoCredentials),
        Err(e) => Err(CredentialsError::Keyring(e)),
    }
}

/// Load credentials from the keyring, falling back to `AWS_ACCESS_KEY_ID` and
/// `AWS_SECRET_ACCESS_KEY`.
///
/// An unavailable keyring (e.g. no Secret Service on a headless host) is not fatal,
/// the environment is consulted instead.
///
/// # Errors
///
/// Returns `CredentialsError::NoCredentials` if neither source has credentials.
pub fn load_credentials_with_fallback() -> Result<RepositoryCredentials, CredentialsError> {
    match load_credentials() {
        Ok(creds) => return Ok(creds),
        Err(CredentialsError::NoCredentials) => {}
        Err(e) => {
            tracing::info!("Keyring not usable, reading credentials from environment: {}", e);
        }
    }

    credentials_from_lookup(|name| std::env::var(name).ok()).ok_or(CredentialsError::NoCredentials)
}

/// Builds credentials from a variable lookup, both keys must be present and non-empty.
pub fn credentials_from_lookup<F>(lookup: F) -> Option<RepositoryCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let access_key_id = lookup(ACCESS_KEY_ENV).filter(|v| !v.is_empty())?;
    let secret_access_key = lookup(SECRET_KEY_ENV).filter(|v| !v.is_empty())?;
    Some(RepositoryCredentials {
        access_key_id,
        secret_access_key,
    })
}

/// Delete repository credentials from the system keyring.
///
/// Deleting already-deleted credentials succeeds.
pub fn delete_credentials() -> Result<(), CredentialsError> {
    let entry = Entry::new(get_service_name(), USERNAME)?;
    match entry.delete_credential() {
        Ok(_) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(CredentialsError::Keyring(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serial_test::serial;

    use super::*;

    fn cleanup_test_credentials() {
        delete_credentials().ok();
    }

    fn is_keyring_available() -> bool {
        let entry = match Entry::new(get_service_name(), USERNAME) {
            Ok(e) => e,
            Err(_) => return false,
        };

        match entry.get_password() {
            Ok(_) => true,
            Err(keyring::Error::NoEntry) => true,
            Err(keyring::Error::PlatformFailure(_)) => false,
            Err(keyring::Error::NoStorageAccess(_)) => false,
            Err(_) => true,
        }
    }

    #[test]
    fn test_credentials_serialization() {
        let creds = RepositoryCredentials {
            access_key_id: "test-key-id".to_string(),
            secret_access_key: "test-secret".to_string(),
        };

        let json = serde_json::to_string(&creds).unwrap();
        let deserialized: RepositoryCredentials = serde_json::from_str(&json).unwrap();

        assert_eq!(creds, deserialized);
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars = HashMap::from([
            (ACCESS_KEY_ENV, "AKIA123".to_string()),
            (SECRET_KEY_ENV, "secret".to_string()),
        ]);

        let creds = credentials_from_lookup(|name| vars.get(name).cloned()).unwrap();

        assert_eq!(creds.access_key_id, "AKIA123");
        assert_eq!(creds.secret_access_key, "secret");
    }

    #[test]
    fn test_credentials_from_lookup_requires_both_keys() {
        let only_key = HashMap::from([(ACCESS_KEY_ENV, "AKIA123".to_string())]);
        assert!(credentials_from_lookup(|name| only_key.get(name).cloned()).is_none());

        let empty_secret = HashMap::from([
            (ACCESS_KEY_ENV, "AKIA123".to_string()),
            (SECRET_KEY_ENV, String::new()),
        ]);
        assert!(credentials_from_lookup(|name| empty_secret.get(name).cloned()).is_none());
    }

    #[test]
    #[serial]
    fn test_store_load_and_delete() {
        if !is_keyring_available() {
            eprintln!("Skipping test_store_load_and_delete: keyring service not available");
            return;
        }

        cleanup_test_credentials();

        let creds = RepositoryCredentials {
            access_key_id: "test-store-key".to_string(),
            secret_access_key: "test-store-secret".to_string(),
        };

        store_credentials(&creds).expect("Failed to store credentials");
        let loaded = load_credentials().expect("Failed to load credentials");
        assert_eq!(creds, loaded);

        delete_credentials().unwrap();
        assert!(matches!(
            load_credentials(),
            Err(CredentialsError::NoCredentials)
        ));

        cleanup_test_credentials();
    }
}
