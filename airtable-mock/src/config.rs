//! Mock configuration.
//!
//! This module provides configuration loading for the mock from environment
//! variables.
//!
//! # Environment Variables
//!
//! - `AIRTABLE_MOCK_MAX_PAGE_SIZE`: Records per page when a query sets no limit,
//!   and the cap applied to larger limits (default: `100`)
//! - `AIRTABLE_MOCK_ID_SEED`: Seed for the record id generator (default: unset,
//!   ids are drawn from OS entropy)
//!
//! The process-wide registry reads these once, on first use. Registries built
//! with `Registry::with_config` use whatever config they are given.
//!
//! # Invariants
//!
//! - `max_page_size` is always at least 1

/// Mock configuration.
///
/// # Post-conditions
///
/// - `max_page_size >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    /// Page size used for queries without a limit, and the upper clamp for
    /// explicit limits. The modeled service never returns more than 100
    /// records in one page.
    max_page_size: usize,
    /// Seed for record id generation. `None` draws from OS entropy.
    id_seed: Option<u64>,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            max_page_size: Self::DEFAULT_MAX_PAGE_SIZE,
            id_seed: None,
        }
    }
}

impl MockConfig {
    /// Default page size, matching the modeled service.
    pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

    const MAX_PAGE_SIZE_VAR: &'static str = "AIRTABLE_MOCK_MAX_PAGE_SIZE";
    const ID_SEED_VAR: &'static str = "AIRTABLE_MOCK_ID_SEED";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `AIRTABLE_MOCK_MAX_PAGE_SIZE` is set but is not a positive integer
    /// - `AIRTABLE_MOCK_ID_SEED` is set but is not a valid `u64`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_page_size = match lookup(Self::MAX_PAGE_SIZE_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: Self::MAX_PAGE_SIZE_VAR.to_owned(),
                        message: format!("'{value}' is not a positive integer"),
                    });
                }
            },
            None => Self::DEFAULT_MAX_PAGE_SIZE,
        };

        let id_seed = match lookup(Self::ID_SEED_VAR) {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    name: Self::ID_SEED_VAR.to_owned(),
                    message: format!("'{value}' is not a valid u64 seed"),
                }
            })?),
            None => None,
        };

        Ok(Self {
            max_page_size,
            id_seed,
        })
    }

    #[must_use]
    pub const fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    #[must_use]
    pub const fn id_seed(&self) -> Option<u64> {
        self.id_seed
    }

    /// Set the id seed, for reproducible record ids.
    #[must_use]
    pub const fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// Set the page size. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size.max(1);
        self
    }
}
