use std::time::Duration;

use folio::config::ReadmeConfig;
use folio::readme::RAW_CONTENT_HOST;
use url::Url;

use crate::AppError;

/// Flags for commands that fetch READMEs.
#[derive(Clone, Debug, clap::Args)]
pub struct ReadmeArgs {
    #[clap(
        long,
        env = "FOLIO_RAW_HOST",
        default_value = RAW_CONTENT_HOST,
        help = "Base URL of the raw-content host"
    )]
    pub raw_host: Url,
    #[clap(
        long,
        env = "FOLIO_README_TIMEOUT",
        default_value_t = 10,
        help = "Seconds to wait for each README request"
    )]
    pub readme_timeout: u64,
}

impl ReadmeArgs {
    pub fn config(&self) -> Result<ReadmeConfig, AppError> {
        if self.readme_timeout == 0 {
            return Err(AppError::ConfigError(
                "README timeout must be at least one second".to_owned(),
            ));
        }
        Ok(ReadmeConfig {
            raw_host: self.raw_host.clone(),
            timeout: Duration::from_secs(self.readme_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(readme_timeout: u64) -> ReadmeArgs {
        ReadmeArgs {
            raw_host: Url::parse(RAW_CONTENT_HOST).unwrap(),
            readme_timeout,
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(matches!(args(0).config(), Err(AppError::ConfigError(_))));

        let config = args(3).config().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
