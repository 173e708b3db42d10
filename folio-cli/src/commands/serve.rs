use std::net::SocketAddr;
use std::time::Duration;

use folio::config::{Config, DEFAULT_BIND};

use crate::models::readme::ReadmeArgs;
use crate::models::store::StoreArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "serve", about = "Serve the portfolio HTTP API")]
pub struct Serve {
    #[clap(
        long,
        env = "FOLIO_BIND",
        default_value = DEFAULT_BIND,
        help = "Address to listen on"
    )]
    bind: SocketAddr,
    #[clap(
        long,
        env = "FOLIO_REQUEST_TIMEOUT",
        default_value_t = 30,
        help = "Seconds before a request is abandoned"
    )]
    request_timeout: u64,
    #[clap(flatten)]
    readme: ReadmeArgs,
}

impl Serve {
    pub async fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        if self.request_timeout == 0 {
            return Err(AppError::ConfigError(
                "request timeout must be at least one second".to_owned(),
            ));
        }

        let config = Config {
            bind: self.bind,
            request_timeout: Duration::from_secs(self.request_timeout),
            store: store.config(),
            readme: self.readme.config()?,
        };

        println!(
            "Serving {} projects on http://{}",
            config.store.kind, config.bind
        );
        folio::server::serve(&config).await?;
        Ok(())
    }
}
