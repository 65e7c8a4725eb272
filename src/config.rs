use crate::upload::QueryEncoding;
use clap::Parser;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000/";

#[derive(Parser, Debug)]
#[command(name = "ino_uploader", about = "Upload an Arduino sketch for compilation")]
pub struct Cli {
    /// Base URL of the upload service; `/upload` and `result.html` resolve against it.
    #[arg(long, env = "INO_UPLOADER_SERVICE_URL", default_value = DEFAULT_SERVICE_URL)]
    pub service_url: String,
    /// Percent-encode chip and gerber in the results page URL.
    #[arg(
        long,
        env = "INO_UPLOADER_PERCENT_ENCODE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub percent_encode_query: bool,
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid service url `{value}`: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("service url must be http or https, got `{0}`")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub service_url: Url,
    pub query_encoding: QueryEncoding,
    pub log_filter: String,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let service_url = Url::parse(&cli.service_url).map_err(|source| ConfigError::InvalidUrl {
            value: cli.service_url.clone(),
            source,
        })?;
        if !matches!(service_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(
                service_url.scheme().to_string(),
            ));
        }

        let query_encoding = if cli.percent_encode_query {
            QueryEncoding::Percent
        } else {
            QueryEncoding::Verbatim
        };

        Ok(Self {
            service_url,
            query_encoding,
            log_filter: cli.log_filter,
        })
    }
}
