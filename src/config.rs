use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::Error;

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub mongodb_uri: String,
    pub database_name: String,
    /// Directory the exported workbooks are written to and served from.
    pub export_dir: PathBuf,
    /// URL path the export directory is served under, without a trailing slash.
    pub static_url: String,
}

impl Config {
    /// Reads the configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Config, Error> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let listen_addr = var("LISTEN_ADDR", "127.0.0.1:8080");
        let listen_addr = listen_addr.parse().map_err(|_| Error::InvalidConfig {
            name: "LISTEN_ADDR",
            value: listen_addr.clone(),
        })?;

        let static_url = var("STATIC_URL", "/static");
        if !static_url.starts_with('/') {
            return Err(Error::InvalidConfig {
                name: "STATIC_URL",
                value: static_url,
            });
        }

        Ok(Config {
            listen_addr,
            mongodb_uri: var("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: var("DATABASE_NAME", "excel"),
            export_dir: PathBuf::from(var("EXPORT_DIR", "static/exports")),
            static_url: static_url.trim_end_matches('/').to_string(),
        })
    }

    /// Where the export for `file_name` can be downloaded.
    pub fn export_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.static_url, file_name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(
            config.listen_addr,
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "excel");
        assert_eq!(config.export_dir, PathBuf::from("static/exports"));
        assert_eq!(config.export_url("CPN-1.xlsx"), "/static/CPN-1.xlsx");
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("LISTEN_ADDR", "0.0.0.0:9000"),
            ("DATABASE_NAME", "campaigns"),
            ("EXPORT_DIR", "/srv/exports"),
            ("STATIC_URL", "/downloads/"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.database_name, "campaigns");
        assert_eq!(config.export_dir, PathBuf::from("/srv/exports"));
        assert_eq!(config.export_url("a.xlsx"), "/downloads/a.xlsx");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            config(&[("LISTEN_ADDR", "localhost")]).unwrap_err(),
            Error::InvalidConfig {
                name: "LISTEN_ADDR",
                value: "localhost".into()
            }
        );
        assert!(config(&[("STATIC_URL", "static")]).is_err());
    }
}
