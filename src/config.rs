use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    pub log_level: String,

    /// Number of rows the scheduler pulls from a row source before
    /// flushing them into the result set.
    pub vector_size: usize,

    /// Schemas consulted, in order, when resolving unqualified
    /// function names.
    #[serde(default)]
    pub search_path: Vec<String>,
}

impl Config {
    pub fn new(file: &str) -> Result<Config> {
        let mut cfg = config::Config::builder()
            .set_default("log_level", "info")?
            .set_default("vector_size", 1024)?
            .set_default("search_path", vec!["pg_catalog".to_string(), "public".to_string()])?;
        if !file.is_empty() {
            cfg = cfg.add_source(config::File::with_name(file))
        }
        cfg = cfg.add_source(
            config::Environment::with_prefix("SBOXGEN")
                .list_separator(",")
                .with_list_parse_key("search_path")
                .try_parsing(true),
        );
        Ok(cfg.build()?.try_deserialize()?)
    }

    /// A logger builder filtering at the configured level, e.g. `debug`
    /// or `sboxgen::sql=trace`.
    pub fn logger(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&self.log_level);
        builder
    }
}
