pub mod build;
pub mod search;

use std::path::PathBuf;

use crate::config::{self, Config};

/// Resolve the effective configuration: an explicit `--config` flag wins,
/// then the `MOLBLAST_CONFIG` environment variable, then built-in defaults.
pub(crate) fn effective_config(flag: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = flag.or_else(|| std::env::var("MOLBLAST_CONFIG").ok().map(PathBuf::from));
    match path {
        Some(path) => Ok(config::load_config(path)?),
        None => Ok(config::default_config()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flag_and_env_fall_back_to_defaults() {
        std::env::remove_var("MOLBLAST_CONFIG");
        let resolved = effective_config(None).unwrap();
        let defaults = config::default_config();
        assert_eq!(resolved.scoring.match_score, defaults.scoring.match_score);
        assert_eq!(resolved.search.top_k, defaults.search.top_k);
    }

    #[test]
    fn explicit_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("molblast.toml");
        let mut config = config::default_config();
        config.search.top_k = 3;
        config::save_config(&path, &config).unwrap();

        let resolved = effective_config(Some(path)).unwrap();
        assert_eq!(resolved.search.top_k, 3);
    }
}
