use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::align::{AlignConfig, FingerprintScoring};
use crate::chem::EnvironmentExtractor;
use crate::search::SearchOptions;
use crate::stats::KarlinParams;
use crate::{MolblastError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub statistics: KarlinParams,
    pub search: SearchConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub match_score: i32,
    pub class_score: i32,
    pub mismatch_score: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub sample_fraction: f64,
    pub min_score: i32,
    pub max_regions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Neighborhood radius of the environment classes.
    pub radius: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                match_score: 5,
                class_score: 0,
                mismatch_score: -4,
                gap_open: -10,
                gap_extend: -2,
            },
            statistics: KarlinParams::default(),
            search: SearchConfig {
                top_k: 10,
                sample_fraction: 1.0,
                min_score: 5,
                max_regions: 8,
            },
            extraction: ExtractionConfig { radius: 1 },
        }
    }
}

impl Config {
    /// Validate the scoring section and produce the engine configuration.
    pub fn align_config(&self) -> Result<AlignConfig> {
        let scoring = FingerprintScoring::new(
            self.scoring.match_score,
            self.scoring.class_score,
            self.scoring.mismatch_score,
            self.scoring.gap_open,
            self.scoring.gap_extend,
        )?;
        Ok(AlignConfig {
            scoring,
            min_score: self.search.min_score,
            max_regions: self.search.max_regions,
        })
    }

    pub fn search_options(&self) -> Result<SearchOptions> {
        if self.statistics.lambda <= 0.0 || self.statistics.k <= 0.0 {
            return Err(MolblastError::Config(format!(
                "statistics constants must be positive, got lambda {} / k {}",
                self.statistics.lambda, self.statistics.k
            )));
        }
        Ok(SearchOptions {
            top_k: self.search.top_k,
            sample_fraction: self.search.sample_fraction,
            align: self.align_config()?,
            karlin: self.statistics,
        })
    }

    pub fn extractor(&self) -> EnvironmentExtractor {
        EnvironmentExtractor::new(self.extraction.radius)
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref())
        .map_err(|e| MolblastError::storage(path.as_ref(), e))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| MolblastError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| MolblastError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path.as_ref(), contents).map_err(|e| MolblastError::storage(path.as_ref(), e))?;
    Ok(())
}
