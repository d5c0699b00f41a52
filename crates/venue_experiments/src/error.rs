use thiserror::Error;
use venue_core::ConfigError;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("experiment {experiment_id} run {run_id}: {source}")]
    Config {
        experiment_id: String,
        run_id: usize,
        #[source]
        source: ConfigError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid progress bar template: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}
