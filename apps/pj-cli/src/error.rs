use std::path::PathBuf;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read design file: {path}")]
    DesignFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse design file: {0}")]
    DesignFileParse(#[from] serde_yaml::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Design failed validation with {errors} critical finding(s)")]
    Rejected { errors: usize },

    #[error("Core error: {0}")]
    Core(#[from] pj_core::PjError),

    #[error("Model error: {0}")]
    Model(#[from] pj_model::ModelError),

    #[error("Optimization error: {0}")]
    Optimize(#[from] pj_optimize::OptimizeError),
}
