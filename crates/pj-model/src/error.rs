use pj_core::PjError;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid model constant {name}: {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: PjError,
    },
}

impl ModelError {
    pub(crate) fn stage(stage: &'static str) -> impl FnOnce(PjError) -> Self {
        move |source| ModelError::Stage { stage, source }
    }
}
