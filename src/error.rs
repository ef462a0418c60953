//! 错误处理

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("prompt error, {0}")]
    PromptCore(#[from] wan22_prompt_core::Error),
    #[error("py error, {0}")]
    PyErr(#[from] pyo3::PyErr),
}

impl From<Error> for pyo3::PyErr {
    fn from(e: Error) -> Self {
        match e {
            Error::PyErr(e) => e,
            e => pyo3::exceptions::PyRuntimeError::new_err(e.to_string()),
        }
    }
}
