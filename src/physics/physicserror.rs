use thiserror::Error;

use crate::graph::functionerror::FunctionError;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error(transparent)]
    FunctionError(#[from] FunctionError),
    #[error("missing dependency: {0}")]
    MissingDependency(String),
    #[error("force does not implement {0}")]
    UnimplementedCapability(&'static str),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}
