use thiserror::Error;

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("function has no stored points")]
    EmptyFunction,
    #[error("point at x={0} already exists in points list")]
    DuplicatePoint(f64),
    #[error("index {index} out of range for {len} stored points")]
    IndexOutOfRange { index: isize, len: usize },
}
