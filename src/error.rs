use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown dimension: `{0}`")]
    UnknownDimension(String),

    #[error("row {row} is out of range for a dataset of {len} rows")]
    RowOutOfRange { row: usize, len: usize },
}
