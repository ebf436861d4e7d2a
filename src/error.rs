use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("data set index {index} out of range (data set count: {count})")]
    DataSetIndexOutOfRange { index: usize, count: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
