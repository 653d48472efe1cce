use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("node {index} is out of range for a forest of {len} nodes")]
    OutOfRange { index: usize, len: usize },
    #[error("cannot connect node {0} to itself")]
    SelfLoop(usize),
    #[error("variants disagree on total weight for n = {n}: {weights}")]
    WeightMismatch { n: usize, weights: String },
    #[error("results log: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }
}
