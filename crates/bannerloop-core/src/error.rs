use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Carousel needs at least 2 items, got {count}")]
    InsufficientItems { count: usize },

    #[error("Carousel has not been supplied with items")]
    NoItems,

    #[error("Padded slot {slot} is out of range ({len} slots)")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
