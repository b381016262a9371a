//! Synthetic market data for training the opportunity model.

pub mod export;
pub mod generator;

pub use export::{read_csv, read_csv_file, write_csv, write_csv_file, DatasetError};
pub use generator::{demand_probability, generate, MarketGeneratorConfig};
