//! Data module - source loading, parsing and reshaping

pub mod gdp;
pub mod housing;
pub mod loader;
pub mod towns;

pub use gdp::GdpReader;
pub use housing::HousingReshaper;
pub use loader::DataLoader;
pub use towns::TownListParser;
