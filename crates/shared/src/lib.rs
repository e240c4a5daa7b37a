pub mod geo;
pub mod models;
pub mod soil;
