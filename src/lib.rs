pub mod annotation;
pub mod bim;
pub mod markers;
pub mod output;
pub mod resolver;
pub mod sgscore;
pub mod store;
pub mod types;
