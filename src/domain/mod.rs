pub mod dataset;
pub mod error;
pub mod geo;
pub mod insight;
pub mod report;
pub mod roles;
