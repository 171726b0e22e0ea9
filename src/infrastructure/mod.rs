pub mod config;
pub mod dataset_store;
pub mod geocoding;
pub mod llm_clients;
pub mod tabular;
