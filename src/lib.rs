pub mod config_handler;
pub mod models;
pub mod roster_store;
pub mod aggregation_service;
pub mod sheet_service;
pub mod import_service;
pub mod api;
