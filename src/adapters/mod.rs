//! Concrete adapter implementations for ports.

pub mod console_report;
pub mod csv_adapter;
pub mod csv_report;
pub mod file_config_adapter;
pub mod file_data_adapter;
pub mod json_adapter;
