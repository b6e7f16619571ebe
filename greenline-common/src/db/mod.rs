//! Database access for GreenLine

pub mod init;
pub mod models;

pub use init::{create_emissions_table, init_database};
pub use models::{insert_emission_record, recent_emission_records, EmissionRecord};
