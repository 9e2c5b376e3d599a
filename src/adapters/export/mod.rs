//! Export adapters. Turn audit records into shareable files.

pub mod csv_utils;

pub use csv_utils::records_to_csv;
