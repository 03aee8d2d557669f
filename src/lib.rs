//! Beilage Processor Library
//!
//! Parses and normalizes the tabular attachments ("Beilagen") of
//! parliamentary answer documents from raw table extraction dumps into
//! clean CSV and JSON output pairs.
//!
//! This library provides tools for:
//! - Parsing locale-formatted numerics ("1.234,56") with an explicit null sentinel
//! - Per-attachment parsing strategies for every observed table shape
//! - Carry-over row state, availability windows and known-bad-row overrides
//! - Per-value integer coercion with mixed-column warnings
//! - Dual CSV/JSON serialization with post-write integer verification
//! - Batch processing that isolates document failures

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod assembler;
        pub mod attachment_registry;
        pub mod document_pipeline;
        pub mod integer_coercion;
        pub mod output_writer;
        pub mod table_parser;
    }
    pub mod adapters {
        pub mod extraction;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Document, DocumentType, FieldValue, Record};
pub use config::Config;
pub use error::{Error, Result};
