pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the node types for easier access
pub use models::{Network, Security, VlessNode};

// Re-export the conversion pipeline
pub use interfaces::{convert, subconverter, write_outputs, Conversion, OutputReport};
pub use settings::Settings;
