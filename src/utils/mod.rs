pub mod base64;
pub mod file;
pub mod http_std;
pub mod url;

// Re-export common utilities
pub use file::{write_lines, WriteError};
pub use http_std::{web_get, FetchError, FetchOptions};
