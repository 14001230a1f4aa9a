//! Core data models for the application
//!
//! This module contains the node record shared by the parser and the
//! generators, separated from the logic that operates on it.
//!
//! # Usage
//!
//! ```rust
//! use vless2quanx::models::{Network, Security, VlessNode};
//!
//! let mut node = VlessNode::new("b831381d-6324-4d53-ad4f-8cda48b30811", "example.com", 443);
//! node.network = Network::Ws;
//! node.security = Security::Tls;
//! assert_eq!(node.address(), "example.com:443");
//! ```

mod proxy;

pub use proxy::*;
