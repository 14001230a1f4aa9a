//! VLESS node model
//!
//! Contains the data structure produced by the subscription parser and
//! consumed by the QuantumultX generators.

use std::fmt;

/// Transport carrying the proxy stream, taken from the `type` query key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Tcp,
    Ws,
    Grpc,
    Http,
    Other(String),
}

impl Network {
    pub fn from_query(s: &str) -> Self {
        match s {
            "tcp" => Network::Tcp,
            "ws" => Network::Ws,
            "grpc" => Network::Grpc,
            "http" => Network::Http,
            other => Network::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Network::Tcp => "tcp",
            Network::Ws => "ws",
            Network::Grpc => "grpc",
            Network::Http => "http",
            Network::Other(s) => s,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport security, taken from the `security` query key.
///
/// An absent or empty key maps to [`Security::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Security {
    #[default]
    None,
    Tls,
    Other(String),
}

impl Security {
    pub fn from_query(s: &str) -> Self {
        match s {
            "" => Security::None,
            "tls" => Security::Tls,
            other => Security::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Security::None => "",
            Security::Tls => "tls",
            Security::Other(s) => s,
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Security::Tls)
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node parsed from a `vless://` link.
///
/// `uuid`, `server` and `port` are always populated; every other field
/// falls back to its default when the link does not carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlessNode {
    pub uuid: String,
    pub server: String,
    pub port: u16,
    pub remark: String,
    pub encryption: String,
    pub flow: String,
    pub network: Network,
    pub security: Security,
    pub sni: String,
    pub host: String,
    pub path: String,
    pub service_name: String,
    pub header_type: String,
}

impl VlessNode {
    /// Build a node from its required fields, filling the rest with defaults.
    pub fn new(uuid: impl Into<String>, server: impl Into<String>, port: u16) -> Self {
        let server = server.into();
        VlessNode {
            uuid: uuid.into(),
            remark: format!("{}:{}", server, port),
            server,
            port,
            encryption: DEFAULT_ENCRYPTION.to_string(),
            flow: String::new(),
            network: Network::default(),
            security: Security::default(),
            sni: String::new(),
            host: String::new(),
            path: String::new(),
            service_name: String::new(),
            header_type: DEFAULT_HEADER_TYPE.to_string(),
        }
    }

    /// `server:port`, as used in the first token of every output line.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

pub const DEFAULT_ENCRYPTION: &str = "none";
pub const DEFAULT_HEADER_TYPE: &str = "none";
