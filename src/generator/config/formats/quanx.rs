use crate::models::{Network, Security, VlessNode};

/// Cipher written for every VMess line; VLESS carries no cipher of its own.
pub const VMESS_METHOD: &str = "aes-128-gcm";

/// Cipher written for VLESS nodes whose `encryption` is anything but `none`.
pub const VLESS_FALLBACK_METHOD: &str = "chacha20-poly1305";

pub const DEFAULT_VMESS_TAG_SUFFIX: &str = "-VMess";

/// Value of the QuantumultX `obfs=` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObfsMode {
    Ws,
    Wss,
    OverTls,
    Grpc,
    Http,
}

impl ObfsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ObfsMode::Ws => "ws",
            ObfsMode::Wss => "wss",
            ObfsMode::OverTls => "over-tls",
            ObfsMode::Grpc => "grpc",
            ObfsMode::Http => "http",
        }
    }
}

/// Comma-separated `key=value` line builder.
#[derive(Debug, Default)]
struct QuanxLine {
    parts: Vec<String>,
}

impl QuanxLine {
    fn push(&mut self, key: &str, value: impl AsRef<str>) {
        self.parts.push(format!("{}={}", key, value.as_ref()));
    }

    /// Empty values are skipped, never written as `key=`.
    fn push_non_empty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.push(key, value);
        }
    }

    fn push_first_non_empty(&mut self, key: &str, preferred: &str, fallback: &str) {
        self.push_non_empty(key, first_non_empty(preferred, fallback));
    }

    fn finish(self) -> String {
        self.parts.join(", ")
    }
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

/// Obfuscation mode used for the VMess line of a node, if any.
pub fn vmess_obfs_mode(network: &Network, security: &Security) -> Option<ObfsMode> {
    match (network, security) {
        (Network::Ws, Security::Tls) => Some(ObfsMode::Wss),
        (Network::Ws, _) => Some(ObfsMode::Ws),
        (Network::Tcp, Security::Tls) => Some(ObfsMode::OverTls),
        (Network::Grpc, _) => Some(ObfsMode::Grpc),
        (Network::Http, _) => Some(ObfsMode::Http),
        _ => None,
    }
}

/// Obfuscation mode used for the VLESS line of a node, if any.
pub fn vless_obfs_mode(network: &Network, security: &Security) -> Option<ObfsMode> {
    match (network, security) {
        (Network::Ws, Security::Tls) => Some(ObfsMode::Wss),
        (_, Security::Tls) => Some(ObfsMode::OverTls),
        (Network::Ws, _) => Some(ObfsMode::Ws),
        _ => None,
    }
}

/// Convert a node to a QuantumultX `vmess=` server line
///
/// Field order: address, method, password, obfs block, `tls13`, fast-open,
/// udp-relay, tag. The obfs-host source depends on the mode:
/// `ws`/`wss` prefer `host` over `sni`, `over-tls` prefers `sni` over
/// `host`, `grpc` prefers `serviceName` over `host`.
pub fn proxy_to_quanx_vmess(node: &VlessNode, tag_suffix: &str) -> String {
    let mut line = QuanxLine::default();

    line.push("vmess", node.address());
    line.push("method", VMESS_METHOD);
    line.push("password", &node.uuid);

    if let Some(mode) = vmess_obfs_mode(&node.network, &node.security) {
        line.push("obfs", mode.as_str());
        match mode {
            ObfsMode::Ws | ObfsMode::Wss => {
                line.push_non_empty("obfs-uri", &node.path);
                line.push_first_non_empty("obfs-host", &node.host, &node.sni);
            }
            ObfsMode::OverTls => {
                line.push_first_non_empty("obfs-host", &node.sni, &node.host);
            }
            ObfsMode::Grpc => {
                line.push_first_non_empty("obfs-host", &node.service_name, &node.host);
            }
            ObfsMode::Http => {
                line.push_non_empty("obfs-host", &node.host);
                line.push_non_empty("obfs-uri", &node.path);
            }
        }
    }

    if node.security.is_tls() {
        line.push("tls13", "true");
    }

    line.push("fast-open", "false");
    line.push("udp-relay", "false");
    line.push("tag", format!("{}{}", node.remark, tag_suffix));

    line.finish()
}

/// Convert a node to a QuantumultX `vless=` server line
///
/// Every `encryption` other than `none` collapses to
/// [`VLESS_FALLBACK_METHOD`].
pub fn proxy_to_quanx_vless(node: &VlessNode) -> String {
    let mut line = QuanxLine::default();

    line.push("vless", node.address());
    line.push("password", &node.uuid);
    line.push("fast-open", "false");
    line.push("udp-relay", "false");

    if node.encryption == "none" {
        line.push("method", "none");
    } else {
        line.push("method", VLESS_FALLBACK_METHOD);
    }

    match vless_obfs_mode(&node.network, &node.security) {
        Some(mode @ (ObfsMode::Wss | ObfsMode::OverTls)) => {
            line.push("obfs", mode.as_str());
            line.push_first_non_empty("obfs-host", &node.sni, &node.host);
            line.push("tls13", "true");
        }
        Some(mode) => {
            line.push("obfs", mode.as_str());
            line.push_non_empty("obfs-host", &node.host);
        }
        None => {}
    }

    if matches!(node.network, Network::Ws | Network::Http) {
        line.push_non_empty("obfs-uri", &node.path);
    }

    line.push_non_empty("flow", &node.flow);
    line.push("tag", &node.remark);

    line.finish()
}

/// Convert every node to its VMess line, keeping order.
pub fn proxy_to_quanx_vmess_lines(nodes: &[VlessNode], tag_suffix: &str) -> Vec<String> {
    nodes
        .iter()
        .map(|node| proxy_to_quanx_vmess(node, tag_suffix))
        .collect()
}

/// Convert every node to its VLESS line, keeping order.
pub fn proxy_to_quanx_vless_lines(nodes: &[VlessNode]) -> Vec<String> {
    nodes.iter().map(proxy_to_quanx_vless).collect()
}
