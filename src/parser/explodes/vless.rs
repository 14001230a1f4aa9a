use crate::models::{Network, Security, VlessNode};
use crate::utils::url::url_decode;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

pub const VLESS_SCHEME: &str = "vless://";

/// Why a single subscription line was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineParseError {
    #[error("not a vless:// link")]
    InvalidScheme,

    #[error("malformed URI: {0}")]
    InvalidUri(String),

    #[error("missing uuid")]
    MissingUuid,

    #[error("missing host")]
    MissingHost,

    #[error("missing or zero port")]
    MissingPort,
}

/// Parse a VLESS link into a [`VlessNode`]
///
/// Format: `vless://<uuid>@<host>:<port>?<query>#<remark>`
///
/// Only the first non-empty value of a repeated query key is used, and a
/// blank value leaves the field at its default. Keys other than
/// `encryption`, `flow`, `type`, `security`, `sni`, `host`, `path`,
/// `serviceName` and `headerType` are ignored.
pub fn explode_vless(vless: &str) -> Result<VlessNode, LineParseError> {
    if !vless.starts_with(VLESS_SCHEME) {
        return Err(LineParseError::InvalidScheme);
    }

    let url = Url::parse(vless).map_err(|e| LineParseError::InvalidUri(e.to_string()))?;

    let uuid = url_decode(url.username());
    if uuid.is_empty() {
        return Err(LineParseError::MissingUuid);
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(LineParseError::MissingHost),
    };

    let port = match url.port() {
        Some(port) if port != 0 => port,
        _ => return Err(LineParseError::MissingPort),
    };

    // First non-empty occurrence wins; blank values fall back to defaults
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    let param = |key: &str| params.get(key).cloned().unwrap_or_default();

    let mut node = VlessNode::new(uuid, host, port);

    if let Some(remark) = url.fragment().map(url_decode).filter(|r| !r.is_empty()) {
        node.remark = remark;
    }
    if let Some(encryption) = params.get("encryption") {
        node.encryption = encryption.clone();
    }
    if let Some(network) = params.get("type") {
        node.network = Network::from_query(network);
    }
    if let Some(header_type) = params.get("headerType") {
        node.header_type = header_type.clone();
    }
    node.flow = param("flow");
    node.security = Security::from_query(&param("security"));
    node.sni = param("sni");
    node.host = param("host");
    // Already form-decoded once; links in the wild often double-encode it.
    node.path = url_decode(&param("path"));
    node.service_name = param("serviceName");

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_vless_minimal() {
        let node = explode_vless("vless://uuid@host:443?security=tls#tag").unwrap();

        assert_eq!(node.uuid, "uuid");
        assert_eq!(node.server, "host");
        assert_eq!(node.port, 443);
        assert_eq!(node.remark, "tag");
        assert_eq!(node.security, Security::Tls);
        assert_eq!(node.network, Network::Tcp);
        assert_eq!(node.encryption, "none");
        assert_eq!(node.header_type, "none");
    }

    #[test]
    fn test_explode_vless_full_query() {
        let link = "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:8443\
                    ?encryption=none&flow=xtls-rprx-vision&type=grpc&security=tls\
                    &sni=sni.example.com&host=cdn.example.com&path=%2Fws%3Fed%3D2048\
                    &serviceName=my%2520service&headerType=http&fp=chrome\
                    #%E9%A6%99%E6%B8%AF%2001";
        let node = explode_vless(link).unwrap();

        assert_eq!(node.uuid, "b831381d-6324-4d53-ad4f-8cda48b30811");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 8443);
        assert_eq!(node.remark, "香港 01");
        assert_eq!(node.flow, "xtls-rprx-vision");
        assert_eq!(node.network, Network::Grpc);
        assert_eq!(node.sni, "sni.example.com");
        assert_eq!(node.host, "cdn.example.com");
        assert_eq!(node.path, "/ws?ed=2048");
        assert_eq!(node.service_name, "my%20service");
        assert_eq!(node.header_type, "http");
    }

    #[test]
    fn test_explode_vless_remark_defaults_to_address() {
        let node = explode_vless("vless://uuid@1.2.3.4:8080").unwrap();
        assert_eq!(node.remark, "1.2.3.4:8080");

        let node = explode_vless("vless://uuid@1.2.3.4:8080?type=ws#").unwrap();
        assert_eq!(node.remark, "1.2.3.4:8080");
    }

    #[test]
    fn test_explode_vless_first_query_value_wins() {
        let node = explode_vless("vless://uuid@host:443?type=ws&type=grpc&sni=a&sni=b").unwrap();
        assert_eq!(node.network, Network::Ws);
        assert_eq!(node.sni, "a");
    }

    #[test]
    fn test_explode_vless_blank_values_use_defaults() {
        let node =
            explode_vless("vless://U@S:443?type=&encryption=&headerType=&security=tls#T").unwrap();
        assert_eq!(node.network, Network::Tcp);
        assert_eq!(node.encryption, "none");
        assert_eq!(node.header_type, "none");
        assert_eq!(node.security, Security::Tls);

        let node = explode_vless("vless://U@S:443?sni=&sni=b.example.com").unwrap();
        assert_eq!(node.sni, "b.example.com");
    }

    #[test]
    fn test_explode_vless_unknown_values_kept() {
        let node = explode_vless("vless://uuid@host:443?type=h2&security=reality").unwrap();
        assert_eq!(node.network, Network::Other("h2".to_string()));
        assert_eq!(node.security, Security::Other("reality".to_string()));
    }

    #[test]
    fn test_explode_vless_rejects_bad_links() {
        assert_eq!(
            explode_vless("vmess://uuid@host:443"),
            Err(LineParseError::InvalidScheme)
        );
        assert_eq!(explode_vless("vless://bad"), Err(LineParseError::MissingUuid));
        assert_eq!(
            explode_vless("vless://uuid@host"),
            Err(LineParseError::MissingPort)
        );
        assert_eq!(
            explode_vless("vless://uuid@host:0"),
            Err(LineParseError::MissingPort)
        );
        assert!(matches!(
            explode_vless("vless://uuid@host:abc"),
            Err(LineParseError::InvalidUri(_))
        ));
        assert!(matches!(
            explode_vless("vless://uuid@host:70000"),
            Err(LineParseError::InvalidUri(_))
        ));
    }
}
