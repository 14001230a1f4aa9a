pub mod config;

// Re-export format converters
pub use config::formats::quanx::{
    proxy_to_quanx_vless, proxy_to_quanx_vless_lines, proxy_to_quanx_vmess,
    proxy_to_quanx_vmess_lines, DEFAULT_VMESS_TAG_SUFFIX,
};
