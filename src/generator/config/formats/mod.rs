pub mod quanx;

// Re-export format converters
pub use quanx::{
    proxy_to_quanx_vless, proxy_to_quanx_vless_lines, proxy_to_quanx_vmess,
    proxy_to_quanx_vmess_lines,
};
