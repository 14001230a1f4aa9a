use crate::generator::{proxy_to_quanx_vless_lines, proxy_to_quanx_vmess_lines};
use crate::models::VlessNode;
use crate::parser::explode_sub;
use crate::settings::Settings;
use crate::utils::file::{write_lines, WriteError};
use crate::utils::http_std::{web_get, FetchError};
use log::{error, info};
use std::path::Path;

/// Nodes parsed from one subscription body and the two line sets built from them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub nodes: Vec<VlessNode>,
    /// Primary output, one `vmess=` line per node
    pub vmess: Vec<String>,
    /// Fallback output, one `vless=` line per node
    pub vless: Vec<String>,
}

/// Outcome of writing both output files; one failing does not stop the other.
#[derive(Debug)]
pub struct OutputReport {
    pub vmess: Result<(), WriteError>,
    pub vless: Result<(), WriteError>,
}

impl OutputReport {
    pub fn is_ok(&self) -> bool {
        self.vmess.is_ok() && self.vless.is_ok()
    }
}

/// Parse a raw subscription body and build both QuantumultX line sets
///
/// Does no I/O.
pub fn convert(raw: &str, vmess_tag_suffix: &str) -> Conversion {
    let nodes = explode_sub(raw);
    let vmess = proxy_to_quanx_vmess_lines(&nodes, vmess_tag_suffix);
    let vless = proxy_to_quanx_vless_lines(&nodes);

    Conversion {
        nodes,
        vmess,
        vless,
    }
}

fn write_output(lines: &[String], path: &Path, label: &str) -> Result<(), WriteError> {
    match write_lines(lines, path) {
        Ok(()) => {
            info!(
                "Saved {} {} lines to {}",
                lines.len(),
                label,
                path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}

/// Write the VMess and VLESS line sets to their files
///
/// Both files are always attempted, and written even when empty.
pub fn write_outputs(
    conversion: &Conversion,
    vmess_path: impl AsRef<Path>,
    vless_path: impl AsRef<Path>,
) -> OutputReport {
    OutputReport {
        vmess: write_output(&conversion.vmess, vmess_path.as_ref(), "VMess"),
        vless: write_output(&conversion.vless, vless_path.as_ref(), "VLESS"),
    }
}

fn log_lines(title: &str, lines: &[String]) {
    info!("{}:", title);
    for (i, line) in lines.iter().enumerate() {
        info!("{}. {}", i + 1, line);
    }
}

/// Fetch, convert and write, using the given settings
///
/// A fetch failure aborts before anything is written.
pub fn subconverter(settings: &Settings) -> Result<OutputReport, FetchError> {
    info!("Fetching subscription from {}", settings.subscription_url);
    let raw = web_get(&settings.subscription_url, &settings.fetch_options())?;

    let conversion = convert(&raw, &settings.vmess_tag_suffix);
    info!("Parsed {} nodes", conversion.nodes.len());

    log_lines("VMess lines (recommended)", &conversion.vmess);
    log_lines("VLESS lines (fallback)", &conversion.vless);

    Ok(write_outputs(
        &conversion,
        &settings.vmess_output,
        &settings.vless_output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_builds_both_line_sets() {
        let raw = "vless://U@S:443?type=ws&security=tls&host=example.com&path=%2Fapi#Node1\n\
                   vless://broken\n";
        let conversion = convert(raw, "-VMess");

        assert_eq!(conversion.nodes.len(), 1);
        assert_eq!(conversion.vmess.len(), 1);
        assert_eq!(conversion.vless.len(), 1);
        assert!(conversion.vmess[0].starts_with("vmess=S:443, "));
        assert!(conversion.vless[0].starts_with("vless=S:443, "));
    }

    #[test]
    fn test_convert_empty_input() {
        assert_eq!(convert("", "-VMess"), Conversion::default());
    }

    #[test]
    fn test_write_outputs_independent_failures() {
        let dir = tempfile::tempdir().unwrap();
        let conversion = convert("vless://U@S:443#N", "-VMess");

        let vmess_path = dir.path().join("missing-dir").join("vmess.conf");
        let vless_path = dir.path().join("vless.conf");
        let report = write_outputs(&conversion, &vmess_path, &vless_path);

        assert!(report.vmess.is_err());
        assert!(report.vless.is_ok());
        assert!(!report.is_ok());
        assert_eq!(
            std::fs::read_to_string(&vless_path).unwrap(),
            format!("{}\n", conversion.vless[0])
        );
    }

    #[test]
    fn test_subconverter_fetch_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            subscription_url: "not a url".to_string(),
            vmess_output: dir.path().join("vmess.conf").display().to_string(),
            vless_output: dir.path().join("vless.conf").display().to_string(),
            ..Settings::default()
        };

        assert!(subconverter(&settings).is_err());
        assert!(!dir.path().join("vmess.conf").exists());
        assert!(!dir.path().join("vless.conf").exists());
    }
}
