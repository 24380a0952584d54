// src/utils.rs
use std::path::Path;

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Render a byte count the way the upload widget shows it: "2.00 MB"
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    if exponent == 0 {
        format!("{} Bytes", bytes)
    } else {
        let value = bytes as f64 / 1024_f64.powi(exponent as i32);
        format!("{:.2} {}", value, UNITS[exponent])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("document.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.00 MB");
    }
}
