//! Resolution of the four job parameters from the environment, falling back
//! to built-in defaults. Resolution is total: every recognized name has a
//! default, so there is no failure mode.

use std::env;

pub const DEFAULT_FILE_URL: &str =
    "https://www.iso20022.org/sites/default/files/ISO10383_MIC/ISO10383_MIC.xls";
pub const DEFAULT_XLS_SHEET_NAME: &str = "MICs List by CC";
pub const DEFAULT_S3_BUCKET: &str = "S3-Bucket-Name";
pub const DEFAULT_S3_REGION: &str = "us-east-1";

/// Static name → default table. Lookup only, nothing constructed at runtime.
const DEFAULTS: &[(&str, &str)] = &[
    ("FILE_URL", DEFAULT_FILE_URL),
    ("XLS_SHEET_NAME", DEFAULT_XLS_SHEET_NAME),
    ("S3_BUCKET", DEFAULT_S3_BUCKET),
    ("S3_REGION", DEFAULT_S3_REGION),
];

#[derive(Debug, Clone)]
pub struct Settings {
    pub file_url: String,
    pub xls_sheet_name: String,
    pub s3_bucket: String,
    pub s3_region: String,
}

impl Settings {
    /// Resolve all parameters from the process environment.
    pub fn resolve() -> Self {
        Self::resolve_from(|key| env::var(key).ok())
    }

    /// Resolve all parameters through an injected lookup. A supplied value
    /// wins only if it is non-empty after trimming; the trimmed value is
    /// what gets used.
    pub fn resolve_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |key: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| {
                    default_for(key)
                        .unwrap_or_default()
                        .to_string()
                })
        };

        Settings {
            file_url: value_of("FILE_URL"),
            xls_sheet_name: value_of("XLS_SHEET_NAME"),
            s3_bucket: value_of("S3_BUCKET"),
            s3_region: value_of("S3_REGION"),
        }
    }
}

/// Built-in default for a recognized setting name.
pub fn default_for(key: &str) -> Option<&'static str> {
    DEFAULTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}
