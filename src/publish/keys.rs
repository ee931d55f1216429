use std::path::Path;

/// Destination key for the published record set:
/// `<file stem>-<sheet name with spaces underscored>.json`.
pub fn object_key(local_path: &Path, sheet_name: &str) -> String {
    let stem = local_path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    format!("{stem}-{}.json", sheet_name.replace(' ', "_"))
}
