//! Output path derivation.

use std::path::{Path, PathBuf};

/// `dir/name.ext` becomes `dir/name.<suffix>.ext`.
///
/// A name without an extension simply gains `.<suffix>`.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}.{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}.{}", stem, suffix),
    };
    input.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_inserts_suffix() {
        assert_eq!(
            output_path(Path::new("api/store.go"), "misura"),
            PathBuf::from("api/store.misura.go")
        );
        assert_eq!(output_path(Path::new("store.go"), "wrap"), PathBuf::from("store.wrap.go"));
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(output_path(Path::new("store"), "misura"), PathBuf::from("store.misura"));
    }

    #[test]
    fn test_output_path_keeps_inner_dots() {
        assert_eq!(
            output_path(Path::new("store.v2.go"), "misura"),
            PathBuf::from("store.v2.misura.go")
        );
    }
}
