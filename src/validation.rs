//! Input path validation helpers.

use crate::error::DecodeError;
use std::path::Path;

/// Extracts the extension token of a path, lowercased and without the dot.
///
/// # Arguments
///
/// * `path` - The path to inspect.
///
/// # Returns
///
/// * `Some(extension)` if the final path component has an extension.
/// * `None` otherwise.
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Validates that a file exists and carries one of the allowed extensions.
///
/// The extension is checked first so that a typo in the extension is
/// reported as such even when the file is also missing.
///
/// # Arguments
///
/// * `path` - The file to validate.
/// * `allowed` - Allowed extensions, lowercase, without the dot.
///
/// # Returns
///
/// * `Ok(())` if the file is usable.
/// * `Err(DecodeError::UnsupportedExtension)` or `Err(DecodeError::MissingFile)` otherwise.
pub fn validate_input(path: &Path, allowed: &[&str]) -> Result<(), DecodeError> {
    let extension = file_extension(path).unwrap_or_default();
    if !allowed.contains(&extension.as_str()) {
        return Err(DecodeError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension,
            allowed: allowed.join(", "),
        });
    }
    if !path.is_file() {
        return Err(DecodeError::MissingFile(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("a/b/rec.DATX")), Some("datx".into()));
        assert_eq!(file_extension(Path::new("rec.dat")), Some("dat".into()));
        assert_eq!(file_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_validate_input_extension_checked_first() {
        let err = validate_input(Path::new("/missing/file.csv"), &["datx", "dat"]).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedExtension { .. }));
        assert!(err.to_string().contains("/missing/file.csv"));
    }

    #[test]
    fn test_validate_input_missing_file() {
        let err = validate_input(Path::new("/missing/file.dat"), &["datx", "dat"]).unwrap_err();
        assert!(matches!(err, DecodeError::MissingFile(_)));
    }
}
