//! Validation rules for uploaded product images.

use crate::error::CoreError;

/// Image formats accepted for product photos.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Maximum accepted upload size (6 MiB).
pub const MAX_IMAGE_BYTES: u64 = 6 * 1024 * 1024;

/// Extract the extension of `filename`: the lowercased text after the last
/// `.`. A name with no dot yields the whole lowercased name; kept as-is,
/// since such a name fails the extension check anyway.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_lowercase()
}

/// Validate an uploaded image by filename and size.
///
/// The extension is checked before the size, so an oversized file with a bad
/// extension reports [`CoreError::InvalidExtension`].
pub fn validate_image(filename: &str, size: u64) -> Result<String, CoreError> {
    let ext = extension_of(filename);
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::InvalidExtension(ext));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(CoreError::SizeExceeded {
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("photo.JPG"), "jpg");
        assert_eq!(extension_of("photo.Png"), "png");
    }

    #[test]
    fn extension_takes_last_dot() {
        assert_eq!(extension_of("archive.tar.png"), "png");
    }

    #[test]
    fn no_dot_yields_whole_name() {
        assert_eq!(extension_of("README"), "readme");
    }

    #[test]
    fn accepts_allowed_extensions() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.PNG"] {
            assert!(validate_image(name, 1024).is_ok(), "{name} should pass");
        }
    }

    #[test]
    fn rejects_wrong_extension() {
        let err = validate_image("malware.exe", 10).unwrap_err();
        assert!(matches!(err, CoreError::InvalidExtension(ext) if ext == "exe"));
    }

    #[test]
    fn rejects_oversize() {
        let err = validate_image("big.png", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(matches!(err, CoreError::SizeExceeded { .. }));
    }

    #[test]
    fn extension_checked_before_size() {
        // Oversized AND wrong extension: the extension error wins.
        let err = validate_image("big.gif", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidExtension(_)));
    }

    #[test]
    fn size_at_limit_passes() {
        assert!(validate_image("exact.jpg", MAX_IMAGE_BYTES).is_ok());
    }
}
