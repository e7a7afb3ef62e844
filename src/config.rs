use std::path::PathBuf;

/// Asset directory served by the web project, relative to the project root.
pub const SOURCE_DIR: &str = "client/public/attached_assets";

/// Sibling directory holding the one-time copy made before optimizing.
pub const BACKUP_DIR: &str = "client/public/attached_assets_BACKUP";

pub const JPEG_QUALITY: u8 = 80;

/// Images wider than this are scaled down to exactly this width.
pub const MAX_WIDTH: u32 = 1920;

/// Fixed settings shared by the rename and optimize jobs.
///
/// Everything here is decided at edit time; nothing is read from files,
/// flags or the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub jpeg_quality: u8,
    pub max_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(SOURCE_DIR),
            backup_dir: PathBuf::from(BACKUP_DIR),
            jpeg_quality: JPEG_QUALITY,
            max_width: MAX_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.jpeg_quality, 80);
        assert_eq!(settings.max_width, 1920);
        assert_eq!(
            settings.source_dir,
            PathBuf::from("client/public/attached_assets")
        );
    }

    #[test]
    fn test_backup_is_sibling_of_source() {
        let settings = Settings::default();
        assert_eq!(settings.backup_dir.parent(), settings.source_dir.parent());
        assert_ne!(settings.backup_dir, settings.source_dir);
    }
}
