//! Writing finished screenshots and their notes to disk.

use super::report;
use super::types::{Delivery, DeliveryError, DeliveryReceipt};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file output.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to write into.
    pub save_directory: PathBuf,
    /// Base filename template (supports chrono format specifiers).
    pub filename_template: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Shotmark"),
            filename_template: "shotmark_%Y-%m-%d_%H%M%S".to_string(),
        }
    }
}

/// Expands the filename template for the given time.
pub fn generate_basename(
    template: &str,
    time: &DateTime<Local>,
) -> Result<String, DeliveryError> {
    let mut name = String::new();
    write!(name, "{}", time.format(template))
        .map_err(|_| DeliveryError::InvalidTemplate(template.to_string()))?;
    Ok(name)
}

/// Whether `template` is non-empty and every specifier in it is one chrono
/// can format.
pub fn is_valid_template(template: &str) -> bool {
    !template.trim().is_empty()
        && StrftimeItems::new(template).all(|item| !matches!(item, Item::Error))
}

/// Ensure the output directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, DeliveryError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    // Canonicalize to resolve relative paths
    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Picks `<base>.png`/`<base>.md`, or `<base>-N.*` if either already exists.
fn unique_paths(directory: &Path, base: &str) -> (PathBuf, PathBuf) {
    let candidate = |suffix: Option<u32>| {
        let stem = match suffix {
            Some(n) => format!("{}-{}", base, n),
            None => base.to_string(),
        };
        (
            directory.join(format!("{}.png", stem)),
            directory.join(format!("{}.md", stem)),
        )
    };

    let mut paths = candidate(None);
    let mut n = 1;
    while paths.0.exists() || paths.1.exists() {
        paths = candidate(Some(n));
        n += 1;
    }
    paths
}

/// Writes `bytes` to `path` and restricts it to the owner.
fn write_private(path: &Path, bytes: &[u8]) -> Result<(), DeliveryError> {
    fs::write(path, bytes)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Save the image and its notes report side by side.
///
/// # Returns
/// Paths of both written files
pub fn save_delivery(
    delivery: &Delivery,
    config: &FileSaveConfig,
) -> Result<DeliveryReceipt, DeliveryError> {
    if delivery.png.is_empty() {
        return Err(DeliveryError::EmptyImage);
    }

    let directory = ensure_directory_exists(&config.save_directory)?;
    let base = generate_basename(&config.filename_template, &delivery.created_at)?;
    let (image_path, notes_path) = unique_paths(&directory, &base);

    log::info!(
        "Saving screenshot to: {} ({} bytes)",
        image_path.display(),
        delivery.png.len()
    );
    write_private(&image_path, &delivery.png)?;

    let written_size = fs::metadata(&image_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    write_private(&notes_path, report::build_report(delivery).as_bytes())?;
    log::info!("Notes saved: {}", notes_path.display());

    Ok(DeliveryReceipt {
        image_path: Some(image_path),
        notes_path: Some(notes_path),
    })
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config_in(dir: &Path) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: dir.to_path_buf(),
            filename_template: "shot_%Y%m%d".to_string(),
        }
    }

    #[test]
    fn test_generate_basename() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            generate_basename("shot_%Y-%m-%d_%H%M%S", &time).unwrap(),
            "shot_2024-03-09_140507"
        );
    }

    #[test]
    fn test_unknown_specifier_is_an_error() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let err = generate_basename("shot_%Q", &time).unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidTemplate(_)));

        assert!(!is_valid_template("shot_%Q"));
        assert!(!is_valid_template("  "));
        assert!(is_valid_template("shot_%Y%m%d"));
    }

    #[test]
    fn test_save_with_bad_template_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = Delivery::new(vec![1, 2, 3], 1, 1, "");
        let config = FileSaveConfig {
            save_directory: dir.path().to_path_buf(),
            filename_template: "shot_%Q".to_string(),
        };

        let err = save_delivery(&delivery, &config).unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidTemplate(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_save_writes_image_and_notes() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = Delivery::new(vec![0x89, b'P', b'N', b'G'], 2, 2, "look here");

        let receipt = save_delivery(&delivery, &config_in(dir.path())).unwrap();
        let image_path = receipt.image_path.unwrap();
        let notes_path = receipt.notes_path.unwrap();

        assert_eq!(fs::read(&image_path).unwrap(), delivery.png);
        assert!(
            fs::read_to_string(&notes_path)
                .unwrap()
                .contains("**Notes:** look here")
        );
        assert_eq!(image_path.file_stem(), notes_path.file_stem());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&image_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_save_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = Delivery::new(vec![1, 2, 3], 1, 1, "");
        let config = config_in(dir.path());

        let first = save_delivery(&delivery, &config).unwrap();
        let second = save_delivery(&delivery, &config).unwrap();
        assert_ne!(first.image_path, second.image_path);
        assert!(
            second
                .image_path
                .unwrap()
                .to_string_lossy()
                .ends_with("-1.png")
        );
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = Delivery::new(Vec::new(), 1, 1, "");
        let err = save_delivery(&delivery, &config_in(dir.path())).unwrap_err();
        assert!(matches!(err, DeliveryError::EmptyImage));
    }
}
