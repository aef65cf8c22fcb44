//! # Study Files
//!
//! Studies are saved as pretty-printed JSON.
//! - **Atomic saves**: write to a `.tmp` sibling, sync, rename over the target
//! - **Version validation**: files from an incompatible schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use section_core::file_io::{load_study, save_study};
//! use section_core::project::Study;
//! use std::path::Path;
//!
//! let study = Study::new("Engineer", "Office floor");
//! save_study(&study, Path::new("study.json")).unwrap();
//! let loaded = load_study(Path::new("study.json")).unwrap();
//! assert_eq!(loaded.meta.title, "Office floor");
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Study, SCHEMA_VERSION};

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save a study with atomic write semantics.
///
/// The JSON goes to `<file>.tmp` first, is synced to disk and then renamed
/// over `path`, so an interrupted save never leaves a truncated study.
pub fn save_study(study: &Study, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(study).map_err(|e| CalcError::serialization(e.to_string()))?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("saved study '{}' to {}", study.meta.title, path.display());
    Ok(())
}

/// Load a study and check its schema version.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - invalid JSON or an unknown enum string
/// * `VersionMismatch` - written by an incompatible schema
pub fn load_study(path: &Path) -> CalcResult<Study> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let study: Study = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid study in {}: {}", path.display(), e)))?;

    validate_version(&study.meta.version)?;
    log::debug!(
        "loaded study '{}' ({} cases) from {}",
        study.meta.title,
        study.case_count(),
        path.display()
    );
    Ok(study)
}

fn version_parts(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(str::parse::<u32>);
    match (parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor))) => Some((major, minor)),
        _ => None,
    }
}

/// Major versions must match; for 0.x a newer minor is refused too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let (file_major, file_minor) = version_parts(file_version).ok_or_else(mismatch)?;
    let (major, minor) = version_parts(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    use crate::project::{DesignCase, SectionSpec};

    fn temp_study_path(name: &str) -> PathBuf {
        temp_dir().join(format!("section_study_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_study_path("roundtrip");
        let mut study = Study::new("Test Engineer", "Roundtrip");
        study.add_case(DesignCase::new("GL24h", SectionSpec::glulam("GL24h", 0.2), 6.0));
        save_study(&study, &path).unwrap();

        let loaded = load_study(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.case_count(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_study_path("atomic");
        save_study(&Study::new("Test", "Atomic"), &path).unwrap();
        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        assert_eq!(tmp_path_for(Path::new("/a/study.json")), Path::new("/a/study.json.tmp"));
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_study_path("version");
        let mut study = Study::new("Test", "Future");
        study.meta.version = "0.9.0".to_string();
        save_study(&study, &path).unwrap();
        assert!(matches!(load_study(&path), Err(CalcError::VersionMismatch { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_unknown_objective() {
        let path = temp_study_path("objective");
        let study = Study::new("Test", "Bad objective");
        let json = serde_json::to_string(&study).unwrap().replace(
            "\"cases\":{}",
            "\"cases\":{\"67e55044-10b1-426f-9247-bb680e5fe0c8\":{\"label\":\"x\",\
             \"section\":{\"section_type\":\"wd_rec\",\"grade\":\"GL24h\",\"b\":1.0,\"h\":0.2},\
             \"span\":6.0,\"objective\":\"cost\",\"criterion\":\"ULS\"}}",
        );
        fs::write(&path, json).unwrap();
        assert!(matches!(load_study(&path), Err(CalcError::SerializationError { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_study(Path::new("/nonexistent/dir/study.json"));
        assert!(matches!(result, Err(CalcError::FileError { .. })));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
