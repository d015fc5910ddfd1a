//! `std::fs` implementation of [`HostFilesystem`].

use std::fs;
use std::io;
use std::path::Path;

use super::HostFilesystem;
use crate::error::{BridgeError, Result};

/// Moves directories on the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    fn move_tree(from: &Path, to: &Path, overwrite: bool) -> io::Result<()> {
        let src = from.canonicalize()?;
        if to.exists() {
            let dst = to.canonicalize()?;
            if src == dst {
                return Ok(());
            }
            if src.starts_with(&dst) || dst.starts_with(&src) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "source and destination overlap",
                ));
            }
            if !overwrite {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "destination exists",
                ));
            }
            if to.is_dir() {
                fs::remove_dir_all(to)?;
            } else {
                fs::remove_file(to)?;
            }
        }

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }

        // Rename fails across devices; fall back to copy + delete.
        if fs::rename(from, to).is_ok() {
            return Ok(());
        }
        copy_dir_recursive(from, to)?;
        fs::remove_dir_all(from)
    }
}

impl HostFilesystem for LocalFilesystem {
    fn move_dir(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        tracing::debug!("Moving {} -> {}", from.display(), to.display());
        Self::move_tree(from, to, overwrite).map_err(|source| BridgeError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }
}

/// Recursively copies a directory.
fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("upgrade-abc123");
        let to = dir.path().join("plugins").join("demo");

        fs::create_dir_all(from.join("inc")).unwrap();
        fs::write(from.join("demo.php"), "new").unwrap();
        fs::write(from.join("inc").join("lib.php"), "lib").unwrap();

        fs::create_dir_all(&to).unwrap();
        fs::write(to.join("demo.php"), "old").unwrap();
        fs::write(to.join("stale.php"), "stale").unwrap();

        LocalFilesystem.move_dir(&from, &to, true).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(to.join("demo.php")).unwrap(), "new");
        assert_eq!(fs::read_to_string(to.join("inc").join("lib.php")).unwrap(), "lib");
        assert!(!to.join("stale.php").exists());
    }

    #[test]
    fn test_move_without_overwrite_fails() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("src");
        let to = dir.path().join("dst");
        fs::create_dir_all(&from).unwrap();
        fs::create_dir_all(&to).unwrap();

        let err = LocalFilesystem.move_dir(&from, &to, false).unwrap_err();
        assert!(matches!(err, BridgeError::Move { .. }));
        assert!(from.exists());
    }

    #[test]
    fn test_move_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem
            .move_dir(&dir.path().join("nope"), &dir.path().join("dst"), true)
            .unwrap_err();
        assert!(matches!(err, BridgeError::Move { .. }));
    }

    #[test]
    fn test_move_missing_source_keeps_destination() {
        let dir = tempfile::tempdir().unwrap();
        let to = dir.path().join("demo");
        fs::create_dir_all(&to).unwrap();
        fs::write(to.join("demo.php"), "installed").unwrap();

        assert!(LocalFilesystem.move_dir(&dir.path().join("nope"), &to, true).is_err());
        assert_eq!(fs::read_to_string(to.join("demo.php")).unwrap(), "installed");
    }

    #[test]
    fn test_move_onto_itself_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = dir.path().join("widget");
        fs::create_dir_all(&plugin).unwrap();
        fs::write(plugin.join("widget.php"), "<?php").unwrap();

        LocalFilesystem.move_dir(&plugin, &plugin, true).unwrap();
        assert_eq!(fs::read_to_string(plugin.join("widget.php")).unwrap(), "<?php");

        let dotted = dir.path().join(".").join("widget");
        LocalFilesystem.move_dir(&dotted, &plugin, true).unwrap();
        assert!(plugin.join("widget.php").exists());
    }

    #[test]
    fn test_move_into_ancestor_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = dir.path().join("widget");
        let nested = plugin.join("widget-1.2.0");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("widget.php"), "new").unwrap();
        fs::write(plugin.join("widget.php"), "old").unwrap();

        let err = LocalFilesystem.move_dir(&nested, &plugin, true).unwrap_err();
        assert!(matches!(err, BridgeError::Move { .. }));
        assert_eq!(fs::read_to_string(plugin.join("widget.php")).unwrap(), "old");
        assert!(nested.join("widget.php").exists());
    }
}
