//! Mapping from an archive path to its extraction target.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Compute the directory `archive` is extracted into.
///
/// The result is `destination_root / <archive's directory relative to
/// source_root> / <archive's file stem>`. Only the final extension is
/// stripped, so `logs.tar.zip` lands in `logs.tar`, and a file named just
/// `.zip` lands in the mirrored directory itself. `.` components of the
/// relative part are dropped.
///
/// Pure path arithmetic, no filesystem access. An archive that is not under
/// `source_root` is mapped using its whole path as the relative part.
pub fn extraction_target(archive: &Path, source_root: &Path, destination_root: &Path) -> PathBuf {
    let relative = archive.strip_prefix(source_root).unwrap_or(archive);

    let mut target = destination_root.to_path_buf();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            match component {
                // Root and prefix only appear when `archive` is outside `source_root`
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
                Component::Normal(_) | Component::ParentDir => target.push(component),
            }
        }
    }
    if let Some(stem) = archive_stem(relative) {
        target.push(stem);
    }
    target
}

/// File name without its final extension.
///
/// A name that is nothing but an extension, such as `.zip`, has an empty
/// stem, so its contents land directly in the mirrored directory.
fn archive_stem(path: &Path) -> Option<&OsStr> {
    let name = path.file_name()?;
    let stem = path.file_stem()?;
    if stem == name && name.to_string_lossy().starts_with('.') {
        return None;
    }
    Some(stem)
}
