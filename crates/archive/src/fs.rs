//! Filesystem helpers shared by the writer and the converter

use std::fs;
use std::io;
use std::path::Path;

/// Copy a directory recursively
///
/// Creates `dst` (and its parents) if needed. Symlinks are not descended
/// into; a symlink to a directory fails the copy.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}
