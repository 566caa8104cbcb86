use crate::{PostkitError, Result};
use std::fs;
use std::path::Path;

/// 先写同目录临时文件再重命名，任何一步失败时原文件保持不变
///
/// 父目录不存在时会先创建。
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| PostkitError::write(parent, e))?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PostkitError::Other(format!("invalid output path: {}", path.display())))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, content).map_err(|e| PostkitError::write(&temp_path, e))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(PostkitError::write(path, e));
    }
    Ok(())
}
