use crate::config::types::PostkitConfig;
use crate::{PostkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "postkit.toml";

    /// 从指定路径加载配置文件，相对路径以配置文件所在目录为基准
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<PostkitConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PostkitError::read(path, e))?;
        let config: PostkitConfig = toml::from_str(&content)
            .map_err(|e| PostkitError::ConfigError(format!("{}: {}", path.display(), e)))?;

        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config.resolve_relative_to(&base))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录
    /// 2. 父目录递归查找
    /// 3. 用户配置目录 ~/.config/postkit/
    ///
    /// 找到但无法解析的配置文件视为错误
    pub fn find_and_load() -> Result<Option<PostkitConfig>> {
        match Self::find() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config");
                Self::load_from_path(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// 显式路径优先，否则自动查找；都没有时使用默认配置
    pub fn resolve(explicit: Option<&Path>) -> Result<PostkitConfig> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::find_and_load()?.unwrap_or_default()),
        }
    }

    fn find() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_in_ancestors(&current).or_else(Self::find_in_user_dir)
    }

    /// 从 start 开始逐级向上查找
    fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(Self::CONFIG_FILE))
            .find(|path| path.is_file())
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("postkit").join(Self::CONFIG_FILE);
        config_path.is_file().then_some(config_path)
    }
}
