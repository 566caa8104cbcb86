pub mod node;
pub mod reporter;
pub mod rules;
pub mod types;

pub use node::{Node, RequestNode};
pub use reporter::FixReporter;
pub use types::FixReport;

use crate::utils::write_atomic;
use crate::{PostkitError, Result};
use fs2::FileExt;
use serde::Deserialize;
use serde_json::Value;
use std::fs::{self, File};
use std::path::Path;

/// 已加载的 Postman Collection 文档
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    root: Value,
}

impl Collection {
    /// 从字符串解析
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_value(parse_unbounded(content)?)
    }

    /// 从文件加载，解析失败时错误信息带上文件路径
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PostkitError::read(path, e))?;
        let root = parse_unbounded(&content).map_err(|e| PostkitError::json(path, e))?;
        Self::from_value(root)
    }

    fn from_value(root: Value) -> Result<Self> {
        if !root.is_object() {
            return Err(PostkitError::InvalidCollection(
                "root must be a JSON object".to_string(),
            ));
        }
        Ok(Self { root })
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// 深度优先遍历整棵树，对每个请求应用全部规则
    ///
    /// 使用显式栈，嵌套深度不受调用栈限制；处理顺序与文档顺序一致。
    pub fn fix(&mut self) -> FixReport {
        let mut report = FixReport::default();
        let mut stack: Vec<&mut Value> = vec![&mut self.root];

        while let Some(value) = stack.pop() {
            match Node::classify(value) {
                Node::Request(mut request) => {
                    tracing::debug!(request = request.display_name(), "Fixing request");
                    report.requests.push(request.display_name().to_string());
                    rules::apply_all(&mut request, &mut report);
                }
                Node::Folder(items) => stack.extend(items.iter_mut().rev()),
                Node::Other => {}
            }
        }

        report
    }

    /// 两个空格缩进的 JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// 覆盖写回文件
    ///
    /// 内容写入同目录临时文件后重命名，写入失败时原文件不变；
    /// 期间对原文件持有排他锁，多个进程同时修复时依次进行。
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_pretty_json()?;

        let guard = match File::open(path) {
            Ok(file) => {
                file.lock_exclusive()
                    .map_err(|e| PostkitError::write(path, e))?;
                Some(file)
            }
            Err(_) => None,
        };

        write_atomic(path, &json)?;
        drop(guard);
        Ok(())
    }
}

/// 解析任意嵌套深度的 JSON：关闭 serde_json 的递归限制，并在需要时扩展栈
fn parse_unbounded(content: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// 加载、修复并（非 dry run 时）写回 collection 文件
pub fn fix_file<P: AsRef<Path>>(path: P, dry_run: bool) -> Result<FixReport> {
    let path = path.as_ref();
    let mut collection = Collection::load(path)?;
    let report = collection.fix();

    if dry_run {
        tracing::info!(path = %path.display(), "Dry run, collection not written");
    } else {
        collection.save(path)?;
        tracing::info!(path = %path.display(), "Collection written");
    }

    Ok(report)
}
