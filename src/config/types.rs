use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认的 collection 文件
pub const DEFAULT_COLLECTION: &str = "MongoDB-MCP-Server-Postman-Collection.json";
/// 默认的 Newman 结果文件
pub const DEFAULT_RESULTS: &str = "test-results/mongodb-mcp-api-results.json";
/// 默认的报告模板
pub const DEFAULT_TEMPLATE: &str = "test-results/mongodb-mcp-api-report-enhanced.html";
/// 默认的报告输出
pub const DEFAULT_OUTPUT: &str = "test-results/mongodb-mcp-api-report.html";

/// `[fix]` 配置段
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixConfig {
    pub collection: Option<PathBuf>,
}

/// `[report]` 配置段
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub results: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// 完整的配置文件
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostkitConfig {
    #[serde(default)]
    pub fix: FixConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl PostkitConfig {
    /// 将相对路径解析为相对于配置文件所在目录
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut()
                && p.is_relative()
            {
                *p = base.join(&*p);
            }
        };

        resolve(&mut self.fix.collection);
        resolve(&mut self.report.results);
        resolve(&mut self.report.template);
        resolve(&mut self.report.output);
        self
    }

    /// 优先级：CLI 参数 > 配置文件 > 默认值
    pub fn collection_path(&self, cli: Option<PathBuf>) -> PathBuf {
        pick(cli, &self.fix.collection, DEFAULT_COLLECTION)
    }

    pub fn results_path(&self, cli: Option<PathBuf>) -> PathBuf {
        pick(cli, &self.report.results, DEFAULT_RESULTS)
    }

    pub fn template_path(&self, cli: Option<PathBuf>) -> PathBuf {
        pick(cli, &self.report.template, DEFAULT_TEMPLATE)
    }

    pub fn output_path(&self, cli: Option<PathBuf>) -> PathBuf {
        pick(cli, &self.report.output, DEFAULT_OUTPUT)
    }
}

fn pick(cli: Option<PathBuf>, configured: &Option<PathBuf>, default: &str) -> PathBuf {
    cli.or_else(|| configured.clone())
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let config: PostkitConfig = toml::from_str(
            r#"
[report]
results = "out/results.json"
"#,
        )
        .unwrap();

        assert_eq!(
            config.results_path(Some(PathBuf::from("cli.json"))),
            PathBuf::from("cli.json")
        );
        assert_eq!(config.results_path(None), PathBuf::from("out/results.json"));
        assert_eq!(config.template_path(None), PathBuf::from(DEFAULT_TEMPLATE));
        assert_eq!(config.collection_path(None), PathBuf::from(DEFAULT_COLLECTION));
    }

    #[test]
    fn test_resolve_relative_to() {
        let config: PostkitConfig = toml::from_str(
            r#"
[fix]
collection = "collection.json"

[report]
output = "/abs/report.html"
"#,
        )
        .unwrap();

        let config = config.resolve_relative_to(Path::new("/project"));
        assert_eq!(
            config.collection_path(None),
            PathBuf::from("/project/collection.json")
        );
        assert_eq!(config.output_path(None), PathBuf::from("/abs/report.html"));
        assert_eq!(config.results_path(None), PathBuf::from(DEFAULT_RESULTS));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = toml::from_str::<PostkitConfig>("[report]\nout = \"x\"\n");
        assert!(result.is_err());
    }
}
