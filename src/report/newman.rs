use crate::{PostkitError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// `null` 与缺失字段都按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Newman JSON reporter 输出的顶层文档
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestRun {
    #[serde(default)]
    pub run: Option<RunSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunSection {
    #[serde(default)]
    pub executions: Option<Vec<Execution>>,
}

impl TestRun {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PostkitError::read(path, e))?;
        serde_json::from_str(&content).map_err(|e| PostkitError::json(path, e))
    }

    /// 文档中是否存在 `run.executions`
    pub fn has_executions(&self) -> bool {
        self.run
            .as_ref()
            .map(|run| run.executions.is_some())
            .unwrap_or(false)
    }

    /// 所有执行记录，`run.executions` 缺失时为空
    pub fn executions(&self) -> &[Execution] {
        self.run
            .as_ref()
            .and_then(|run| run.executions.as_deref())
            .unwrap_or(&[])
    }
}

/// 一次请求/响应/断言的执行记录
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Execution {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item: ItemRef,

    #[serde(default)]
    pub request: Option<ExecutedRequest>,

    #[serde(default)]
    pub response: Option<ExecutedResponse>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub assertions: Vec<Assertion>,
}

/// 对 collection item 的引用
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutedRequest {
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub url: Option<RequestUrl>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub header: Vec<HeaderPair>,

    #[serde(default)]
    pub body: Option<RequestBody>,
}

impl ExecutedRequest {
    pub fn content_type(&self) -> Option<&str> {
        find_header(&self.header, "content-type")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub mode: Option<String>,

    #[serde(default)]
    pub raw: Option<String>,
}

/// 请求 URL：结构化对象或原始字符串
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestUrl {
    Parts(UrlParts),
    Raw(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlParts {
    #[serde(default)]
    pub protocol: Option<String>,

    #[serde(default)]
    pub host: Option<Segments>,

    /// 端口可能是字符串也可能是数字
    #[serde(default)]
    pub port: Option<Value>,

    #[serde(default)]
    pub path: Option<Segments>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query: Vec<QueryPair>,
}

/// host / path：分段数组或单个字符串
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Segments {
    List(Vec<String>),
    Single(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryPair {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaderPair {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: u16,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub header: Vec<HeaderPair>,

    #[serde(default)]
    pub stream: Option<ResponseStream>,

    /// 毫秒
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_time: f64,

    /// 字节
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_size: u64,
}

impl ExecutedResponse {
    pub fn content_type(&self) -> Option<&str> {
        find_header(&self.header, "content-type")
    }

    /// 响应时间取整到毫秒
    pub fn response_time_ms(&self) -> u64 {
        if self.response_time.is_finite() && self.response_time > 0.0 {
            self.response_time.round() as u64
        } else {
            0
        }
    }
}

/// 响应体字节流：Node Buffer 的 JSON 形式 `{"type": "Buffer", "data": [...]}` 或纯文本
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseStream {
    Buffer { data: Vec<u8> },
    Text(String),
}

impl ResponseStream {
    pub fn bytes(&self) -> Cow<'_, [u8]> {
        match self {
            ResponseStream::Buffer { data } => Cow::Borrowed(data.as_slice()),
            ResponseStream::Text(text) => Cow::Borrowed(text.as_bytes()),
        }
    }
}

/// 单条断言，`error` 存在即失败
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Assertion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assertion: String,

    #[serde(default)]
    pub error: Option<Value>,
}

impl Assertion {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// 大小写不敏感地取第一个同名 header
fn find_header<'a>(headers: &'a [HeaderPair], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.key.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_missing_executions() {
        let run = TestRun::parse(r#"{"collection": {}}"#).unwrap();
        assert!(!run.has_executions());
        assert!(run.executions().is_empty());

        let run = TestRun::parse(r#"{"run": {"stats": {}}}"#).unwrap();
        assert!(!run.has_executions());
    }

    #[test]
    fn test_parse_execution() {
        let run = TestRun::parse(
            r#"{"run": {"executions": [{
                "item": {"id": "abc", "name": "List databases"},
                "request": {
                    "method": "GET",
                    "url": {
                        "protocol": "http",
                        "host": ["localhost"],
                        "port": "8080",
                        "path": ["api", "databases"],
                        "query": [{"key": "limit", "value": null}]
                    },
                    "header": [{"key": "Accept", "value": "*/*"}]
                },
                "response": {
                    "code": 200,
                    "status": "OK",
                    "header": [{"key": "Content-Type", "value": "application/json"}],
                    "stream": {"type": "Buffer", "data": [91, 93]},
                    "responseTime": 12.6,
                    "responseSize": 2
                },
                "assertions": [
                    {"assertion": "Status code is 200"},
                    {"assertion": "Has body", "error": {"message": "expected"}},
                    {"assertion": "Null error", "error": null}
                ]
            }]}}"#,
        )
        .unwrap();

        let execution = &run.executions()[0];
        assert_eq!(execution.item.name.as_deref(), Some("List databases"));

        let request = execution.request.as_ref().unwrap();
        assert_eq!(request.method.as_deref(), Some("GET"));
        match request.url.as_ref().unwrap() {
            RequestUrl::Parts(parts) => {
                assert_eq!(parts.query[0].key, "limit");
                assert_eq!(parts.query[0].value, "");
            }
            RequestUrl::Raw(_) => panic!("Expected structured URL"),
        }

        let response = execution.response.as_ref().unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.stream.as_ref().unwrap().bytes().as_ref(), b"[]");
        assert_eq!(response.response_time_ms(), 13);

        let passed: Vec<bool> = execution.assertions.iter().map(Assertion::passed).collect();
        assert_eq!(passed, vec![true, false, true]);
    }

    #[test]
    fn test_parse_raw_url_and_null_lists() {
        let run = TestRun::parse(
            r#"{"run": {"executions": [{
                "item": null,
                "request": {"url": "http://example.com/x", "header": null},
                "assertions": null
            }]}}"#,
        )
        .unwrap();

        let execution = &run.executions()[0];
        assert!(execution.item.id.is_none());
        assert!(execution.assertions.is_empty());
        assert!(matches!(
            execution.request.as_ref().unwrap().url,
            Some(RequestUrl::Raw(_))
        ));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(TestRun::parse("{\"run\": ").is_err());
    }
}
