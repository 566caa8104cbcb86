use crate::report::newman::{Execution, HeaderPair, QueryPair, RequestUrl, Segments, UrlParts};
use crate::utils::{BodyContent, encode_uri_component, format_bytes};
use serde::Serialize;
use serde_json::{Map, Value};

const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_HOST: &str = "localhost";
const UNKNOWN_URL: &str = "Unknown URL";

/// 单条断言结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionOutcome {
    pub name: String,
    pub passed: bool,
}

/// 报告中的请求详情
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RequestDetails {
    pub headers: Map<String, Value>,
    pub body: Option<BodyContent>,
    pub query: Map<String, Value>,
}

/// 报告中的响应详情
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetails {
    pub headers: Map<String, Value>,
    pub body: Option<BodyContent>,
    pub status: u16,
    pub status_text: String,
}

impl Default for ResponseDetails {
    fn default() -> Self {
        Self {
            headers: Map::new(),
            body: None,
            status: 0,
            status_text: "Unknown".to_string(),
        }
    }
}

/// 由一条执行记录派生出的报告条目，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub id: String,
    pub name: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub passed: bool,
    pub response_time: u64,
    pub response_size: String,
    pub tests: Vec<AssertionOutcome>,
    pub request: RequestDetails,
    pub response: ResponseDetails,
}

impl ReportEntry {
    /// `index` 为执行记录在 run 中的下标（从 0 开始）
    pub fn from_execution(index: usize, execution: &Execution) -> Self {
        let tests: Vec<AssertionOutcome> = execution
            .assertions
            .iter()
            .map(|assertion| AssertionOutcome {
                name: assertion.assertion.clone(),
                passed: assertion.passed(),
            })
            .collect();
        let passed = tests.iter().all(|t| t.passed);

        let request = execution.request.as_ref();
        let response = execution.response.as_ref();

        let request_details = request
            .map(|req| RequestDetails {
                headers: header_map(&req.header),
                body: req
                    .body
                    .as_ref()
                    .and_then(|body| body.raw.as_deref())
                    .map(|raw| BodyContent::sniff(raw, req.content_type())),
                query: query_map(req.url.as_ref()),
            })
            .unwrap_or_default();

        let response_details = response
            .map(|res| ResponseDetails {
                headers: header_map(&res.header),
                body: res
                    .stream
                    .as_ref()
                    .map(|stream| BodyContent::sniff_bytes(&stream.bytes(), res.content_type())),
                status: res.code,
                status_text: res.status.clone().unwrap_or_else(|| "Unknown".to_string()),
            })
            .unwrap_or_default();

        Self {
            id: execution
                .item
                .id
                .clone()
                .unwrap_or_else(|| format!("test-{}", index)),
            name: execution
                .item
                .name
                .clone()
                .unwrap_or_else(|| format!("Test {}", index + 1)),
            method: request
                .and_then(|req| req.method.clone())
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            url: request
                .map(|req| build_url(req.url.as_ref()))
                .unwrap_or_else(|| UNKNOWN_URL.to_string()),
            status: response.map(|res| res.code).unwrap_or(0),
            passed,
            response_time: response.map(|res| res.response_time_ms()).unwrap_or(0),
            response_size: response
                .map(|res| format_bytes(res.response_size))
                .unwrap_or_else(|| "0B".to_string()),
            tests,
            request: request_details,
            response: response_details,
        }
    }

    pub fn passed_count(&self) -> usize {
        self.tests.iter().filter(|t| t.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.tests.len() - self.passed_count()
    }
}

/// 拼接展示用 URL：protocol://host[:port]/path?query
pub fn build_url(url: Option<&RequestUrl>) -> String {
    match url {
        None => UNKNOWN_URL.to_string(),
        Some(RequestUrl::Raw(raw)) => raw.clone(),
        Some(RequestUrl::Parts(parts)) => build_url_from_parts(parts),
    }
}

fn build_url_from_parts(parts: &UrlParts) -> String {
    let protocol = parts
        .protocol
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PROTOCOL);

    let host = match &parts.host {
        Some(Segments::List(segments)) => segments.join("."),
        Some(Segments::Single(host)) if !host.is_empty() => host.clone(),
        _ => DEFAULT_HOST.to_string(),
    };

    let port = match &parts.port {
        Some(Value::String(port)) if !port.is_empty() => format!(":{}", port),
        Some(Value::Number(port)) => format!(":{}", port),
        _ => String::new(),
    };

    let path = match &parts.path {
        Some(Segments::List(segments)) => format!("/{}", segments.join("/")),
        Some(Segments::Single(path)) => path.clone(),
        None => String::new(),
    };

    let mut url = format!("{}://{}{}{}", protocol, host, port, path);

    if !parts.query.is_empty() {
        let query_string = parts
            .query
            .iter()
            .map(|q| {
                format!(
                    "{}={}",
                    encode_uri_component(&q.key),
                    encode_uri_component(&q.value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query_string);
    }

    url
}

/// header 列表转为映射，重复 key 后者覆盖前者（保留首次出现的位置）
fn header_map(headers: &[HeaderPair]) -> Map<String, Value> {
    let mut map = Map::new();
    for header in headers {
        map.insert(header.key.clone(), Value::String(header.value.clone()));
    }
    map
}

fn query_map(url: Option<&RequestUrl>) -> Map<String, Value> {
    let query: &[QueryPair] = match url {
        Some(RequestUrl::Parts(parts)) => &parts.query,
        _ => &[],
    };

    let mut map = Map::new();
    for pair in query {
        map.insert(pair.key.clone(), Value::String(pair.value.clone()));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::newman::TestRun;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn execution(value: Value) -> Execution {
        let run = TestRun::parse(&json!({"run": {"executions": [value]}}).to_string()).unwrap();
        run.executions()[0].clone()
    }

    #[test]
    fn test_failed_assertion_fails_entry_and_keeps_order() {
        let entry = ReportEntry::from_execution(
            0,
            &execution(json!({
                "item": {"name": "Insert"},
                "assertions": [
                    {"assertion": "first fails", "error": {"message": "boom"}},
                    {"assertion": "second passes"}
                ]
            })),
        );

        assert!(!entry.passed);
        assert_eq!(
            entry.tests,
            vec![
                AssertionOutcome {
                    name: "first fails".to_string(),
                    passed: false
                },
                AssertionOutcome {
                    name: "second passes".to_string(),
                    passed: true
                },
            ]
        );
        assert_eq!(entry.passed_count(), 1);
        assert_eq!(entry.failed_count(), 1);
    }

    #[test]
    fn test_entry_without_assertions_passes() {
        let entry = ReportEntry::from_execution(0, &execution(json!({"item": {}})));
        assert!(entry.passed);
        assert!(entry.tests.is_empty());
    }

    #[test]
    fn test_defaults_for_missing_request_and_response() {
        let entry = ReportEntry::from_execution(4, &execution(json!({})));
        assert_eq!(entry.id, "test-4");
        assert_eq!(entry.name, "Test 5");
        assert_eq!(entry.method, "UNKNOWN");
        assert_eq!(entry.url, "Unknown URL");
        assert_eq!(entry.status, 0);
        assert_eq!(entry.response_time, 0);
        assert_eq!(entry.response_size, "0B");
        assert_eq!(entry.response.status_text, "Unknown");
        assert!(entry.request.headers.is_empty());
        assert!(entry.response.body.is_none());
    }

    #[test]
    fn test_full_entry() {
        let entry = ReportEntry::from_execution(
            0,
            &execution(json!({
                "item": {"id": "id-1", "name": "Find documents"},
                "request": {
                    "method": "POST",
                    "url": {
                        "protocol": "http",
                        "host": ["localhost"],
                        "port": "8080",
                        "path": ["api", "mongo", "find"],
                        "query": [{"key": "filter", "value": "{}"}]
                    },
                    "header": [
                        {"key": "Content-Type", "value": "application/json"},
                        {"key": "X-Trace", "value": "1"},
                        {"key": "X-Trace", "value": "2"}
                    ],
                    "body": {"mode": "raw", "raw": "{\"name\": \"x\"}"}
                },
                "response": {
                    "code": 201,
                    "status": "Created",
                    "header": [{"key": "content-type", "value": "application/json"}],
                    "stream": {"type": "Buffer", "data": [123, 34, 111, 107, 34, 58, 116, 114, 117, 101, 125]},
                    "responseTime": 42,
                    "responseSize": 1536
                }
            })),
        );

        assert_eq!(entry.id, "id-1");
        assert_eq!(entry.method, "POST");
        assert_eq!(
            entry.url,
            "http://localhost:8080/api/mongo/find?filter=%7B%7D"
        );
        assert_eq!(entry.status, 201);
        assert_eq!(entry.response_time, 42);
        assert_eq!(entry.response_size, "1.5KB");
        assert_eq!(
            Value::Object(entry.request.headers.clone()),
            json!({"Content-Type": "application/json", "X-Trace": "2"})
        );
        assert_eq!(
            entry.request.body,
            Some(BodyContent::Json(json!({"name": "x"})))
        );
        assert_eq!(Value::Object(entry.request.query.clone()), json!({"filter": "{}"}));
        assert_eq!(entry.response.body, Some(BodyContent::Json(json!({"ok": true}))));
        assert_eq!(entry.response.status_text, "Created");
    }

    #[test]
    fn test_response_text_body() {
        let entry = ReportEntry::from_execution(
            0,
            &execution(json!({
                "response": {
                    "code": 500,
                    "header": [{"key": "Content-Type", "value": "application/json"}],
                    "stream": {"type": "Buffer", "data": [111, 111, 112, 115]}
                }
            })),
        );
        assert_eq!(entry.response.body, Some(BodyContent::Text("oops".to_string())));
    }

    #[test]
    fn test_build_url_variants() {
        assert_eq!(build_url(None), "Unknown URL");

        let raw = RequestUrl::Raw("http://example.com/raw".to_string());
        assert_eq!(build_url(Some(&raw)), "http://example.com/raw");

        let parts: RequestUrl = serde_json::from_value(json!({"path": ["a", "b"]})).unwrap();
        assert_eq!(build_url(Some(&parts)), "http://localhost/a/b");

        let parts: RequestUrl = serde_json::from_value(json!({
            "protocol": "https",
            "host": ["api", "example", "com"],
            "port": 8443,
            "query": [{"key": "q", "value": "a b&c"}, {"key": "page", "value": "2"}]
        }))
        .unwrap();
        assert_eq!(
            build_url(Some(&parts)),
            "https://api.example.com:8443?q=a%20b%26c&page=2"
        );

        let parts: RequestUrl = serde_json::from_value(json!({
            "host": "localhost",
            "query": [{"key": "name", "value": "O'Brien (jr)!*"}]
        }))
        .unwrap();
        assert_eq!(
            build_url(Some(&parts)),
            "http://localhost?name=O'Brien%20(jr)!*"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let entry = ReportEntry::from_execution(0, &execution(json!({"item": {"name": "x"}})));
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("responseTime").is_some());
        assert!(value.get("responseSize").is_some());
        assert!(value["response"].get("statusText").is_some());
        assert_eq!(value["tests"], json!([]));
    }
}
