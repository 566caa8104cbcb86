use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use crate::collection::node::RequestNode;
use crate::collection::types::{
    ENCODED_EMPTY_OBJECT, FORM_CONTENT_TYPE, FixReport, JSON_CONTENT_TYPE, JSON_PARAM_NAMES,
    WRITE_METHODS,
};
use crate::utils::encode_uri_component;

/// 匹配 raw URL 中 `name={}` 的字面量
static EMPTY_JSON_PARAM: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"({})=\{{\}}", JSON_PARAM_NAMES.join("|"));
    Regex::new(&pattern).expect("static regex is valid")
});

/// 对单个请求依次应用全部规则，并累计到 report
pub fn apply_all(request: &mut RequestNode<'_>, report: &mut FixReport) {
    if apply_auth_inheritance(request) {
        report.auth_added += 1;
    }
    if apply_content_type(request) {
        report.content_type_added += 1;
    }
    report.params_encoded += encode_query_params(request);
    if encode_raw_url(request) {
        report.raw_urls_rewritten += 1;
    }
}

/// 规则 1：没有 auth 的请求继承父级认证
pub fn apply_auth_inheritance(request: &mut RequestNode<'_>) -> bool {
    if request.has_auth() {
        return false;
    }
    request.set_auth(json!({ "type": "inherit" }));
    true
}

/// 规则 2：写操作缺少 Content-Type 时按 body mode 补上
pub fn apply_content_type(request: &mut RequestNode<'_>) -> bool {
    let is_write = request
        .method()
        .map(|method| WRITE_METHODS.contains(&method))
        .unwrap_or(false);
    if !is_write || request.has_header("content-type") {
        return false;
    }

    let content_type = if request.body_mode() == Some("raw") {
        JSON_CONTENT_TYPE
    } else {
        FORM_CONTENT_TYPE
    };

    if request.push_header("Content-Type", content_type) {
        true
    } else {
        tracing::warn!(
            request = request.display_name(),
            "header field is not a list, Content-Type not added"
        );
        false
    }
}

/// 规则 3a：编码值为 JSON 对象文本的查询参数，返回被编码的参数数量
pub fn encode_query_params(request: &mut RequestNode<'_>) -> usize {
    let Some(query) = request.query_mut() else {
        return 0;
    };

    let mut encoded = 0;
    for param in query.iter_mut() {
        let Some(Value::String(value)) = param.get_mut("value") else {
            continue;
        };
        if let Some(new_value) = encode_param_value(value) {
            *value = new_value;
            encoded += 1;
        }
    }
    encoded
}

/// 规则 3b：改写 raw URL 中的 `name={}`，只在 url 带 query 列表时执行
pub fn encode_raw_url(request: &mut RequestNode<'_>) -> bool {
    if request.query_mut().is_none() {
        return false;
    }
    let Some(raw) = request.raw_url_mut() else {
        return false;
    };

    let replaced = EMPTY_JSON_PARAM.replace_all(raw, format!("${{1}}={}", ENCODED_EMPTY_OBJECT));
    if replaced == raw.as_str() {
        return false;
    }
    *raw = replaced.into_owned();
    true
}

/// `{}` 编码为 `%7B%7D`，其他 `{...}` 形式的值整体百分号编码
///
/// 已编码的值不再以 `{` 开头，所以重复执行是幂等的
pub fn encode_param_value(value: &str) -> Option<String> {
    if value == "{}" {
        return Some(ENCODED_EMPTY_OBJECT.to_string());
    }
    if value.starts_with('{') && value.ends_with('}') {
        return Some(encode_uri_component(value));
    }
    None
}
