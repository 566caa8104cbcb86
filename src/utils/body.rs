use serde::Serialize;
use serde_json::Value;

/// 解析后的消息体：结构化 JSON 或原始文本
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BodyContent {
    Json(Value),
    Text(String),
}

impl BodyContent {
    /// 内容嗅探：Content-Type 包含 json，或去掉空白后以 `{` / `[` 开头时尝试按 JSON 解析，
    /// 解析失败回退为原始文本
    pub fn sniff(text: &str, content_type: Option<&str>) -> Self {
        let declared_json = content_type
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);

        if declared_json || is_json_like(text) {
            if let Ok(value) = serde_json::from_str::<Value>(text) {
                return BodyContent::Json(value);
            }
            tracing::debug!("Body looks like JSON but failed to parse, keeping raw text");
        }

        BodyContent::Text(text.to_string())
    }

    /// 从字节流解码（非法 UTF-8 以替换字符代替）后嗅探
    pub fn sniff_bytes(bytes: &[u8], content_type: Option<&str>) -> Self {
        Self::sniff(&String::from_utf8_lossy(bytes), content_type)
    }

    /// 对象、数组、数字等结构化值；JSON 字符串按文本展示
    pub fn is_structured(&self) -> bool {
        matches!(self, BodyContent::Json(value) if !value.is_string())
    }

    /// 空文本、空 JSON 字符串、JSON null 视为没有内容
    pub fn is_empty(&self) -> bool {
        match self {
            BodyContent::Json(Value::String(text)) => text.is_empty(),
            BodyContent::Json(value) => value.is_null(),
            BodyContent::Text(text) => text.is_empty(),
        }
    }

    /// 用于展示的文本：结构化 JSON 美化输出，字符串与文本原样返回
    pub fn to_display_string(&self) -> String {
        match self {
            BodyContent::Json(Value::String(text)) => text.clone(),
            BodyContent::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            BodyContent::Text(text) => text.clone(),
        }
    }
}

/// 简单的 JSON 格式检测
fn is_json_like(s: &str) -> bool {
    let trimmed = s.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}
