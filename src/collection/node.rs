use serde_json::{Map, Value};

/// Collection 树中单个 item 的类型视图
///
/// 文档本身保持为 `serde_json::Value`，未知字段和字段顺序原样保留；
/// 这里只是对已知结构的可变借用。
pub enum Node<'a> {
    /// 携带 `request` 对象的请求叶子
    Request(RequestNode<'a>),
    /// 携带 `item` 数组的文件夹
    Folder(&'a mut Vec<Value>),
    /// 其他节点，静默忽略
    Other,
}

impl<'a> Node<'a> {
    pub fn classify(value: &'a mut Value) -> Self {
        let Some(object) = value.as_object_mut() else {
            return Node::Other;
        };

        if object.contains_key("request") {
            let name = object
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string);
            return match object.get_mut("request") {
                Some(Value::Object(fields)) => Node::Request(RequestNode { name, fields }),
                _ => Node::Other,
            };
        }

        match object.get_mut("item") {
            Some(Value::Array(items)) => Node::Folder(items),
            _ => Node::Other,
        }
    }
}

/// 请求对象的可变视图
pub struct RequestNode<'a> {
    name: Option<String>,
    fields: &'a mut Map<String, Value>,
}

impl<'a> RequestNode<'a> {
    /// item 名称，未命名时返回 "(unnamed)"
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    pub fn method(&self) -> Option<&str> {
        self.fields.get("method").and_then(Value::as_str)
    }

    /// `auth` 缺失或为 null 时视为未设置
    pub fn has_auth(&self) -> bool {
        self.fields
            .get("auth")
            .map(|auth| !auth.is_null())
            .unwrap_or(false)
    }

    pub fn set_auth(&mut self, auth: Value) {
        self.fields.insert("auth".to_string(), auth);
    }

    pub fn body_mode(&self) -> Option<&str> {
        self.fields
            .get("body")
            .and_then(|body| body.get("mode"))
            .and_then(Value::as_str)
    }

    /// 大小写不敏感地查找 header
    pub fn has_header(&self, name: &str) -> bool {
        self.fields
            .get("header")
            .and_then(Value::as_array)
            .map(|headers| {
                headers.iter().any(|h| {
                    h.get("key")
                        .and_then(Value::as_str)
                        .map(|key| key.eq_ignore_ascii_case(name))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    /// 追加一个 header，header 列表缺失时创建
    ///
    /// 返回 false 表示 `header` 字段存在但不是数组，无法追加
    pub fn push_header(&mut self, key: &str, value: &str) -> bool {
        let headers = self
            .fields
            .entry("header")
            .or_insert_with(|| Value::Array(Vec::new()));
        if headers.is_null() {
            *headers = Value::Array(Vec::new());
        }

        match headers.as_array_mut() {
            Some(list) => {
                let mut header = Map::new();
                header.insert("key".to_string(), Value::String(key.to_string()));
                header.insert("value".to_string(), Value::String(value.to_string()));
                list.push(Value::Object(header));
                true
            }
            None => false,
        }
    }

    /// `url.query` 数组（url 为字符串或没有 query 时返回 None）
    pub fn query_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.fields
            .get_mut("url")
            .and_then(|url| url.get_mut("query"))
            .and_then(Value::as_array_mut)
    }

    /// `url.raw` 字符串
    pub fn raw_url_mut(&mut self) -> Option<&mut String> {
        match self.fields.get_mut("url").and_then(|url| url.get_mut("raw")) {
            Some(Value::String(raw)) => Some(raw),
            _ => None,
        }
    }
}
