/// 需要同步修正 raw URL 的 JSON 查询参数名
pub const JSON_PARAM_NAMES: [&str; 6] = ["filter", "projection", "sort", "options", "query", "update"];

/// `{}` 的百分号编码
pub const ENCODED_EMPTY_OBJECT: &str = "%7B%7D";

/// 需要 Content-Type 的写操作方法
pub const WRITE_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// 一次修复的统计结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    /// 按文档顺序访问到的请求名称
    pub requests: Vec<String>,

    /// 新增 auth 继承的请求数
    pub auth_added: usize,

    /// 新增 Content-Type header 的请求数
    pub content_type_added: usize,

    /// 被编码的查询参数数
    pub params_encoded: usize,

    /// raw URL 被改写的请求数
    pub raw_urls_rewritten: usize,
}

impl FixReport {
    pub fn total_requests(&self) -> usize {
        self.requests.len()
    }

    /// 是否有任何规则产生了修改
    pub fn changed(&self) -> bool {
        self.auth_added + self.content_type_added + self.params_encoded + self.raw_urls_rewritten
            > 0
    }
}
