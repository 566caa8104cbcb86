use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// 与 JavaScript `encodeURIComponent` 相同的保留字符集：
/// 字母数字与 `- _ . ! ~ * ' ( )` 不编码
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 按 URI 组件规则百分号编码（UTF-8）
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
