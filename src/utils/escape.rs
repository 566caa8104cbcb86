/// 转义 HTML 文本（可同时用于元素内容与属性值）
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 嵌入 `<script>` 的 JSON 不能出现 `</script>`
pub fn escape_script_json(s: &str) -> String {
    s.replace("</", "<\\/")
}
