use crate::report::entry::ReportEntry;
use crate::utils::{BodyContent, escape_html};
use serde_json::{Map, Value};

/// 渲染所有条目
///
/// 标记使用模板样式与脚本依赖的 class（`test-item`、`test-header`、
/// `request-response-grid` 等），所有插值都经过 HTML 转义。
pub fn render_entries(entries: &[ReportEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| render_entry(index, entry))
        .collect()
}

/// 渲染单个条目
pub fn render_entry(index: usize, entry: &ReportEntry) -> String {
    let method = escape_html(&entry.method);
    let method_class = escape_html(&entry.method.to_lowercase());
    let (status_class, status_icon, status_label) = status_badge(entry.passed);

    format!(
        r#"
        <div class="test-item" data-method="{method_class}" data-status="{data_status}">
            <div class="test-header" onclick="toggleTest(this)">
                <div class="test-title">
                    <span class="method-badge method-{method_class}">{method}</span>
                    <span class="test-name">{name}</span>
                    <span class="status-badge {status_class}">
                        <i class="fas {status_icon}"></i>
                        {status_label}
                    </span>
                </div>
                <div class="test-meta">
                    <span class="response-time">{time}ms</span>
                    <span class="response-size">{size}</span>
                    <span class="test-count">{passed}/{total} Tests Passed</span>
                    <i class="fas fa-chevron-down expand-icon"></i>
                </div>
            </div>

            <div class="test-content">
                <div class="test-details">
                    <h4><i class="fas fa-info-circle"></i> Test Results</h4>
                    <div class="test-list">{assertions}
                    </div>
                </div>

                <div class="request-response-grid">
{request_panel}
{response_panel}
                </div>
            </div>
        </div>
    "#,
        data_status = if entry.passed { "passed" } else { "failed" },
        name = escape_html(&entry.name),
        time = entry.response_time,
        size = escape_html(&entry.response_size),
        passed = entry.passed_count(),
        total = entry.tests.len(),
        assertions = render_assertions(entry),
        request_panel = render_request_panel(index, entry, &method, &method_class),
        response_panel = render_response_panel(index, entry, status_class),
    )
}

fn status_badge(passed: bool) -> (&'static str, &'static str, &'static str) {
    if passed {
        ("status-success", "fa-check", "Passed")
    } else {
        ("status-error", "fa-times", "Failed")
    }
}

fn render_assertions(entry: &ReportEntry) -> String {
    entry
        .tests
        .iter()
        .map(|test| {
            let (class, icon) = if test.passed {
                ("passed", "fa-check")
            } else {
                ("failed", "fa-times")
            };
            format!(
                r#"
                        <div class="test-assertion {class}">
                            <i class="fas {icon}"></i>
                            <span>{name}</span>
                        </div>"#,
                name = escape_html(&test.name),
            )
        })
        .collect()
}

fn render_request_panel(index: usize, entry: &ReportEntry, method: &str, method_class: &str) -> String {
    format!(
        r#"                    <div class="section">
                        <div class="section-title">
                            <i class="fas fa-arrow-right"></i>
                            Request Details
                        </div>

                        <div class="info-item">
                            <strong>Method:</strong>
                            <span class="method-badge method-{method_class}">{method}</span>
                        </div>

                        <div class="info-item">
                            <strong>URL:</strong>
                            <code class="url">{url}</code>
                        </div>
{headers}{body}
                    </div>"#,
        url = escape_html(&entry.url),
        headers = render_headers("Headers", &entry.request.headers, false),
        body = render_body("Request Body", index, entry.request.body.as_ref()),
    )
}

fn render_response_panel(index: usize, entry: &ReportEntry, status_class: &str) -> String {
    format!(
        r#"                    <div class="section">
                        <div class="section-title">
                            <i class="fas fa-arrow-left"></i>
                            Response Details
                        </div>

                        <div class="info-item">
                            <strong>Status:</strong>
                            <span class="status-badge {status_class}">
                                {status}
                            </span>
                        </div>

                        <div class="info-item">
                            <strong>Size:</strong>
                            <span>{size}</span>
                        </div>

                        <div class="info-item">
                            <strong>Time:</strong>
                            <span>{time}ms</span>
                        </div>
{headers}{body}
                    </div>"#,
        status = entry.status,
        size = escape_html(&entry.response_size),
        time = entry.response_time,
        headers = render_headers("Response Headers", &entry.response.headers, true),
        body = render_body("Response Body", index, entry.response.body.as_ref()),
    )
}

fn render_headers(title: &str, headers: &Map<String, Value>, copyable: bool) -> String {
    let pretty = serde_json::to_string_pretty(headers).unwrap_or_else(|_| "{}".to_string());
    let copy_button = if copyable { COPY_BUTTON } else { "" };

    format!(
        r#"
                        <div class="collapsible-section">
                            <button class="collapsible-btn" onclick="toggleCollapsible(this)">
                                <i class="fas fa-chevron-right"></i> {title}
                            </button>
                            <div class="collapsible-content">
                                <div class="code-block">{copy_button}
                                    <pre class="json-content"><code class="language-json">{content}</code></pre>
                                </div>
                            </div>
                        </div>
"#,
        content = escape_html(&pretty),
    )
}

fn render_body(title: &str, index: usize, body: Option<&BodyContent>) -> String {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        return String::new();
    };
    let language = if body.is_structured() { "language-json" } else { "language-text" };

    format!(
        r#"
                        <div class="body-section">
                            <div class="body-header">
                                <h4>{title}</h4>
                            </div>
                            <div class="body-container" data-test-index="{index}">
                                <div class="code-block">{copy_button}
                                    <pre class="json-content"><code class="{language}">{content}</code></pre>
                                </div>
                            </div>
                        </div>
"#,
        copy_button = COPY_BUTTON,
        content = escape_html(&body.to_display_string()),
    )
}

const COPY_BUTTON: &str = r#"
                                    <button class="copy-btn" title="Copy to clipboard"><i class="fas fa-copy"></i></button>"#;
