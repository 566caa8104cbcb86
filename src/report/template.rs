use crate::{PostkitError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// 模板中的数据注入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `<div id="test-results">` 的内容
    Results,
    /// `const testData = [...]` 的数组字面量
    Data,
    TotalTests,
    PassedTests,
    FailedTests,
    SuccessRate,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Results,
        Slot::Data,
        Slot::TotalTests,
        Slot::PassedTests,
        Slot::FailedTests,
        Slot::SuccessRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Results => "test-results",
            Slot::Data => "testData",
            Slot::TotalTests => "total-tests",
            Slot::PassedTests => "passed-tests",
            Slot::FailedTests => "failed-tests",
            Slot::SuccessRate => "success-rate",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 填充各个 slot 的值
#[derive(Debug, Clone, Default)]
pub struct SlotValues {
    pub results_html: String,
    pub data_json: String,
    pub total_tests: usize,
    pub passed_assertions: usize,
    pub failed_assertions: usize,
    pub success_rate: String,
}

impl SlotValues {
    fn value(&self, slot: Slot) -> Cow<'_, str> {
        match slot {
            Slot::Results => Cow::Borrowed(&self.results_html),
            Slot::Data => Cow::Borrowed(&self.data_json),
            Slot::TotalTests => Cow::Owned(self.total_tests.to_string()),
            Slot::PassedTests => Cow::Owned(self.passed_assertions.to_string()),
            Slot::FailedTests => Cow::Owned(self.failed_assertions.to_string()),
            Slot::SuccessRate => Cow::Borrowed(&self.success_rate),
        }
    }
}

/// 模板静态文本的默认视图改写：JSON 视图默认可见，human-readable 视图默认隐藏
const DEFAULT_VIEW_REWRITES: [(&str, &str); 7] = [
    (r"\${testIndex}", "${testIndex}"),
    (
        r#"type="checkbox" checked id="requestToggle_"#,
        r#"type="checkbox" id="requestToggle_"#,
    ),
    (
        r#"type="checkbox" checked id="responseToggle_"#,
        r#"type="checkbox" id="responseToggle_"#,
    ),
    (
        r#"<span class="toggle-label">JSON</span>"#,
        r#"<span class="toggle-label active">JSON</span>"#,
    ),
    (
        r#"<span class="toggle-label active">Human</span>"#,
        r#"<span class="toggle-label">Human</span>"#,
    ),
    (
        r#"<div class="human-readable" style="display: block;">"#,
        r#"<div class="human-readable" style="display: none;">"#,
    ),
    (
        r#"<div class="code-block" style="display: none;">"#,
        r#"<div class="code-block" style="display: block;">"#,
    ),
];

static RESULTS_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<div\s+id="test-results"\s*>"#).expect("static regex is valid"));

static DIV_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<div\b|</div\s*>").expect("static regex is valid"));

static DATA_ARRAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:const|let|var)\s+testData\s*=\s*(\[[\s\S]*?\]);").expect("static regex is valid")
});

static STAT_NUMBERS: Lazy<Vec<(Slot, Regex)>> = Lazy::new(|| {
    [
        (Slot::TotalTests, r"\d+"),
        (Slot::PassedTests, r"\d+"),
        (Slot::FailedTests, r"\d+"),
        (Slot::SuccessRate, r"[\d.]+"),
    ]
    .into_iter()
    .map(|(slot, number)| {
        let suffix = if slot == Slot::SuccessRate { "%" } else { "" };
        let pattern = format!(
            r#"<div class="stat-number" id="{}">\s*({}){}\s*</div>"#,
            slot.as_str(),
            number,
            suffix
        );
        (slot, Regex::new(&pattern).expect("static regex is valid"))
    })
    .collect()
});

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// 解析后的报告模板：静态文本与命名 slot 交替排列
///
/// 模板只解析一次，渲染时按顺序输出，slot 之间互不影响。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTemplate {
    segments: Vec<Segment>,
}

impl ReportTemplate {
    pub fn parse(source: &str) -> Result<Self> {
        let text = apply_default_view(source);

        let mut found: Vec<(Range<usize>, Slot)> = Vec::new();
        if let Some(range) = find_results_content(&text) {
            found.push((range, Slot::Results));
        }
        if let Some(group) = DATA_ARRAY.captures(&text).and_then(|c| c.get(1)) {
            found.push((group.range(), Slot::Data));
        }
        for (slot, regex) in STAT_NUMBERS.iter() {
            if let Some(group) = regex.captures(&text).and_then(|c| c.get(1)) {
                found.push((group.range(), *slot));
            }
        }

        if found.is_empty() {
            return Err(PostkitError::TemplateError(
                "no injection slots found (expected test-results container, testData array or statistics)"
                    .to_string(),
            ));
        }
        for slot in Slot::ALL {
            if !found.iter().any(|(_, s)| *s == slot) {
                tracing::warn!(slot = %slot, "Template slot not found, it will not be filled");
            }
        }

        found.sort_by_key(|(range, _)| range.start);
        for pair in found.windows(2) {
            if pair[0].0.end > pair[1].0.start {
                return Err(PostkitError::TemplateError(format!(
                    "slots '{}' and '{}' overlap",
                    pair[0].1, pair[1].1
                )));
            }
        }

        let mut segments = Vec::with_capacity(found.len() * 2 + 1);
        let mut cursor = 0;
        for (range, slot) in found {
            if range.start > cursor {
                segments.push(Segment::Literal(text[cursor..range.start].to_string()));
            }
            segments.push(Segment::Slot(slot));
            cursor = range.end;
        }
        if cursor < text.len() {
            segments.push(Segment::Literal(text[cursor..].to_string()));
        }

        Ok(Self { segments })
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.slots().any(|s| s == slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, values: &SlotValues) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Slot(slot) => output.push_str(&values.value(*slot)),
            }
        }
        output
    }
}

fn apply_default_view(source: &str) -> String {
    DEFAULT_VIEW_REWRITES
        .iter()
        .fold(source.to_string(), |text, (from, to)| text.replace(from, to))
}

/// 找到 `<div id="test-results">` 与其配对 `</div>` 之间的范围，嵌套 div 按层级匹配
fn find_results_content(text: &str) -> Option<Range<usize>> {
    let open = RESULTS_OPEN.find(text)?;
    let start = open.end();
    let mut depth = 1usize;

    for tag in DIV_TAG.find_iter(&text[start..]) {
        if tag.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some(start..start + tag.start());
            }
        } else {
            depth += 1;
        }
    }
    None
}
