pub mod entry;
pub mod newman;
pub mod printer;
pub mod render;
pub mod stats;
pub mod template;

pub use entry::{AssertionOutcome, ReportEntry, RequestDetails, ResponseDetails};
pub use newman::{Execution, TestRun};
pub use printer::print_summary;
pub use render::render_entries;
pub use stats::ReportStats;
pub use template::{ReportTemplate, Slot, SlotValues};

use crate::utils::{escape_script_json, write_atomic};
use crate::{PostkitError, Result};
use std::fs;
use std::path::PathBuf;

/// 报告生成涉及的三个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub results: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

/// 由一次 run 派生出的全部报告数据
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub stats: ReportStats,
}

impl Report {
    pub fn from_run(run: &TestRun) -> Self {
        let entries: Vec<ReportEntry> = run
            .executions()
            .iter()
            .enumerate()
            .map(|(index, execution)| ReportEntry::from_execution(index, execution))
            .collect();
        let stats = ReportStats::from_entries(&entries);
        Self { entries, stats }
    }

    pub fn slot_values(&self) -> Result<SlotValues> {
        let data_json = serde_json::to_string_pretty(&self.entries)?;
        Ok(SlotValues {
            results_html: render_entries(&self.entries),
            data_json: escape_script_json(&data_json),
            total_tests: self.stats.total_tests,
            passed_assertions: self.stats.passed_assertions,
            failed_assertions: self.stats.failed_assertions,
            success_rate: self.stats.success_rate(),
        })
    }

    pub fn render(&self, template: &ReportTemplate) -> Result<String> {
        Ok(template.render(&self.slot_values()?))
    }
}

/// 一次报告生成的结果
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub stats: ReportStats,
    pub output: PathBuf,
}

pub struct ReportGenerator {
    paths: ReportPaths,
}

impl ReportGenerator {
    pub fn new(paths: ReportPaths) -> Self {
        Self { paths }
    }

    /// 读取结果与模板、生成报告，全部成功后才写出文件
    pub fn generate(&self) -> Result<ReportSummary> {
        let run = TestRun::load(&self.paths.results)?;
        let template_source = fs::read_to_string(&self.paths.template)
            .map_err(|e| PostkitError::read(&self.paths.template, e))?;

        if !run.has_executions() {
            tracing::warn!(
                path = %self.paths.results.display(),
                "No run.executions in results, generating an empty report"
            );
        }

        let template = ReportTemplate::parse(&template_source)?;
        let report = Report::from_run(&run);

        tracing::debug!(entries = report.entries.len(), "Report entries built");
        if let Some(first) = report.entries.first() {
            tracing::debug!(
                body = ?first.response.body,
                "First response body"
            );
        }
        for (index, entry) in report.entries.iter().enumerate() {
            tracing::debug!(
                index,
                name = %entry.name,
                has_body = entry.response.body.is_some(),
                "Rendering entry"
            );
        }

        let html = report.render(&template)?;
        write_atomic(&self.paths.output, &html)?;
        tracing::info!(path = %self.paths.output.display(), "Report written");

        Ok(ReportSummary {
            stats: report.stats,
            output: self.paths.output.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_run() {
        let run = TestRun::parse(
            r#"{"run": {"executions": [
                {"item": {"name": "a"}, "assertions": [{"assertion": "ok"}]},
                {"item": {"name": "b"}, "assertions": [{"assertion": "bad", "error": {}}]}
            ]}}"#,
        )
        .unwrap();

        let report = Report::from_run(&run);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.stats.total_tests, 2);
        assert_eq!(report.stats.passed_assertions, 1);
        assert_eq!(report.stats.failed_assertions, 1);
        assert_eq!(report.stats.success_rate(), "50.0");
    }

    #[test]
    fn test_slot_values_escape_script() {
        let run = TestRun::parse(
            r#"{"run": {"executions": [{"item": {"name": "</script><b>x</b>"}}]}}"#,
        )
        .unwrap();
        let values = Report::from_run(&run).slot_values().unwrap();
        assert!(!values.data_json.contains("</script>"));
        assert!(values.results_html.contains("&lt;/script&gt;"));
    }
}
