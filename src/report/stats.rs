use crate::report::entry::ReportEntry;
use crate::utils::format_percentage;

/// 全局统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total_tests: usize,
    pub total_assertions: usize,
    pub passed_assertions: usize,
    pub failed_assertions: usize,
}

impl ReportStats {
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let total_assertions = entries.iter().map(|e| e.tests.len()).sum();
        let passed_assertions = entries.iter().map(ReportEntry::passed_count).sum();

        Self {
            total_tests: entries.len(),
            total_assertions,
            passed_assertions,
            failed_assertions: total_assertions - passed_assertions,
        }
    }

    /// 通过率百分比，一位小数；没有断言时为 "0.0"
    pub fn success_rate(&self) -> String {
        format_percentage(self.passed_assertions, self.total_assertions)
    }
}
