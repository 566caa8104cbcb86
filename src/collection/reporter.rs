use crate::collection::types::FixReport;
use colored::Colorize;
use std::path::Path;

pub struct FixReporter {
    dry_run: bool,
}

impl FixReporter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// 打印开始信息
    pub fn print_header(&self, path: &Path) {
        println!(
            "\n{} Fixing Postman collection {}...\n",
            "🔧".bold(),
            path.display().to_string().bold()
        );
    }

    /// 按文档顺序打印每个被处理的请求
    pub fn print_requests(&self, report: &FixReport) {
        for name in &report.requests {
            println!(" {} {}", "Fixing:".cyan(), name);
        }
    }

    /// 打印修复摘要
    pub fn print_summary(&self, report: &FixReport, path: &Path) {
        println!("\n{}", "━".repeat(50));

        if self.dry_run {
            println!(
                "{} {}",
                "Dry run:".yellow().bold(),
                "no changes written".dimmed()
            );
        } else {
            println!("{} {}", "✓".green(), "Collection fixed successfully!".bold());
        }

        println!("  {}: {}", "Requests".bold(), report.total_requests());
        println!(
            "  {}: {}",
            "Auth inheritance added".bold(),
            Self::count(report.auth_added)
        );
        println!(
            "  {}: {}",
            "Content-Type headers added".bold(),
            Self::count(report.content_type_added)
        );
        println!(
            "  {}: {}",
            "Query params encoded ({} -> %7B%7D)".bold(),
            Self::count(report.params_encoded)
        );
        println!(
            "  {}: {}",
            "Raw URLs rewritten".bold(),
            Self::count(report.raw_urls_rewritten)
        );

        if !report.changed() {
            println!("  {}", "Already up to date".dimmed());
        }
        if !self.dry_run {
            println!("  {}: {}", "Saved".bold(), path.display());
        }
        println!();
    }

    fn count(n: usize) -> String {
        if n > 0 {
            n.to_string().green().to_string()
        } else {
            n.to_string().dimmed().to_string()
        }
    }
}
