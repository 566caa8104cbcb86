use super::ReportSummary;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

/// 打印统计表格与输出路径
pub fn print_summary(summary: &ReportSummary) {
    let stats = &summary.stats;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Statistic", "Value"]);

    table.add_row(vec![Cell::new("Total Tests"), Cell::new(stats.total_tests)]);
    table.add_row(vec![
        Cell::new("Total Assertions"),
        Cell::new(stats.total_assertions),
    ]);
    table.add_row(vec![
        Cell::new("Passed Assertions"),
        Cell::new(stats.passed_assertions).fg(Color::Green),
    ]);

    let failed_color = if stats.failed_assertions == 0 {
        Color::Green
    } else {
        Color::Red
    };
    table.add_row(vec![
        Cell::new("Failed Assertions"),
        Cell::new(stats.failed_assertions).fg(failed_color),
    ]);
    table.add_row(vec![
        Cell::new("Success Rate"),
        Cell::new(format!("{}%", stats.success_rate())).add_attribute(Attribute::Bold),
    ]);

    println!(
        "\n{} {}",
        "✓".green(),
        "HTML report generated successfully!".bold()
    );
    println!("{}", table);
    println!(
        "{} {}\n",
        "Report saved to:".bold(),
        summary.output.display()
    );
}
