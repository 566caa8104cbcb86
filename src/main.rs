mod cli;

use clap::Parser;
use cli::Cli;
use colored::Colorize;

fn main() {
    // 初始化日志系统
    postkit::logger::init_logger();

    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        eprintln!("{} {:#}", "❌ Error:".red().bold(), err);
        std::process::exit(1);
    }
}
