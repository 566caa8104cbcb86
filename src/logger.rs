use tracing_subscriber::{EnvFilter, fmt};

/// 未设置 RUST_LOG 时的过滤规则
const DEFAULT_FILTER: &str = "postkit=info,warn";

/// 初始化日志系统
///
/// 日志写到 stderr，stdout 只留给修复进度和报告统计。
/// 通过 RUST_LOG 覆盖默认级别，例如：
/// - RUST_LOG=debug postkit report
/// - RUST_LOG=postkit::collection=trace postkit fix
pub fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // 重复初始化（例如测试中）时忽略
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    tracing::debug!("Logger initialized");
}
