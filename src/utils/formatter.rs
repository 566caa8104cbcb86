/// 字节单位（二进制前缀，1024 进制）
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

const KIB: u64 = 1024;

/// 将字节数格式化为带单位的字符串，保留一位小数
///
/// 单位下标为 floor(log1024(bytes))，最大到 GB。
/// 0 直接返回 "0B"。
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    // 用整数比较求 floor(log1024)，避免浮点误差
    let mut unit = 0;
    let mut threshold = KIB;
    while unit < SIZE_UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(KIB);
    }

    let scaled = bytes as f64 / KIB.pow(unit as u32) as f64;
    format!("{:.1}{}", scaled, SIZE_UNITS[unit])
}

/// 计算百分比并保留一位小数，total 为 0 时返回 "0.0"
pub fn format_percentage(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", (part as f64 * 100.0) / total as f64)
}
