use bigdecimal::BigDecimal;
use std::str::FromStr;

/// 解析历史行情行里的金额/比例字段。
/// 空字段按 0 处理；非空但无法解析返回 None，由调用方跳过整行。
pub fn parse_decimal(s: &str) -> Option<BigDecimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(BigDecimal::from(0));
    }
    BigDecimal::from_str(trimmed).ok()
}

/// 成交量字段：上游可能给带小数的字符串，取整数部分
pub fn parse_volume(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64)
}
