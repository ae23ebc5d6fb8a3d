//! 市场归属判定与东财 secid 拼装

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Sh,
    Sz,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Sh => "SH",
            Exchange::Sz => "SZ",
        }
    }

    /// 东财市场代码：1-沪市，0-深市
    pub fn market_code(&self) -> &'static str {
        match self {
            Exchange::Sh => "1",
            Exchange::Sz => "0",
        }
    }

    /// 还原库里存的交易所字段，"SH" 以外一律按深市处理
    pub fn from_db_str(s: &str) -> Exchange {
        if s == "SH" {
            Exchange::Sh
        } else {
            Exchange::Sz
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 根据排行榜返回的 f13（交易所代码）和 f1（市场代码）判定交易所。
/// 规则与采集端保持一致：f13 == "1" 或 f1 以 "1" 开头视为沪市，
/// 其余（含两个字段均为空）一律归入深市。
pub fn resolve_market(exchange_token: &str, market_token: &str) -> Exchange {
    if exchange_token == "1" || market_token.starts_with('1') {
        Exchange::Sh
    } else {
        Exchange::Sz
    }
}

/// secid = {市场代码}.{股票代码}
pub fn secid(market_code: &str, stock_code: &str) -> String {
    format!("{}.{}", market_code, stock_code)
}

/// 仅有股票代码时按代码前缀推断 secid（6 开头为沪市）。
/// 用于个股直连查询，此时拿不到排行榜的市场字段。
pub fn code_to_secid(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.starts_with('6') {
        format!("1.{}", trimmed)
    } else {
        format!("0.{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_token_one_is_shanghai() {
        assert_eq!(resolve_market("1", ""), Exchange::Sh);
        assert_eq!(resolve_market("1", "0"), Exchange::Sh);
        assert_eq!(resolve_market("1", "anything"), Exchange::Sh);
    }

    #[test]
    fn market_token_starting_with_one_is_shanghai() {
        assert_eq!(resolve_market("", "1"), Exchange::Sh);
        assert_eq!(resolve_market("0", "123"), Exchange::Sh);
        assert_eq!(resolve_market("2", "1x"), Exchange::Sh);
    }

    #[test]
    fn everything_else_is_shenzhen() {
        assert_eq!(resolve_market("", ""), Exchange::Sz);
        assert_eq!(resolve_market("0", "0"), Exchange::Sz);
        assert_eq!(resolve_market("2", "01"), Exchange::Sz);
    }

    #[test]
    fn db_exchange_round_trip() {
        assert_eq!(Exchange::from_db_str("SH"), Exchange::Sh);
        assert_eq!(Exchange::from_db_str("SZ"), Exchange::Sz);
        assert_eq!(Exchange::from_db_str(""), Exchange::Sz);
    }

    #[test]
    fn secid_is_market_dot_code() {
        assert_eq!(secid(Exchange::Sh.market_code(), "600118"), "1.600118");
        assert_eq!(secid(Exchange::Sz.market_code(), "000001"), "0.000001");
    }

    #[test]
    fn code_prefix_heuristic() {
        assert_eq!(code_to_secid("600000"), "1.600000");
        assert_eq!(code_to_secid(" 600000 "), "1.600000");
        assert_eq!(code_to_secid("000001"), "0.000001");
        assert_eq!(code_to_secid("300750"), "0.300750");
    }
}
