//! 东方财富资金流向 API 客户端
//!
//! 上游返回 `{rc, data}` 信封，只有 rc == 0 才展开 data；
//! 传输失败、非成功状态一律记日志后降级为 None，由调用方决定兜底。

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::utils::bigdecimal_parser::{parse_decimal, parse_volume};
use crate::utils::config::EastmoneyConfig;
use crate::utils::http_client::create_em_client;
use crate::utils::market::{secid, Exchange};

/// 排行榜字段清单：代码/名称/价格/涨跌幅/五档资金净流入及占比/5 日 10 日主力/时间戳/市场字段
const RANK_FIELDS: &str =
    "f12,f14,f2,f3,f62,f184,f66,f69,f72,f75,f78,f81,f84,f87,f204,f205,f124,f1,f13";
/// 全市场筛选：沪深主板 + 创业板 + 科创板
const RANK_MARKET_FILTER: &str = "m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23";
const HISTORY_FIELDS2: &str = "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61,f62,f63,f64,f65";

pub struct EastmoneyClient {
    http: Client,
    base_url: String,
    history_url: String,
}

/// 排行榜一行的命名映射，字段码对照见 RANK_FIELDS
#[derive(Debug, Clone, Serialize)]
pub struct RankRow {
    pub stock_code: String,
    pub stock_name: String,
    /// f1 市场代码原始串
    pub market_code: String,
    /// f13 交易所代码原始串
    pub exchange: String,
    pub current_price: f64,
    pub change_percent: f64,
    pub main_inflow: f64,
    pub main_inflow_rate: f64,
    pub super_inflow: f64,
    pub super_inflow_rate: f64,
    pub large_inflow: f64,
    pub large_inflow_rate: f64,
    pub medium_inflow: f64,
    pub medium_inflow_rate: f64,
    pub small_inflow: f64,
    pub small_inflow_rate: f64,
    pub net_inflow_5d: f64,
    pub net_inflow_10d: f64,
    pub timestamp: i64,
}

/// 个股日度资金流向的一行（逗号分隔 15 字段）
#[derive(Debug, Clone)]
pub struct FlowHistoryRow {
    pub trade_date: NaiveDate,
    pub main_inflow: BigDecimal,
    pub main_inflow_rate: BigDecimal,
    pub super_inflow: BigDecimal,
    pub super_inflow_rate: BigDecimal,
    pub large_inflow: BigDecimal,
    pub large_inflow_rate: BigDecimal,
    pub medium_inflow: BigDecimal,
    pub medium_inflow_rate: BigDecimal,
    pub small_inflow: BigDecimal,
    pub small_inflow_rate: BigDecimal,
    pub close_price: BigDecimal,
    pub change_percent: BigDecimal,
    pub volume: i64,
    pub amount: BigDecimal,
}

impl EastmoneyClient {
    pub fn from_config(cfg: &EastmoneyConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: create_em_client(cfg.timeout)?,
            base_url: cfg.base_url.clone(),
            history_url: cfg.history_url.clone(),
        })
    }

    /// 发请求并展开 {rc, data} 信封；任何失败降级为 None
    async fn request(&self, url: &str, params: &[(&str, String)]) -> Option<Value> {
        let resp = match self.http.get(url).query(params).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("EM API 请求失败: {}, 错误: {}", url, e);
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            tracing::error!("EM API 返回非成功状态: {}, status={}", url, status.as_u16());
            return None;
        }

        let json: Value = match resp.json().await {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("EM API 响应解析失败: {}, 错误: {}", url, e);
                return None;
            }
        };

        match json.get("rc").and_then(|v| v.as_i64()) {
            Some(0) => json.get("data").cloned().filter(|d| !d.is_null()),
            rc => {
                tracing::error!("EM API 信封状态异常: {}, rc={:?}", url, rc);
                None
            }
        }
    }

    /// 实时资金流向排行榜（clist 接口）。
    /// sort_field: f62-今日主力, f204-5日主力, f205-10日主力
    pub async fn fetch_rank(
        &self,
        page: i64,
        page_size: i64,
        sort_field: &str,
    ) -> Option<Value> {
        let url = format!("{}/api/qt/clist/get", self.base_url);
        let params = [
            ("pn", page.to_string()),
            ("pz", page_size.to_string()),
            ("po", "1".to_string()),
            ("np", "1".to_string()),
            ("fltt", "2".to_string()),
            ("invt", "2".to_string()),
            ("fid", sort_field.to_string()),
            ("fs", RANK_MARKET_FILTER.to_string()),
            ("fields", RANK_FIELDS.to_string()),
        ];
        self.request(&url, &params).await
    }

    /// 个股日度资金流向历史。返回行序与上游一致（升序），坏行单独跳过
    pub async fn fetch_history(&self, stock_code: &str, exchange: Exchange) -> Vec<FlowHistoryRow> {
        let sec = secid(exchange.market_code(), stock_code);
        let url = format!("{}/api/qt/stock/fflow/daykline/get", self.history_url);
        let params = [
            ("secid", sec),
            ("fields1", "f1,f2,f3,f7".to_string()),
            ("fields2", HISTORY_FIELDS2.to_string()),
        ];

        let data = match self.request(&url, &params).await {
            Some(data) => data,
            None => return Vec::new(),
        };

        match data.get("klines").and_then(|v| v.as_array()) {
            Some(lines) => parse_history_lines(lines.iter().filter_map(|v| v.as_str())),
            None => Vec::new(),
        }
    }

    /// 拉一页排行榜做实时快照，按股票代码索引；失败时返回空表，
    /// 调用方把缺失的实时字段置空即可
    pub async fn rank_snapshot(&self, page_size: i64) -> HashMap<String, RankRow> {
        match self.fetch_rank(1, page_size, "f62").await {
            Some(data) => parse_rank(&data)
                .into_iter()
                .map(|row| (row.stock_code.clone(), row))
                .collect(),
            None => HashMap::new(),
        }
    }

    /// 个股实时行情（直连查询用）
    pub async fn fetch_quote(&self, sec: &str) -> Option<Value> {
        let url = format!("{}/api/qt/stock/get", self.base_url);
        let params = [
            ("secid", sec.to_string()),
            ("fltt", "2".to_string()),
            ("invt", "2".to_string()),
            ("fields", "f57,f58,f43,f170".to_string()),
        ];
        self.request(&url, &params).await
    }
}

/// 解析排行榜 data.diff，单条异常只跳过该条
pub fn parse_rank(data: &Value) -> Vec<RankRow> {
    let diff = match data.get("diff").and_then(|v| v.as_array()) {
        Some(diff) => diff,
        None => return Vec::new(),
    };

    let mut rows = Vec::with_capacity(diff.len());
    for item in diff {
        match parse_rank_item(item) {
            Some(row) => rows.push(row),
            None => tracing::warn!("解析排行榜条目失败，已跳过: {}", item),
        }
    }
    rows
}

fn parse_rank_item(item: &Value) -> Option<RankRow> {
    let stock_code = item.get("f12")?.as_str().filter(|s| !s.is_empty())?.to_string();

    Some(RankRow {
        stock_code,
        stock_name: item
            .get("f14")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        market_code: token_string(item.get("f1")),
        exchange: token_string(item.get("f13")),
        current_price: num(item.get("f2")),
        change_percent: num(item.get("f3")),
        main_inflow: num(item.get("f62")),
        main_inflow_rate: num(item.get("f184")),
        super_inflow: num(item.get("f66")),
        super_inflow_rate: num(item.get("f69")),
        large_inflow: num(item.get("f72")),
        large_inflow_rate: num(item.get("f75")),
        medium_inflow: num(item.get("f78")),
        medium_inflow_rate: num(item.get("f81")),
        small_inflow: num(item.get("f84")),
        small_inflow_rate: num(item.get("f87")),
        net_inflow_5d: num(item.get("f204")),
        net_inflow_10d: num(item.get("f205")),
        timestamp: item.get("f124").and_then(|v| v.as_i64()).unwrap_or(0),
    })
}

/// f1/f13 在上游有时是数字有时是字符串，统一转成字符串再判定
fn token_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// 停牌等场景价格字段会给 "-"，按 0 处理
fn num(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 每行固定 15 个逗号分隔字段：
/// 日期 + 五档(净流入,占比) + 收盘价 + 涨跌幅 + 成交量 + 成交额。
/// 字段不足或数值解析失败的行跳过，不中断整批
pub fn parse_history_lines<'a, I>(lines: I) -> Vec<FlowHistoryRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        match parse_history_line(line) {
            Some(row) => rows.push(row),
            None => tracing::warn!("解析历史资金流向行失败，已跳过: {}", line),
        }
    }
    rows
}

fn parse_history_line(line: &str) -> Option<FlowHistoryRow> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 15 {
        return None;
    }

    let trade_date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d").ok()?;

    Some(FlowHistoryRow {
        trade_date,
        main_inflow: parse_decimal(fields[1])?,
        main_inflow_rate: parse_decimal(fields[2])?,
        super_inflow: parse_decimal(fields[3])?,
        super_inflow_rate: parse_decimal(fields[4])?,
        large_inflow: parse_decimal(fields[5])?,
        large_inflow_rate: parse_decimal(fields[6])?,
        medium_inflow: parse_decimal(fields[7])?,
        medium_inflow_rate: parse_decimal(fields[8])?,
        small_inflow: parse_decimal(fields[9])?,
        small_inflow_rate: parse_decimal(fields[10])?,
        close_price: parse_decimal(fields[11])?,
        change_percent: parse_decimal(fields[12])?,
        volume: parse_volume(fields[13])?,
        amount: parse_decimal(fields[14])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use std::time::Duration;

    fn test_client(base: &str) -> EastmoneyClient {
        let cfg = EastmoneyConfig {
            base_url: base.to_string(),
            history_url: base.to_string(),
            timeout: Duration::from_secs(5),
            rank_page_size: 100,
            lookup_mode: crate::utils::config::LookupMode::RankPage,
        };
        EastmoneyClient::from_config(&cfg).unwrap()
    }

    #[test]
    fn parse_rank_maps_field_codes() {
        let data = json!({
            "diff": [{
                "f12": "600118", "f14": "中国卫星", "f1": 2, "f13": "1",
                "f2": 25.6, "f3": 1.23,
                "f62": 1000.0, "f184": 2.5,
                "f66": 500.0, "f69": 1.2,
                "f72": 300.0, "f75": 0.8,
                "f78": 150.0, "f81": 0.4,
                "f84": 50.0, "f87": 0.1,
                "f204": 8000.0, "f205": 16000.0,
                "f124": 1716710400
            }]
        });
        let rows = parse_rank(&data);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.stock_code, "600118");
        assert_eq!(row.stock_name, "中国卫星");
        assert_eq!(row.exchange, "1");
        assert_eq!(row.market_code, "2");
        assert_eq!(row.current_price, 25.6);
        assert_eq!(row.main_inflow, 1000.0);
        assert_eq!(row.small_inflow_rate, 0.1);
        assert_eq!(row.net_inflow_10d, 16000.0);
        assert_eq!(row.timestamp, 1716710400);
    }

    #[test]
    fn rank_item_without_code_is_skipped() {
        let data = json!({
            "diff": [
                {"f14": "缺代码", "f2": 1.0},
                {"f12": "000001", "f14": "平安银行", "f2": 10.0}
            ]
        });
        let rows = parse_rank(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stock_code, "000001");
    }

    #[test]
    fn rank_suspended_price_dash_maps_to_zero() {
        let data = json!({"diff": [{"f12": "000002", "f14": "万科A", "f2": "-"}]});
        let rows = parse_rank(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].current_price, 0.0);
    }

    #[test]
    fn short_history_line_is_skipped() {
        let lines = [
            "2024-01-01,1,2,3",
            "2024-01-02,100,0.1,50,0.05,30,0.02,10,0.01,5,0.005,10.5,1.2,1000,10500",
        ];
        let rows = parse_history_lines(lines);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trade_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(rows[0].main_inflow, BigDecimal::from(100));
        assert_eq!(rows[0].close_price, BigDecimal::from_str("10.5").unwrap());
        assert_eq!(rows[0].volume, 1000);
    }

    #[test]
    fn bad_numeric_history_line_is_skipped() {
        let lines = [
            "2024-01-02,abc,0.1,50,0.05,30,0.02,10,0.01,5,0.005,10.5,1.2,1000,10500",
            "2024-01-03,,,,,,,,,,,,,,",
        ];
        let rows = parse_history_lines(lines);
        // 第一行主力净流入无法解析被跳过，第二行空字段全部按 0 处理
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trade_date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(rows[0].main_inflow, BigDecimal::from(0));
        assert_eq!(rows[0].volume, 0);
    }

    #[test]
    fn bad_date_history_line_is_skipped() {
        let lines = ["not-a-date,1,1,1,1,1,1,1,1,1,1,1,1,1,1"];
        assert!(parse_history_lines(lines).is_empty());
    }

    #[tokio::test]
    async fn fetch_rank_unwraps_envelope_on_rc_zero() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/qt/clist/get")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"rc":0,"data":{"total":1,"diff":[{"f12":"600000","f14":"浦发银行"}]}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let data = client.fetch_rank(1, 100, "f62").await.unwrap();
        assert_eq!(data["total"], 1);
        let rows = parse_rank(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stock_code, "600000");
    }

    #[tokio::test]
    async fn fetch_rank_degrades_to_none_on_bad_rc() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/qt/clist/get")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"rc":2,"data":null}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        assert!(client.fetch_rank(1, 100, "f62").await.is_none());
    }

    #[tokio::test]
    async fn fetch_rank_degrades_to_none_on_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/qt/clist/get")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = test_client(&server.url());
        assert!(client.fetch_rank(1, 100, "f62").await.is_none());
    }

    #[tokio::test]
    async fn fetch_history_parses_klines() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"rc":0,"data":{"code":"600118","klines":[
            "2024-01-02,100,0.1,50,0.05,30,0.02,10,0.01,5,0.005,10.5,1.2,1000,10500",
            "bad-line"
        ]}}"#;
        let _m = server
            .mock("GET", "/api/qt/stock/fflow/daykline/get")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let rows = client.fetch_history("600118", Exchange::Sh).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trade_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[tokio::test]
    async fn fetch_history_empty_on_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/qt/stock/fflow/daykline/get")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = test_client(&server.url());
        assert!(client.fetch_history("600118", Exchange::Sh).await.is_empty());
    }
}
