//! 资金流向历史的读穿回补
//!
//! 窗口内完全无数据才回源；窗口内已有部分数据时按现状返回，
//! 不做缺日补齐（与采集端行为保持一致，待产品确认）。

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Asia::Shanghai;

use crate::models::{CapitalFlow, NewCapitalFlow, Stock};
use crate::repositories::capital_flow;
use crate::repositories::stock::PgPoolConn;
use crate::services::eastmoney::{EastmoneyClient, FlowHistoryRow};
use crate::services::stock_sync::{self, SecurityLookup, StockStore};
use crate::utils::market::Exchange;

pub struct FlowHistoryResult {
    pub stock: Stock,
    /// 按交易日倒序
    pub flows: Vec<CapitalFlow>,
}

/// 资金流向的存取，生产环境由池化连接实现，
/// 直接委托给 repositories::capital_flow 的自由函数
pub trait FlowStore {
    fn flows_in_window(
        &mut self,
        stock_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CapitalFlow>, diesel::result::Error>;
    fn flow_exists(
        &mut self,
        stock_id: i32,
        date: NaiveDate,
    ) -> Result<bool, diesel::result::Error>;
    fn insert_flow(
        &mut self,
        new_flow: &NewCapitalFlow,
    ) -> Result<CapitalFlow, diesel::result::Error>;
}

impl FlowStore for PgPoolConn {
    fn flows_in_window(
        &mut self,
        stock_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CapitalFlow>, diesel::result::Error> {
        capital_flow::find_in_window(self, stock_id, start, end)
    }

    fn flow_exists(
        &mut self,
        stock_id: i32,
        date: NaiveDate,
    ) -> Result<bool, diesel::result::Error> {
        capital_flow::exists_by_date(self, stock_id, date)
    }

    fn insert_flow(
        &mut self,
        new_flow: &NewCapitalFlow,
    ) -> Result<CapitalFlow, diesel::result::Error> {
        capital_flow::create(self, new_flow)
    }
}

/// 交易日按上海时区计算
fn today() -> NaiveDate {
    Utc::now().with_timezone(&Shanghai).date_naive()
}

/// 查询某只股票最近 days 天的资金流向。
/// 股票本身走读穿路径解析；返回 None 表示股票不存在。
pub async fn get_flow_history<S>(
    store: &mut S,
    client: &EastmoneyClient,
    lookup: &dyn SecurityLookup,
    stock_code: &str,
    days: i64,
) -> Result<Option<FlowHistoryResult>, diesel::result::Error>
where
    S: StockStore + FlowStore,
{
    let stock = match stock_sync::get_or_fetch_stock(store, lookup, stock_code).await? {
        Some(stock) => stock,
        None => return Ok(None),
    };

    let end = today();
    let start = end - Duration::days(days);

    let mut flows = store.flows_in_window(stock.stock_id, start, end)?;

    // 仅在窗口完全为空时回源；逐行入库，单行失败记警告后继续
    if flows.is_empty() {
        let exchange = Exchange::from_db_str(&stock.exchange);
        let rows = client.fetch_history(stock_code, exchange).await;

        if !rows.is_empty() {
            backfill_rows(store, stock.stock_id, &rows, start, end);
            flows = store.flows_in_window(stock.stock_id, start, end)?;
        }
    }

    Ok(Some(FlowHistoryResult { stock, flows }))
}

/// 把窗口内且库中尚无对应日期的行写入；已存在的日期一律不动
fn backfill_rows<S: FlowStore>(
    store: &mut S,
    stock_id: i32,
    rows: &[FlowHistoryRow],
    start: NaiveDate,
    end: NaiveDate,
) {
    for row in rows {
        if row.trade_date < start || row.trade_date > end {
            continue;
        }

        match store.flow_exists(stock_id, row.trade_date) {
            Ok(true) => continue,
            Ok(false) => {
                let new_flow = flow_row_to_new(stock_id, row);
                if let Err(e) = store.insert_flow(&new_flow) {
                    tracing::warn!(
                        "保存历史资金流向失败: stock_id={}, date={}, 错误: {}",
                        stock_id,
                        row.trade_date,
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "查询已有资金流向失败: stock_id={}, date={}, 错误: {}",
                    stock_id,
                    row.trade_date,
                    e
                );
            }
        }
    }
}

fn flow_row_to_new(stock_id: i32, row: &FlowHistoryRow) -> NewCapitalFlow {
    NewCapitalFlow {
        stock_id,
        trade_date: row.trade_date,
        main_inflow: row.main_inflow.clone(),
        main_inflow_rate: row.main_inflow_rate.clone(),
        super_inflow: row.super_inflow.clone(),
        super_inflow_rate: row.super_inflow_rate.clone(),
        large_inflow: row.large_inflow.clone(),
        large_inflow_rate: row.large_inflow_rate.clone(),
        medium_inflow: row.medium_inflow.clone(),
        medium_inflow_rate: row.medium_inflow_rate.clone(),
        small_inflow: row.small_inflow.clone(),
        small_inflow_rate: row.small_inflow_rate.clone(),
        close_price: row.close_price.clone(),
        change_percent: row.change_percent.clone(),
        volume: row.volume,
        amount: row.amount.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewStock, SyncStockUpdate};
    use crate::services::eastmoney::{parse_history_lines, RankRow};
    use crate::utils::config::{EastmoneyConfig, LookupMode};
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;
    use std::time::Duration as StdDuration;

    fn test_cfg(base: &str) -> EastmoneyConfig {
        EastmoneyConfig {
            base_url: base.to_string(),
            history_url: base.to_string(),
            timeout: StdDuration::from_secs(5),
            rank_page_size: 100,
            lookup_mode: LookupMode::RankPage,
        }
    }

    /// 库里已有股票档案时不应触发的回源路径
    struct NoUpstream;

    #[async_trait]
    impl SecurityLookup for NoUpstream {
        async fn find_by_code(&self, _stock_code: &str) -> Option<RankRow> {
            None
        }
    }

    struct MemoryStore {
        stocks: Vec<Stock>,
        flows: Vec<CapitalFlow>,
    }

    impl MemoryStore {
        fn with_stock(code: &str) -> Self {
            let now = Utc::now().naive_utc();
            Self {
                stocks: vec![Stock {
                    stock_id: 1,
                    stock_code: code.to_string(),
                    stock_name: "测试股票".to_string(),
                    exchange: "SH".to_string(),
                    market_code: "1".to_string(),
                    secid: format!("1.{}", code),
                    industry: None,
                    area: None,
                    market_cap: None,
                    circulation_cap: None,
                    pe_ratio: None,
                    pb_ratio: None,
                    status: "normal".to_string(),
                    last_sync_at: Some(now),
                    created_at: now,
                    updated_at: now,
                }],
                flows: Vec::new(),
            }
        }

        fn seed_flow(&mut self, stock_id: i32, date: NaiveDate) {
            let line = format!(
                "{},100,0.1,50,0.05,30,0.02,10,0.01,5,0.005,10.5,1.2,1000,10500",
                date.format("%Y-%m-%d")
            );
            let rows = parse_history_lines([line.as_str()]);
            let new_flow = flow_row_to_new(stock_id, &rows[0]);
            self.insert_flow(&new_flow).unwrap();
        }
    }

    impl StockStore for MemoryStore {
        fn find_stock_by_code(
            &mut self,
            code: &str,
        ) -> Result<Option<Stock>, diesel::result::Error> {
            Ok(self.stocks.iter().find(|s| s.stock_code == code).cloned())
        }

        fn insert_stock(&mut self, new_stock: &NewStock) -> Result<Stock, diesel::result::Error> {
            let now = Utc::now().naive_utc();
            let stock = Stock {
                stock_id: self.stocks.len() as i32 + 1,
                stock_code: new_stock.stock_code.clone(),
                stock_name: new_stock.stock_name.clone(),
                exchange: new_stock.exchange.clone(),
                market_code: new_stock.market_code.clone(),
                secid: new_stock.secid.clone(),
                industry: None,
                area: None,
                market_cap: None,
                circulation_cap: None,
                pe_ratio: None,
                pb_ratio: None,
                status: new_stock.status.clone(),
                last_sync_at: new_stock.last_sync_at,
                created_at: now,
                updated_at: now,
            };
            self.stocks.push(stock.clone());
            Ok(stock)
        }

        fn update_stock_sync(
            &mut self,
            code: &str,
            update: &SyncStockUpdate,
        ) -> Result<Stock, diesel::result::Error> {
            let stock = self
                .stocks
                .iter_mut()
                .find(|s| s.stock_code == code)
                .ok_or(diesel::result::Error::NotFound)?;
            stock.stock_name = update.stock_name.clone();
            stock.exchange = update.exchange.clone();
            stock.market_code = update.market_code.clone();
            stock.secid = update.secid.clone();
            stock.last_sync_at = update.last_sync_at;
            stock.updated_at = update.updated_at;
            Ok(stock.clone())
        }
    }

    impl FlowStore for MemoryStore {
        fn flows_in_window(
            &mut self,
            stock_id: i32,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<CapitalFlow>, diesel::result::Error> {
            let mut rows: Vec<CapitalFlow> = self
                .flows
                .iter()
                .filter(|f| {
                    f.stock_id == stock_id && f.trade_date >= start && f.trade_date <= end
                })
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.trade_date.cmp(&a.trade_date));
            Ok(rows)
        }

        fn flow_exists(
            &mut self,
            stock_id: i32,
            date: NaiveDate,
        ) -> Result<bool, diesel::result::Error> {
            Ok(self
                .flows
                .iter()
                .any(|f| f.stock_id == stock_id && f.trade_date == date))
        }

        fn insert_flow(
            &mut self,
            new_flow: &NewCapitalFlow,
        ) -> Result<CapitalFlow, diesel::result::Error> {
            let flow = CapitalFlow {
                flow_id: self.flows.len() as i64 + 1,
                stock_id: new_flow.stock_id,
                trade_date: new_flow.trade_date,
                main_inflow: new_flow.main_inflow.clone(),
                main_inflow_rate: new_flow.main_inflow_rate.clone(),
                super_inflow: new_flow.super_inflow.clone(),
                super_inflow_rate: new_flow.super_inflow_rate.clone(),
                large_inflow: new_flow.large_inflow.clone(),
                large_inflow_rate: new_flow.large_inflow_rate.clone(),
                medium_inflow: new_flow.medium_inflow.clone(),
                medium_inflow_rate: new_flow.medium_inflow_rate.clone(),
                small_inflow: new_flow.small_inflow.clone(),
                small_inflow_rate: new_flow.small_inflow_rate.clone(),
                close_price: new_flow.close_price.clone(),
                change_percent: new_flow.change_percent.clone(),
                volume: new_flow.volume,
                amount: new_flow.amount.clone(),
                created_at: Utc::now().naive_utc(),
            };
            self.flows.push(flow.clone());
            Ok(flow)
        }
    }

    #[test]
    fn flow_row_mapping_keeps_all_tiers() {
        let rows = parse_history_lines([
            "2024-01-02,100,0.1,50,0.05,30,0.02,10,0.01,5,0.005,10.5,1.2,1000,10500",
        ]);
        let new_flow = flow_row_to_new(7, &rows[0]);

        assert_eq!(new_flow.stock_id, 7);
        assert_eq!(new_flow.trade_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(new_flow.main_inflow, BigDecimal::from(100));
        assert_eq!(new_flow.main_inflow_rate, BigDecimal::from_str("0.1").unwrap());
        assert_eq!(new_flow.super_inflow, BigDecimal::from(50));
        assert_eq!(new_flow.large_inflow, BigDecimal::from(30));
        assert_eq!(new_flow.medium_inflow, BigDecimal::from(10));
        assert_eq!(new_flow.small_inflow, BigDecimal::from(5));
        assert_eq!(new_flow.close_price, BigDecimal::from_str("10.5").unwrap());
        assert_eq!(new_flow.volume, 1000);
        assert_eq!(new_flow.amount, BigDecimal::from(10500));
    }

    #[tokio::test]
    async fn partial_window_is_served_as_is_without_upstream_call() {
        let mut server = mockito::Server::new_async().await;
        let history_mock = server
            .mock("GET", "/api/qt/stock/fflow/daykline/get")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let cfg = test_cfg(&server.url());
        let client = EastmoneyClient::from_config(&cfg).unwrap();

        let mut store = MemoryStore::with_stock("600118");
        let seeded_date = today() - Duration::days(1);
        store.seed_flow(1, seeded_date);

        let result = get_flow_history(&mut store, &client, &NoUpstream, "600118", 30)
            .await
            .unwrap()
            .unwrap();

        // 窗口内已有一条就按现状返回，不补缺日
        assert_eq!(result.flows.len(), 1);
        assert_eq!(result.flows[0].trade_date, seeded_date);
        history_mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_window_backfills_then_serves_from_store() {
        let d1 = today() - Duration::days(1);
        let d2 = today() - Duration::days(2);

        let mut server = mockito::Server::new_async().await;
        let body = format!(
            r#"{{"rc":0,"data":{{"code":"600118","klines":[
                "{},100,0.1,50,0.05,30,0.02,10,0.01,5,0.005,10.5,1.2,1000,10500",
                "{},200,0.2,80,0.08,50,0.04,20,0.02,8,0.008,10.8,2.4,2000,21600"
            ]}}}}"#,
            d2.format("%Y-%m-%d"),
            d1.format("%Y-%m-%d")
        );
        let history_mock = server
            .mock("GET", "/api/qt/stock/fflow/daykline/get")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let cfg = test_cfg(&server.url());
        let client = EastmoneyClient::from_config(&cfg).unwrap();
        let mut store = MemoryStore::with_stock("600118");

        let result = get_flow_history(&mut store, &client, &NoUpstream, "600118", 30)
            .await
            .unwrap()
            .unwrap();

        // 回源两行全部落库，返回按交易日倒序
        assert_eq!(result.flows.len(), 2);
        assert_eq!(result.flows[0].trade_date, d1);
        assert_eq!(result.flows[1].trade_date, d2);
        assert_eq!(store.flows.len(), 2);
        history_mock.assert_async().await;
    }
}
