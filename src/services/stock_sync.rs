//! 股票读穿同步：库里查不到时回源上游，解析后落库
//!
//! 股票详情、资金流向、持仓和收藏建档走的都是这一条路径。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{NewStock, Stock, SyncStockUpdate};
use crate::repositories::stock::{self, PgPoolConn};
use crate::services::eastmoney::{parse_rank, EastmoneyClient, RankRow};
use crate::utils::config::{EastmoneyConfig, LookupMode};
use crate::utils::market::{code_to_secid, resolve_market, secid};

/// 按代码在上游定位一只股票的能力。
/// 回源方式由配置选择，不在调用点写死。
#[async_trait]
pub trait SecurityLookup: Send + Sync {
    async fn find_by_code(&self, stock_code: &str) -> Option<RankRow>;
}

/// 拉取排行榜第一页后线性扫描。
/// 覆盖已知不完整：排名在第一页之外的股票会被判定为不存在。
pub struct RankPageLookup {
    client: Arc<EastmoneyClient>,
    page_size: i64,
}

#[async_trait]
impl SecurityLookup for RankPageLookup {
    async fn find_by_code(&self, stock_code: &str) -> Option<RankRow> {
        let data = self.client.fetch_rank(1, self.page_size, "f62").await?;
        parse_rank(&data)
            .into_iter()
            .find(|row| row.stock_code == stock_code)
    }
}

/// 按前缀推断 secid 后直连个股行情接口，不受排行榜页大小限制
pub struct DirectQuoteLookup {
    client: Arc<EastmoneyClient>,
}

#[async_trait]
impl SecurityLookup for DirectQuoteLookup {
    async fn find_by_code(&self, stock_code: &str) -> Option<RankRow> {
        let sec = code_to_secid(stock_code);
        let data = self.client.fetch_quote(&sec).await?;

        let code = data.get("f57").and_then(|v| v.as_str())?;
        if code != stock_code {
            return None;
        }
        let market_token = sec.split('.').next().unwrap_or("0").to_string();

        Some(RankRow {
            stock_code: code.to_string(),
            stock_name: data
                .get("f58")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            market_code: market_token.clone(),
            exchange: market_token,
            current_price: data.get("f43").and_then(|v| v.as_f64()).unwrap_or(0.0),
            change_percent: data.get("f170").and_then(|v| v.as_f64()).unwrap_or(0.0),
            main_inflow: 0.0,
            main_inflow_rate: 0.0,
            super_inflow: 0.0,
            super_inflow_rate: 0.0,
            large_inflow: 0.0,
            large_inflow_rate: 0.0,
            medium_inflow: 0.0,
            medium_inflow_rate: 0.0,
            small_inflow: 0.0,
            small_inflow_rate: 0.0,
            net_inflow_5d: 0.0,
            net_inflow_10d: 0.0,
            timestamp: 0,
        })
    }
}

pub fn lookup_from_config(
    cfg: &EastmoneyConfig,
    client: Arc<EastmoneyClient>,
) -> Arc<dyn SecurityLookup> {
    match cfg.lookup_mode {
        LookupMode::RankPage => Arc::new(RankPageLookup {
            client,
            page_size: cfg.rank_page_size,
        }),
        LookupMode::Direct => Arc::new(DirectQuoteLookup { client }),
    }
}

/// 读穿路径的股票存取，生产环境由池化连接实现，
/// 直接委托给 repositories::stock 的自由函数
pub trait StockStore {
    fn find_stock_by_code(&mut self, code: &str) -> Result<Option<Stock>, diesel::result::Error>;
    fn insert_stock(&mut self, new_stock: &NewStock) -> Result<Stock, diesel::result::Error>;
    fn update_stock_sync(
        &mut self,
        code: &str,
        update: &SyncStockUpdate,
    ) -> Result<Stock, diesel::result::Error>;
}

impl StockStore for PgPoolConn {
    fn find_stock_by_code(&mut self, code: &str) -> Result<Option<Stock>, diesel::result::Error> {
        stock::find_by_code(self, code)
    }

    fn insert_stock(&mut self, new_stock: &NewStock) -> Result<Stock, diesel::result::Error> {
        stock::create(self, new_stock)
    }

    fn update_stock_sync(
        &mut self,
        code: &str,
        update: &SyncStockUpdate,
    ) -> Result<Stock, diesel::result::Error> {
        stock::update_sync(self, code, update)
    }
}

/// 读穿查询：库中命中直接返回（不访问上游）；
/// 未命中则回源查找，找到后落库，找不到返回 None
pub async fn get_or_fetch_stock<S: StockStore>(
    store: &mut S,
    lookup: &dyn SecurityLookup,
    stock_code: &str,
) -> Result<Option<Stock>, diesel::result::Error> {
    if let Some(existing) = store.find_stock_by_code(stock_code)? {
        return Ok(Some(existing));
    }

    let row = match lookup.find_by_code(stock_code).await {
        Some(row) => row,
        None => return Ok(None),
    };

    upsert_from_rank(store, &row).map(Some)
}

/// 从排行榜行落库：已存在则整体覆盖展示字段（可能与并发写竞争），
/// 否则新建记录
pub fn upsert_from_rank<S: StockStore>(
    store: &mut S,
    row: &RankRow,
) -> Result<Stock, diesel::result::Error> {
    let exchange = resolve_market(&row.exchange, &row.market_code);
    let sec = secid(exchange.market_code(), &row.stock_code);
    let now = Utc::now().naive_utc();

    if store.find_stock_by_code(&row.stock_code)?.is_some() {
        let update = SyncStockUpdate {
            stock_name: row.stock_name.clone(),
            exchange: exchange.as_str().to_string(),
            market_code: exchange.market_code().to_string(),
            secid: sec,
            last_sync_at: Some(now),
            updated_at: now,
        };
        store.update_stock_sync(&row.stock_code, &update)
    } else {
        let new_stock = NewStock {
            stock_code: row.stock_code.clone(),
            stock_name: row.stock_name.clone(),
            exchange: exchange.as_str().to_string(),
            market_code: exchange.market_code().to_string(),
            secid: sec,
            status: "normal".to_string(),
            last_sync_at: Some(now),
        };
        store.insert_stock(&new_stock)
    }
}
