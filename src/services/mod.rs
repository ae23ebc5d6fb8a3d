pub mod eastmoney;
pub mod flow_history;
pub mod stock_sync;
