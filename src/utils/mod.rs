pub mod bigdecimal_parser;
pub mod config;
pub mod http_client;
pub mod jwt;
pub mod logging;
pub mod market;
pub mod middleware;
pub mod password;
