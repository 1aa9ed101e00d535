//! # 中间件模块

pub mod metrics;
pub mod request_id;

pub use metrics::count_file_server_hits;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
