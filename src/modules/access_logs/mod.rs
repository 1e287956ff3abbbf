pub mod controller;
pub mod router;
pub mod service;

pub use router::init_access_logs_router;
pub use service::{AccessLogService, summarize};
