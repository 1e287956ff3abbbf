pub mod controller;
pub mod router;

pub use router::{init_access_options_router, init_catalog_router};
