pub mod access_logs;
pub mod access_options;
pub mod health;
pub mod users;
