//! Data models for database seeding configuration.

use campusgate_access::{Department, Role};
use campusgate_models::access_logs::AccessStatus;
use chrono::{DateTime, Utc};

/// Domain used for every seeded email address. Clearing seed data keys on it.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

/// Seed data for creating a user.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub full_name: String,
    pub email: String,
    pub cms_id: String,
    pub department: Department,
    pub role: Role,
    pub access: Vec<String>,
}

/// Seed data for a single access event.
#[derive(Debug, Clone)]
pub struct AccessLogSeed {
    pub user_id: String,
    pub room_name: String,
    pub access_status: AccessStatus,
    pub accessed_at: DateTime<Utc>,
}

/// Complete configuration for database seeding.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub num_users: usize,
    pub logs_per_user: usize,
    /// Seeded log timestamps fall within this many days before now.
    pub days_back: i64,
    /// Upper bound on the number of access entries given to each user.
    pub max_access_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_users: 50,
            logs_per_user: 10,
            days_back: 30,
            max_access_per_user: 8,
        }
    }
}

impl SeedConfig {
    pub fn new(num_users: usize) -> Self {
        Self {
            num_users,
            ..Default::default()
        }
    }

    pub fn with_logs_per_user(mut self, logs_per_user: usize) -> Self {
        self.logs_per_user = logs_per_user;
        self
    }

    pub fn with_days_back(mut self, days_back: i64) -> Self {
        self.days_back = days_back.max(1);
        self
    }

    pub fn with_max_access(mut self, max_access_per_user: usize) -> Self {
        self.max_access_per_user = max_access_per_user.max(1);
        self
    }

    pub fn total_logs(&self) -> usize {
        self.num_users * self.logs_per_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_config_builder() {
        let config = SeedConfig::new(20)
            .with_logs_per_user(5)
            .with_days_back(7)
            .with_max_access(3);

        assert_eq!(config.num_users, 20);
        assert_eq!(config.logs_per_user, 5);
        assert_eq!(config.days_back, 7);
        assert_eq!(config.max_access_per_user, 3);
        assert_eq!(config.total_logs(), 100);
    }

    #[test]
    fn test_seed_config_clamps_to_one() {
        let config = SeedConfig::new(1).with_days_back(0).with_max_access(0);
        assert_eq!(config.days_back, 1);
        assert_eq!(config.max_access_per_user, 1);
    }
}
