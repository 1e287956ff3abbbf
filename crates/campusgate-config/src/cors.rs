use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_list("http://localhost:3000,http://localhost:5173")
    }
}

impl CorsConfig {
    /// Reads `ALLOWED_ORIGINS`, a comma-separated list of origins.
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(origins) => Self::from_list(&origins),
            Err(_) => Self::default(),
        }
    }

    fn from_list(origins: &str) -> Self {
        let allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
