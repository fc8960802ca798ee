/// Boarding service configuration loaded from environment variables.
#[derive(Debug)]
pub struct BoardingConfig {
    /// TCP port for the HTTP server (default 3117). Env var: `BOARDING_PORT`.
    pub boarding_port: u16,
    /// Populate the store with demo fixtures at startup. Env var: `BOARDING_SEED_DEMO`.
    pub seed_demo: bool,
}

impl BoardingConfig {
    pub fn from_env() -> Self {
        Self {
            boarding_port: std::env::var("BOARDING_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
            seed_demo: std::env::var("BOARDING_SEED_DEMO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}
