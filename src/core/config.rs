use crate::entities::{DeliveryMode, MatchPolicy, UserId};
use dotenv::dotenv;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_VIEWER_ID: &str = "current-user";
pub const DEFAULT_COUNTDOWN_SECS: u64 = 60;
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct Config {
    pub viewer_id: UserId,
    pub countdown_secs: u64,
    pub match_policy: MatchPolicy,
    pub delivery_mode: DeliveryMode,
    pub event_capacity: usize,
    pub app_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewer_id: DEFAULT_VIEWER_ID.to_string(),
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            match_policy: MatchPolicy::default(),
            delivery_mode: DeliveryMode::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            app_env: "development".to_string(),
        }
    }
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let viewer_id = env::var("KETCHUP_VIEWER_ID").unwrap_or_else(|_| {
            warn!("KETCHUP_VIEWER_ID not set, using '{}'", DEFAULT_VIEWER_ID);
            DEFAULT_VIEWER_ID.to_string()
        });
        if viewer_id.trim().is_empty() {
            return Err("Invalid KETCHUP_VIEWER_ID: must not be empty".to_string());
        }

        let countdown_secs = env::var("KETCHUP_COUNTDOWN_SECS")
            .unwrap_or_else(|_| DEFAULT_COUNTDOWN_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid KETCHUP_COUNTDOWN_SECS: must be a positive number".to_string())?;
        if countdown_secs == 0 {
            return Err("Invalid KETCHUP_COUNTDOWN_SECS: must be greater than 0".to_string());
        }

        let match_policy = env::var("KETCHUP_MATCH_POLICY")
            .unwrap_or_else(|_| MatchPolicy::default().to_string())
            .parse::<MatchPolicy>()
            .map_err(|e| format!("Invalid KETCHUP_MATCH_POLICY: {}", e))?;

        let delivery_mode = env::var("KETCHUP_DELIVERY_MODE")
            .unwrap_or_else(|_| DeliveryMode::default().to_string())
            .parse::<DeliveryMode>()
            .map_err(|e| format!("Invalid KETCHUP_DELIVERY_MODE: {}", e))?;

        let event_capacity = env::var("KETCHUP_EVENT_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_EVENT_CAPACITY.to_string())
            .parse::<usize>()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| "Invalid KETCHUP_EVENT_CAPACITY: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            viewer_id,
            countdown_secs,
            match_policy,
            delivery_mode,
            event_capacity,
            app_env,
        })
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_secs(self.countdown_secs)
    }

    /// Logga la configurazione
    pub fn print_info(&self) {
        info!(
            environment = %self.app_env,
            viewer = %self.viewer_id,
            countdown_secs = self.countdown_secs,
            match_policy = %self.match_policy,
            delivery_mode = %self.delivery_mode,
            event_capacity = self.event_capacity,
            "Ketchup configuration loaded"
        );
    }
}
