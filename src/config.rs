use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::models::CalendarEvent;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    /// Name of the variable holding the credential; the value itself is read per request.
    pub api_key_var: String,
    pub static_dir: PathBuf,
    pub schedule_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_or("BIND_ADDR", "0.0.0.0:3000");
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("invalid BIND_ADDR `{}`", bind_addr))?;

        Ok(Config {
            bind_addr,
            api_base: env_or("GEMINI_API_BASE", DEFAULT_API_BASE),
            text_model: env_or("GEMINI_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            image_model: env_or("GEMINI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            api_key_var: env_or("GEMINI_API_KEY_VAR", DEFAULT_API_KEY_VAR),
            static_dir: PathBuf::from(env_or("STATIC_DIR", "public")),
            schedule_file: std::env::var("SCHEDULE_FILE").ok().map(PathBuf::from),
        })
    }

    /// Events shown on the schedule page: `SCHEDULE_FILE` when set, the built-in list otherwise.
    pub fn load_schedule(&self) -> Result<Vec<CalendarEvent>> {
        match &self.schedule_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading schedule file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing schedule file {}", path.display()))
            }
            None => Ok(crate::widgets::calendar::default_events()),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
