use std::env;
use std::path::{Path, PathBuf};

use crate::models::{Dimensions, Offset};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_DOCUMENT_PATH: &str = "diagram.json";
pub const DEFAULT_REGION: &str = "default";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("SKYPLAN_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_document_path() -> PathBuf {
    env::var("SKYPLAN_DOCUMENT")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_PATH))
}

pub fn get_default_region() -> String {
    env::var("SKYPLAN_REGION")
        .ok()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:5000".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Icon grid and spacing constants shared by every artifact layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub icon_width: i64,
    pub icon_height: i64,
    pub icon_spacing: i64,
    /// Distance kept between an artifact's edge and its edge children.
    pub padding: Offset,
    /// Gap between neighbouring children.
    pub spacing: Offset,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            icon_width: 45,
            icon_height: 45,
            icon_spacing: 10,
            padding: Offset { dx: 45, dy: 45 },
            spacing: Offset { dx: 10, dy: 10 },
        }
    }
}

impl LayoutConfig {
    pub fn icon_dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.icon_width,
            height: self.icon_height,
        }
    }

    pub fn half_icon_height(&self) -> i64 {
        round_div(self.icon_height, 2)
    }
}

/// Integer division rounding half away from zero, matching the
/// rounding used for all layout arithmetic.
pub fn round_div(numerator: i64, denominator: i64) -> i64 {
    (numerator as f64 / denominator as f64).round() as i64
}
