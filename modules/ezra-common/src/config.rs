use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::EzraError;
use crate::types::Position;

/// Built-in login. This is a placeholder for a real identity provider.
pub const DEFAULT_LOGIN_EMAIL: &str = "apps@pflugerarchitects.com";
pub const DEFAULT_LOGIN_PASSWORD: &str = "123456";
pub const DEFAULT_LOGIN_NAME: &str = "Pfluger Team";

const DEFAULT_CONFIDENTIAL_IDS: &[&str] = &["X25-RB09", "X25-RB10", "X25-RB11"];
const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
const DEFAULT_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors &copy; CARTO";

/// Where the CSV files live.
#[derive(Debug, Clone, PartialEq)]
pub enum DataLocation {
    /// Fetched over HTTP relative to this base URL.
    Url(String),
    /// Read from this directory.
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub access_token: Option<String>,
    pub center: Position,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Zoom applied when a project is selected.
    pub selected_zoom: u8,
}

impl MapConfig {
    /// Tile URL with `{accessToken}` substituted when a token is configured.
    pub fn resolved_tile_url(&self) -> String {
        match &self.access_token {
            Some(token) => self.tile_url.replace("{accessToken}", token),
            None => self.tile_url.clone(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            access_token: None,
            center: Position::new(30.2672, -97.7431),
            zoom: 13,
            min_zoom: 3,
            max_zoom: 18,
            selected_zoom: 15,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Data
    pub data: DataLocation,
    pub projects_path: String,
    pub district_attributes_path: String,
    pub district_shapes_path: String,
    pub confidential_ids: Vec<String>,

    // Login
    pub login_email: String,
    pub login_password: String,
    pub login_name: String,
    pub session_secret: String,

    // Map
    pub map: MapConfig,

    // Simulated latency
    pub login_delay: Duration,
    pub contact_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
            data: DataLocation::Dir(PathBuf::from("data")),
            projects_path: "research_projects.csv".to_string(),
            district_attributes_path: "district_attributes.csv".to_string(),
            district_shapes_path: "district_shapes.csv".to_string(),
            confidential_ids: DEFAULT_CONFIDENTIAL_IDS.iter().map(|s| s.to_string()).collect(),
            login_email: DEFAULT_LOGIN_EMAIL.to_string(),
            login_password: DEFAULT_LOGIN_PASSWORD.to_string(),
            login_name: DEFAULT_LOGIN_NAME.to_string(),
            session_secret: String::new(),
            map: MapConfig::default(),
            login_delay: Duration::from_millis(500),
            contact_delay: Duration::from_millis(1500),
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Every variable is optional.
    pub fn from_env() -> Result<Self, EzraError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EzraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("WEB_HOST") {
            config.web_host = host;
        }
        if let Some(port) = lookup("WEB_PORT") {
            config.web_port = parse_var("WEB_PORT", &port)?;
        }

        config.data = match (lookup("EZRA_DATA_URL"), lookup("EZRA_DATA_DIR")) {
            (Some(url), _) if !url.trim().is_empty() => {
                DataLocation::Url(url.trim_end_matches('/').to_string())
            }
            (_, Some(dir)) => DataLocation::Dir(PathBuf::from(dir)),
            _ => config.data,
        };
        if let Some(p) = lookup("EZRA_PROJECTS_PATH") {
            config.projects_path = p;
        }
        if let Some(p) = lookup("EZRA_DISTRICT_ATTRIBUTES_PATH") {
            config.district_attributes_path = p;
        }
        if let Some(p) = lookup("EZRA_DISTRICT_SHAPES_PATH") {
            config.district_shapes_path = p;
        }
        if let Some(ids) = lookup("EZRA_CONFIDENTIAL_IDS") {
            config.confidential_ids = ids
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(email) = lookup("EZRA_LOGIN_EMAIL") {
            config.login_email = email;
        }
        if let Some(password) = lookup("EZRA_LOGIN_PASSWORD") {
            config.login_password = password;
        }
        if let Some(name) = lookup("EZRA_LOGIN_NAME") {
            config.login_name = name;
        }
        if let Some(secret) = lookup("SESSION_SECRET") {
            config.session_secret = secret;
        }

        if let Some(url) = lookup("MAP_TILE_URL") {
            config.map.tile_url = url;
        }
        if let Some(attr) = lookup("MAP_ATTRIBUTION") {
            config.map.attribution = attr;
        }
        config.map.access_token = lookup("MAP_ACCESS_TOKEN").filter(|t| !t.is_empty());
        if let Some(lat) = lookup("MAP_CENTER_LAT") {
            config.map.center.lat = parse_var("MAP_CENTER_LAT", &lat)?;
        }
        if let Some(lng) = lookup("MAP_CENTER_LNG") {
            config.map.center.lng = parse_var("MAP_CENTER_LNG", &lng)?;
        }
        if let Some(zoom) = lookup("MAP_ZOOM") {
            config.map.zoom = parse_var("MAP_ZOOM", &zoom)?;
        }

        if let Some(ms) = lookup("EZRA_LOGIN_DELAY_MS") {
            config.login_delay = Duration::from_millis(parse_var("EZRA_LOGIN_DELAY_MS", &ms)?);
        }
        if let Some(ms) = lookup("EZRA_CONTACT_DELAY_MS") {
            config.contact_delay = Duration::from_millis(parse_var("EZRA_CONTACT_DELAY_MS", &ms)?);
        }

        Ok(config)
    }

    /// True when the login still uses the built-in placeholder credentials.
    pub fn uses_default_credentials(&self) -> bool {
        self.login_email == DEFAULT_LOGIN_EMAIL && self.login_password == DEFAULT_LOGIN_PASSWORD
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, EzraError> {
    value
        .trim()
        .parse()
        .map_err(|_| EzraError::Config(format!("{key} has an invalid value: {value:?}")))
}
