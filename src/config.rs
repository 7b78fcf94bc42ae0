use crate::error::Error;
use std::str::FromStr;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const MAX_CONNECTIONS: &str = "MAX_CONNECTIONS";
pub const PAGE_SIZE: &str = "PAGE_SIZE";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Number of questions on the index page.
    pub page_size: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://db.sqlite3?mode=rwc".to_owned(),
            bind_addr: "0.0.0.0:8000".to_owned(),
            max_connections: 5,
            page_size: 10,
        }
    }
}

impl Settings {
    /// Reads the process environment after `.env` has been loaded.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Settings::default();
        let settings = Settings {
            database_url: lookup(DATABASE_URL).unwrap_or(default.database_url),
            bind_addr: lookup(BIND_ADDR).unwrap_or(default.bind_addr),
            max_connections: parse(&lookup, MAX_CONNECTIONS, default.max_connections)?,
            page_size: parse(&lookup, PAGE_SIZE, default.page_size)?,
        };
        if settings.max_connections == 0 {
            return Err(Error::ConfigError(format!("{} must be positive", MAX_CONNECTIONS)));
        }
        if settings.page_size <= 0 {
            return Err(Error::ConfigError(format!("{} must be positive", PAGE_SIZE)));
        }
        Ok(settings)
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::ConfigError(format!("{} is not a valid number: {:?}", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod test {
    use super::Settings;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, crate::error::Error> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, "sqlite://db.sqlite3?mode=rwc");
        assert_eq!(s.bind_addr, "0.0.0.0:8000");
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.page_size, 10);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[("DATABASE_URL", "sqlite::memory:"), ("PAGE_SIZE", " 3 "), ("MAX_CONNECTIONS", "1")]).unwrap();
        assert_eq!(s.database_url, "sqlite::memory:");
        assert_eq!(s.page_size, 3);
        assert_eq!(s.max_connections, 1);
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(settings(&[("PAGE_SIZE", "ten")]).is_err());
        assert!(settings(&[("PAGE_SIZE", "0")]).is_err());
        assert!(settings(&[("MAX_CONNECTIONS", "-1")]).is_err());
    }
}
