use std::env;

/// Base used for export when neither the caller nor the bundle supplies one
pub const FALLBACK_BASE_URL: &str = "https://example.org/fhir";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub default_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let server_host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| format!("Invalid SERVER_PORT: {}", e))?;

        let default_base_url = env::var("DEFAULT_BASE_URL")
            .unwrap_or_else(|_| FALLBACK_BASE_URL.to_string());

        if !default_base_url.starts_with("http://") && !default_base_url.starts_with("https://") {
            return Err(format!(
                "Invalid DEFAULT_BASE_URL '{}': must be an http(s) URL",
                default_base_url
            ));
        }

        Ok(Config {
            server_host,
            server_port,
            default_base_url,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            default_base_url: FALLBACK_BASE_URL.to_string(),
        }
    }
}
