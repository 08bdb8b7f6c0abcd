use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let http_timeout_secs = parse_u64("KAINOS_HTTP_TIMEOUT_SECS", "5")?;
    let user_agent = or_default(
        "KAINOS_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/112.0",
    );
    let webdriver_url = or_default("KAINOS_WEBDRIVER_URL", "http://localhost:9515");
    let render_wait_ms = parse_u64("KAINOS_RENDER_WAIT_MS", "3000")?;

    let price_band_min = parse_f64("KAINOS_PRICE_BAND_MIN", "1800")?;
    let price_band_max = parse_f64("KAINOS_PRICE_BAND_MAX", "2400")?;
    if price_band_min > price_band_max {
        return Err(ConfigError::InvalidEnvVar {
            var: "KAINOS_PRICE_BAND_MIN".to_string(),
            reason: format!("band lower edge {price_band_min} exceeds upper edge {price_band_max}"),
        });
    }

    let brand_tokens = parse_tokens(&or_default(
        "KAINOS_BRAND_TOKENS",
        "hp,lenovo,dell,acer,asus,gigabyte,msi,razer",
    ));
    let noise_tokens = parse_tokens(&or_default(
        "KAINOS_NOISE_TOKENS",
        "rtx3050,rtx3060,16gb,512 gb,512ssd,dos",
    ));

    let log_level = or_default("KAINOS_LOG_LEVEL", "info");

    Ok(AppConfig {
        http_timeout_secs,
        user_agent,
        webdriver_url,
        render_wait_ms,
        price_band_min,
        price_band_max,
        brand_tokens,
        noise_tokens,
        log_level,
    })
}

/// Split a comma-separated token list, trimming and lowercasing each entry.
/// Empty entries are dropped, so trailing commas are harmless.
fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
