use serde::Deserialize;

/// Process settings: an optional `quickget.toml` in the working directory,
/// overridden by `QG_*` environment variables (`QG_FILE`, `QG_NAME`,
/// `QG_MIME`, `QG_URL`, `QG_PORT`, `QG_START`, `QG_WORKERS`).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub port: u16,
    pub url: String,
    pub file: Option<String>,
    pub name: String,
    pub mime: String,
    pub start: bool,
    pub workers: Option<usize>,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("quickget").required(false))
            .add_source(config::Environment::with_prefix("QG"))
            .set_default("port", 8080)?
            .set_default("url", "http://localhost")?
            .set_default("name", "")?
            .set_default("mime", "")?
            .set_default("start", true)?
            .build()?;

        settings.try_deserialize()
    }

    /// Empty text-field settings count as unset.
    #[must_use]
    pub fn served_name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        non_empty(&self.mime)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::non_empty;

    #[test]
    fn blank_settings_are_treated_as_unset() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty("report.pdf"), Some("report.pdf"));
    }
}
