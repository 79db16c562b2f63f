use std::path::PathBuf;
use std::time::Duration;

/// Default number of attempts for every individual download.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default connect/read timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Timeout applied to connecting and to the whole request
    pub timeout: Duration,
    /// Attempts per file before giving up on it
    pub max_attempts: u32,
    /// Base URL for EDGAR archives (the monthly index lives under `/monthly`)
    pub archives_url: String,
    /// Root directory for downloaded archives
    pub output_dir: PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "xbrlrss-loader/0.1.0".to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            archives_url: "https://www.sec.gov/Archives/edgar".to_string(),
            output_dir: PathBuf::from("sec"),
        }
    }
}

impl LoaderConfig {
    /// Creates a new LoaderConfig with custom settings
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use xbrlrss_loader::LoaderConfig;
    /// use std::time::Duration;
    ///
    /// let config = LoaderConfig::new("YourAppName contact@example.com", Duration::from_secs(10))
    ///     .with_output_dir("data/sec");
    /// assert_eq!(config.max_attempts, 3);
    /// ```
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_archives_url(mut self, archives_url: impl Into<String>) -> Self {
        self.archives_url = archives_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}
