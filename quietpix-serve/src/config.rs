use argh::FromArgs;

/// Environment variable holding a comma separated list of allowed origins.
pub const ALLOWED_ORIGINS_ENV: &str = "QUIETPIX_ALLOWED_ORIGINS";

/// Origins allowed when neither flags nor the environment name any.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Default upload limit in mebibytes.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 20;

#[derive(FromArgs, Debug, PartialEq)]
/// Serve the quietpix denoising API over HTTP
pub struct ServeArgs {
    /// address to bind (default: 0.0.0.0)
    #[argh(option, default = "String::from(\"0.0.0.0\")")]
    pub host: String,

    /// port to listen on (default: 8000)
    #[argh(option, short = 'p', default = "8000")]
    pub port: u16,

    /// maximum upload size in MiB (default: 20)
    #[argh(option, default = "DEFAULT_MAX_UPLOAD_MB")]
    pub max_upload_mb: usize,

    /// origin allowed to call the API from a browser, may be repeated
    #[argh(option)]
    pub allowed_origin: Vec<String>,
}

/// Resolved server configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ServeConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in MiB.
    pub max_upload_mb: usize,
    /// Origins echoed back in cross-origin responses.
    pub allowed_origins: Vec<String>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec(),
        }
    }
}

impl ServeConfig {
    /// Resolve the configuration from the command line and the value of
    /// [`ALLOWED_ORIGINS_ENV`].
    ///
    /// Origins given as flags win over the environment, which wins over
    /// [`DEFAULT_ALLOWED_ORIGINS`].
    pub fn resolve(args: ServeArgs, env_origins: Option<&str>) -> Self {
        let flag_origins = clean_origins(args.allowed_origin.iter().map(String::as_str));
        let env_origins = env_origins
            .map(|value| clean_origins(value.split(',')))
            .unwrap_or_default();

        let allowed_origins = if !flag_origins.is_empty() {
            flag_origins
        } else if !env_origins.is_empty() {
            env_origins
        } else {
            DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec()
        };

        Self {
            host: args.host,
            port: args.port,
            max_upload_mb: args.max_upload_mb,
            allowed_origins,
        }
    }

    /// The `host:port` pair to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The upload limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

// browsers send the origin without a trailing slash
fn clean_origins<'a>(origins: impl Iterator<Item = &'a str>) -> Vec<String> {
    origins
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        ServeArgs::from_args(&["quietpix-serve"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ServeConfig::resolve(parse(&[]), None);
        assert_eq!(config, ServeConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes(), 20 * 1024 * 1024);
    }

    #[test]
    fn test_flags_win_over_env() {
        let args = parse(&[
            "--allowed-origin",
            "https://a.example",
            "--allowed-origin",
            "https://b.example/",
            "--port",
            "9000",
        ]);
        let config = ServeConfig::resolve(args, Some("https://c.example"));
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_env_wins_over_defaults() {
        let config = ServeConfig::resolve(
            parse(&[]),
            Some(" https://c.example , ,https://d.example"),
        );
        assert_eq!(
            config.allowed_origins,
            vec!["https://c.example", "https://d.example"]
        );
    }

    #[test]
    fn test_blank_env_falls_back_to_defaults() {
        let config = ServeConfig::resolve(parse(&[]), Some(" , "));
        assert_eq!(
            config.allowed_origins,
            DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec()
        );
    }
}
