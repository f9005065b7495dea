use clap::Parser;
use once_cell::sync::Lazy;

pub const JWT_EXPRIED_TIME: i64 = 86400i64;

pub const EXPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    /// Admin provisioned at start-up when both username and password are set
    #[clap(long, env)]
    pub admin_username: Option<String>,

    #[clap(long, env)]
    pub admin_password: Option<String>,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
