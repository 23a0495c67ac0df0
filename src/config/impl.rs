use config::{Config, ConfigError, Environment, File, Map};
use std::path::Path;
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

// 环境变量前缀，嵌套字段以双下划线分隔，如 SCHOOL_UPLOAD__MAX_SIZE
const ENV_PREFIX: &str = "SCHOOL";
const ENV_SEPARATOR: &str = "__";

const DEFAULT_ENVIRONMENT: &str = "development";

// 常用的独立环境变量与对应配置项
const WELL_KNOWN_OVERRIDES: [(&str, &str); 8] = [
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("DATABASE_URL", "database.url"),
    ("WEB_ROOT", "upload.web_root"),
];

impl AppConfig {
    /// 从工作目录与进程环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(format!("Cannot resolve working directory: {e}")))?;
        Self::load_from(&dir, std::env::vars().collect())
    }

    /// 按层加载配置，后者覆盖前者：
    /// `config.toml` -> `config.{APP_ENV}.toml` -> `SCHOOL_*` -> 常用独立变量
    pub fn load_from(dir: &Path, vars: Map<String, String>) -> Result<Self, ConfigError> {
        let environment = vars
            .get("APP_ENV")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let mut builder = Config::builder()
            .add_source(File::from(dir.join("config")).required(false))
            .add_source(File::from(dir.join(format!("config.{environment}"))).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in WELL_KNOWN_OVERRIDES {
            builder = builder.set_override_option(key, vars.get(var).cloned())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        // 0 表示按 CPU 核数自动决定，但不超过上限
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == DEFAULT_ENVIRONMENT
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}
