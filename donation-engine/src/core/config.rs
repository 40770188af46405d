use std::time::Duration;

/// 引擎配置 - 捐赠定价引擎的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DONATION_API_BASE_URL | http://localhost:3000 | 后端 REST 服务地址 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录, 未设置时只输出到终端 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DONATION_API_BASE_URL=https://api.example.org REQUEST_TIMEOUT_MS=5000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 后端服务地址 (不含结尾的 `/`)
    pub api_base_url: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 日志级别: trace | debug | info | warn | error
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            api_base_url: std::env::var("DONATION_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义后端地址覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
