/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的题集数量
    pub max_concurrent_sets: usize,
    /// 存储端 API 基础地址
    pub store_api_base_url: String,
    /// 存储端访问令牌
    pub store_token: String,
    /// 画布文本文件存放目录
    pub canvas_folder: String,
    /// 新题目的默认分值
    pub default_points: u32,
    /// 画布为空时是否从存储端反向注水
    pub hydrate_empty_canvas: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_sets: 4,
            store_api_base_url: "https://quiz-api.hqt.edu.vn".to_string(),
            store_token: String::new(),
            canvas_folder: "canvas_txt".to_string(),
            default_points: 10,
            hydrate_empty_canvas: true,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_sets: std::env::var("MAX_CONCURRENT_SETS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_sets),
            store_api_base_url: std::env::var("STORE_API_BASE_URL").unwrap_or(default.store_api_base_url),
            store_token: std::env::var("STORE_TOKEN").unwrap_or(default.store_token),
            canvas_folder: std::env::var("CANVAS_FOLDER").unwrap_or(default.canvas_folder),
            default_points: std::env::var("DEFAULT_POINTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_points),
            hydrate_empty_canvas: std::env::var("HYDRATE_EMPTY_CANVAS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.hydrate_empty_canvas),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
