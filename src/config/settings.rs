#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub heat_unit_multiplier: f64,
    pub min_fit_points: usize,
    pub rank_decay_exponent: f64,
    pub min_cjk_token_chars: usize,
    pub short_title_chars: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            heat_unit_multiplier: 10_000.0, // 万
            min_fit_points: 2,
            rank_decay_exponent: 1.5,
            min_cjk_token_chars: 2,
            short_title_chars: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            url: "https://tophub.today/",
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub export_dir: String,
    pub digest_path: String,
    pub digest_size: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            export_dir: "html/data".to_string(),
            digest_path: "html/digest.html".to_string(),
            digest_size: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pipeline: PipelineSettings,
    pub scraper: ScraperSettings,
    pub output: OutputSettings,
    pub database_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            pipeline: PipelineSettings::default(),
            scraper: ScraperSettings::default(),
            output: OutputSettings::default(),
            database_path: database_path_from_env(),
        }
    }
}

fn database_path_from_env() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "hotlist_pulse.db".to_string())
}
