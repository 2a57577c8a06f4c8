use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 기본 설정 파일 경로 (작업 디렉터리 기준).
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 환경 설정.
///
/// 화면/언어 같은 사용 환경만 저장한다. 재질 테이블과 라인 설정은 저장하지 않고
/// 매번 기본값으로 시작한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en-us/ko-kr)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
    /// UI 배율
    pub ui_scale: f32,
    /// 첫 번째 라인 표시 이름
    pub line1_label: String,
    /// 두 번째 라인 표시 이름
    pub line4_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            window_alpha: 1.0,
            ui_scale: 1.0,
            line1_label: "Line 1".to_string(),
            line4_label: "Line 4".to_string(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 라인 구분에 맞는 표시 이름.
    pub fn line_label(&self, id: crate::session::LineId) -> &str {
        match id {
            crate::session::LineId::Line1 => &self.line1_label,
            crate::session::LineId::Line4 => &self.line4_label,
        }
    }
}
