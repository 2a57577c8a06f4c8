use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// 두 실행 파일이 공유하는 명령행 옵션.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Corona treatment watt density and dyne decay calculator")]
pub struct LaunchArgs {
    /// 언어 (auto/en-us/ko-kr)
    #[arg(long, short = 'L', default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lang_and_config() {
        let args = LaunchArgs::parse_from(["cli", "-L", "ko", "--config", "/tmp/c.toml"]);
        assert_eq!(args.lang, "ko");
        assert_eq!(args.config, PathBuf::from("/tmp/c.toml"));
        let defaults = LaunchArgs::parse_from(["cli"]);
        assert_eq!(defaults.lang, "auto");
        assert_eq!(defaults.config, PathBuf::from("config.toml"));
    }
}
