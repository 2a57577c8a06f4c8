use clap::Parser;
use corona_treatment_toolbox::{app, args::LaunchArgs, config, i18n, logging};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    logging::init();
    if let Err(err) = try_run() {
        tracing::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), app::AppError> {
    let args = LaunchArgs::parse();
    let cfg = config::load_or_default(&args.config)?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    tracing::info!(lang = %lang, "corona analysis CLI starting");
    app::run(&cfg, &tr)
}
