use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::session::Session;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 표준 입력이 닫힘 (파이프 입력 종료 등)
    #[error("standard input closed")]
    InputClosed,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 상태를 바꾸는 메뉴가 끝날 때마다 선택 재질을 정리하고 전체를 다시 계산한다.
pub fn run(config: &Config, tr: &Translator) -> Result<(), AppError> {
    let mut session = Session::default();
    let mut snapshot = session.recompute();
    loop {
        let choice = match ui_cli::main_menu(tr) {
            Ok(choice) => choice,
            Err(AppError::InputClosed) => MenuChoice::Exit,
            Err(e) => return Err(e),
        };
        let result = match choice {
            MenuChoice::Summary => {
                ui_cli::print_summary(tr, config, &session, &snapshot);
                Ok(())
            }
            MenuChoice::EditLine(id) => ui_cli::handle_edit_line(tr, config, &mut session, id),
            MenuChoice::SelectMaterial => ui_cli::handle_select_material(tr, &mut session),
            MenuChoice::DesiredDyne => ui_cli::handle_desired_dyne(tr, &mut session),
            MenuChoice::SpeedChart => {
                ui_cli::print_speed_chart(tr, config, &snapshot);
                Ok(())
            }
            MenuChoice::DecayChart => {
                ui_cli::print_decay_chart(tr, &snapshot);
                Ok(())
            }
            MenuChoice::Settings => ui_cli::handle_material_settings(tr, &mut session),
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                return Ok(());
            }
        };
        match result {
            Ok(()) => {}
            Err(AppError::InputClosed) => {
                println!("{}", tr.t(keys::APP_EXIT));
                return Ok(());
            }
            Err(e) => return Err(e),
        }
        if session.ensure_selection() {
            ui_cli::print_selection_reset(tr, &session);
        }
        snapshot = session.recompute();
        if matches!(choice, MenuChoice::EditLine(_)) {
            ui_cli::print_summary(tr, config, &session, &snapshot);
        }
    }
}
