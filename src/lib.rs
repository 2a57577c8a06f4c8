//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 상태/계산을 공유한다.

pub mod app;
pub mod args;
pub mod config;
pub mod corona;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod material_table;
pub mod session;
pub mod ui_cli;
