use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::input::{format_fixed, format_plain};
use crate::material_table::MaterialField;
use crate::session::{LineField, LineId, Session, Snapshot};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Summary,
    EditLine(LineId),
    SelectMaterial,
    DesiredDyne,
    SpeedChart,
    DecayChart,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_SUMMARY,
        keys::MAIN_MENU_EDIT_LINE1,
        keys::MAIN_MENU_EDIT_LINE4,
        keys::MAIN_MENU_SELECT_MATERIAL,
        keys::MAIN_MENU_DESIRED_DYNE,
        keys::MAIN_MENU_SPEED_CHART,
        keys::MAIN_MENU_DECAY_CHART,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match map_menu(sel.trim()) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn map_menu(sel: &str) -> Option<MenuChoice> {
    match sel {
        "1" => Some(MenuChoice::Summary),
        "2" => Some(MenuChoice::EditLine(LineId::Line1)),
        "3" => Some(MenuChoice::EditLine(LineId::Line4)),
        "4" => Some(MenuChoice::SelectMaterial),
        "5" => Some(MenuChoice::DesiredDyne),
        "6" => Some(MenuChoice::SpeedChart),
        "7" => Some(MenuChoice::DecayChart),
        "8" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

fn line_field_key(field: LineField) -> &'static str {
    match field {
        LineField::Width => keys::LINE_WIDTH,
        LineField::Speed => keys::LINE_SPEED,
        LineField::Power => keys::LINE_POWER,
        LineField::Sides => keys::LINE_SIDES,
    }
}

/// 두 라인의 설정과 와트 밀도를 출력한다.
pub fn print_summary(tr: &Translator, cfg: &Config, session: &Session, snapshot: &Snapshot) {
    for id in LineId::ALL {
        let line = session.line(id);
        println!("\n[{}]", cfg.line_label(id));
        for field in LineField::ALL {
            println!("  {}: {}", tr.t(line_field_key(field)), format_plain(field.get(line)));
        }
        println!(
            "  {} {} {}",
            tr.t(keys::WATT_DENSITY),
            format_fixed(snapshot.watt_density(id), 2),
            tr.t(keys::WATT_DENSITY_UNIT)
        );
    }
}

/// 라인 설정을 필드별로 입력받는다. 빈 입력은 현재값 유지, 그 외 문자열은
/// 숫자 해석 결과(실패 시 NaN)를 그대로 반영한다.
pub fn handle_edit_line(
    tr: &Translator,
    cfg: &Config,
    session: &mut Session,
    id: LineId,
) -> Result<(), AppError> {
    println!("\n-- {} -- {}", cfg.line_label(id), tr.t(keys::LINE_KEEP_HINT));
    for field in LineField::ALL {
        let current = format_plain(field.get(session.line(id)));
        let raw = read_line(&format!("{} [{current}]: ", tr.t(line_field_key(field))))?;
        if raw.trim().is_empty() {
            continue;
        }
        session.set_line_field_text(id, field, &raw);
    }
    Ok(())
}

/// 재질 목록(테이블 순서)을 보여주고 선택을 바꾼다.
pub fn handle_select_material(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let names: Vec<String> = session.materials().names().map(str::to_string).collect();
    if names.is_empty() {
        println!("{}", tr.t(keys::MATERIAL_NONE));
        return Ok(());
    }
    println!(
        "{} {}",
        tr.t(keys::MATERIAL_CURRENT),
        session.selected_material().unwrap_or("-")
    );
    for (i, name) in names.iter().enumerate() {
        println!("{}) {name}", i + 1);
    }
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    let sel = sel.trim();
    let picked = sel
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| names.get(i))
        .map(String::as_str)
        .unwrap_or(sel);
    if !session.select_material(picked) {
        println!("{}", tr.t(keys::MATERIAL_UNKNOWN));
    }
    Ok(())
}

pub fn handle_desired_dyne(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!(
        "{} {}",
        tr.t(keys::DESIRED_DYNE_CURRENT),
        format_plain(session.desired_dyne())
    );
    let raw = read_line(&tr.t(keys::DESIRED_DYNE_PROMPT))?;
    apply_desired_dyne_answer(session, &raw);
    Ok(())
}

/// 라인 편집과 같이 빈 입력은 현재값을 유지한다.
fn apply_desired_dyne_answer(session: &mut Session, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    session.set_desired_dyne_text(raw);
}

/// 속도 스윕 데이터를 표로 출력한다.
pub fn print_speed_chart(tr: &Translator, cfg: &Config, snapshot: &Snapshot) {
    println!("{}", tr.t(keys::SPEED_CHART_HEADING));
    match &snapshot.speed_chart {
        Ok(points) => {
            println!(
                "{:>12} {:>14} {:>14}",
                tr.t(keys::SPEED_CHART_AXIS),
                cfg.line1_label,
                cfg.line4_label
            );
            for p in points {
                println!(
                    "{:>12} {:>14} {:>14}",
                    format_plain(p.speed_fpm),
                    format_fixed(p.line1, 2),
                    format_fixed(p.line4, 2)
                );
            }
        }
        Err(e) => println!("{} {e}", tr.t(keys::SPEED_CHART_ERROR)),
    }
}

/// 감쇠 곡선을 표로 출력한다. 미처리 다인 아래로 떨어진 날은 `*`로 표시한다.
pub fn print_decay_chart(tr: &Translator, snapshot: &Snapshot) {
    let chart = match &snapshot.decay_chart {
        Ok(chart) => chart,
        Err(_) => {
            println!("{}", tr.t(keys::MATERIAL_NONE));
            return;
        }
    };
    println!("{} ({})", tr.t(keys::DECAY_CHART_HEADING), chart.material);
    println!(
        "{} {}",
        tr.t(keys::DECAY_CHART_UNTREATED),
        format_plain(chart.untreated_dyne)
    );
    println!(
        "{:>5} {:>10}",
        tr.t(keys::DECAY_CHART_DAY),
        tr.t(keys::DECAY_CHART_DYNE)
    );
    for p in &chart.points {
        let marker = if p.dyne < chart.untreated_dyne { " *" } else { "" };
        println!("{:>5} {:>10}{marker}", p.day, format_fixed(p.dyne, 2));
    }
}

pub fn print_selection_reset(tr: &Translator, session: &Session) {
    match session.selected_material() {
        Some(name) => println!("{} {name}", tr.t(keys::MATERIAL_SELECTION_RESET)),
        None => println!("{}", tr.t(keys::MATERIAL_NONE)),
    }
}

/// 재질 테이블 편집 메뉴 (추가/이름 변경/필드 수정/삭제).
pub fn handle_material_settings(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    loop {
        println!("{}", tr.t(keys::SETTINGS_HEADING));
        for name in session.materials().sorted_names() {
            if let Some(p) = session.materials().get(&name) {
                println!(
                    "  {name:<12} {:>8} {:>8}",
                    format_plain(p.initial_dyne),
                    format_plain(p.decay_rate)
                );
            }
        }
        println!("{}", tr.t(keys::SETTINGS_OPTIONS));
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => {
                let name = read_line_raw(&tr.t(keys::SETTINGS_NEW_NAME))?;
                report(tr, session.add_material(&name), keys::SETTINGS_REJECTED);
            }
            "2" => {
                let old = read_line_raw(&tr.t(keys::SETTINGS_TARGET_NAME))?;
                if !session.materials().contains(&old) {
                    println!("{}", tr.t(keys::SETTINGS_NOT_FOUND));
                    continue;
                }
                let new = read_line_raw(&tr.t(keys::SETTINGS_RENAME_TO))?;
                report(tr, session.rename_material(&old, &new), keys::SETTINGS_REJECTED);
            }
            "3" | "4" => {
                let (field, prompt) = if sel.trim() == "3" {
                    (MaterialField::InitialDyne, keys::SETTINGS_UNTREATED_DYNE)
                } else {
                    (MaterialField::DecayRate, keys::SETTINGS_DECAY_RATE)
                };
                let name = read_line_raw(&tr.t(keys::SETTINGS_TARGET_NAME))?;
                if !session.materials().contains(&name) {
                    println!("{}", tr.t(keys::SETTINGS_NOT_FOUND));
                    continue;
                }
                let raw = read_line(&tr.t(prompt))?;
                report(
                    tr,
                    session.update_material_field(&name, field, &raw),
                    keys::SETTINGS_NOT_FOUND,
                );
            }
            "5" => {
                let name = read_line_raw(&tr.t(keys::SETTINGS_TARGET_NAME))?;
                report(
                    tr,
                    session.remove_material(&name).is_some(),
                    keys::SETTINGS_NOT_FOUND,
                );
            }
            "0" | "" => return Ok(()),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn report(tr: &Translator, ok: bool, failure_key: &str) {
    if ok {
        println!("{}", tr.t(keys::SETTINGS_DONE));
    } else {
        println!("{}", tr.t(failure_key));
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

/// 줄바꿈만 떼어낸 입력. 재질 이름은 앞뒤 공백도 이름의 일부로 본다.
fn read_line_raw(prompt: &str) -> Result<String, AppError> {
    let line = read_line(prompt)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_lines() {
        assert_eq!(map_menu("2"), Some(MenuChoice::EditLine(LineId::Line1)));
        assert_eq!(map_menu("3"), Some(MenuChoice::EditLine(LineId::Line4)));
        assert_eq!(map_menu("0"), Some(MenuChoice::Exit));
        assert_eq!(map_menu("9"), None);
    }

    #[test]
    fn blank_desired_dyne_keeps_current() {
        let mut session = Session::default();
        apply_desired_dyne_answer(&mut session, "  \n");
        assert_eq!(session.desired_dyne(), 42.0);
        apply_desired_dyne_answer(&mut session, "38\n");
        assert_eq!(session.desired_dyne(), 38.0);
        apply_desired_dyne_answer(&mut session, "abc\n");
        assert!(session.desired_dyne().is_nan());
    }
}
