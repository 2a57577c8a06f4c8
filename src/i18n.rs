use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SUMMARY: &str = "main_menu.summary";
    pub const MAIN_MENU_EDIT_LINE1: &str = "main_menu.edit_line1";
    pub const MAIN_MENU_EDIT_LINE4: &str = "main_menu.edit_line4";
    pub const MAIN_MENU_SELECT_MATERIAL: &str = "main_menu.select_material";
    pub const MAIN_MENU_DESIRED_DYNE: &str = "main_menu.desired_dyne";
    pub const MAIN_MENU_SPEED_CHART: &str = "main_menu.speed_chart";
    pub const MAIN_MENU_DECAY_CHART: &str = "main_menu.decay_chart";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const LINE_WIDTH: &str = "line.width";
    pub const LINE_SPEED: &str = "line.speed";
    pub const LINE_POWER: &str = "line.power";
    pub const LINE_SIDES: &str = "line.sides";
    pub const LINE_KEEP_HINT: &str = "line.keep_hint";
    pub const WATT_DENSITY: &str = "result.watt_density";
    pub const WATT_DENSITY_UNIT: &str = "result.watt_density_unit";

    pub const MATERIAL_CURRENT: &str = "material.current";
    pub const MATERIAL_NONE: &str = "material.none";
    pub const MATERIAL_UNKNOWN: &str = "material.unknown";
    pub const MATERIAL_SELECTION_RESET: &str = "material.selection_reset";
    pub const DESIRED_DYNE_PROMPT: &str = "dyne.desired_prompt";
    pub const DESIRED_DYNE_CURRENT: &str = "dyne.desired_current";

    pub const SPEED_CHART_HEADING: &str = "chart.speed_heading";
    pub const SPEED_CHART_AXIS: &str = "chart.speed_axis";
    pub const SPEED_CHART_ERROR: &str = "chart.speed_error";
    pub const DECAY_CHART_HEADING: &str = "chart.decay_heading";
    pub const DECAY_CHART_DAY: &str = "chart.decay_day";
    pub const DECAY_CHART_DYNE: &str = "chart.decay_dyne";
    pub const DECAY_CHART_UNTREATED: &str = "chart.decay_untreated";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_NEW_NAME: &str = "settings.new_name";
    pub const SETTINGS_TARGET_NAME: &str = "settings.target_name";
    pub const SETTINGS_RENAME_TO: &str = "settings.rename_to";
    pub const SETTINGS_UNTREATED_DYNE: &str = "settings.untreated_dyne";
    pub const SETTINGS_DECAY_RATE: &str = "settings.decay_rate";
    pub const SETTINGS_DONE: &str = "settings.done";
    pub const SETTINGS_REJECTED: &str = "settings.rejected";
    pub const SETTINGS_NOT_FOUND: &str = "settings.not_found";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 내장 문자열만 쓰는 번역기. 알 수 없는 코드는 영어로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 언어팩을 쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Corona Analysis ===",
        MAIN_MENU_SUMMARY => "1) 와트 밀도 요약",
        MAIN_MENU_EDIT_LINE1 => "2) 첫 번째 라인 설정",
        MAIN_MENU_EDIT_LINE4 => "3) 두 번째 라인 설정",
        MAIN_MENU_SELECT_MATERIAL => "4) 재질 선택",
        MAIN_MENU_DESIRED_DYNE => "5) 목표 다인 레벨",
        MAIN_MENU_SPEED_CHART => "6) 라인 속도별 와트 밀도",
        MAIN_MENU_DECAY_CHART => "7) 다인 레벨 감쇠",
        MAIN_MENU_SETTINGS => "8) 재질 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        LINE_WIDTH => "웹 폭 (in)",
        LINE_SPEED => "라인 속도 (FPM)",
        LINE_POWER => "출력 (kW)",
        LINE_SIDES => "처리 면 수",
        LINE_KEEP_HINT => "(엔터: 현재값 유지)",
        WATT_DENSITY => "와트 밀도:",
        WATT_DENSITY_UNIT => "W/ft²/min",
        MATERIAL_CURRENT => "현재 재질:",
        MATERIAL_NONE => "선택된 재질이 없습니다. 재질 설정에서 추가하세요.",
        MATERIAL_UNKNOWN => "목록에 없는 재질입니다.",
        MATERIAL_SELECTION_RESET => "선택 재질이 삭제되어 다음 재질로 바꿨습니다:",
        DESIRED_DYNE_PROMPT => "목표 다인 레벨 (빈 칸은 유지): ",
        DESIRED_DYNE_CURRENT => "현재 목표 다인 레벨:",
        SPEED_CHART_HEADING => "\n-- 라인 속도별 와트 밀도 --",
        SPEED_CHART_AXIS => "속도(FPM)",
        SPEED_CHART_ERROR => "속도 스윕을 만들 수 없습니다:",
        DECAY_CHART_HEADING => "\n-- 다인 레벨 감쇠 --",
        DECAY_CHART_DAY => "일",
        DECAY_CHART_DYNE => "다인",
        DECAY_CHART_UNTREATED => "미처리 다인:",
        SETTINGS_HEADING => "\n-- 재질 설정 --",
        SETTINGS_OPTIONS => "1) 추가  2) 이름 변경  3) 미처리 다인  4) 감쇠율  5) 삭제  0) 돌아가기",
        SETTINGS_NEW_NAME => "새 재질 이름: ",
        SETTINGS_TARGET_NAME => "대상 재질 이름: ",
        SETTINGS_RENAME_TO => "새 이름: ",
        SETTINGS_UNTREATED_DYNE => "미처리 다인: ",
        SETTINGS_DECAY_RATE => "일일 감쇠율: ",
        SETTINGS_DONE => "반영되었습니다.",
        SETTINGS_REJECTED => "빈 이름이거나 이미 있는 이름이라 변경하지 않습니다.",
        SETTINGS_NOT_FOUND => "해당 재질이 없습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Corona Analysis ===",
        MAIN_MENU_SUMMARY => "1) Watt density summary",
        MAIN_MENU_EDIT_LINE1 => "2) Edit first line",
        MAIN_MENU_EDIT_LINE4 => "3) Edit second line",
        MAIN_MENU_SELECT_MATERIAL => "4) Select material",
        MAIN_MENU_DESIRED_DYNE => "5) Desired dyne level",
        MAIN_MENU_SPEED_CHART => "6) Watt density vs line speed",
        MAIN_MENU_DECAY_CHART => "7) Dyne level decay",
        MAIN_MENU_SETTINGS => "8) Material settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        LINE_WIDTH => "Web Width (inches)",
        LINE_SPEED => "Line Speed (FPM)",
        LINE_POWER => "Power (kW)",
        LINE_SIDES => "Sides Treated",
        LINE_KEEP_HINT => "(enter keeps current value)",
        WATT_DENSITY => "Watt Density:",
        WATT_DENSITY_UNIT => "W/ft²/min",
        MATERIAL_CURRENT => "Current material:",
        MATERIAL_NONE => "No material selected. Add one in material settings.",
        MATERIAL_UNKNOWN => "Material is not in the list.",
        MATERIAL_SELECTION_RESET => "Selected material was removed; switched to:",
        DESIRED_DYNE_PROMPT => "Desired dyne level (blank keeps current): ",
        DESIRED_DYNE_CURRENT => "Current desired dyne level:",
        SPEED_CHART_HEADING => "\n-- Watt Density vs Line Speed --",
        SPEED_CHART_AXIS => "Speed(FPM)",
        SPEED_CHART_ERROR => "Cannot build speed sweep:",
        DECAY_CHART_HEADING => "\n-- Dyne Level Decay Over Time --",
        DECAY_CHART_DAY => "Day",
        DECAY_CHART_DYNE => "Dyne",
        DECAY_CHART_UNTREATED => "Untreated Dyne:",
        SETTINGS_HEADING => "\n-- Material Settings --",
        SETTINGS_OPTIONS => "1) Add  2) Rename  3) Untreated dyne  4) Decay rate  5) Delete  0) Back",
        SETTINGS_NEW_NAME => "New material name: ",
        SETTINGS_TARGET_NAME => "Material name: ",
        SETTINGS_RENAME_TO => "New name: ",
        SETTINGS_UNTREATED_DYNE => "Untreated dyne: ",
        SETTINGS_DECAY_RATE => "Decay rate (per day): ",
        SETTINGS_DONE => "Applied.",
        SETTINGS_REJECTED => "Name is blank or already exists; nothing changed.",
        SETTINGS_NOT_FOUND => "No such material.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_falls_back_to_builtin() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t(keys::SETTINGS_DONE), "반영되었습니다.");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn nested_tables_flatten() {
        let map = parse_toml_to_map("[gui]\ntitle = \"T\"\n[gui.line]\nwidth = \"W\"").unwrap();
        assert_eq!(map.get("gui.line.width").map(String::as_str), Some("W"));
        assert_eq!(map.get("gui.title").map(String::as_str), Some("T"));
    }

    #[test]
    fn built_in_packs_load() {
        let tr = Translator::new_with_pack("ko-kr", None);
        assert!(tr.lookup("gui.settings.title").is_some());
    }
}
