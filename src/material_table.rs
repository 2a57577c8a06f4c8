//! 재질별 미처리 다인 레벨과 일일 감쇠율 테이블.
//! 기본값은 현장 참고치이며 설정 화면에서 자유롭게 고칠 수 있다.

use crate::input::parse_leading_float;

/// 재질 한 종의 표면 에너지 특성.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// 처리 전 다인 레벨 [dyn/cm]
    pub initial_dyne: f64,
    /// 일일 감쇠율 (0.03 = 하루 3%)
    pub decay_rate: f64,
}

impl MaterialParams {
    pub const fn new(initial_dyne: f64, decay_rate: f64) -> Self {
        Self {
            initial_dyne,
            decay_rate,
        }
    }

    fn set(&mut self, field: MaterialField, value: f64) {
        match field {
            MaterialField::InitialDyne => self.initial_dyne = value,
            MaterialField::DecayRate => self.decay_rate = value,
        }
    }
}

/// 새 재질을 추가할 때 쓰는 초기값.
pub const NEW_MATERIAL_DEFAULTS: MaterialParams = MaterialParams::new(40.0, 0.02);

const DEFAULT_MATERIALS: &[(&str, MaterialParams)] = &[
    ("TPO", MaterialParams::new(40.0, 0.03)),
    ("HDPE", MaterialParams::new(42.0, 0.02)),
    ("ABS", MaterialParams::new(44.0, 0.025)),
    ("Acrylic", MaterialParams::new(46.0, 0.015)),
];

/// 편집 가능한 재질 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    InitialDyne,
    DecayRate,
}

/// 재질 이름(대소문자 구분, 중복 불가)을 키로 하는 테이블. 추가 순서를 유지한다.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    entries: Vec<(String, MaterialParams)>,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MATERIALS
                .iter()
                .map(|(name, params)| (name.to_string(), *params))
                .collect(),
        }
    }
}

impl MaterialTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&MaterialParams> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    /// 테이블 순서대로 이름을 돌려준다 (재질 선택 목록용).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// 이름순 정렬 목록 (설정 화면용).
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// 기본값(40 dyn/cm, 0.02/일)으로 재질을 추가한다.
    /// 이름이 공백뿐이거나 이미 있으면 아무것도 하지 않고 false.
    pub fn add(&mut self, name: &str) -> bool {
        self.add_with(name, NEW_MATERIAL_DEFAULTS)
    }

    pub fn add_with(&mut self, name: &str, params: MaterialParams) -> bool {
        if name.trim().is_empty() || self.contains(name) {
            return false;
        }
        self.entries.push((name.to_string(), params));
        true
    }

    /// 입력 문자열을 숫자로 해석해 필드를 덮어쓴다. 해석 실패 시 NaN이 저장된다.
    /// 재질이 없으면 false.
    pub fn update_field(&mut self, name: &str, field: MaterialField, raw: &str) -> bool {
        self.set_field(name, field, parse_leading_float(raw))
    }

    pub fn set_field(&mut self, name: &str, field: MaterialField, value: f64) -> bool {
        match self.position(name) {
            Some(i) => {
                self.entries[i].1.set(field, value);
                true
            }
            None => false,
        }
    }

    /// 값을 유지한 채 키를 옮긴다. 새 이름이 공백뿐이거나 이미 있는 키면 false.
    /// 옮긴 항목은 테이블 끝으로 간다.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if new.trim().is_empty() || self.contains(new) {
            return false;
        }
        let Some(i) = self.position(old) else {
            return false;
        };
        let (_, params) = self.entries.remove(i);
        self.entries.push((new.to_string(), params));
        true
    }

    /// 재질을 삭제한다. 선택 상태는 건드리지 않는다.
    pub fn remove(&mut self, name: &str) -> Option<MaterialParams> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_in_order() {
        let table = MaterialTable::default();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, ["TPO", "HDPE", "ABS", "Acrylic"]);
        assert_eq!(table.get("ABS"), Some(&MaterialParams::new(44.0, 0.025)));
        assert_eq!(table.sorted_names(), ["ABS", "Acrylic", "HDPE", "TPO"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut table = MaterialTable::default();
        assert!(table.add("tpo"));
        assert!(table.contains("TPO"));
        assert!(table.contains("tpo"));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn blank_names_rejected() {
        let mut table = MaterialTable::default();
        assert!(!table.add(""));
        assert!(!table.add("   "));
        assert!(!table.rename("TPO", "\t"));
        assert_eq!(table, MaterialTable::default());
    }

    #[test]
    fn rename_moves_value_to_end() {
        let mut table = MaterialTable::default();
        assert!(table.rename("TPO", "PP"));
        assert!(!table.contains("TPO"));
        assert_eq!(table.get("PP"), Some(&MaterialParams::new(40.0, 0.03)));
        assert_eq!(table.names().last(), Some("PP"));
    }

    #[test]
    fn rename_to_self_or_missing_is_noop() {
        let mut table = MaterialTable::default();
        assert!(!table.rename("TPO", "TPO"));
        assert!(!table.rename("PET", "PETG"));
        assert_eq!(table, MaterialTable::default());
    }

    #[test]
    fn update_field_stores_parse_result() {
        let mut table = MaterialTable::default();
        assert!(table.update_field("HDPE", MaterialField::DecayRate, "0.05"));
        assert_eq!(table.get("HDPE").map(|p| p.decay_rate), Some(0.05));
        assert!(table.update_field("HDPE", MaterialField::InitialDyne, "oops"));
        assert!(table.get("HDPE").map_or(false, |p| p.initial_dyne.is_nan()));
        assert!(!table.update_field("PET", MaterialField::InitialDyne, "38"));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut table = MaterialTable::default();
        assert_eq!(table.remove("PET"), None);
        assert_eq!(table.len(), 4);
        assert_eq!(table.remove("ABS"), Some(MaterialParams::new(44.0, 0.025)));
        assert_eq!(table.len(), 3);
    }
}
