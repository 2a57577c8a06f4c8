//! 계산기 한 세션의 전체 상태와 재계산.
//!
//! 상태는 프로세스 안에만 존재하며 시작할 때마다 기본값으로 초기화된다.
//! 화면 계층은 상태를 바꿀 때마다 [`Session::recompute`]를 직접 호출해
//! 표시값과 차트 데이터를 다시 만든다.

use thiserror::Error;

use crate::corona::{
    dyne_decay, speed_sweep, watt_density, DecayPoint, LineConfig, SpeedSweepPoint, SweepError,
};
use crate::input::parse_number;
use crate::material_table::{MaterialField, MaterialParams, MaterialTable};

/// 시작 시 선택되는 재질.
pub const DEFAULT_MATERIAL: &str = "TPO";
/// 시작 시 목표(처리 직후) 다인 레벨.
pub const DEFAULT_DESIRED_DYNE: f64 = 42.0;

/// 생산 라인 구분. 현장 번호를 그대로 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineId {
    Line1,
    Line4,
}

impl LineId {
    pub const ALL: [LineId; 2] = [LineId::Line1, LineId::Line4];
}

/// 라인 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Width,
    Speed,
    Power,
    Sides,
}

impl LineField {
    pub const ALL: [LineField; 4] = [
        LineField::Width,
        LineField::Speed,
        LineField::Power,
        LineField::Sides,
    ];

    pub fn get(self, line: &LineConfig) -> f64 {
        match self {
            LineField::Width => line.width_in,
            LineField::Speed => line.speed_fpm,
            LineField::Power => line.power_kw,
            LineField::Sides => line.sides,
        }
    }

    fn set(self, line: &mut LineConfig, value: f64) {
        match self {
            LineField::Width => line.width_in = value,
            LineField::Speed => line.speed_fpm = value,
            LineField::Power => line.power_kw = value,
            LineField::Sides => line.sides = value,
        }
    }
}

/// 세션 상태 조회 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// 선택된 재질이 없음 (테이블이 비었을 때)
    #[error("no material selected")]
    NoSelection,
    /// 선택된 재질이 테이블에 없음
    #[error("selected material '{0}' is not in the material table")]
    UnknownMaterial(String),
}

/// 선택 재질의 감쇠 차트 데이터.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayChart {
    pub material: String,
    /// 기준선: 재질의 미처리 다인 레벨
    pub untreated_dyne: f64,
    pub points: Vec<DecayPoint>,
}

/// 한 번의 재계산 결과. 화면은 이 값만 보고 그린다.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub watt_density_line1: f64,
    pub watt_density_line4: f64,
    pub speed_chart: Result<Vec<SpeedSweepPoint>, SweepError>,
    pub decay_chart: Result<DecayChart, SessionError>,
}

impl Snapshot {
    pub fn watt_density(&self, id: LineId) -> f64 {
        match id {
            LineId::Line1 => self.watt_density_line1,
            LineId::Line4 => self.watt_density_line4,
        }
    }
}

/// 재질 테이블, 두 라인 설정, 재질 선택, 목표 다인 레벨.
#[derive(Debug, Clone)]
pub struct Session {
    materials: MaterialTable,
    line1: LineConfig,
    line4: LineConfig,
    selected: Option<String>,
    desired_dyne: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            materials: MaterialTable::default(),
            line1: LineConfig::default(),
            line4: LineConfig::default(),
            selected: Some(DEFAULT_MATERIAL.to_string()),
            desired_dyne: DEFAULT_DESIRED_DYNE,
        }
    }
}

impl Session {
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn line(&self, id: LineId) -> &LineConfig {
        match id {
            LineId::Line1 => &self.line1,
            LineId::Line4 => &self.line4,
        }
    }

    pub fn selected_material(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn desired_dyne(&self) -> f64 {
        self.desired_dyne
    }

    pub fn set_line_field(&mut self, id: LineId, field: LineField, value: f64) {
        let line = match id {
            LineId::Line1 => &mut self.line1,
            LineId::Line4 => &mut self.line4,
        };
        field.set(line, value);
        tracing::debug!(?id, ?field, value, "line field updated");
    }

    /// 입력 칸 문자열을 그대로 받아 라인 필드에 반영한다 (빈 칸=0, 그 외 실패=NaN).
    pub fn set_line_field_text(&mut self, id: LineId, field: LineField, raw: &str) {
        self.set_line_field(id, field, parse_number(raw));
    }

    pub fn set_desired_dyne(&mut self, value: f64) {
        self.desired_dyne = value;
    }

    pub fn set_desired_dyne_text(&mut self, raw: &str) {
        self.set_desired_dyne(parse_number(raw));
    }

    /// 테이블에 있는 재질만 선택할 수 있다.
    pub fn select_material(&mut self, name: &str) -> bool {
        if !self.materials.contains(name) {
            return false;
        }
        self.selected = Some(name.to_string());
        true
    }

    pub fn add_material(&mut self, name: &str) -> bool {
        let added = self.materials.add(name);
        if added {
            tracing::debug!(name, "material added");
        } else {
            tracing::warn!(name, "material add rejected (blank or duplicate name)");
        }
        added
    }

    pub fn update_material_field(&mut self, name: &str, field: MaterialField, raw: &str) -> bool {
        self.materials.update_field(name, field, raw)
    }

    /// 이름을 바꾸고, 바꾼 재질이 선택 중이었다면 선택도 새 이름으로 옮긴다.
    pub fn rename_material(&mut self, old: &str, new: &str) -> bool {
        if !self.materials.rename(old, new) {
            tracing::warn!(old, new, "material rename rejected");
            return false;
        }
        if self.selected.as_deref() == Some(old) {
            self.selected = Some(new.to_string());
        }
        tracing::debug!(old, new, "material renamed");
        true
    }

    /// 재질을 삭제한다. 선택이 가리키던 재질이어도 선택은 그대로 남는다;
    /// 호출한 쪽이 [`Session::ensure_selection`]으로 정리해야 한다.
    pub fn remove_material(&mut self, name: &str) -> Option<MaterialParams> {
        let removed = self.materials.remove(name);
        if removed.is_some() {
            tracing::debug!(name, "material removed");
        }
        removed
    }

    /// 선택이 테이블에 없는 재질을 가리키면 테이블 첫 재질로, 테이블이 비었으면
    /// 선택 없음으로 되돌린다. 선택이 바뀌었으면 true.
    pub fn ensure_selection(&mut self) -> bool {
        if let Some(name) = self.selected.as_deref() {
            if self.materials.contains(name) {
                return false;
            }
        } else if self.materials.is_empty() {
            return false;
        }
        let fallback = self.materials.names().next().map(str::to_string);
        tracing::info!(
            previous = ?self.selected,
            fallback = ?fallback,
            "material selection reset"
        );
        self.selected = fallback;
        true
    }

    /// 선택 재질의 파라미터. 선택이 없거나 테이블에 없으면 오류.
    pub fn selected_params(&self) -> Result<(&str, &MaterialParams), SessionError> {
        let name = self.selected.as_deref().ok_or(SessionError::NoSelection)?;
        let params = self
            .materials
            .get(name)
            .ok_or_else(|| SessionError::UnknownMaterial(name.to_string()))?;
        Ok((name, params))
    }

    /// 선택 재질의 감쇠율과 목표 다인 레벨로 감쇠 차트를 만든다.
    pub fn decay_chart(&self) -> Result<DecayChart, SessionError> {
        let (name, params) = self.selected_params()?;
        Ok(DecayChart {
            material: name.to_string(),
            untreated_dyne: params.initial_dyne,
            points: dyne_decay(self.desired_dyne, params.decay_rate),
        })
    }

    /// 표시값 두 개와 차트 데이터 두 개를 처음부터 다시 계산한다.
    pub fn recompute(&self) -> Snapshot {
        let snapshot = Snapshot {
            watt_density_line1: watt_density(&self.line1),
            watt_density_line4: watt_density(&self.line4),
            speed_chart: speed_sweep(&self.line1, &self.line4),
            decay_chart: self.decay_chart(),
        };
        tracing::debug!(
            wd1 = snapshot.watt_density_line1,
            wd4 = snapshot.watt_density_line4,
            "recomputed"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let session = Session::default();
        assert_eq!(session.selected_material(), Some("TPO"));
        assert_eq!(session.desired_dyne(), 42.0);
        assert_eq!(*session.line(LineId::Line4), LineConfig::default());
        let snap = session.recompute();
        assert!((snap.watt_density(LineId::Line1) - 2.5).abs() < 1e-9);
        let decay = snap.decay_chart.unwrap();
        assert_eq!(decay.untreated_dyne, 40.0);
        assert_eq!(decay.points[0].dyne, 42.0);
    }

    #[test]
    fn lines_are_independent() {
        let mut session = Session::default();
        session.set_line_field(LineId::Line4, LineField::Sides, 2.0);
        assert_eq!(session.line(LineId::Line1).sides, 1.0);
        let snap = session.recompute();
        assert!((snap.watt_density_line4 - 1.25).abs() < 1e-9);
    }

    #[test]
    fn text_inputs_follow_number_rules() {
        let mut session = Session::default();
        session.set_line_field_text(LineId::Line1, LineField::Width, "");
        assert_eq!(session.line(LineId::Line1).width_in, 0.0);
        session.set_line_field_text(LineId::Line1, LineField::Power, "x");
        assert!(session.line(LineId::Line1).power_kw.is_nan());
        session.set_desired_dyne_text("44");
        assert_eq!(session.desired_dyne(), 44.0);
    }

    #[test]
    fn select_requires_existing_key() {
        let mut session = Session::default();
        assert!(!session.select_material("PET"));
        assert!(session.select_material("ABS"));
        assert_eq!(session.selected_material(), Some("ABS"));
    }

    #[test]
    fn rename_follows_selection() {
        let mut session = Session::default();
        assert!(session.rename_material("TPO", "TPO-2"));
        assert_eq!(session.selected_material(), Some("TPO-2"));
        assert!(session.rename_material("HDPE", "PE"));
        assert_eq!(session.selected_material(), Some("TPO-2"));
    }

    #[test]
    fn removing_selected_orphans_until_ensured() {
        let mut session = Session::default();
        session.remove_material("TPO");
        assert_eq!(session.selected_material(), Some("TPO"));
        assert_eq!(
            session.decay_chart(),
            Err(SessionError::UnknownMaterial("TPO".into()))
        );
        assert!(session.ensure_selection());
        assert_eq!(session.selected_material(), Some("HDPE"));
        assert!(!session.ensure_selection());
    }

    #[test]
    fn empty_table_leaves_no_selection() {
        let mut session = Session::default();
        for name in ["TPO", "HDPE", "ABS", "Acrylic"] {
            session.remove_material(name);
        }
        assert!(session.ensure_selection());
        assert_eq!(session.selected_material(), None);
        assert_eq!(session.recompute().decay_chart, Err(SessionError::NoSelection));
        assert!(session.add_material("PET"));
        assert!(session.ensure_selection());
        assert_eq!(session.selected_material(), Some("PET"));
    }

    #[test]
    fn material_edits_reach_decay_chart() {
        let mut session = Session::default();
        assert!(session.update_material_field("TPO", MaterialField::DecayRate, "0"));
        assert!(session.update_material_field("TPO", MaterialField::InitialDyne, "38"));
        let decay = session.decay_chart().unwrap();
        assert_eq!(decay.untreated_dyne, 38.0);
        assert!(decay.points.iter().all(|p| p.dyne == 42.0));
    }
}
