//! 재질 테이블 편집과 세션 선택 연동 테스트.
use corona_treatment_toolbox::material_table::{MaterialParams, MaterialTable, NEW_MATERIAL_DEFAULTS};
use corona_treatment_toolbox::session::{Session, SessionError};

#[test]
fn add_existing_is_noop() {
    let mut table = MaterialTable::default();
    assert!(!table.add("TPO"));
    assert_eq!(table, MaterialTable::default());
}

#[test]
fn add_uses_new_entry_defaults() {
    let mut table = MaterialTable::default();
    assert!(table.add("PET"));
    assert_eq!(table.get("PET"), Some(&NEW_MATERIAL_DEFAULTS));
    assert_eq!(NEW_MATERIAL_DEFAULTS, MaterialParams::new(40.0, 0.02));
}

#[test]
fn rename_onto_existing_is_noop() {
    let mut table = MaterialTable::default();
    assert!(!table.rename("TPO", "HDPE"));
    assert_eq!(table, MaterialTable::default());
}

#[test]
fn remove_shrinks_by_one_only_when_present() {
    let mut table = MaterialTable::default();
    let before = table.len();
    assert!(table.remove("HDPE").is_some());
    assert_eq!(table.len(), before - 1);
    assert!(table.remove("HDPE").is_none());
    assert_eq!(table.len(), before - 1);
}

#[test]
fn keys_stay_unique_through_edits() {
    let mut table = MaterialTable::default();
    table.add("PET");
    table.rename("PET", "ABS");
    table.rename("ABS", "PETG");
    table.add("PETG");
    table.add("ABS");
    let mut names = table.sorted_names();
    let total = names.len();
    names.dedup();
    assert_eq!(names.len(), total);
    assert!(names.iter().all(|n| !n.trim().is_empty()));
}

#[test]
fn untreated_reference_independent_of_desired_dyne() {
    let mut session = Session::default();
    session.set_desired_dyne(50.0);
    let chart = session.decay_chart().expect("chart");
    assert_eq!(chart.untreated_dyne, 40.0);
    assert_eq!(chart.points[0].dyne, 50.0);
}

#[test]
fn orphaned_selection_is_an_error_until_reset() {
    let mut session = Session::default();
    session.remove_material("TPO");
    assert_eq!(
        session.recompute().decay_chart,
        Err(SessionError::UnknownMaterial("TPO".to_string()))
    );
    session.ensure_selection();
    let chart = session.recompute().decay_chart.expect("chart after reset");
    assert_eq!(chart.material, "HDPE");
}
