#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use corona_treatment_toolbox::{
    args::LaunchArgs,
    config, i18n,
    input::{format_fixed, format_plain},
    logging,
    material_table::{MaterialField, MaterialParams},
    session::{LineField, LineId, Session, Snapshot},
};
use eframe::{egui, App, Frame};
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotPoints};
use image::GenericImageView;
use rfd::FileDialog;
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

const LINE1_COLOR: egui::Color32 = egui::Color32::from_rgb(0x88, 0x84, 0xd8);
const LINE4_COLOR: egui::Color32 = egui::Color32::from_rgb(0x82, 0xca, 0x9d);
const CHART_HEIGHT: f32 = 300.0;

fn main() -> Result<(), eframe::Error> {
    logging::init();
    let args = LaunchArgs::parse();

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 900.0])
        .with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = config::load_or_default(&args.config).unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    // 설정 파일의 값("auto" 등)은 그대로 두고 번역기에만 결정된 코드를 쓴다.
    let lang = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    tracing::info!(lang = %lang, "corona analysis GUI starting");
    eframe::run_native(
        "Corona Analysis",
        native,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::debug!("font fallback: {e}");
            }
            cc.egui_ctx.set_pixels_per_point(app_cfg.ui_scale);
            Box::new(GuiApp::new(app_cfg.clone(), args.config.clone(), &lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 우선 적용한다.
/// 1) assets/fonts/ 아래 프로젝트 폰트
/// 2) 시스템 폰트 (Windows 맑은 고딕, Linux Noto CJK)
/// 모두 실패하면 Err를 돌려주고 기본 폰트를 유지한다 (설정에서 사용자 폰트 지정 가능).
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/malgun.ttf"),
        PathBuf::from("assets/fonts/NotoSansKR-Regular.ttf"),
        PathBuf::from("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
        PathBuf::from("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    let found = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Font not found. Please set a user font (.ttf/.ttc) in settings.".to_string())?;
    let bytes = fs::read(found)
        .map_err(|e| format!("Failed to read font file ({}): {e}", found.display()))?;
    apply_font_bytes(ctx, bytes, "ui_font");
    Ok(())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn line_index(id: LineId) -> usize {
    match id {
        LineId::Line1 => 0,
        LineId::Line4 => 1,
    }
}

fn line_field_index(field: LineField) -> usize {
    match field {
        LineField::Width => 0,
        LineField::Speed => 1,
        LineField::Power => 2,
        LineField::Sides => 3,
    }
}

fn line_field_label(field: LineField) -> (&'static str, &'static str) {
    match field {
        LineField::Width => ("gui.line.width", "Web Width (inches)"),
        LineField::Speed => ("gui.line.speed", "Line Speed (FPM)"),
        LineField::Power => ("gui.line.power", "Power (kW)"),
        LineField::Sides => ("gui.line.sides", "Sides Treated"),
    }
}

/// 설정 화면의 재질 한 줄 입력 버퍼. 입력한 문자열을 그대로 유지한다.
#[derive(Debug, Clone, PartialEq)]
struct MaterialEdit {
    name: String,
    initial_dyne: String,
    decay_rate: String,
}

impl MaterialEdit {
    fn from_params(name: &str, params: &MaterialParams) -> Self {
        Self {
            name: name.to_string(),
            initial_dyne: format_plain(params.initial_dyne),
            decay_rate: format_plain(params.decay_rate),
        }
    }
}

/// 재질 목록을 그리는 동안 모아 두었다가 그린 뒤에 적용하는 편집 동작.
#[derive(Debug, Clone, PartialEq)]
enum SettingsAction {
    Rename { from: String, to: String },
    Field {
        name: String,
        field: MaterialField,
        raw: String,
    },
    Remove(String),
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    session: Session,
    snapshot: Snapshot,
    line_inputs: [[String; 4]; 2],
    desired_dyne_input: String,
    new_material_name: String,
    material_edits: HashMap<String, MaterialEdit>,
    show_settings_modal: bool,
    window_alpha: f32,
    ui_scale: f32,
    lang_input: String,
    custom_font_path: String,
    font_status: Option<String>,
    save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf, lang: &str) -> Self {
        let tr = i18n::Translator::new_with_pack(lang, config.language_pack_dir.as_deref());
        let session = Session::default();
        let snapshot = session.recompute();
        let line_inputs = LineId::ALL.map(|id| {
            LineField::ALL.map(|field| format_plain(field.get(session.line(id))))
        });
        Self {
            desired_dyne_input: format_plain(session.desired_dyne()),
            window_alpha: config.window_alpha,
            ui_scale: config.ui_scale,
            lang_input: config.language.clone(),
            config,
            config_path,
            tr,
            session,
            snapshot,
            line_inputs,
            new_material_name: String::new(),
            material_edits: HashMap::new(),
            show_settings_modal: false,
            custom_font_path: String::new(),
            font_status: None,
            save_status: None,
        }
    }

    /// 상태가 바뀐 뒤 호출한다. 선택 재질을 정리하고 표시값/차트를 다시 계산한다.
    fn refresh(&mut self) {
        self.session.ensure_selection();
        self.snapshot = self.session.recompute();
    }

    fn apply_line_input(&mut self, id: LineId, field: LineField) {
        let raw = &self.line_inputs[line_index(id)][line_field_index(field)];
        self.session.set_line_field_text(id, field, raw);
        self.refresh();
    }

    fn apply_desired_dyne_input(&mut self) {
        self.session.set_desired_dyne_text(&self.desired_dyne_input);
        self.refresh();
    }

    fn add_material_from_input(&mut self) {
        if self.session.add_material(&self.new_material_name) {
            self.new_material_name.clear();
            self.refresh();
        }
    }

    fn apply_settings_actions(&mut self, actions: Vec<SettingsAction>) {
        if actions.is_empty() {
            return;
        }
        for action in actions {
            match action {
                SettingsAction::Rename { from, to } => {
                    if self.session.rename_material(&from, &to) {
                        if let Some(mut edit) = self.material_edits.remove(&from) {
                            edit.name = to.clone();
                            self.material_edits.insert(to, edit);
                        }
                    } else if let Some(edit) = self.material_edits.get_mut(&from) {
                        // 거부된 이름은 입력칸에 남기지 않는다.
                        edit.name = from;
                    }
                }
                SettingsAction::Field { name, field, raw } => {
                    self.session.update_material_field(&name, field, &raw);
                }
                SettingsAction::Remove(name) => {
                    self.session.remove_material(&name);
                    self.material_edits.remove(&name);
                }
            }
        }
        self.refresh();
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(txt("gui.main.material", "Material"));
            let names: Vec<String> = self.session.materials().names().map(str::to_string).collect();
            let mut selected = self.session.selected_material().map(str::to_string);
            egui::ComboBox::from_id_source("material_choice")
                .selected_text(selected.clone().unwrap_or_default())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for name in &names {
                        ui.selectable_value(&mut selected, Some(name.clone()), name.as_str());
                    }
                });
            if selected.as_deref() != self.session.selected_material() {
                if let Some(name) = selected {
                    self.session.select_material(&name);
                    self.refresh();
                }
            }
            ui.add_space(6.0);
            ui.label(txt("gui.main.desired_dyne", "Desired Dyne Level"));
            if ui.text_edit_singleline(&mut self.desired_dyne_input).changed() {
                self.apply_desired_dyne_input();
            }
        });
    }

    fn ui_line_panel(&mut self, ui: &mut egui::Ui, id: LineId) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(self.config.line_label(id));
            for field in LineField::ALL {
                let (key, default) = line_field_label(field);
                ui.label(txt(key, default));
                let buf = &mut self.line_inputs[line_index(id)][line_field_index(field)];
                if ui.text_edit_singleline(buf).changed() {
                    self.apply_line_input(id, field);
                }
            }
            ui.add_space(4.0);
            ui.strong(format!(
                "{}: {} {}",
                txt("gui.main.watt_density", "Watt Density"),
                format_fixed(self.snapshot.watt_density(id), 2),
                txt("gui.main.watt_density_unit", "W/ft²/min")
            ));
        });
    }

    fn ui_speed_chart(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.heading(txt("gui.chart.speed_title", "Watt Density vs Line Speed"));
        let points = match &self.snapshot.speed_chart {
            Ok(points) => points,
            Err(e) => {
                ui.colored_label(
                    egui::Color32::RED,
                    format!("{}: {e}", txt("gui.chart.speed_error", "Speed sweep unavailable")),
                );
                return;
            }
        };
        // 무한대/NaN 점은 축 범위를 망가뜨리므로 그리지 않는다.
        let line1: PlotPoints = points
            .iter()
            .filter(|p| p.line1.is_finite())
            .map(|p| [p.speed_fpm, p.line1])
            .collect();
        let line4: PlotPoints = points
            .iter()
            .filter(|p| p.line4.is_finite())
            .map(|p| [p.speed_fpm, p.line4])
            .collect();
        Plot::new("speed_plot")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(txt("gui.chart.speed_x", "Line Speed (FPM)"))
            .y_axis_label(txt("gui.chart.speed_y", "Watt Density"))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(line1)
                        .name(&self.config.line1_label)
                        .color(LINE1_COLOR),
                );
                plot_ui.line(
                    Line::new(line4)
                        .name(&self.config.line4_label)
                        .color(LINE4_COLOR),
                );
            });
    }

    fn ui_decay_chart(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let title = txt("gui.chart.decay_title", "Dyne Level Decay Over Time");
        let chart = match &self.snapshot.decay_chart {
            Ok(chart) => chart,
            Err(_) => {
                ui.heading(title);
                ui.label(txt("gui.main.no_material", "No materials defined. Add one in Settings."));
                return;
            }
        };
        ui.heading(format!("{title} ({})", chart.material));
        let points: PlotPoints = chart
            .points
            .iter()
            .filter(|p| p.dyne.is_finite())
            .map(|p| [f64::from(p.day), p.dyne])
            .collect();
        let untreated = chart.untreated_dyne;
        Plot::new("decay_plot")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(txt("gui.chart.decay_x", "Days"))
            .y_axis_label(txt("gui.chart.decay_y", "Dyne Level"))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .name(txt("gui.chart.decay_series", "dyne"))
                        .color(LINE4_COLOR),
                );
                if untreated.is_finite() {
                    plot_ui.hline(
                        HLine::new(untreated)
                            .name(txt("gui.chart.untreated", "Untreated Dyne"))
                            .color(egui::Color32::RED)
                            .style(LineStyle::Dashed { length: 4.0 }),
                    );
                }
            });
    }

    fn ui_settings(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        ui.heading(txt("gui.settings.materials", "Materials"));
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_material_name)
                    .hint_text(txt("gui.settings.new_material", "New Material Name")),
            );
            if ui.button(txt("gui.settings.add", "Add")).clicked() {
                self.add_material_from_input();
            }
        });
        ui.add_space(6.0);

        let mut actions = Vec::new();
        for name in self.session.materials().sorted_names() {
            let Some(params) = self.session.materials().get(&name).copied() else {
                continue;
            };
            let edit = self
                .material_edits
                .entry(name.clone())
                .or_insert_with(|| MaterialEdit::from_params(&name, &params));
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.text_edit_singleline(&mut edit.name).changed() {
                        actions.push(SettingsAction::Rename {
                            from: name.clone(),
                            to: edit.name.clone(),
                        });
                    }
                    let delete = egui::Button::new(
                        egui::RichText::new(txt("gui.settings.delete", "Delete"))
                            .color(egui::Color32::RED),
                    );
                    if ui.add(delete).clicked() {
                        actions.push(SettingsAction::Remove(name.clone()));
                    }
                });
                egui::Grid::new(("material_grid", &name))
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(txt("gui.settings.untreated_dyne", "Untreated Dyne"));
                        if ui.text_edit_singleline(&mut edit.initial_dyne).changed() {
                            actions.push(SettingsAction::Field {
                                name: name.clone(),
                                field: MaterialField::InitialDyne,
                                raw: edit.initial_dyne.clone(),
                            });
                        }
                        ui.end_row();
                        ui.label(txt("gui.settings.decay_rate", "Decay Rate (per day)"));
                        if ui.text_edit_singleline(&mut edit.decay_rate).changed() {
                            actions.push(SettingsAction::Field {
                                name: name.clone(),
                                field: MaterialField::DecayRate,
                                raw: edit.decay_rate.clone(),
                            });
                        }
                        ui.end_row();
                    });
            });
        }
        self.apply_settings_actions(actions);

        ui.separator();
        ui.heading(txt("gui.settings.labels", "Line labels"));
        ui.text_edit_singleline(&mut self.config.line1_label);
        ui.text_edit_singleline(&mut self.config.line4_label);

        ui.separator();
        ui.label(txt("gui.settings.lang", "Language"));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(&self.lang_input)
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut self.lang_input,
                    "auto".into(),
                    txt("gui.settings.lang_auto", "System"),
                );
                ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
            });
        ui.label(txt("gui.settings.alpha", "Window transparency"));
        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
        ui.label(txt("gui.settings.ui_scale", "UI scale"));
        if ui
            .add(egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x"))
            .changed()
        {
            ctx.set_pixels_per_point(self.ui_scale);
        }

        ui.separator();
        ui.label(txt("gui.settings.font", "Custom font (.ttf/.ttc)"));
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.custom_font_path);
            if ui.button(txt("gui.settings.font_browse", "Browse…")).clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("Font", &["ttf", "ttc", "otf"])
                    .pick_file()
                {
                    self.custom_font_path = path.display().to_string();
                }
            }
            if ui.button(txt("gui.settings.font_apply", "Apply font")).clicked() {
                self.font_status = Some(match load_custom_font(ctx, &self.custom_font_path) {
                    Ok(()) => format!("✔ {}", self.custom_font_path),
                    Err(e) => e,
                });
            }
        });
        if let Some(msg) = &self.font_status {
            ui.small(msg);
        }

        ui.separator();
        if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
            self.save_settings();
            if self.save_status.is_none() {
                self.save_status = Some(txt("gui.settings.saved", "Saved."));
            }
        }
        if let Some(msg) = &self.save_status {
            ui.label(msg);
        }
    }

    /// 환경 설정을 파일에 저장하고 번역기를 바로 다시 만든다.
    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.ui_scale = self.ui_scale;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.save_status = match self.config.save(&self.config_path) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("settings save failed: {e}");
                Some(format!("Save error: {e}"))
            }
        };
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도는 기본 테마에서 매 프레임 다시 계산한다.
        let mut visuals = if ctx.style().visuals.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.window_fill = visuals.window_fill.linear_multiply(self.window_alpha);
        visuals.panel_fill = visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_visuals(visuals);

        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.app_title", "Corona Analysis"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                        self.show_settings_modal = true;
                    }
                });
            });
        });

        if self.show_settings_modal {
            let mut open = true;
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .default_width(420.0)
                .open(&mut open)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| self.ui_settings(ctx, ui));
                });
            self.show_settings_modal = open;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_inputs(ui);
                    ui.add_space(10.0);
                    ui.columns(2, |cols| {
                        self.ui_line_panel(&mut cols[0], LineId::Line1);
                        self.ui_line_panel(&mut cols[1], LineId::Line4);
                    });
                    ui.add_space(10.0);
                    egui::Frame::group(ui.style()).show(ui, |ui| self.ui_speed_chart(ui));
                    ui.add_space(10.0);
                    egui::Frame::group(ui.style()).show(ui, |ui| self.ui_decay_chart(ui));
                });
        });
    }
}
