use eframe::egui::{self, Color32, RichText};
use easel_lang::{
    check, triangulate, Config, DrawCommand, LineStatus, PenColor, Recorder, RenderMode, ScriptError,
    Session, ShapeDesc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CANVAS_SIZE: (f32, f32) = (640.0, 480.0);
const CIRCLE_SEGMENTS: usize = 64;

fn pen_color32(color: PenColor) -> Color32 {
    let (r, g, b) = color.rgb();
    Color32::from_rgb(r, g, b)
}

fn mono_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).monospace().color(Color32::from_rgb(140, 140, 140)));
        ui.label(RichText::new(value).monospace().color(Color32::from_rgb(210, 210, 170)));
    });
}

/// Step budget from `EASEL_MAX_STEPS`, falling back to the library default.
fn load_config() -> Config {
    let config = Config::default();
    match std::env::var("EASEL_MAX_STEPS") {
        Ok(raw) => match raw.parse() {
            Ok(n) => config.with_max_steps(n),
            Err(_) => {
                warn!(value = %raw, "ignoring invalid EASEL_MAX_STEPS");
                config
            }
        },
        Err(_) => config,
    }
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("easel_lang=info,easel_app=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 800.0]),
        ..Default::default()
    };
    let config = load_config();
    info!(max_steps = config.max_steps, "starting");
    eframe::run_native("Easel", options, Box::new(move |_cc| Ok(Box::new(App::new(config)))))
}

// ─── App state ────────────────────────────────────────────────────────────────

#[derive(PartialEq)]
enum Tab { Errors, Variables, Output, Canvas }

struct App {
    source: String,
    command: String,
    path: String,
    tab: Tab,
    session: Session,
    canvas: Recorder,
    errors: Vec<String>,
    status: String,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            source: String::from("moveto 100,100\npen red\nfill on\ncircle 40\n"),
            command: String::new(),
            path: String::from("script.txt"),
            tab: Tab::Canvas,
            session: Session::with_config(config),
            canvas: Recorder::new(),
            errors: Vec::new(),
            status: String::new(),
        }
    }

    fn report(&mut self, e: &ScriptError) {
        warn!(kind = e.kind.name(), line = e.line, "{}", e.message);
        self.errors.push(format!("[{}] {}", e.kind.name(), e));
        self.tab = Tab::Errors;
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    fn run_script(&mut self) {
        self.errors.clear();
        match self.session.run(&self.source, &mut self.canvas) {
            Ok(()) => self.status = "ran script".into(),
            Err(e) => self.report(&e),
        }
    }

    fn check_script(&mut self) {
        self.errors.clear();
        match check(&self.source) {
            Ok(()) => self.status = "syntax ok".into(),
            Err(errs) => {
                self.errors = errs.iter().map(|e| format!("[{}] {}", e.kind.name(), e)).collect();
                self.tab = Tab::Errors;
            }
        }
    }

    fn run_command(&mut self) {
        let line = std::mem::take(&mut self.command);
        self.errors.clear();
        match self.session.run_line(&line, &mut self.canvas) {
            Ok(LineStatus::Executed) => self.status = format!("ran `{}`", line.trim()),
            Ok(LineStatus::Pending)  => self.status = "block open, waiting for its closing line".into(),
            Err(e) => self.report(&e),
        }
    }

    fn reset_session(&mut self) {
        self.session.reset();
        self.canvas = Recorder::new();
        self.errors.clear();
        self.status = "session reset".into();
    }

    fn load(&mut self) {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                info!(path = %self.path, bytes = text.len(), "loaded script");
                self.source = text;
                self.status = format!("loaded {}", self.path);
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "load failed");
                self.errors.push(format!("[io] cannot read {}: {e}", self.path));
                self.tab = Tab::Errors;
            }
        }
    }

    fn save(&mut self) {
        match std::fs::write(&self.path, &self.source) {
            Ok(()) => {
                info!(path = %self.path, bytes = self.source.len(), "saved script");
                self.status = format!("saved {}", self.path);
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "save failed");
                self.errors.push(format!("[io] cannot write {}: {e}", self.path));
                self.tab = Tab::Errors;
            }
        }
    }
}

// ─── UI ───────────────────────────────────────────────────────────────────────

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                // ── Left: editor ──────────────────────────────────────────────
                cols[0].vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("File");
                        ui.add(egui::TextEdit::singleline(&mut self.path).desired_width(260.0));
                        if ui.button("load").clicked() { self.load(); }
                        if ui.button("save").clicked() { self.save(); }
                    });
                    ui.label("Script");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.source)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(36),
                    );
                    ui.horizontal(|ui| {
                        if ui.button("run").clicked() { self.run_script(); }
                        if ui.button("check").clicked() { self.check_script(); }
                        if ui.button("reset").clicked() { self.reset_session(); }
                    });
                    ui.separator();
                    ui.label("Command");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.command)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.run_command();
                        response.request_focus();
                    }
                });

                // ── Right: output ─────────────────────────────────────────────
                cols[1].vertical(|ui| {
                    // ── Status bar ────────────────────────────────────────────
                    ui.horizontal(|ui| {
                        if self.errors.is_empty() {
                            ui.label(RichText::new("✓  no errors").color(Color32::from_rgb(80, 200, 80)));
                        } else {
                            ui.label(RichText::new(format!("✗  {} error(s)", self.errors.len()))
                                .color(Color32::from_rgb(220, 80, 80)));
                        }
                        if self.session.is_pending() {
                            ui.label(RichText::new("… block open").color(Color32::from_rgb(220, 180, 60)));
                        }
                        ui.label(RichText::new(&self.status).color(Color32::GRAY));
                    });

                    ui.separator();

                    // ── Tab bar ───────────────────────────────────────────────
                    ui.horizontal(|ui| {
                        let err_label = if self.errors.is_empty() {
                            "Errors".into()
                        } else {
                            format!("Errors ({})", self.errors.len())
                        };
                        ui.selectable_value(&mut self.tab, Tab::Errors, err_label);
                        ui.selectable_value(&mut self.tab, Tab::Variables, "Variables");
                        ui.selectable_value(&mut self.tab, Tab::Output, "Output");
                        ui.selectable_value(&mut self.tab, Tab::Canvas, "Canvas");
                    });

                    ui.separator();

                    egui::ScrollArea::vertical().show(ui, |ui| {
                        match self.tab {
                            Tab::Errors    => self.show_errors(ui),
                            Tab::Variables => self.show_variables(ui),
                            Tab::Output    => self.show_output(ui),
                            Tab::Canvas    => self.show_canvas(ui),
                        }
                    });
                });
            });
        });
    }
}

impl App {
    fn show_errors(&self, ui: &mut egui::Ui) {
        if self.errors.is_empty() {
            ui.label(RichText::new("No errors.").color(Color32::GRAY));
            return;
        }
        for msg in &self.errors {
            ui.label(RichText::new(msg).monospace().color(Color32::from_rgb(220, 80, 80)));
        }
    }

    fn show_variables(&self, ui: &mut egui::Ui) {
        let vars = self.session.variables().sorted();
        let methods = self.session.methods().names();
        if vars.is_empty() && methods.is_empty() {
            ui.label(RichText::new("No variables or methods.").color(Color32::GRAY));
            return;
        }

        egui::Grid::new("variables_grid")
            .striped(true)
            .min_col_width(80.0)
            .show(ui, |ui| {
                ui.label(RichText::new("name").strong());
                ui.label(RichText::new("kind").strong());
                ui.label(RichText::new("value").strong());
                ui.end_row();

                for (name, value) in vars {
                    ui.label(RichText::new(name).monospace());
                    ui.label(RichText::new("var").monospace().color(Color32::from_rgb(180, 255, 180)));
                    ui.label(RichText::new(value.to_string()).monospace());
                    ui.end_row();
                }
                for name in methods {
                    ui.label(RichText::new(name).monospace());
                    ui.label(RichText::new("method").monospace().color(Color32::from_rgb(100, 180, 255)));
                    ui.label("");
                    ui.end_row();
                }
            });
    }

    fn show_output(&self, ui: &mut egui::Ui) {
        let pen = self.canvas.pen();
        mono_row(ui, "pen:", &format!(
            "({}, {})  color={}  fill={}",
            pen.x, pen.y, pen.color.name(), if pen.fill { "on" } else { "off" }
        ));
        ui.add_space(6.0);

        if self.canvas.commands().is_empty() {
            ui.label(RichText::new("Nothing drawn yet.").color(Color32::GRAY));
            return;
        }

        let v2 = |p: (f64, f64)| format!("({:.1}, {:.1})", p.0, p.1);
        for (i, cmd) in self.canvas.commands().iter().enumerate() {
            let data = cmd.shape();
            let mode = match data.render_mode {
                RenderMode::Fill    => "fill",
                RenderMode::Outline => "outline",
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("[{}]", i + 1)).monospace().color(Color32::GRAY));
                ui.label(RichText::new(data.desc.name()).monospace().color(Color32::from_rgb(180, 140, 255)));
                ui.label(RichText::new(mode).monospace().color(Color32::from_rgb(120, 180, 255)));
                ui.label(RichText::new(data.color.name()).monospace());
            });
            match &data.desc {
                ShapeDesc::Circle { center, radius } => {
                    mono_row(ui, "  center:", &v2(*center));
                    mono_row(ui, "  radius:", &format!("{radius:.1}"));
                }
                ShapeDesc::Rect { center, size } => {
                    mono_row(ui, "  center:", &v2(*center));
                    mono_row(ui, "  size:  ", &v2(*size));
                }
                ShapeDesc::Line { from, to } => {
                    mono_row(ui, "  from:", &v2(*from));
                    mono_row(ui, "  to:  ", &v2(*to));
                }
                ShapeDesc::Polygon(pts) => {
                    let pts: Vec<String> = pts.iter().map(|p| v2(*p)).collect();
                    mono_row(ui, "  pts:", &pts.join(", "));
                }
            }
            ui.add_space(4.0);
        }
    }

    fn show_canvas(&self, ui: &mut egui::Ui) {
        let desired = egui::vec2(CANVAS_SIZE.0, CANVAS_SIZE.1);
        let (canvas_rect, _response) = ui.allocate_exact_size(desired, egui::Sense::hover());
        let painter = ui.painter_at(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, Color32::from_rgb(245, 245, 240));

        let offset = canvas_rect.min;
        let to_screen = |(x, y): (f64, f64)| egui::pos2(offset.x + x as f32, offset.y + y as f32);

        for cmd in self.canvas.commands() {
            let DrawCommand::DrawShape(data) = cmd;
            let color = pen_color32(data.color);
            let stroke = egui::Stroke::new(1.5, color);
            let raw = data.desc.vertices(CIRCLE_SEGMENTS);
            let pts: Vec<egui::Pos2> = raw.iter().copied().map(to_screen).collect();

            if let ShapeDesc::Line { .. } = data.desc {
                if let [from, to] = pts[..] {
                    painter.line_segment([from, to], stroke);
                }
                continue;
            }
            match data.render_mode {
                // Drawn polygons may be concave, so they are filled as a mesh.
                RenderMode::Fill if matches!(data.desc, ShapeDesc::Polygon(_)) => {
                    let mut mesh = egui::Mesh::default();
                    for p in &pts {
                        mesh.colored_vertex(*p, color);
                    }
                    for [a, b, c] in triangulate(&raw) {
                        mesh.add_triangle(a as u32, b as u32, c as u32);
                    }
                    painter.add(egui::Shape::mesh(mesh));
                    painter.add(egui::Shape::closed_line(pts, stroke));
                }
                RenderMode::Fill => {
                    painter.add(egui::Shape::convex_polygon(pts, color, stroke));
                }
                RenderMode::Outline => {
                    painter.add(egui::Shape::closed_line(pts, stroke));
                }
            }
        }

        // Pen marker
        let pen = self.canvas.pen();
        let marker = to_screen((pen.x as f64, pen.y as f64));
        painter.circle_filled(marker, 3.0, Color32::from_rgb(220, 40, 40));
    }
}
