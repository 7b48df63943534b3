/*!
 * Desktop viewer for census-scatter
 *
 * Opens a census CSV and shows the interactive chart:
 * - Click an axis label to switch that axis' metric
 * - Hover a circle for its tooltip
 * - Resizing the window rebuilds the chart with the default axes
 */

use census_scatter::scene::{Primitive, TextAlign};
use census_scatter::viz::TOOLTIP_FONT_PX;
use census_scatter::viz::util::rgb_components;
use census_scatter::{ChartConfig, ChartEvent, ChartHost, CsvFile, RetainedScene, Viewport};
use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("US Census Demographics - census-scatter"),
        ..Default::default()
    };

    let initial = std::env::args_os().nth(1).map(PathBuf::from);
    eframe::run_native(
        "census-scatter",
        options,
        Box::new(|_cc| Ok(Box::new(ScatterApp::new(initial)))),
    )
}

struct ScatterApp {
    data_path: Option<PathBuf>,
    config: ChartConfig,
    host: Option<ChartHost<RetainedScene>>,
    /// Chart area the current session was built for.
    built_for: Option<Vec2>,
    error_message: String,
}

impl ScatterApp {
    fn new(data_path: Option<PathBuf>) -> Self {
        Self {
            data_path,
            config: ChartConfig::default(),
            host: None,
            built_for: None,
            error_message: String::new(),
        }
    }

    fn open_dialog(&mut self) {
        let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_directory(start)
            .pick_file()
        {
            self.data_path = Some(path);
            self.host = None;
            self.built_for = None;
            self.error_message.clear();
        }
    }

    /// Build on first sight of a data file, rebuild when the chart area changes size.
    fn sync_size(&mut self, size: Vec2) {
        if self.built_for == Some(size) {
            return;
        }
        let viewport = Viewport::new(size.x as f64, size.y as f64);
        match self.host.as_mut() {
            Some(host) => match host.dispatch(ChartEvent::Resize(viewport)) {
                Ok(_) => self.error_message.clear(),
                Err(e) => self.error_message = e.to_string(),
            },
            None => {
                let Some(path) = self.data_path.clone() else {
                    return;
                };
                match ChartHost::launch(
                    RetainedScene::new(),
                    self.config.clone(),
                    viewport,
                    &CsvFile(path),
                ) {
                    Ok(host) => {
                        self.host = Some(host);
                        self.error_message.clear();
                    }
                    Err(e) => {
                        // No retry: the user has to pick a file again.
                        self.error_message = format!("Could not build chart: {e}");
                        self.data_path = None;
                    }
                }
            }
        }
        self.built_for = Some(size);
    }
}

fn color(spec: &str, opacity: f64) -> Color32 {
    let (r, g, b) = rgb_components(spec);
    Color32::from_rgba_unmultiplied(r, g, b, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn paint_scene(painter: &egui::Painter, origin: Pos2, scene: &RetainedScene) {
    let at = |p: (f64, f64)| origin + Vec2::new(p.0 as f32, p.1 as f32);
    for prim in scene.draw_list() {
        match prim {
            Primitive::Circle {
                center,
                radius,
                fill,
                opacity,
                ..
            } => {
                painter.circle_filled(at(center), radius as f32, color(&fill, opacity));
            }
            Primitive::Line {
                from,
                to,
                stroke,
                opacity,
                ..
            } => {
                painter.line_segment([at(from), at(to)], Stroke::new(1.0, color(&stroke, opacity)));
            }
            Primitive::Text {
                pos,
                text,
                font_px,
                fill,
                opacity,
                rotate,
                align,
                ..
            } => {
                let c = color(&fill, opacity);
                let font = FontId::proportional(font_px as f32);
                if rotate == 0.0 {
                    let anchor = match align {
                        TextAlign::Start => Align2::LEFT_BOTTOM,
                        TextAlign::Middle => Align2::CENTER_BOTTOM,
                        TextAlign::End => Align2::RIGHT_BOTTOM,
                    };
                    painter.text(at(pos), anchor, text, font, c);
                } else {
                    let galley = painter.layout_no_wrap(text, font, c);
                    let size = galley.size();
                    // Rotation pivots on the galley's top-left corner; shift so the
                    // text's baseline midpoint lands on `pos`.
                    let anchor = at(pos);
                    let top_left = Pos2::new(anchor.x - size.y * 0.8, anchor.y + size.x / 2.0);
                    painter.add(
                        egui::epaint::TextShape::new(top_left, galley, c)
                            .with_angle((rotate as f32).to_radians()),
                    );
                }
            }
        }
    }

    if let Some(tip) = scene.tooltip_box(TOOLTIP_FONT_PX) {
        let rect = Rect::from_min_size(
            at(tip.origin),
            Vec2::new(tip.size.0 as f32, tip.size.1 as f32),
        );
        painter.rect_filled(rect, 4.0, Color32::from_black_alpha(200));
        for (i, line) in tip.lines.iter().enumerate() {
            let baseline = tip.origin.1 + tip.padding + (i as f64 + 1.0) * tip.line_height;
            painter.text(
                at((tip.origin.0 + tip.size.0 / 2.0, baseline)),
                Align2::CENTER_BOTTOM,
                line,
                FontId::proportional(TOOLTIP_FONT_PX as f32),
                Color32::WHITE,
            );
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open CSV…").clicked() {
                    self.open_dialog();
                }
                match &self.data_path {
                    Some(p) => ui.label(p.display().to_string()),
                    None => ui.label("No data loaded"),
                };
                if let Some(host) = &self.host {
                    let sel = host.session().selection();
                    ui.separator();
                    ui.label(format!(
                        "x: {}  y: {}",
                        sel.x.dimension().label(),
                        sel.y.dimension().label()
                    ));
                }
            });
            if !self.error_message.is_empty() {
                ui.colored_label(Color32::RED, &self.error_message);
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
                let rect = response.rect;
                self.sync_size(rect.size());

                let Some(host) = self.host.as_mut() else {
                    return;
                };

                let dt = ctx.input(|i| i.stable_dt).min(0.1);
                if let Err(e) = host.dispatch(ChartEvent::Frame(Duration::from_secs_f32(dt))) {
                    self.error_message = e.to_string();
                }

                let local = |p: Pos2| ((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);

                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    let hits = host.surface().hit_test(local(pos));
                    let label = hits.into_iter().find(|n| host.session().label_key(*n).is_some());
                    if let Some(node) = label
                        && let Err(e) = host.click_node(node)
                    {
                        self.error_message = e.to_string();
                    }
                }

                let hovered = response.hover_pos().and_then(|pos| {
                    host.surface()
                        .hit_test(local(pos))
                        .into_iter()
                        .find(|n| host.session().record_for_mark(*n).is_some())
                });
                if let Err(e) = host.dispatch(ChartEvent::PointerOver(hovered)) {
                    self.error_message = e.to_string();
                }

                paint_scene(&painter, rect.min, host.surface());

                // Pointer position in data units, top-right of the chart.
                if let Some(pos) = response.hover_pos()
                    && let Some((x, y)) = host.session().data_at(local(pos))
                {
                    let sel = host.session().selection();
                    painter.text(
                        rect.right_top() + Vec2::new(-8.0, 8.0),
                        Align2::RIGHT_TOP,
                        format!(
                            "{}: {x:.1}  {}: {y:.1}",
                            sel.x.dimension().label(),
                            sel.y.dimension().label()
                        ),
                        FontId::proportional(12.0),
                        Color32::GRAY,
                    );
                }

                if host.surface().is_animating() {
                    ctx.request_repaint();
                }
            });
    }
}
