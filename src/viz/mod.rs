//! Static export: paint a retained scene to **SVG** with Plotters.
//!
//! - Paints the scene's draw list at its current animation time
//! - Rotated axis labels, active/inactive label emphasis
//! - The hovered mark's tooltip, if any

pub mod util;

use crate::scene::{Primitive, RetainedScene, TextAlign};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontStyle, FontTransform};
use plotters_svg::SVGBackend;
use std::path::Path;

use util::{rgb_color, to_px};

/// Font size used for tooltip text.
pub const TOOLTIP_FONT_PX: f64 = 12.0;

/// Paint `scene` into an SVG document held in memory.
pub fn render_svg(scene: &RetainedScene, width: u32, height: u32) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_scene(&root, scene)?;
        root.present()?;
    }
    Ok(buf)
}

/// Paint `scene` into an SVG file.
pub fn write_svg<P: AsRef<Path>>(
    scene: &RetainedScene,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
    draw_scene(&root, scene)?;
    root.present()
        .with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}

fn draw_scene(area: &DrawingArea<SVGBackend<'_>, Shift>, scene: &RetainedScene) -> Result<()> {
    area.fill(&WHITE)?;

    for prim in scene.draw_list() {
        match prim {
            Primitive::Circle {
                center,
                radius,
                fill,
                opacity,
                ..
            } => {
                let style = rgb_color(&fill).mix(opacity).filled();
                area.draw(&Circle::new(to_px(center), radius.round() as i32, style))?;
            }
            Primitive::Line {
                from,
                to,
                stroke,
                opacity,
                ..
            } => {
                let style = rgb_color(&stroke).mix(opacity).stroke_width(1);
                area.draw(&PathElement::new(vec![to_px(from), to_px(to)], style))?;
            }
            Primitive::Text {
                pos,
                text,
                font_px,
                fill,
                opacity,
                bold,
                rotate,
                align,
                ..
            } => {
                let weight = if bold { FontStyle::Bold } else { FontStyle::Normal };
                let mut font: FontDesc = ("sans-serif", font_px, weight).into();
                if rotate <= -45.0 {
                    font = font.transform(FontTransform::Rotate270);
                } else if rotate >= 45.0 {
                    font = font.transform(FontTransform::Rotate90);
                }
                let h_pos = match align {
                    TextAlign::Start => HPos::Left,
                    TextAlign::Middle => HPos::Center,
                    TextAlign::End => HPos::Right,
                };
                let style = font
                    .color(&rgb_color(&fill).mix(opacity))
                    .pos(Pos::new(h_pos, VPos::Bottom));
                area.draw(&Text::new(text, to_px(pos), style))?;
            }
        }
    }

    if let Some(tip) = scene.tooltip_box(TOOLTIP_FONT_PX) {
        let (x, y) = tip.origin;
        let (w, h) = tip.size;
        area.draw(&Rectangle::new(
            [to_px((x, y)), to_px((x + w, y + h))],
            BLACK.mix(0.8).filled(),
        ))?;
        for (i, line) in tip.lines.iter().enumerate() {
            let baseline = y + tip.padding + (i as f64 + 1.0) * tip.line_height;
            let style = FontDesc::from(("sans-serif", TOOLTIP_FONT_PX))
                .color(&WHITE)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            area.draw(&Text::new(line.as_str(), to_px((x + w / 2.0, baseline)), style))?;
        }
    }
    Ok(())
}
