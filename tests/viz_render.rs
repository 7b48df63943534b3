use census_scatter::models::Record;
use census_scatter::viz::{render_svg, write_svg};
use census_scatter::{ChartConfig, ChartEvent, ChartHost, RetainedScene, Viewport};
use std::time::Duration;
use tempfile::tempdir;

fn census_pair() -> Vec<Record> {
    vec![
        Record {
            abbreviation: "AL".into(),
            poverty: 18.1,
            age: 38.1,
            income: 43000.0,
            healthcare: 11.1,
            obesity: 32.4,
            smokes: 21.1,
        },
        Record {
            abbreviation: "AK".into(),
            poverty: 12.8,
            age: 33.1,
            income: 71000.0,
            healthcare: 14.6,
            obesity: 28.4,
            smokes: 18.4,
        },
    ]
}

fn host() -> ChartHost<RetainedScene> {
    ChartHost::launch(
        RetainedScene::new(),
        ChartConfig::default(),
        Viewport::new(960.0, 600.0),
        &census_pair(),
    )
    .unwrap()
}

#[test]
fn svg_has_one_circle_per_record_and_every_label() {
    let h = host();
    let svg = render_svg(h.surface(), 960, 600).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<circle").count(), 2);
    for text in ["AL", "AK", "Poverty", "Smokes", "Obesity", "Age", "Income", "Health Care"] {
        assert!(svg.contains(text), "missing {text}");
    }
}

#[test]
fn svg_shows_the_hovered_tooltip() {
    let mut h = host();
    let al = h.session().marks()[0];
    let quiet = render_svg(h.surface(), 960, 600).unwrap();
    assert!(!quiet.contains("Poverty: 18.1"));

    h.dispatch(ChartEvent::PointerOver(Some(al))).unwrap();
    let svg = render_svg(h.surface(), 960, 600).unwrap();
    assert!(svg.contains("Poverty: 18.1"));
    assert!(svg.contains("Age: 38.1"));
}

#[test]
fn svg_reflects_a_finished_switch() {
    let mut h = host();
    h.dispatch(ChartEvent::LabelClick("income".into())).unwrap();
    h.dispatch(ChartEvent::Frame(Duration::from_millis(1000))).unwrap();
    let svg = render_svg(h.surface(), 960, 600).unwrap();
    assert!(svg.contains("45,000"));
    assert_eq!(svg.matches("<circle").count(), 2);
}

#[test]
fn svg_file_is_written() {
    let h = host();
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    write_svg(h.surface(), &path, 960, 600).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("<circle"));
}
