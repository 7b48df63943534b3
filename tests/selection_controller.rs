use census_scatter::models::{Dimension, Record, XDimension, YDimension};
use census_scatter::scene::RetainedScene;
use census_scatter::selection::LabelGroup;
use census_scatter::{
    AxisSelectionState, ChartConfig, ChartEvent, ChartHost, ClickOutcome, Viewport,
};
use std::time::Duration;

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

fn click(host: &mut ChartHost<RetainedScene>, key: &str) -> ClickOutcome {
    host.dispatch(ChartEvent::LabelClick(key.into()))
        .unwrap()
        .expect("label clicks report an outcome")
}

fn frame(host: &mut ChartHost<RetainedScene>, ms: u64) {
    host.dispatch(ChartEvent::Frame(Duration::from_millis(ms)))
        .unwrap();
}

/// Exactly one active label, mirrored in the scene's classes.
fn assert_single_active(scene: &RetainedScene, group: &LabelGroup, expected: Dimension) {
    assert_eq!(group.active_count(), 1);
    assert_eq!(group.active(), Some(expected));
    for label in &group.labels {
        let on = label.dimension == expected;
        assert_eq!(scene.has_class(label.node, "active"), on, "{:?}", label.dimension);
        assert_eq!(scene.has_class(label.node, "inactive"), !on, "{:?}", label.dimension);
    }
}

#[test]
fn starts_on_poverty_and_age() {
    let mut h = host();
    let s = h.session();
    assert_eq!(s.selection(), AxisSelectionState::default());
    assert_eq!(s.selection().x, XDimension::Poverty);
    assert_eq!(s.selection().y, YDimension::Age);
    assert_single_active(h.surface(), s.x_labels(), Dimension::Poverty);
    assert_single_active(h.surface(), s.y_labels(), Dimension::Age);

    let mark = h.session().marks()[0];
    h.dispatch(ChartEvent::PointerOver(Some(mark))).unwrap();
    let (shown, tip) = h.surface().visible_tooltip().unwrap();
    assert_eq!(shown, mark);
    assert_eq!(tip.html, "AL<br>Poverty: 18.1<br>Age: 38.1");
    assert_eq!(tip.offset, (80.0, -60.0));
}

#[test]
fn clicking_smokes_switches_the_x_axis() {
    let mut h = host();
    let mark = h.session().marks()[0];
    let label = h.session().mark_labels()[0];
    let before = h.surface().value(mark, "cx").unwrap();
    let y_before = *h.session().y_scale();

    let outcome = click(&mut h, "smokes");
    assert_eq!(
        outcome,
        ClickOutcome::Updated(AxisSelectionState {
            x: XDimension::Smokes,
            y: YDimension::Age,
        })
    );

    let s = h.session();
    let x = *s.x_scale();
    assert!((x.domain.0 - 0.8 * 18.4).abs() < 1e-9);
    assert!((x.domain.1 - 1.2 * 21.1).abs() < 1e-9);
    assert_eq!(*s.y_scale(), y_before);
    assert_single_active(h.surface(), s.x_labels(), Dimension::Smokes);
    assert_single_active(h.surface(), s.y_labels(), Dimension::Age);

    // Marks animate in place from where they were.
    let target = x.map(21.1);
    assert_eq!(h.surface().value(mark, "cx"), Some(before));
    assert!(h.surface().is_animating());
    frame(&mut h, 1000);
    assert!(!h.surface().is_animating());
    assert!((h.surface().value(mark, "cx").unwrap() - target).abs() < 1e-9);
    assert!((h.surface().value(label, "x").unwrap() - (target - 12.0)).abs() < 1e-9);

    h.dispatch(ChartEvent::PointerOver(Some(mark))).unwrap();
    let (_, tip) = h.surface().visible_tooltip().unwrap();
    assert_eq!(tip.html, "AL<br>Smokes: 21.1<br>Age: 38.1");
}

#[test]
fn clicking_the_active_label_is_a_no_op() {
    let mut h = host();
    let transitions = h.surface().transitions_started();
    let computations = h.session().scale_computations();
    let x_before = *h.session().x_scale();

    assert_eq!(click(&mut h, "poverty"), ClickOutcome::Unchanged);
    assert_eq!(click(&mut h, "age"), ClickOutcome::Unchanged);

    assert_eq!(h.surface().transitions_started(), transitions);
    assert_eq!(h.session().scale_computations(), computations);
    assert_eq!(*h.session().x_scale(), x_before);
    assert!(!h.surface().is_animating());
    assert_single_active(h.surface(), h.session().x_labels(), Dimension::Poverty);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut h = host();
    let transitions = h.surface().transitions_started();
    assert_eq!(click(&mut h, "bogus"), ClickOutcome::Ignored);
    assert_eq!(click(&mut h, "Poverty"), ClickOutcome::Ignored);
    assert_eq!(h.session().selection(), AxisSelectionState::default());
    assert_eq!(h.surface().transitions_started(), transitions);
}

#[test]
fn every_state_keeps_one_active_label_per_axis() {
    let mut h = host();
    for x in XDimension::ALL {
        for y in YDimension::ALL {
            click(&mut h, x.dimension().key());
            click(&mut h, y.dimension().key());
            frame(&mut h, 1000);
            let s = h.session();
            assert_eq!(s.selection(), AxisSelectionState { x, y });
            assert_single_active(h.surface(), s.x_labels(), x.dimension());
            assert_single_active(h.surface(), s.y_labels(), y.dimension());
        }
    }
}

#[test]
fn y_click_moves_marks_vertically_and_redraws_ticks() {
    let mut h = host();
    let mark = h.session().marks()[1];
    click(&mut h, "income");
    frame(&mut h, 1000);

    let s = h.session();
    let y = *s.y_scale();
    assert_eq!(y.range, (500.0, 0.0));
    assert!((h.surface().value(mark, "cy").unwrap() - y.map(71000.0)).abs() < 1e-9);
    assert!(s.y_axis().tick_labels().contains(&"45,000"));
    // Old age ticks have faded out and been removed.
    assert!(s.y_axis().tick_node("30").is_none());
}

#[test]
fn second_click_retargets_from_the_current_position() {
    let mut h = host();
    let mark = h.session().marks()[0];
    click(&mut h, "smokes");
    frame(&mut h, 500);
    let midway = h.surface().value(mark, "cx").unwrap();

    click(&mut h, "obesity");
    assert!((h.surface().value(mark, "cx").unwrap() - midway).abs() < 1e-9);
    frame(&mut h, 1000);
    let x = *h.session().x_scale();
    assert!((h.surface().value(mark, "cx").unwrap() - x.map(32.4)).abs() < 1e-9);
    assert_single_active(h.surface(), h.session().x_labels(), Dimension::Obesity);
}

#[test]
fn clicking_a_label_node_dispatches_its_key() {
    let mut h = host();
    let income = h
        .session()
        .y_labels()
        .labels
        .iter()
        .find(|l| l.dimension == Dimension::Income)
        .unwrap()
        .node;
    assert_eq!(h.session().label_key(income), Some("income"));
    assert!(matches!(h.click_node(income).unwrap(), Some(ClickOutcome::Updated(_))));
    assert_eq!(h.session().selection().y, YDimension::Income);

    let mark = h.session().marks()[0];
    assert_eq!(h.click_node(mark).unwrap(), None);
}
