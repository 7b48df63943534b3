use census_scatter::models::{Dimension, Record, XDimension, YDimension};
use census_scatter::scale::{LinearScale, compute_scale};
use census_scatter::ChartError;

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

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn default_axes_domains_are_padded() {
    let rows = census_pair();
    let x = compute_scale(&rows, XDimension::Poverty, 0.0, 840.0).unwrap();
    let y = compute_scale(&rows, YDimension::Age, 500.0, 0.0).unwrap();
    assert!(approx(x.domain.0, 10.24), "{:?}", x.domain);
    assert!(approx(x.domain.1, 21.72), "{:?}", x.domain);
    assert!(approx(y.domain.0, 26.48), "{:?}", y.domain);
    assert!(approx(y.domain.1, 45.72), "{:?}", y.domain);
}

#[test]
fn padding_holds_for_every_dimension() {
    let rows = census_pair();
    for dim in Dimension::ALL {
        let s = compute_scale(&rows, dim, 0.0, 100.0).unwrap();
        let min = rows.iter().map(|r| r.value(dim)).fold(f64::INFINITY, f64::min);
        let max = rows.iter().map(|r| r.value(dim)).fold(f64::NEG_INFINITY, f64::max);
        assert!(approx(s.domain.0, 0.8 * min), "{dim}");
        assert!(approx(s.domain.1, 1.2 * max), "{dim}");
        assert!(s.domain.0 < s.domain.1, "{dim}");
    }
}

#[test]
fn record_values_land_inside_the_range() {
    let rows = census_pair();
    for dim in Dimension::ALL {
        // Inverted range, as the vertical axis uses.
        let s = compute_scale(&rows, dim, 500.0, 0.0).unwrap();
        for r in &rows {
            let px = s.map(r.value(dim));
            assert!((0.0..=500.0).contains(&px), "{dim}: {px}");
        }
    }
}

#[test]
fn mapping_is_linear() {
    let s = LinearScale::new((10.0, 30.0), (0.0, 400.0));
    assert_eq!(s.map(10.0), 0.0);
    assert_eq!(s.map(20.0), 200.0);
    assert_eq!(s.map(30.0), 400.0);
}

#[test]
fn same_inputs_give_equal_scales() {
    let rows = census_pair();
    let a = compute_scale(&rows, Dimension::Income, 500.0, 0.0).unwrap();
    let b = compute_scale(&rows, Dimension::Income, 500.0, 0.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_dataset_is_an_error() {
    let e = compute_scale(&[], Dimension::Poverty, 0.0, 100.0);
    assert!(matches!(e, Err(ChartError::EmptyDataset)));
}

#[test]
fn income_ticks_use_thousands_separators() {
    let rows = census_pair();
    let s = compute_scale(&rows, Dimension::Income, 500.0, 0.0).unwrap();
    let (ticks, step) = s.ticks(10);
    let labels: Vec<String> = ticks
        .iter()
        .map(|t| census_scatter::scale::format_tick(*t, step))
        .collect();
    assert_eq!(labels.first().map(String::as_str), Some("35,000"));
    assert!(labels.contains(&"45,000".to_string()));
    assert_eq!(labels.last().map(String::as_str), Some("85,000"));
}
