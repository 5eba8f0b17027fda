use super::*;

fn triangle() -> Vec<Point> {
    vec![
        Point::new(0.0, 10.0),
        Point::new(5.0, 0.0),
        Point::new(10.0, 10.0),
    ]
}

#[test]
fn apex_row_yields_a_single_point_pair() {
    let mut xs = Vec::new();
    polygon_crossings(&triangle(), 0.0, &mut xs);
    assert_eq!(xs, vec![5.0, 5.0]);
    let spans: Vec<_> = crossing_spans(&xs).collect();
    assert_eq!(spans, vec![(5, 5)]);
}

#[test]
fn horizontal_edge_and_bottom_row_contribute_nothing() {
    let mut xs = Vec::new();
    polygon_crossings(&triangle(), 10.0, &mut xs);
    assert!(xs.is_empty());
}

#[test]
fn crossings_are_sorted_regardless_of_winding() {
    let mut cw = triangle();
    let mut xs = Vec::new();
    polygon_crossings(&cw, 5.0, &mut xs);
    assert_eq!(xs, vec![2.5, 7.5]);

    cw.reverse();
    polygon_crossings(&cw, 5.0, &mut xs);
    assert_eq!(xs, vec![2.5, 7.5]);
}

#[test]
fn odd_crossing_count_drops_the_last_one() {
    let xs = [1.0, 3.0, 8.0];
    let spans: Vec<_> = crossing_spans(&xs).collect();
    assert_eq!(spans, vec![(1, 3)]);
}

#[test]
fn fractional_crossings_widen_outward() {
    let xs = [1.2, 3.4];
    let spans: Vec<_> = crossing_spans(&xs).collect();
    assert_eq!(spans, vec![(1, 4)]);
}

#[test]
fn ellipse_span_misses_rows_outside() {
    assert_eq!(ellipse_span(5.0, 5.0, 5.0, 5.0, 10), None);
    assert_eq!(ellipse_span(5.0, 5.0, 5.0, 5.0, -1), None);
}

#[test]
fn ellipse_span_center_row_is_widest() {
    let (x0, x1) = ellipse_span(5.0, 5.0, 5.0, 5.0, 4).unwrap();
    // dy = -0.1, span = 5 * sqrt(0.99) ~ 4.975
    assert_eq!((x0, x1), (0, 10));
    let (t0, t1) = ellipse_span(5.0, 5.0, 5.0, 5.0, 0).unwrap();
    assert!(t1 - t0 < x1 - x0);
}
