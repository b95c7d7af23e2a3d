use super::*;

#[test]
fn test_rect_edges() {
    let r = Rect::new(1, 2, 10, 5);
    assert_eq!(r.right(), 11);
    assert_eq!(r.bottom(), 7);
    assert_eq!(r.center_x(), 6);
    assert_eq!(r.center_y(), 4);
}

#[test]
fn test_canvas_set_get() {
    let mut c = Canvas::new(5, 5, CharSet::Unicode);
    c.set(2, 3, 'X');
    assert_eq!(c.get(2, 3), 'X');
    assert_eq!(c.get(0, 0), ' ');
}

#[test]
fn test_canvas_set_out_of_bounds() {
    let mut c = Canvas::new(3, 3, CharSet::Unicode);
    // Should not panic
    c.set(10, 10, 'X');
    assert_eq!(c.get(10, 10), ' ');
    c.write_str(1, 9, "off");
}

#[test]
fn test_merge_arms_crossing() {
    let mut c = Canvas::new(5, 5, CharSet::Unicode);
    c.set(2, 2, '─');
    c.merge_arms(2, 2, Arms::new(true, true, false, false));
    assert_eq!(c.get(2, 2), '┼');
}

#[test]
fn test_single_arm_stays_single_after_redraw() {
    // A lone arm draws as a full line but must still join as one arm.
    let mut c = Canvas::new(5, 5, CharSet::Unicode);
    c.merge_arms(2, 2, Arms::new(true, false, false, false));
    assert_eq!(c.get(2, 2), '│');
    c.merge_arms(2, 2, Arms::new(false, false, false, true));
    assert_eq!(c.get(2, 2), '└');
}

#[test]
fn test_write_str_clears_mask() {
    let mut c = Canvas::new(5, 3, CharSet::Unicode);
    c.merge_arms(1, 1, Arms::new(false, false, true, true));
    c.write_str(1, 1, "x");
    c.merge_arms(1, 1, Arms::new(true, false, false, false));
    assert_eq!(c.get(1, 1), '│');
}

#[test]
fn test_merge_arms_overwrites_text() {
    let mut c = Canvas::new(5, 5, CharSet::Ascii);
    c.set(1, 1, 'k');
    c.merge_arms(1, 1, Arms::new(true, true, false, false));
    assert_eq!(c.get(1, 1), '|');
}

#[test]
fn test_polyline_corners() {
    let mut c = Canvas::new(10, 10, CharSet::Unicode);
    c.polyline(&[(1, 1), (1, 3), (5, 3), (5, 5)]);
    assert_eq!(c.get(1, 2), '│');
    assert_eq!(c.get(1, 3), '└');
    assert_eq!(c.get(3, 3), '─');
    assert_eq!(c.get(5, 3), '┐');
    assert_eq!(c.get(5, 4), '│');
}

#[test]
fn test_polylines_sharing_a_trunk_form_tee() {
    let mut c = Canvas::new(12, 8, CharSet::Unicode);
    c.polyline(&[(5, 0), (5, 2), (1, 2), (1, 4)]);
    c.polyline(&[(5, 0), (5, 2), (9, 2), (9, 4)]);
    assert_eq!(c.get(5, 2), '┴');
    assert_eq!(c.get(1, 2), '┌');
    assert_eq!(c.get(9, 2), '┐');
}

#[test]
fn test_clear() {
    let mut c = Canvas::new(6, 3, CharSet::Ascii);
    c.write_str(0, 1, "abcdef");
    c.clear(Rect::new(1, 0, 3, 3));
    assert_eq!(c.render_to_string(), "\na   ef\n");
}

#[test]
fn test_canvas_draw_box() {
    let mut c = Canvas::new(10, 5, CharSet::Unicode);
    let bc = BoxChars::unicode();
    c.draw_box(Rect::new(0, 0, 5, 3), &bc);
    assert_eq!(c.get(0, 0), '┌');
    assert_eq!(c.get(4, 0), '┐');
    assert_eq!(c.get(0, 2), '└');
    assert_eq!(c.get(4, 2), '┘');
    assert_eq!(c.get(1, 0), '─');
    assert_eq!(c.get(0, 1), '│');
}

#[test]
fn test_draw_box_too_small_is_noop() {
    let mut c = Canvas::new(4, 4, CharSet::Unicode);
    c.draw_box(Rect::new(0, 0, 1, 3), &BoxChars::unicode());
    assert_eq!(c.get(0, 0), ' ');
}

#[test]
fn test_canvas_to_string_trims() {
    let mut c = Canvas::new(10, 3, CharSet::Ascii);
    c.set(0, 0, 'A');
    let s = c.to_string();
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines, vec!["A"]);
    assert!(s.ends_with('\n'));
}
