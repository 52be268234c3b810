#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |v: &T| sink.borrow_mut().push(v.clone()))
}

// =============================================================
// Visibility
// =============================================================

#[test]
fn widgets_start_shown_and_toggle() {
    let mut p = Paragraph::new("hello");
    assert!(p.is_shown());
    p.hide();
    assert!(!p.is_shown());
    p.show();
    assert!(p.is_shown());
}

#[test]
fn widget_trait_is_object_safe() {
    let mut widgets: Vec<Box<dyn Widget>> =
        vec![Box::new(Paragraph::new("a")), Box::new(CanvasImage::new("preview"))];
    for w in &mut widgets {
        w.hide();
    }
    assert!(widgets.iter().all(|w| !w.is_shown()));
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_click_fires_callback() {
    let (log, sink) = recorder::<()>();
    let mut button = Button::new("Export").with_link("blob:1", Some("drawing.svg".into())).on_click(sink);
    button.click();
    button.click();
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(button.url.as_deref(), Some("blob:1"));
    assert_eq!(button.filename.as_deref(), Some("drawing.svg"));
}

#[test]
fn button_without_callback_is_fine() {
    let mut button = Button::new("Noop");
    button.click();
    assert!(button.url.is_none());
}

// =============================================================
// Checkbox
// =============================================================

#[test]
fn checkbox_set_is_silent_commit_fires() {
    let (log, sink) = recorder::<bool>();
    let mut cb = Checkbox::new("grid", "Show grid", false).on_change(sink);
    cb.set_checked(true);
    assert!(cb.checked());
    assert!(log.borrow().is_empty());
    cb.commit(false);
    assert!(!cb.checked());
    assert_eq!(*log.borrow(), vec![false]);
}

// =============================================================
// Spread
// =============================================================

fn spread() -> Spread {
    Spread::new("width", "Line width", vec!["thin".into(), "medium".into(), "thick".into()])
}

#[test]
fn spread_select_fires_with_index() {
    let (log, sink) = recorder::<usize>();
    let mut s = spread().on_change(sink);
    s.select(2).unwrap();
    assert_eq!(s.value(), Some(2));
    assert_eq!(*log.borrow(), vec![2]);
}

#[test]
fn spread_rejects_out_of_range() {
    let mut s = spread();
    assert_eq!(s.select(3), Err(ShellError::OptionOutOfRange { index: 3, len: 3 }));
    assert!(s.set_value(Some(5)).is_err());
    assert_eq!(s.value(), None);
}

#[test]
fn spread_set_value_is_silent() {
    let (log, sink) = recorder::<usize>();
    let mut s = spread().on_change(sink);
    s.set_value(Some(1)).unwrap();
    assert_eq!(s.value(), Some(1));
    s.set_value(None).unwrap();
    assert_eq!(s.value(), None);
    assert!(log.borrow().is_empty());
}

// =============================================================
// TextEditor
// =============================================================

#[test]
fn text_editor_input_fires_with_text() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&log);
    let mut editor = TextEditor::new("code", "Type here", "").on_change(move |t: &str| sink.borrow_mut().push(t.to_owned()));
    editor.set_text("silent");
    editor.input("abc");
    assert_eq!(editor.text(), "abc");
    assert_eq!(*log.borrow(), vec!["abc".to_owned()]);
}

#[test]
fn text_editor_valid_and_editing_flags() {
    let mut editor = TextEditor::new("code", "", "x");
    assert!(editor.valid());
    assert!(!editor.editing());
    editor.set_valid(false);
    editor.focus();
    assert!(!editor.valid());
    assert!(editor.editing());
    editor.blur();
    assert!(!editor.editing());
}

// =============================================================
// ButtonList
// =============================================================

#[test]
fn button_list_press_reports_value() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&log);
    let mut list = ButtonList::new("Presets", ["a4", "letter"], ["A4", "Letter"])
        .on_change(move |v: &str| sink.borrow_mut().push(v.to_owned()));
    assert_eq!(list.entries().len(), 2);
    assert_eq!(list.entries()[1].name, "Letter");
    list.press(1).unwrap();
    assert_eq!(*log.borrow(), vec!["letter".to_owned()]);
    assert!(list.press(2).is_err());
}

#[test]
fn button_list_pairs_shortest() {
    let list = ButtonList::new("x", ["a", "b", "c"], ["A"]);
    assert_eq!(list.entries(), &[ButtonEntry { value: "a".into(), name: "A".into() }]);
}

// =============================================================
// NumberInput
// =============================================================

#[test]
fn number_input_clamps_on_commit() {
    let (log, sink) = recorder::<f64>();
    let mut input = NumberInput::new("size", "Size", 5.0).on_change(sink);
    input.set_min(1.0).set_max(10.0);
    assert_eq!(input.commit(0.0), 1.0);
    assert_eq!(input.commit(11.0), 10.0);
    assert_eq!(input.commit(4.5), 4.5);
    assert_eq!(*log.borrow(), vec![1.0, 10.0, 4.5]);
}

#[test]
fn number_input_unbounded_by_default() {
    let mut input = NumberInput::new("n", "N", 0.0);
    assert_eq!(input.commit(-1e300), -1e300);
    assert_eq!(input.min(), f64::NEG_INFINITY);
    assert_eq!(input.max(), f64::INFINITY);
}

#[test]
fn number_input_ignores_nan() {
    let (log, sink) = recorder::<f64>();
    let mut input = NumberInput::new("n", "N", 3.0).on_change(sink);
    assert_eq!(input.commit(f64::NAN), 3.0);
    assert!(log.borrow().is_empty());
}

#[test]
fn number_input_set_value_is_silent() {
    let (log, sink) = recorder::<f64>();
    let mut input = NumberInput::new("n", "N", 3.0).on_change(sink);
    input.set_value(100.0);
    assert_eq!(input.value(), 100.0);
    assert!(log.borrow().is_empty());
}

// =============================================================
// CanvasImage
// =============================================================

#[test]
fn canvas_image_resize() {
    let mut image = CanvasImage::new("Preview");
    assert_eq!((image.width(), image.height()), (0, 0));
    image.resize(64, 32);
    assert_eq!((image.width(), image.height()), (64, 32));
}
