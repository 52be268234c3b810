use super::*;

const SECS: Duration = Duration::from_secs(1);

fn at(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

fn board() -> MessageBoard {
    MessageBoard::new(Duration::from_secs(10))
}

#[test]
fn default_duration_is_ten_seconds() {
    assert_eq!(MessageBoard::default().duration(), Duration::from_secs(10));
}

#[test]
fn show_makes_message_current() {
    let mut b = board();
    let id = b.show_at("Saved", false, at(0));
    let current = b.current().unwrap();
    assert_eq!(current.id, id);
    assert_eq!(current.text, "Saved");
    assert!(!current.is_error);
    assert_eq!(b.next_deadline(), Some(at(10)));
}

#[test]
fn auto_hide_after_duration() {
    let mut b = board();
    let id = b.show_at("Saved", false, at(0));
    assert!(b.tick(at(9)).is_empty());
    assert_eq!(b.tick(at(10)), vec![MessageEvent::Hidden(id)]);
    assert!(b.current().is_none());
    assert_eq!(b.messages().len(), 1);
}

#[test]
fn fallback_removes_fading_message() {
    let mut b = board();
    let id = b.show_at("Saved", false, at(0));
    b.tick(at(10));
    assert!(b.tick(at(19)).is_empty());
    assert_eq!(b.tick(at(20)), vec![MessageEvent::Removed(id)]);
    assert!(b.messages().is_empty());
}

#[test]
fn late_tick_fires_both_phases() {
    let mut b = board();
    let id = b.show_at("Saved", false, at(0));
    assert_eq!(b.tick(at(60)), vec![MessageEvent::Hidden(id), MessageEvent::Removed(id)]);
}

#[test]
fn animation_finished_cancels_fallback() {
    let mut b = board();
    let id = b.show_at("Saved", true, at(0));
    b.hide_at(at(3));
    assert!(b.animation_finished(id));
    assert!(b.messages().is_empty());
    assert!(b.tick(at(100)).is_empty());
}

#[test]
fn animation_finished_ignores_shown_message() {
    let mut b = board();
    let id = b.show_at("Saved", false, at(0));
    assert!(!b.animation_finished(id));
    assert!(b.current().is_some());
}

#[test]
fn hide_cancels_auto_hide_and_schedules_fallback() {
    let mut b = board();
    let id = b.show_at("Saved", false, at(0));
    assert_eq!(b.hide_at(at(2)), Some(id));
    assert!(b.current().is_none());
    assert_eq!(b.next_deadline(), Some(at(12)));
    assert!(b.tick(at(11)).is_empty());
    assert_eq!(b.tick(at(12)), vec![MessageEvent::Removed(id)]);
}

#[test]
fn hide_with_nothing_shown_is_noop() {
    let mut b = board();
    assert_eq!(b.hide_at(at(0)), None);
    let id = b.show_at("x", false, at(0));
    b.hide_at(at(1));
    assert_eq!(b.hide_at(at(2)), None);
    assert_eq!(b.messages()[0].phase, MessagePhase::Fading { remove_at: at(11) });
    assert_eq!(b.messages()[0].id, id);
}

#[test]
fn new_message_fades_previous() {
    let mut b = board();
    let first = b.show_at("one", false, at(0));
    let second = b.show_at("two", true, at(4) + SECS);
    assert_eq!(b.current().map(|m| m.id), Some(second));
    assert_eq!(b.messages()[0].phase, MessagePhase::Fading { remove_at: at(15) });
    // The first message's auto-hide at 10s never fires.
    assert!(b.tick(at(10)).is_empty());
    assert_eq!(b.tick(at(15)), vec![MessageEvent::Hidden(second), MessageEvent::Removed(first)]);
}

#[test]
fn ids_increase() {
    let mut b = board();
    let a = b.show_at("a", false, at(0));
    let c = b.show_at("b", false, at(0));
    assert_eq!(a, MessageId(1));
    assert_eq!(c, MessageId(2));
}

#[test]
fn event_serializes_tagged() {
    let json = serde_json::to_value(MessageEvent::Removed(MessageId(3))).unwrap();
    assert_eq!(json, serde_json::json!({"event": "removed", "id": 3}));
}
