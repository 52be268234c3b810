use super::*;
use serde_json::{Value, json};

fn config() -> ReplayConfig {
    ReplayConfig { message_secs: 1, zoom_step: 0.1, realtime: false }
}

fn mouse(kind: &str, at_ms: u64, x: f64, y: f64, buttons: u16) -> Value {
    json!({
        "at_ms": at_ms,
        "type": kind,
        "device": { "kind": "mouse", "page": { "x": x, "y": y }, "buttons": buttons, "button": 0 },
    })
}

fn script(events: Vec<Value>) -> Script {
    let doc = json!({
        "viewport": { "width": 800.0, "height": 600.0 },
        "events": events,
    });
    serde_json::from_value(doc).unwrap()
}

async fn replay(script: &Script) -> (Summary, Vec<Value>) {
    let mut out = Vec::new();
    let summary = run(script, &config(), &mut out).await.unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (summary, lines)
}

// =============================================================================
// Script parsing
// =============================================================================

#[test]
fn parses_every_event_type() {
    let text = r#"{
        "viewport": { "width": 320, "height": 240, "pixel_scale": 2 },
        "origin": { "x": 10, "y": 20 },
        "events": [
            { "type": "down", "device": { "kind": "touch", "touches": [{ "x": 1, "y": 2 }] } },
            { "type": "move", "device": { "kind": "mouse", "page": { "x": 1, "y": 2 } }, "target": "elsewhere" },
            { "type": "up", "device": { "kind": "touch", "touches": [] } },
            { "type": "context_menu", "device": { "kind": "mouse", "page": { "x": 1, "y": 2 }, "buttons": 2, "button": 2 } },
            { "type": "wheel", "page": { "x": 5, "y": 5 }, "delta_x": 0, "delta_y": -3 },
            { "type": "key_down", "code": "KeyA", "modifiers": { "ctrl": true } },
            { "type": "key_up", "code": "KeyA" },
            { "type": "resize", "width": 100, "height": 50 },
            { "at_ms": 5, "type": "message", "text": "saved" },
            { "type": "error", "text": "failed" },
            { "type": "hide_message" },
            { "at_ms": 900, "type": "tick" }
        ]
    }"#;
    let script = Script::parse(text).unwrap();
    assert_eq!(script.viewport, ScriptViewport { width: 320.0, height: 240.0, pixel_scale: 2.0 });
    assert_eq!(script.origin, Some(Vector2::new(10.0, 20.0)));
    let names: Vec<_> = script.events.iter().map(|e| e.action.name()).collect();
    assert_eq!(
        names,
        [
            "down",
            "move",
            "up",
            "context_menu",
            "wheel",
            "key_down",
            "key_up",
            "resize",
            "message",
            "error",
            "hide_message",
            "tick"
        ]
    );
    assert!(matches!(script.events[7].action, Action::Resize(ScriptViewport { pixel_scale, .. }) if pixel_scale == 1.0));
    assert_eq!(script.events[8].at_ms, 5);
}

#[test]
fn unknown_event_type_is_rejected() {
    let text = r#"{ "viewport": { "width": 1, "height": 1 }, "events": [{ "type": "teleport" }] }"#;
    assert!(matches!(Script::parse(text), Err(ReplayError::Json(_))));
}

#[test]
fn missing_script_file_names_the_path() {
    let err = Script::load(Path::new("/nonexistent/session.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/session.json"));
}

// =============================================================================
// Replay
// =============================================================================

#[tokio::test]
async fn start_line_reports_first_frame_and_resize() {
    let (summary, lines) = replay(&script(vec![])).await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "start");
    assert_eq!(lines[0]["frames"], 1);
    assert_eq!(lines[0]["calls"][0]["handler"], "window_resize");
    assert_eq!(lines[0]["calls"][0]["info"]["width"], 800.0);
    assert_eq!(summary.events, 0);
    assert_eq!(summary.frames, 1);
    assert_eq!(summary.size, Vector2::new(800.0, 600.0));
    assert_eq!(lines[1]["summary"]["zoom"], 1.0);
}

#[tokio::test]
async fn primary_drag_pans_the_view() {
    let (summary, lines) = replay(&script(vec![
        mouse("down", 0, 400.0, 300.0, 1),
        mouse("move", 10, 450.0, 320.0, 1),
        mouse("up", 20, 450.0, 320.0, 0),
    ]))
    .await;
    assert_eq!(summary.center, Vector2::new(-50.0, -20.0));
    assert_eq!(lines[1]["dispatch"]["prevent_default"], true);
    assert_eq!(lines[2]["calls"][0]["handled"], true);
    assert_eq!(lines[3]["calls"][0]["handler"], "mouse_up");
    assert_eq!(summary.cursor, Some(Vector2::new(450.0, 320.0)));
}

#[tokio::test]
async fn move_without_press_is_not_handled() {
    let (summary, lines) = replay(&script(vec![mouse("move", 0, 100.0, 100.0, 0)])).await;
    assert_eq!(lines[1]["dispatch"]["redrawn"], false);
    assert_eq!(lines[1]["frames"], 0);
    assert_eq!(summary.center, Vector2::ZERO);
}

#[tokio::test]
async fn off_surface_press_never_reaches_the_handler() {
    let mut down = mouse("down", 0, 400.0, 300.0, 1);
    down["target"] = json!("elsewhere");
    let (_, lines) = replay(&script(vec![down])).await;
    assert_eq!(lines[1]["dispatch"], json!({ "prevent_default": false, "redrawn": false }));
    assert!(lines[1].get("calls").is_none());
}

#[tokio::test]
async fn wheel_zooms_around_the_cursor() {
    let wheel = json!({ "type": "wheel", "page": { "x": 600.0, "y": 300.0 }, "delta_x": 0.0, "delta_y": -100.0 });
    let (summary, lines) = replay(&script(vec![wheel])).await;
    assert!((summary.zoom - 1.1).abs() < 1e-9);
    let screen_x = (200.0 - summary.center.x) * summary.zoom + 400.0;
    assert!((screen_x - 600.0).abs() < 1e-9);
    assert_eq!(lines[1]["dispatch"]["prevent_default"], true);
    assert_eq!(lines[1]["frames"], 1);
}

#[tokio::test]
async fn zoom_keys_cancel_out() {
    let (summary, _) = replay(&script(vec![
        json!({ "type": "key_down", "code": "Equal" }),
        json!({ "type": "key_up", "code": "Equal" }),
        json!({ "type": "key_down", "code": "Minus" }),
    ]))
    .await;
    assert!((summary.zoom - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn unhandled_key_still_redraws() {
    let (_, lines) = replay(&script(vec![json!({ "type": "key_down", "code": "KeyQ" })])).await;
    assert_eq!(lines[1]["dispatch"], json!({ "prevent_default": false, "redrawn": true }));
    assert_eq!(lines[1]["calls"][0]["info"]["key"], "keyq");
}

#[tokio::test]
async fn message_hides_then_is_removed_on_later_events() {
    let (summary, lines) = replay(&script(vec![
        json!({ "at_ms": 0, "type": "message", "text": "saved" }),
        json!({ "at_ms": 1500, "type": "tick" }),
        json!({ "at_ms": 2600, "type": "tick" }),
    ]))
    .await;
    assert_eq!(lines[1]["shown"], 1);
    assert_eq!(lines[2]["messages"], json!([{ "event": "hidden", "id": 1 }]));
    assert_eq!(lines[3]["messages"], json!([{ "event": "removed", "id": 1 }]));
    assert_eq!(summary.message, None);
}

#[tokio::test]
async fn hide_message_reports_the_hidden_id() {
    let (summary, lines) = replay(&script(vec![
        json!({ "type": "error", "text": "offline" }),
        json!({ "at_ms": 5, "type": "message", "text": "saved" }),
        json!({ "at_ms": 10, "type": "hide_message" }),
    ]))
    .await;
    assert_eq!(lines[2]["shown"], 2);
    assert_eq!(lines[3]["hidden"], 2);
    assert_eq!(summary.message, None);
}

#[tokio::test]
async fn summary_reports_the_message_on_screen() {
    let (summary, _) = replay(&script(vec![
        json!({ "type": "message", "text": "saved" }),
        json!({ "at_ms": 400, "type": "error", "text": "offline" }),
    ]))
    .await;
    assert_eq!(summary.message.as_deref(), Some("offline"));
}

#[tokio::test]
async fn resize_keeps_center_and_scales_to_device_pixels() {
    let (summary, lines) = replay(&script(vec![
        mouse("down", 0, 400.0, 300.0, 1),
        mouse("move", 0, 410.0, 300.0, 1),
        json!({ "type": "resize", "width": 200.0, "height": 100.0, "pixel_scale": 2.0 }),
    ]))
    .await;
    assert_eq!(summary.size, Vector2::new(400.0, 200.0));
    assert_eq!(summary.pixel_scale, 2.0);
    assert_eq!(summary.zoom, 2.0);
    assert_eq!(summary.center, Vector2::new(-10.0, 0.0));
    assert_eq!(lines[3]["calls"][0]["info"], json!({ "width": 200.0, "height": 100.0 }));
}

#[tokio::test]
async fn invalid_pixel_scale_aborts_the_replay() {
    let mut bad = script(vec![]);
    bad.viewport.pixel_scale = 0.0;
    let mut out = Vec::new();
    let err = run(&bad, &config(), &mut out).await.unwrap_err();
    assert!(matches!(err, ReplayError::Shell(ShellError::InvalidPixelScale(_))));
}

#[tokio::test]
async fn realtime_replay_waits_for_timestamps() {
    let paced = script(vec![json!({ "at_ms": 30, "type": "tick" })]);
    let realtime = ReplayConfig { realtime: true, ..config() };
    let started = std::time::Instant::now();
    let mut out = Vec::new();
    run(&paced, &realtime, &mut out).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(30));
}
