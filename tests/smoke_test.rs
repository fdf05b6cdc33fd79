// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation
//!
//! Smoke test for the headless host
//!
//! Renders real files through the full wiring (line cache subscription,
//! event queue, drain loop, recording surface) and checks the frame that
//! comes out.

use std::fs;

use rasterview::lines::Position;
use rasterview::view::ViewConfig;
use rasterview::{render_text, DemoOptions};
use tempfile::TempDir;

fn sample(lines: usize) -> String {
    (1..=lines).map(|i| format!("row {i}\n")).collect()
}

#[test]
fn test_renders_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.txt");
    fs::write(&path, "fn main() {\n    println!(\"hi\");\n}\n").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let output = render_text(&text, &DemoOptions::default()).unwrap();

    assert_eq!(output.commands[0], "configure 800x600 @1");
    assert!(output.commands.contains(&"text \"fn main() {\" 35 17".to_string()));
    assert!(output.commands.contains(&"text \"3\" 10 65".to_string()));
    assert!(output.missing.is_empty());
}

#[test]
fn test_scroll_target_is_visible_with_cursor() {
    let options = DemoOptions {
        scroll_to: Some(Position::new(120, 3)),
        ..DemoOptions::default()
    };
    let output = render_text(&sample(200), &options).unwrap();

    assert!(output.viewport.contains(Position::new(120, 3)));
    // Line 120 sits on the bottom row: 600px canvas, 24px rows
    assert!(output
        .commands
        .iter()
        .any(|c| c.starts_with("text \"row 121\"")));
    assert!(output.commands.iter().any(|c| c.starts_with("rect") && c.ends_with(" 2 24")));
}

#[test]
fn test_find_matches_highlighted() {
    let options = DemoOptions {
        find: Some("row 2".to_string()),
        config: ViewConfig {
            draw_gutter: false,
            ..ViewConfig::default()
        },
        ..DemoOptions::default()
    };
    let output = render_text(&sample(3), &options).unwrap();

    // "row 2" on the second line, 5 chars wide, 5px editor padding
    assert!(output.commands.contains(&"rect 5 24 50 24".to_string()));
}

#[test]
fn test_high_dpi_frame() {
    let options = DemoOptions {
        width: 400.0,
        height: 300.0,
        device_pixel_ratio: 2.0,
        ..DemoOptions::default()
    };
    let output = render_text(&sample(5), &options).unwrap();

    assert_eq!(output.commands[0], "configure 800x600 @2");
    assert!(output.commands.contains(&"clip 0 0 400 300".to_string()));
}
