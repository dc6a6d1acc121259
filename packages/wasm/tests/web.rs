//! Browser tests, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use canvas_wasm::CanvasEditor;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn rejects_unknown_block_type() {
    let mut editor = CanvasEditor::new("resource-1");
    assert!(editor.add_block("poll", 0.0, 0.0).is_err());
    assert!(!editor.can_undo());
}

#[wasm_bindgen_test]
fn rejects_foreign_payload() {
    let mut editor = CanvasEditor::new("resource-1");
    let id = editor.add_block("title", 0.0, 0.0).unwrap();
    assert!(editor.update_data(&id, "image", "{\"url\":\"a.png\"}").is_err());
}

#[wasm_bindgen_test]
fn rejects_malformed_document() {
    assert!(CanvasEditor::from_json("resource-1", "{ \"blocks\": 3 }").is_err());
}

#[wasm_bindgen_test]
fn renders_after_context_change() {
    let mut editor = CanvasEditor::new("resource-1");
    editor.add_block("title", 0.0, 0.0).unwrap();
    editor
        .set_context(r#"{ "resourceId": "res-1", "resource": { "title": "Bug Hunt" } }"#)
        .unwrap();
    assert!(editor.render_html().unwrap().contains("Bug Hunt"));
}
