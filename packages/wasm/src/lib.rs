use canvas_compiler_html::{compile_to_html, CompileOptions};
use canvas_editor::{
    EditorSurface, Modifiers, Mutation, Pipeline, Point, ResizeHandle,
};
use canvas_evaluator::ContextData;
use canvas_model::{BlockId, BlockType, CanvasDocument, Height};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(prefix: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", prefix, e))
}

/// Editing session for a browser host
#[wasm_bindgen]
pub struct CanvasEditor {
    pipeline: Pipeline,
}

#[wasm_bindgen]
impl CanvasEditor {
    /// Blank canvas for a resource or profile
    #[wasm_bindgen(constructor)]
    pub fn new(key: &str) -> CanvasEditor {
        CanvasEditor {
            pipeline: Pipeline::new(EditorSurface::new(key)),
        }
    }

    /// Open a stored document
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(key: &str, json: &str) -> Result<CanvasEditor, JsValue> {
        let document = CanvasDocument::from_json(json).map_err(|e| js_error("Invalid document", e))?;
        let mut surface = EditorSurface::new(key);
        surface
            .load(document)
            .map_err(|e| js_error("Load error", e))?;
        Ok(CanvasEditor {
            pipeline: Pipeline::new(surface),
        })
    }

    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&mut self, block_type: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let block_type: BlockType = block_type.parse().map_err(|e| js_error("Add error", e))?;
        let id = self
            .surface()
            .add_block(block_type, Some(Point::new(x, y)))
            .map_err(|e| js_error("Add error", e))?;
        Ok(id.to_string())
    }

    #[wasm_bindgen(js_name = removeBlock)]
    pub fn remove_block(&mut self, id: &str) -> Result<bool, JsValue> {
        self.surface()
            .remove_block(id)
            .map_err(|e| js_error("Remove error", e))
    }

    #[wasm_bindgen(js_name = duplicateBlock)]
    pub fn duplicate_block(&mut self, id: &str) -> Result<Option<String>, JsValue> {
        let copy = self
            .surface()
            .duplicate_block(id)
            .map_err(|e| js_error("Duplicate error", e))?;
        Ok(copy.map(|id| id.to_string()))
    }

    #[wasm_bindgen(js_name = moveBlock)]
    pub fn move_block(&mut self, id: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        self.apply(Mutation::MoveBlock {
            block_id: BlockId::from(id),
            x,
            y,
        })
    }

    /// `height` of `undefined` sizes the block to its content
    #[wasm_bindgen(js_name = resizeBlock)]
    pub fn resize_block(&mut self, id: &str, width: f64, height: Option<f64>) -> Result<bool, JsValue> {
        self.apply(Mutation::ResizeBlock {
            block_id: BlockId::from(id),
            width,
            height: height.map(Height::Px).unwrap_or(Height::Auto),
        })
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&mut self, id: &str, scale: f64) -> Result<bool, JsValue> {
        self.surface()
            .set_scale(id, scale)
            .map_err(|e| js_error("Scale error", e))
    }

    /// Replace a block's content with a JSON payload of the same type
    #[wasm_bindgen(js_name = updateData)]
    pub fn update_data(&mut self, id: &str, block_type: &str, data_json: &str) -> Result<bool, JsValue> {
        let data: serde_json::Value =
            serde_json::from_str(data_json).map_err(|e| js_error("Invalid JSON", e))?;
        self.surface()
            .update_data(id, block_type, data)
            .map_err(|e| js_error("Update error", e))
    }

    #[wasm_bindgen(js_name = toggleLock)]
    pub fn toggle_lock(&mut self, id: &str) -> Result<bool, JsValue> {
        self.surface()
            .toggle_lock(id)
            .map_err(|e| js_error("Lock error", e))
    }

    #[wasm_bindgen(js_name = toggleVisibility)]
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, JsValue> {
        self.surface()
            .toggle_visibility(id)
            .map_err(|e| js_error("Visibility error", e))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.surface().pointer_down(id, Point::new(x, y))
    }

    /// Start a resize from handle `n`, `ne`, `e`, `se`, `s`, `sw`, `w` or `nw`
    #[wasm_bindgen(js_name = handleDown)]
    pub fn handle_down(&mut self, id: &str, handle: &str, x: f64, y: f64, scale: bool) -> Result<bool, JsValue> {
        let handle = parse_handle(handle)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown resize handle: {}", handle)))?;
        Ok(self
            .surface()
            .handle_down(id, handle, Point::new(x, y), Modifiers { scale }))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.surface().pointer_move(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.surface().pointer_up();
    }

    pub fn undo(&mut self) -> bool {
        self.surface().undo()
    }

    pub fn redo(&mut self) -> bool {
        self.surface().redo()
    }

    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.pipeline.surface().history().can_undo()
    }

    #[wasm_bindgen(getter, js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.pipeline.surface().history().can_redo()
    }

    #[wasm_bindgen(getter, js_name = undoLabel)]
    pub fn undo_label(&self) -> Option<String> {
        self.pipeline.surface().history().undo_label().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = redoLabel)]
    pub fn redo_label(&self) -> Option<String> {
        self.pipeline.surface().history().redo_label().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn selection(&self) -> Option<String> {
        self.pipeline.surface().selection().map(|id| id.to_string())
    }

    #[wasm_bindgen(getter, js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.pipeline.surface().is_dirty()
    }

    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.surface().mark_saved();
    }

    /// Block types the palette offers, as a JSON array of wire tags
    #[wasm_bindgen(js_name = paletteJson)]
    pub fn palette_json(&self) -> String {
        let tags: Vec<&str> = self
            .pipeline
            .surface()
            .palette()
            .into_iter()
            .map(|t| t.as_str())
            .collect();
        serde_json::Value::from(tags).to_string()
    }

    /// Render with real record data instead of the placeholder
    #[wasm_bindgen(js_name = setContext)]
    pub fn set_context(&mut self, context_json: &str) -> Result<(), JsValue> {
        let context = ContextData::from_json(context_json).map_err(|e| js_error("Invalid context", e))?;
        self.pipeline.set_context(context);
        Ok(())
    }

    /// Current canvas as embeddable HTML
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&mut self) -> Result<String, JsValue> {
        let vdom = self.pipeline.render();
        compile_to_html(vdom, CompileOptions::fragment()).map_err(|e| js_error("Compile error", e))
    }

    /// Document to persist
    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        self.pipeline
            .surface()
            .document()
            .to_json()
            .map_err(|e| js_error("Serialization error", e))
    }
}

impl CanvasEditor {
    fn surface(&mut self) -> &mut EditorSurface {
        self.pipeline.surface_mut()
    }

    fn apply(&mut self, mutation: Mutation) -> Result<bool, JsValue> {
        self.surface()
            .apply(mutation)
            .map_err(|e| js_error("Mutation error", e))
    }
}

fn parse_handle(handle: &str) -> Option<ResizeHandle> {
    let handle = match handle {
        "n" => ResizeHandle::N,
        "ne" => ResizeHandle::NE,
        "e" => ResizeHandle::E,
        "se" => ResizeHandle::SE,
        "s" => ResizeHandle::S,
        "sw" => ResizeHandle::SW,
        "w" => ResizeHandle::W,
        "nw" => ResizeHandle::NW,
        _ => return None,
    };
    Some(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_and_render() {
        let mut editor = CanvasEditor::new("resource-1");
        let id = editor.add_block("title", 20.0, 20.0).unwrap();

        assert_eq!(editor.selection(), Some(id.clone()));
        assert!(editor.move_block(&id, 60.0, 40.0).unwrap());

        let html = editor.render_html().unwrap();
        assert!(html.contains(&format!("data-block-id=\"{}\"", id)));
        assert!(html.contains("Your resource title"));
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut editor = CanvasEditor::new("resource-1");
        let id = editor.add_block("image", 0.0, 0.0).unwrap();
        editor.resize_block(&id, 200.0, None).unwrap();
        editor.set_scale(&id, 0.5).unwrap();

        let json = editor.document_json().unwrap();
        let reopened = CanvasEditor::from_json("resource-1", &json).unwrap();

        assert_eq!(reopened.document_json().unwrap(), json);
        assert!(!reopened.is_dirty());
        assert!(!reopened.can_undo());
    }

    #[test]
    fn test_gesture_and_undo() {
        let mut editor = CanvasEditor::new("resource-1");
        let id = editor.add_block("text", 0.0, 0.0).unwrap();

        assert!(editor.handle_down(&id, "e", 400.0, 10.0, false).unwrap());
        assert!(editor.pointer_move(450.0, 10.0));
        editor.pointer_up();

        assert_eq!(editor.undo_label(), Some("Resize block".to_string()));
        assert!(editor.undo());
        assert!(editor.can_redo());
    }

    #[test]
    fn test_palette_lists_resource_blocks() {
        let editor = CanvasEditor::new("resource-1");
        let palette: Vec<String> = serde_json::from_str(&editor.palette_json()).unwrap();

        assert!(palette.contains(&"purchase-cta".to_string()));
        assert!(!palette.contains(&"profile-hero".to_string()));
        assert!(!palette.contains(&"paywall-overlay".to_string()));
    }
}
