use js_sys::Reflect;
use mindgraph_wasm::Editor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()) == Some(true)
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if is_ok(v) {
        return false;
    }
    Reflect::get(v, &JsValue::from_str("error"))
        .and_then(|e| Reflect::get(&e, &JsValue::from_str("code")))
        .ok()
        .and_then(|c| c.as_string())
        .map_or(false, |c| c == code)
}

#[wasm_bindgen_test]
fn nodes_links_and_history() {
    let mut ed = Editor::new(800.0, 600.0);
    let a = ed.add_node(0.0, 0.0);
    let b = ed.add_node(300.0, 0.0);
    assert!(ed.connect_node(a, b));
    assert_eq!(ed.link_count(), 1);
    assert!(ed.undo());
    assert_eq!(ed.link_count(), 0);
    assert!(ed.redo());
    assert_eq!(ed.link_count(), 1);
    assert_eq!(ed.node_ids().length(), 2);
}

#[wasm_bindgen_test]
fn uuids_find_nodes_again_after_undo() {
    let mut ed = Editor::new(800.0, 600.0);
    let a = ed.add_node(0.0, 0.0);
    let b = ed.add_node(300.0, 0.0);
    let uuid_b = Reflect::get(&ed.get_node(b), &JsValue::from_str("uuid")).unwrap().as_string().unwrap();
    assert!(ed.delete_node(a));
    assert!(ed.undo());
    let b_now = ed.node_id_by_uuid(&uuid_b).unwrap();
    let again = Reflect::get(&ed.get_node(b_now), &JsValue::from_str("uuid")).unwrap().as_string().unwrap();
    assert_eq!(again, uuid_b);
    assert_eq!(ed.node_id_by_uuid("no-such-node"), None);
}

#[wasm_bindgen_test]
fn res_variants_report_typed_errors() {
    let mut ed = Editor::new(800.0, 600.0);
    let a = ed.add_node(0.0, 0.0);
    assert!(is_err(&ed.add_node_res(f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&ed.delete_node_res(77), "invalid_id"));
    assert!(is_err(&ed.connect_node_res(a, a), "rejected"));
    assert!(is_err(&ed.move_cursor_res("sideways"), "invalid_direction"));
    assert!(is_err(&ed.grow_node_confirm_res(), "rejected"));
    assert!(is_err(&ed.from_json_res(JsValue::from_str("nope")), "invalid_document"));
    assert_eq!(ed.node_count(), 1);
    assert!(is_ok(&ed.move_node_res(a, 5.0, 5.0)));
}

#[wasm_bindgen_test]
fn json_round_trip_through_js() {
    let mut ed = Editor::new(800.0, 600.0);
    let a = ed.add_node(0.0, 0.0);
    let b = ed.add_node(300.0, 0.0);
    ed.connect_node(a, b);
    let doc = ed.to_json();

    let mut other = Editor::new(800.0, 600.0);
    assert!(is_ok(&other.from_json_res(doc)));
    assert_eq!(other.node_count(), 2);
    assert_eq!(other.link_count(), 1);
}

#[wasm_bindgen_test]
fn camera_and_paint() {
    let mut ed = Editor::new(800.0, 600.0);
    ed.add_node(0.0, 0.0);
    let p: Vec<f64> = serde_wasm_bindgen::from_value(ed.view_to_world(400.0, 300.0)).unwrap();
    assert_eq!(p, vec![0.0, 0.0]);
    ed.zoom_in();
    ed.tick();
    assert!(ed.current_scale() > 1.0);
    assert!(ed.paint().is_object());
    assert!(ed.to_svg().contains("<rect"));
}

#[wasm_bindgen_test]
fn settings_are_validated() {
    let mut ed = Editor::new(800.0, 600.0);
    let bad = serde_wasm_bindgen::to_value(&serde_json::json!({"camera_scale_exponent": 0.5})).unwrap();
    assert!(is_err(&ed.set_settings_res(bad), "invalid_settings"));
    let good = serde_wasm_bindgen::to_value(&serde_json::json!({"history_max_size": 5})).unwrap();
    assert!(is_ok(&ed.set_settings_res(good)));
}
