//! # Widget Verification Tests
//!
//! Drives widgets through a [`Scene`] the way the router does:
//!
//! 1. **Slider**: pointer-down value matches the documented formula
//! 2. **TextInput**: typing then erasing restores an empty field
//! 3. **ScrollList**: visible range after scrolling to the end
//! 4. **IconPicker**: late image loads never land in a reset or dropped picker,
//!    and a picker inside a hidden panel requests nothing
//!
//! Run with: cargo test --package vellum_ui --test widgets

use std::sync::Arc;

use parking_lot::Mutex;
use vellum_ui::assets::{ImageHandle, ImageProvider, LoadCallback, NullAudio};
use vellum_ui::input::{Key, KeyInput, MouseButton};
use vellum_ui::scene::{EventCtx, NodeId, PointerPhase, Scene, Widget};
use vellum_ui::widget::{Container, IconPicker, ScrollList, Slider, TextInput};

fn scene_with<W: Widget>(x: f32, y: f32, widget: W) -> (Scene, NodeId) {
    let mut scene = Scene::new(1024.0, 768.0);
    let root = scene.root();
    let id = scene.spawn(root, x, y, widget);
    (scene, id)
}

fn press(scene: &mut Scene, id: NodeId, gx: f32, gy: f32) {
    let audio = NullAudio;
    let mut ctx = EventCtx::new(&audio);
    scene.dispatch_pointer(id, PointerPhase::Down, gx, gy, MouseButton::Left, &mut ctx);
    scene.dispatch_pointer(id, PointerPhase::Up, gx, gy, MouseButton::Left, &mut ctx);
}

// ============================================================================
// SLIDER
// ============================================================================

fn expected(min: i32, max: i32, local_x: f32, width: f32) -> i32 {
    let t = (local_x / width).clamp(0.0, 1.0);
    (min as f32 + t * (max - min) as f32).round() as i32
}

#[test]
fn test_slider_ammo_range() {
    let (mut scene, id) = scene_with(100.0, 200.0, Slider::new(0, 9, 0));

    for local_x in [0.0, 13.0, 50.0, 100.0, 177.0, 199.0, 250.0, -30.0] {
        press(&mut scene, id, 100.0 + local_x, 215.0);
        let value = scene.widget::<Slider>(id).unwrap().value();
        assert_eq!(value, expected(0, 9, local_x, Slider::WIDTH), "local x {local_x}");
    }
}

#[test]
fn test_slider_offset_range() {
    let (mut scene, id) = scene_with(40.0, 40.0, Slider::new(10, 110, 10));

    press(&mut scene, id, 40.0 + 50.0, 50.0);
    assert_eq!(scene.widget::<Slider>(id).unwrap().value(), 35);

    press(&mut scene, id, 40.0 + 200.0, 50.0);
    assert_eq!(scene.widget::<Slider>(id).unwrap().value(), 110);
}

#[test]
fn test_slider_drag_follows_pointer() {
    let (mut scene, id) = scene_with(0.0, 0.0, Slider::new(0, 100, 0));
    let audio = NullAudio;
    let mut ctx = EventCtx::new(&audio);

    scene.dispatch_pointer(id, PointerPhase::Down, 20.0, 10.0, MouseButton::Left, &mut ctx);
    assert!(scene.widget::<Slider>(id).unwrap().is_dragging());
    scene.dispatch_pointer(id, PointerPhase::Move, 150.0, 10.0, MouseButton::Left, &mut ctx);
    assert_eq!(scene.widget::<Slider>(id).unwrap().value(), 75);

    scene.dispatch_pointer(id, PointerPhase::Up, 150.0, 10.0, MouseButton::Left, &mut ctx);
    scene.dispatch_pointer(id, PointerPhase::Move, 10.0, 10.0, MouseButton::Left, &mut ctx);
    assert_eq!(scene.widget::<Slider>(id).unwrap().value(), 75);
}

// ============================================================================
// TEXT INPUT
// ============================================================================

#[test]
fn test_type_then_erase() {
    let (mut scene, id) = scene_with(10.0, 10.0, TextInput::new("Team name"));
    scene.set_focus(Some(id));
    let audio = NullAudio;
    let mut ctx = EventCtx::new(&audio);

    let typed = "Worms 2";
    for c in typed.chars() {
        assert!(scene.route_key_down(&KeyInput::char(c), &mut ctx));
    }
    {
        let input = scene.widget::<TextInput>(id).unwrap();
        assert_eq!(input.text(), typed);
        assert_eq!(input.caret(), typed.chars().count());
    }

    for _ in 0..typed.chars().count() {
        scene.route_key_down(&KeyInput::key(Key::Backspace), &mut ctx);
    }
    let input = scene.widget::<TextInput>(id).unwrap();
    assert_eq!(input.text(), "");
    assert_eq!(input.caret(), 0);

    // Nothing left to erase; the caret stays put.
    scene.route_key_down(&KeyInput::key(Key::Backspace), &mut ctx);
    scene.route_key_down(&KeyInput::key(Key::Left), &mut ctx);
    assert_eq!(scene.widget::<TextInput>(id).unwrap().caret(), 0);
}

#[test]
fn test_edit_in_the_middle() {
    let (mut scene, id) = scene_with(10.0, 10.0, TextInput::new(""));
    scene.set_focus(Some(id));
    let audio = NullAudio;
    let mut ctx = EventCtx::new(&audio);

    for c in "ace".chars() {
        scene.route_key_down(&KeyInput::char(c), &mut ctx);
    }
    scene.route_key_down(&KeyInput::key(Key::Left), &mut ctx);
    scene.route_key_down(&KeyInput::char('d'), &mut ctx);
    scene.route_key_down(&KeyInput::key(Key::Home), &mut ctx);
    scene.route_key_down(&KeyInput::key(Key::Delete), &mut ctx);
    scene.route_key_down(&KeyInput::key(Key::End), &mut ctx);
    scene.route_key_down(&KeyInput::char('!'), &mut ctx);

    let input = scene.widget::<TextInput>(id).unwrap();
    assert_eq!(input.text(), "cde!");
    assert_eq!(input.caret(), 4);
}

#[test]
fn test_unfocused_input_ignores_keys() {
    let (mut scene, id) = scene_with(10.0, 10.0, TextInput::new(""));
    let audio = NullAudio;
    let mut ctx = EventCtx::new(&audio);

    assert!(!scene.route_key_down(&KeyInput::char('x'), &mut ctx));
    assert_eq!(scene.widget::<TextInput>(id).unwrap().text(), "");
}

// ============================================================================
// SCROLL LIST
// ============================================================================

#[test]
fn test_scroll_list_end_to_end() {
    let items: Vec<String> = (0..60).map(|i| format!("Weapon {i}")).collect();
    let (mut scene, id) = scene_with(100.0, 100.0, ScrollList::new(items));
    scene.node_mut(id).unwrap().set_size(300.0, 480.0);

    let (list, node) = scene.get_mut::<ScrollList>(id).unwrap();
    list.scroll_to(node, 1200.0);
    let range = list.visible_range(node);

    assert_eq!(list.scroll(), 1200.0);
    assert_eq!(range.start, 33);
    assert_eq!(range.end - 1, 46);
}

#[test]
fn test_scroll_list_press_selects_visible_row() {
    let items: Vec<String> = (0..60).map(|i| format!("Weapon {i}")).collect();
    let (mut scene, id) = scene_with(100.0, 100.0, ScrollList::new(items));
    {
        let (list, node) = scene.get_mut::<ScrollList>(id).unwrap();
        list.scroll_to(node, 360.0);
    }

    // Row 10 starts at the top of the viewport after scrolling 360px.
    press(&mut scene, id, 150.0, 105.0);
    assert_eq!(scene.widget::<ScrollList>(id).unwrap().selected(), Some(10));
}

// ============================================================================
// ICON PICKER
// ============================================================================

/// Provider that answers only when told to.
#[derive(Default)]
struct DeferredProvider {
    waiting: Mutex<Vec<(String, LoadCallback)>>,
}

impl DeferredProvider {
    fn pending(&self) -> usize {
        self.waiting.lock().len()
    }

    fn resolve_all(&self) {
        let waiting = std::mem::take(&mut *self.waiting.lock());
        for (i, (_key, done)) in waiting.into_iter().enumerate() {
            done(Some(ImageHandle::new(i as u64 + 1, 32.0, 32.0)));
        }
    }
}

impl ImageProvider for DeferredProvider {
    fn get(&self, _key: &str) -> Option<ImageHandle> {
        None
    }

    fn load(&self, key: &str, done: LoadCallback) {
        self.waiting.lock().push((key.to_string(), done));
    }
}

#[test]
fn test_icon_picker_applies_current_loads() {
    let provider = Arc::new(DeferredProvider::default());
    let (mut scene, id) = scene_with(0.0, 0.0, IconPicker::new(["crown", "viking"], provider.clone(), |n| format!("hats/{n}.png")));

    scene.update(0.016);
    assert_eq!(provider.pending(), 2);
    assert!(scene.widget::<IconPicker>(id).unwrap().is_loading("crown"));

    provider.resolve_all();
    let picker = scene.widget::<IconPicker>(id).unwrap();
    assert!(picker.image_for("crown").is_some());
    assert!(picker.image_for("viking").is_some());
    assert!(!picker.is_loading("crown"));
}

#[test]
fn test_icon_picker_discards_stale_loads() {
    let provider = Arc::new(DeferredProvider::default());
    let (mut scene, id) = scene_with(0.0, 0.0, IconPicker::new(["crown", "viking"], provider.clone(), str::to_string));

    scene.update(0.016);
    scene.widget_mut::<IconPicker>(id).unwrap().set_items(["crown", "pirate"]);
    // The old "crown" request belongs to the previous item list.
    provider.resolve_all();

    let picker = scene.widget::<IconPicker>(id).unwrap();
    assert!(picker.image_for("crown").is_none());
    assert!(picker.image_for("viking").is_none());

    scene.update(0.016);
    provider.resolve_all();
    let picker = scene.widget::<IconPicker>(id).unwrap();
    assert!(picker.image_for("crown").is_some());
    assert!(picker.image_for("pirate").is_some());
}

#[test]
fn test_icon_picker_in_hidden_panel_waits() {
    let provider = Arc::new(DeferredProvider::default());
    let mut scene = Scene::new(1024.0, 768.0);
    let root = scene.root();
    let panel = scene.spawn(root, 0.0, 0.0, Container::new());
    let id = scene.spawn(panel, 0.0, 0.0, IconPicker::new(["crown", "viking"], provider.clone(), str::to_string));
    scene.node_mut(panel).unwrap().visible = false;

    scene.update(0.016);
    assert_eq!(provider.pending(), 0);
    assert!(!scene.widget::<IconPicker>(id).unwrap().is_loading("crown"));

    scene.node_mut(panel).unwrap().visible = true;
    scene.update(0.016);
    assert_eq!(provider.pending(), 2);
}

#[test]
fn test_icon_picker_removed_before_load_resolves() {
    let provider = Arc::new(DeferredProvider::default());
    let (mut scene, id) = scene_with(0.0, 0.0, IconPicker::new(["crown"], provider.clone(), str::to_string));

    scene.update(0.016);
    scene.destroy(id);
    assert!(!scene.contains(id));

    // Must be a silent no-op.
    provider.resolve_all();
    assert_eq!(provider.pending(), 0);
}
