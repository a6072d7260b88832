use mouse_gesture::mouse_gestures::{
    InputEvent, Modifiers, MouseButton, MouseManager, PointerEvent, WheelEvent,
};

fn pointer(button: MouseButton) -> PointerEvent {
    PointerEvent::new((100.0, 100.0), button)
}

fn down(button: MouseButton) -> InputEvent {
    InputEvent::MouseDown(pointer(button))
}

fn up(button: MouseButton) -> InputEvent {
    InputEvent::MouseUp(pointer(button))
}

fn context_menu() -> InputEvent {
    InputEvent::ContextMenu(pointer(MouseButton::Right))
}

#[test]
fn plain_right_click_shows_menu() {
    let mut mouse = MouseManager::new();

    let verdict = mouse.observe(&down(MouseButton::Right));
    assert_eq!(verdict.allow_gesture, Some(true));
    assert_eq!(verdict.response.context_menu, Some(true));

    assert_eq!(mouse.observe(&up(MouseButton::Right)).allow_gesture, Some(true));
    assert_eq!(mouse.observe(&context_menu()).response.context_menu, Some(true));
}

#[test]
fn motion_with_right_held_hides_menu_once() {
    let mut mouse = MouseManager::new();
    mouse.observe(&down(MouseButton::Right));
    mouse.observe(&InputEvent::MouseMove(pointer(MouseButton::Right)));
    mouse.observe(&up(MouseButton::Right));

    assert_eq!(mouse.observe(&context_menu()).response.context_menu, Some(false));
    // The suppression is consumed by the first context menu.
    assert_eq!(mouse.observe(&context_menu()).response.context_menu, Some(true));
}

#[test]
fn wheel_with_right_held_hides_menu() {
    let mut mouse = MouseManager::new();
    mouse.observe(&down(MouseButton::Right));
    mouse.observe(&InputEvent::Wheel(WheelEvent {
        screen: (100.0, 100.0).into(),
        delta_y: 3.0,
        modifiers: Modifiers::default(),
    }));
    mouse.observe(&up(MouseButton::Right));
    assert!(mouse.menu_suppressed());
}

#[test]
fn right_then_left_then_right_up_blocks_stop() {
    let mut mouse = MouseManager::new();
    assert_eq!(mouse.observe(&down(MouseButton::Right)).allow_gesture, Some(true));
    assert_eq!(mouse.observe(&down(MouseButton::Left)).allow_gesture, None);
    assert!(mouse.menu_suppressed());
    assert!(mouse.click_suppressed());

    assert_eq!(mouse.observe(&up(MouseButton::Right)).allow_gesture, Some(false));
    assert_eq!(mouse.observe(&context_menu()).response.context_menu, Some(false));
}

#[test]
fn right_down_while_left_held_blocks_start() {
    let mut mouse = MouseManager::new();
    mouse.observe(&down(MouseButton::Left));
    let verdict = mouse.observe(&down(MouseButton::Right));
    assert_eq!(verdict.allow_gesture, Some(false));
    assert!(mouse.menu_suppressed());
}

#[test]
fn suppressed_click_is_prevented_once() {
    let mut mouse = MouseManager::new();
    mouse.observe(&down(MouseButton::Right));
    mouse.observe(&down(MouseButton::Left));
    mouse.observe(&up(MouseButton::Left));

    let click = InputEvent::Click(pointer(MouseButton::Left));
    assert!(mouse.observe(&click).response.prevent_default);
    assert!(!mouse.observe(&click).response.prevent_default);
}

#[test]
fn drag_end_releases_other_button() {
    let mut mouse = MouseManager::new();
    mouse.observe(&down(MouseButton::Left));
    assert!(mouse.other_down());
    mouse.observe(&InputEvent::DragEnd(mouse_gesture::mouse_gestures::DragEvent::new((
        0.0, 0.0,
    ))));
    assert!(!mouse.other_down());
    assert_eq!(mouse.observe(&down(MouseButton::Right)).allow_gesture, Some(true));
}

#[test]
fn alt_right_click_resets_everything() {
    let mut mouse = MouseManager::new();
    mouse.observe(&down(MouseButton::Left));
    mouse.observe(&down(MouseButton::Right));
    assert!(mouse.right_down());
    assert!(mouse.other_down());

    let mut click = pointer(MouseButton::Right);
    click.modifiers.alt = true;
    mouse.observe(&InputEvent::Click(click));

    assert!(!mouse.right_down());
    assert!(!mouse.other_down());
    assert!(!mouse.menu_suppressed());
    assert!(!mouse.click_suppressed());
}
