use engine::{CueSink, InputAction, InputSnapshot, Point, Rect, Screen, ScreenCommand, Shape, SoundCue};

use super::controller::{DispatchOutcome, InteractionController};
use super::item::{Item, ItemId};
use super::modal::{ModalController, ModalState};
use super::profile::{DisplayProfile, Layout, ModalInputPolicy};
use super::scene::Scene;
use super::screen::ExplorationScreen;

const PROTOCOL: ItemId = ItemId { scene: 0, index: 0 };
const COMPASS: ItemId = ItemId { scene: 0, index: 1 };

fn polygon(scene: &Scene, name: &str, points: &[(f32, f32)]) -> Item {
    Item::new(
        scene.next_item_id(),
        name,
        Shape::Polygon {
            vertices: points.iter().map(|(x, y)| Point::new(*x, *y)).collect(),
        },
    )
}

fn circle(scene: &Scene, name: &str, center: (f32, f32), radius: f32) -> Item {
    Item::new(
        scene.next_item_id(),
        name,
        Shape::Circle {
            center: Point::new(center.0, center.1),
            radius,
        },
    )
}

fn desktop_scenes() -> Vec<Scene> {
    let mut cabin = Scene::new(0, "cabin");
    let protocol = polygon(
        &cabin,
        "Protocol",
        &[(370.0, 260.0), (570.0, 260.0), (570.0, 300.0), (370.0, 300.0)],
    );
    cabin.add(protocol);
    let compass = circle(&cabin, "Compass", (760.0, 180.0), 35.0);
    cabin.add(compass);

    let mut bridge = Scene::new(1, "bridge");
    let gold = polygon(
        &bridge,
        "Gold",
        &[(600.0, 310.0), (850.0, 310.0), (850.0, 370.0), (600.0, 370.0)],
    );
    bridge.add(gold);

    vec![cabin, bridge]
}

fn desktop_controller(policy: ModalInputPolicy) -> InteractionController {
    let mut controller =
        InteractionController::new(DisplayProfile::DESKTOP, policy, desktop_scenes())
            .expect("controller");
    assert!(controller.resize(1400, 700));
    controller
}

fn advance_ticks(controller: &mut InteractionController, ticks: usize) {
    for _ in 0..ticks {
        controller.advance();
    }
}

fn click(
    controller: &mut InteractionController,
    cues: &mut dyn CueSink,
    x: f32,
    y: f32,
) -> DispatchOutcome {
    controller.handle_pointer_down(Point::new(x, y), cues)
}

#[test]
fn empty_scene_list_is_rejected() {
    assert!(InteractionController::new(
        DisplayProfile::DESKTOP,
        ModalInputPolicy::PassThrough,
        Vec::new()
    )
    .is_none());
}

#[test]
fn scene_pickup_adds_item_plays_cue_and_opens_modal() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();

    let outcome = click(&mut controller, &mut cues, 470.0, 280.0);

    assert_eq!(
        outcome,
        DispatchOutcome::PickedUp {
            item: PROTOCOL,
            newly_added: true
        }
    );
    assert_eq!(cues, vec![SoundCue::Confirm]);
    assert_eq!(controller.state().inventory.len(), 1);
    assert_eq!(controller.state().modal.state(), ModalState::Opening);
    assert_eq!(controller.state().modal.current_item(), Some(PROTOCOL));
}

#[test]
fn scene_pickup_is_skipped_while_modal_is_not_closed() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();
    click(&mut controller, &mut cues, 470.0, 280.0);

    let outcome = click(&mut controller, &mut cues, 760.0, 180.0);

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(controller.state().inventory.len(), 1);
    assert_eq!(controller.state().modal.current_item(), Some(PROTOCOL));
    assert_eq!(cues.len(), 1);
}

#[test]
fn close_button_wins_over_overlapping_scene_hotspot() {
    let mut scene = Scene::new(0, "cabin");
    let lantern = circle(&scene, "Lantern", (790.0, 30.0), 20.0);
    scene.add(lantern);
    let modal = ModalController::new(
        Rect::new(400.0, 10.0, 420.0, 300.0),
        Rect::new(780.0, 20.0, 30.0, 30.0),
    );
    let mut controller = InteractionController::new(
        DisplayProfile::DESKTOP,
        ModalInputPolicy::PassThrough,
        vec![scene],
    )
    .expect("controller")
    .with_modal(modal);
    controller.resize(1400, 700);
    let mut cues: Vec<SoundCue> = Vec::new();

    assert!(matches!(
        click(&mut controller, &mut cues, 790.0, 30.0),
        DispatchOutcome::PickedUp { .. }
    ));
    advance_ticks(&mut controller, 7);
    assert_eq!(controller.state().modal.state(), ModalState::Open);

    let outcome = click(&mut controller, &mut cues, 790.0, 30.0);

    assert_eq!(outcome, DispatchOutcome::ModalClosed);
    assert_eq!(controller.state().modal.state(), ModalState::Closing);
    assert_eq!(controller.state().inventory.len(), 1);
    assert_eq!(cues.len(), 1);
}

#[test]
fn nav_buttons_take_priority_over_scene_and_work_with_modal_open() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();
    click(&mut controller, &mut cues, 470.0, 280.0);
    advance_ticks(&mut controller, 7);

    assert_eq!(
        click(&mut controller, &mut cues, 1340.0, 350.0),
        DispatchOutcome::NextScene
    );
    assert_eq!(controller.current_scene().name(), "bridge");
    assert_eq!(
        click(&mut controller, &mut cues, 1340.0, 270.0),
        DispatchOutcome::PrevScene
    );
    assert_eq!(controller.current_scene().name(), "cabin");
    assert_eq!(controller.state().modal.state(), ModalState::Open);
}

#[test]
fn inventory_slot_reopens_modal_for_collected_item() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();
    click(&mut controller, &mut cues, 470.0, 280.0);
    advance_ticks(&mut controller, 7);
    assert_eq!(
        click(&mut controller, &mut cues, 1070.0, 70.0),
        DispatchOutcome::ModalClosed
    );
    advance_ticks(&mut controller, 7);
    assert_eq!(controller.state().modal.state(), ModalState::Closed);

    let outcome = click(&mut controller, &mut cues, 50.0, 70.0);

    assert_eq!(outcome, DispatchOutcome::Reopened { item: PROTOCOL });
    assert_eq!(controller.state().modal.state(), ModalState::Opening);
    assert_eq!(controller.state().modal.current_item(), Some(PROTOCOL));
    assert_eq!(cues.len(), 1);
}

#[test]
fn repeated_pickup_still_shows_modal_without_duplicating() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();
    click(&mut controller, &mut cues, 470.0, 280.0);
    advance_ticks(&mut controller, 7);
    click(&mut controller, &mut cues, 1070.0, 70.0);
    advance_ticks(&mut controller, 7);

    let outcome = click(&mut controller, &mut cues, 470.0, 280.0);

    assert_eq!(
        outcome,
        DispatchOutcome::PickedUp {
            item: PROTOCOL,
            newly_added: false
        }
    );
    assert_eq!(controller.state().inventory.len(), 1);
    assert_eq!(cues.len(), 2);
    assert_eq!(controller.state().modal.state(), ModalState::Opening);
}

#[test]
fn blocking_policy_swallows_input_while_modal_is_up() {
    let mut controller = desktop_controller(ModalInputPolicy::Blocking);
    let mut cues: Vec<SoundCue> = Vec::new();
    click(&mut controller, &mut cues, 760.0, 180.0);
    assert_eq!(controller.state().modal.current_item(), Some(COMPASS));

    assert_eq!(
        click(&mut controller, &mut cues, 1340.0, 350.0),
        DispatchOutcome::Swallowed
    );
    assert_eq!(controller.current_scene().name(), "cabin");

    advance_ticks(&mut controller, 7);
    assert_eq!(
        click(&mut controller, &mut cues, 10.0, 600.0),
        DispatchOutcome::ModalClosed
    );
    assert_eq!(
        click(&mut controller, &mut cues, 1340.0, 350.0),
        DispatchOutcome::Swallowed
    );

    advance_ticks(&mut controller, 7);
    assert_eq!(
        click(&mut controller, &mut cues, 1340.0, 350.0),
        DispatchOutcome::NextScene
    );
}

#[test]
fn hit_testing_follows_display_rescale() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    assert!(controller.resize(700, 350));
    assert!(!controller.resize(700, 350));
    assert!(!controller.resize(0, 0));
    let mut cues: Vec<SoundCue> = Vec::new();

    assert_eq!(
        click(&mut controller, &mut cues, 470.0, 280.0),
        DispatchOutcome::Ignored
    );
    assert_eq!(
        click(&mut controller, &mut cues, 235.0, 140.0),
        DispatchOutcome::PickedUp {
            item: PROTOCOL,
            newly_added: true
        }
    );
}

#[test]
fn non_uniform_rescale_keeps_circles_round() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    controller.resize(2800, 700);
    let mut cues: Vec<SoundCue> = Vec::new();

    // Compass centre moves to (1520, 180); radius stays 35 (min of 2.0 and 1.0).
    assert_eq!(
        click(&mut controller, &mut cues, 1520.0 + 40.0, 180.0),
        DispatchOutcome::Ignored
    );
    assert_eq!(
        click(&mut controller, &mut cues, 1520.0 + 30.0, 180.0),
        DispatchOutcome::PickedUp {
            item: COMPASS,
            newly_added: true
        }
    );
}

#[test]
fn frame_reflects_inventory_and_modal() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();
    assert!(controller.frame(false).modal.is_none());

    click(&mut controller, &mut cues, 470.0, 280.0);
    let opening = controller.frame(false);
    assert_eq!(opening.inventory_slots.len(), 1);
    assert_eq!(opening.inventory_slots[0].rect, Rect::new(20.0, 40.0, 60.0, 60.0));
    assert!(opening.inventory_slots[0].thumbnail.is_placeholder());
    assert_eq!(opening.nav_buttons.len(), 2);
    assert_eq!(opening.scene_viewport, Rect::new(0.0, 0.0, 1400.0, 700.0));
    let modal = opening.modal.expect("modal");
    assert!(modal.opacity.abs() < 1e-6);
    assert!(modal.close_button.is_none());

    advance_ticks(&mut controller, 7);
    let open = controller.frame(false).modal.expect("modal");
    assert!((open.opacity - 1.0).abs() < 1e-6);
    assert_eq!(open.close_button, Some(Rect::new(1060.0, 60.0, 30.0, 30.0)));
}

#[test]
fn screen_tick_advances_before_dispatch() {
    let controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut screen = ExplorationScreen::new(controller);
    let mut cues: Vec<SoundCue> = Vec::new();

    let input = InputSnapshot::empty(1400, 700).with_pointer_down(Point::new(470.0, 280.0));
    assert_eq!(screen.update(&input, &mut cues), ScreenCommand::None);
    assert_eq!(screen.controller().state().modal.progress(), 0.0);

    screen.update(&InputSnapshot::empty(1400, 700), &mut cues);
    assert!((screen.controller().state().modal.progress() - 0.15).abs() < 1e-6);
    assert_eq!(cues, vec![SoundCue::Confirm]);
}

#[test]
fn screen_applies_key_actions_and_resizes() {
    let controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut screen = ExplorationScreen::new(controller);
    let mut cues: Vec<SoundCue> = Vec::new();

    let input = InputSnapshot::empty(700, 350)
        .with_action_pressed(InputAction::NextScene)
        .with_action_pressed(InputAction::ToggleHotspotOverlay);
    screen.update(&input, &mut cues);

    assert_eq!(screen.controller().current_scene().name(), "bridge");
    assert!((screen.controller().scale().x - 0.5).abs() < 1e-6);
    assert_eq!(screen.frame().debug_outlines.len(), 3);
    assert!(screen.title().expect("title").contains("bridge"));

    let quit = InputSnapshot::empty(700, 350).with_action_pressed(InputAction::Quit);
    assert_eq!(screen.update(&quit, &mut cues), ScreenCommand::Quit);
}

#[test]
fn close_button_follows_the_opening_panel() {
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough);
    let mut cues: Vec<SoundCue> = Vec::new();
    click(&mut controller, &mut cues, 470.0, 280.0);
    controller.advance();

    let modal = controller.frame(false).modal.expect("modal");
    let close = modal.close_button.expect("interactive after one tick");
    assert!(close.x >= modal.rect.x && close.right() <= modal.rect.right());
    assert!(close.y >= modal.rect.y && close.bottom() <= modal.rect.bottom());

    assert_eq!(
        click(&mut controller, &mut cues, 1070.0, 70.0),
        DispatchOutcome::Ignored
    );
    assert_eq!(controller.state().modal.state(), ModalState::Opening);
    assert_eq!(
        click(&mut controller, &mut cues, close.center().x, close.center().y),
        DispatchOutcome::ModalClosed
    );
}

#[test]
fn scene_viewport_offset_is_removed_before_hit_testing() {
    let layout = Layout {
        scene_offset: Point::new(100.0, 50.0),
        ..DisplayProfile::DESKTOP.layout()
    };
    let mut controller = desktop_controller(ModalInputPolicy::PassThrough).with_layout(layout);
    assert!(controller.resize(700, 350));
    let mut cues: Vec<SoundCue> = Vec::new();

    // Protocol sits at (185..285, 130..150) in display space; the offset
    // scales to (50, 25).
    assert_eq!(
        click(&mut controller, &mut cues, 235.0, 140.0),
        DispatchOutcome::Ignored
    );
    let frame = controller.frame(true);
    assert_eq!(frame.scene_viewport, Rect::new(50.0, 25.0, 700.0, 350.0));
    assert_eq!(frame.debug_outlines[0], Rect::new(235.0, 155.0, 100.0, 20.0));

    assert_eq!(
        click(&mut controller, &mut cues, 285.0, 165.0),
        DispatchOutcome::PickedUp {
            item: PROTOCOL,
            newly_added: true
        }
    );
}
