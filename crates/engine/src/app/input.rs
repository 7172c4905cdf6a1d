use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    NextScene,
    PrevScene,
    ToggleHotspotOverlay,
    Quit,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    pub(crate) const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::NextScene,
        InputAction::PrevScene,
        InputAction::ToggleHotspotOverlay,
        InputAction::Quit,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::NextScene => 0,
            InputAction::PrevScene => 1,
            InputAction::ToggleHotspotOverlay => 2,
            InputAction::Quit => 3,
        }
    }
}

/// Input gathered for one fixed tick. Pointer downs are in window pixels and
/// arrive in the order the platform delivered them; actions are press edges.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    quit_requested: bool,
    pointer_downs: Vec<Point>,
    pressed: ActionStates,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty(window_width: u32, window_height: u32) -> Self {
        Self {
            quit_requested: false,
            pointer_downs: Vec::new(),
            pressed: ActionStates::default(),
            window_width,
            window_height,
        }
    }

    pub fn with_pointer_down(mut self, point: Point) -> Self {
        self.pointer_downs.push(point);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.pressed.set(action, true);
        if action == InputAction::Quit {
            self.quit_requested = true;
        }
        self
    }

    pub(crate) fn from_parts(
        quit_requested: bool,
        pointer_downs: Vec<Point>,
        pressed: ActionStates,
        window_size: (u32, u32),
    ) -> Self {
        Self {
            quit_requested,
            pointer_downs,
            pressed,
            window_width: window_size.0,
            window_height: window_size.1,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn pointer_downs(&self) -> &[Point] {
        &self.pointer_downs
    }

    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn pressed_actions(&self) -> impl Iterator<Item = InputAction> + '_ {
        InputAction::ALL
            .into_iter()
            .filter(|action| self.pressed.is_down(*action))
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
