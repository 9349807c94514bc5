use crate::state::State;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton},
    keyboard::{Key, NamedKey},
};

/// Map a cursor position to the cell under it, clamped into the grid.
pub fn cursor_to_cell(
    position: PhysicalPosition<f64>,
    pixels_per_cell: f64,
    width: usize,
    height: usize,
) -> (usize, usize) {
    let clamp = |v: f64, len: usize| ((v / pixels_per_cell).floor().max(0.0) as usize).min(len - 1);
    (clamp(position.x, width), clamp(position.y, height))
}

/// Scroll up speeds the simulation up, scroll down slows it down.
pub fn handle_scroll(state: &mut State, delta: f32) {
    let speed_delta = if delta > 0.0 { 1 } else { -1 };
    state.sim.set_speed(speed_delta);
}

/// Which paint buttons are held down over the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub left: bool,
    pub right: bool,
}

impl PointerButtons {
    /// Track a button event. A press egui took for itself does not count,
    /// but a release always clears the button wherever it happens.
    pub fn apply(&mut self, button: MouseButton, element_state: ElementState, consumed_by_egui: bool) {
        let held = match element_state {
            ElementState::Pressed if consumed_by_egui => return,
            ElementState::Pressed => true,
            ElementState::Released => false,
        };
        match button {
            MouseButton::Left => self.left = held,
            MouseButton::Right => self.right = held,
            _ => {}
        }
    }
}

pub fn handle_mouse_input(
    state: &mut State,
    button: MouseButton,
    element_state: ElementState,
    consumed_by_egui: bool,
) {
    state.buttons.apply(button, element_state, consumed_by_egui);
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
}

/// Function keys act on release. Only F1 works while the simulation runs.
pub fn handle_key(state: &mut State, key: &Key, element_state: ElementState) {
    if element_state != ElementState::Released {
        return;
    }

    let Key::Named(named) = key else {
        return;
    };

    if *named == NamedKey::F1 {
        state.sim.toggle();
        return;
    }
    if state.sim.is_running() {
        return;
    }

    match named {
        NamedKey::F2 => {
            if let Err(e) = state.sim.clear() {
                log::warn!("Clear failed: {}", e);
            }
        }
        NamedKey::F3 => state.overlay.open_save(),
        NamedKey::F4 => state.overlay.open_load(),
        NamedKey::F5 => state.overlay.open_help(),
        _ => {}
    }
}

/// Paint or erase under the cursor while a button is held. Runs every frame,
/// so holding still keeps painting the same cell. Nothing is painted while
/// the pointer is over the overlay.
pub fn apply_held_buttons(state: &mut State) {
    if state.sim.is_running() || state.egui_ctx.wants_pointer_input() {
        return;
    }
    let Some(position) = state.cursor_pos else {
        return;
    };

    let grid = state.sim.grid();
    let (x, y) = cursor_to_cell(position, state.pixels_per_cell(), grid.width(), grid.height());

    let result = if state.buttons.left {
        state.sim.paint(x, y)
    } else if state.buttons.right {
        state.sim.erase(x, y)
    } else {
        Ok(())
    };
    if let Err(e) = result {
        log::warn!("Edit at ({}, {}) rejected: {}", x, y, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    #[test]
    fn divides_by_cell_size() {
        assert_eq!(cursor_to_cell(at(0.0, 0.0), 5.0, 256, 144), (0, 0));
        assert_eq!(cursor_to_cell(at(4.9, 5.0), 5.0, 256, 144), (0, 1));
        assert_eq!(cursor_to_cell(at(642.0, 361.0), 5.0, 256, 144), (128, 72));
    }

    #[test]
    fn clamps_into_grid() {
        assert_eq!(cursor_to_cell(at(1280.0, 720.0), 5.0, 256, 144), (255, 143));
        assert_eq!(cursor_to_cell(at(-3.0, 9000.0), 5.0, 256, 144), (0, 143));
    }

    #[test]
    fn release_always_clears() {
        let mut buttons = PointerButtons::default();
        buttons.apply(MouseButton::Left, ElementState::Pressed, false);
        buttons.apply(MouseButton::Right, ElementState::Pressed, false);
        assert_eq!(buttons, PointerButtons { left: true, right: true });

        // Released over the status area or a dialog
        buttons.apply(MouseButton::Left, ElementState::Released, true);
        buttons.apply(MouseButton::Right, ElementState::Released, true);
        assert_eq!(buttons, PointerButtons::default());
    }

    #[test]
    fn press_on_overlay_is_ignored() {
        let mut buttons = PointerButtons::default();
        buttons.apply(MouseButton::Left, ElementState::Pressed, true);
        buttons.apply(MouseButton::Right, ElementState::Pressed, true);
        assert_eq!(buttons, PointerButtons::default());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut buttons = PointerButtons::default();
        buttons.apply(MouseButton::Middle, ElementState::Pressed, false);
        assert_eq!(buttons, PointerButtons::default());
    }

    #[test]
    fn honours_scale_factor() {
        // 5 logical pixels at 2x scale is 10 physical pixels per cell.
        assert_eq!(cursor_to_cell(at(19.0, 20.0), 10.0, 256, 144), (1, 2));
    }
}
