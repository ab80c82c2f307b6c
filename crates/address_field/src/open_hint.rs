use core_types::OpenHint;
use egui::{Modifiers, PointerButton};

/// Where an action should open, from the modifiers and button at submit time.
///
/// Command (ctrl on most platforms) or the middle button opens a background
/// tab, or a foreground tab with shift. Shift alone opens a window and alt
/// alone a foreground tab.
pub fn hint_for(modifiers: Modifiers, button: PointerButton) -> OpenHint {
    let command = modifiers.command || modifiers.ctrl;
    if command || button == PointerButton::Middle {
        return if modifiers.shift {
            OpenHint::NewTab
        } else {
            OpenHint::NewBackgroundTab
        };
    }
    if modifiers.shift {
        return OpenHint::NewWindow;
    }
    if modifiers.alt {
        return OpenHint::NewTab;
    }
    OpenHint::CurrentTab
}
