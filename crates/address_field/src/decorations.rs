//! Optional indicators embedded in the address field and their layout.
//!
//! Each kind has at most one slot. A slot is created when the field decides
//! it should exist (its option is on, and for the page icon a page is bound)
//! and destroyed when it should not; while it exists its look is recomputed
//! from live state handed in by the field, never from cached values.
//!
//! Layout, in field coordinates:
//! - Bookmark takes the rightmost footprint.
//! - PluginsIndicator, while visible, takes the footprint to its left, or the
//!   rightmost one when there is no bookmark slot.
//! - PageIcon sits at a fixed offset from the left edge and widens the
//!   text's left inset.

use crate::settings::FieldOption;
use core_types::{Icon, IconMode};
use egui::{Pos2, Rect, Vec2, pos2, vec2};

pub const ICON_SIZE: f32 = 16.0;
/// Square footprint reserved per right-hand slot (icon plus padding).
pub const SLOT_FOOTPRINT: f32 = 22.0;
pub const PAGE_ICON_X: f32 = 36.0;
pub const LEFT_INSET_DEFAULT: f32 = 30.0;
pub const LEFT_INSET_WITH_PAGE_ICON: f32 = 52.0;

pub const ADD_BOOKMARK_TOOLTIP: &str = "Add Bookmark";
pub const REMOVE_BOOKMARK_TOOLTIP: &str = "Remove Bookmark";
pub const LOAD_PLUGINS_TOOLTIP: &str = "Click to load all plugins on the page";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Bookmark,
    PageIcon,
    PluginsIndicator,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 3] = [
        DecorationKind::Bookmark,
        DecorationKind::PageIcon,
        DecorationKind::PluginsIndicator,
    ];

    /// The option that switches this slot on and off.
    pub fn option(self) -> FieldOption {
        match self {
            DecorationKind::Bookmark => FieldOption::ShowBookmarkIcon,
            DecorationKind::PageIcon => FieldOption::ShowUrlIcon,
            DecorationKind::PluginsIndicator => FieldOption::ShowLoadPluginsIcon,
        }
    }

    pub fn for_option(option: FieldOption) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.option() == option)
    }
}

/// Bookmark membership of the current page as far as the star cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookmarkState {
    /// No page, or an internal page that cannot be bookmarked.
    Unavailable,
    Available { bookmarked: bool },
}

/// What a slot shows; recomputed by the field on every relevant event.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotLook {
    pub icon: Icon,
    pub icon_mode: IconMode,
    pub tooltip: Option<String>,
    /// Accepts clicks.
    pub enabled: bool,
    pub visible: bool,
}

impl SlotLook {
    pub fn bookmark(state: BookmarkState) -> Self {
        let (icon_mode, tooltip, enabled) = match state {
            BookmarkState::Unavailable => (IconMode::Disabled, None, false),
            BookmarkState::Available { bookmarked: true } => {
                (IconMode::Active, Some(REMOVE_BOOKMARK_TOOLTIP), true)
            }
            BookmarkState::Available { bookmarked: false } => {
                (IconMode::Disabled, Some(ADD_BOOKMARK_TOOLTIP), true)
            }
        };
        Self {
            icon: Icon::named("bookmarks"),
            icon_mode,
            tooltip: tooltip.map(str::to_string),
            enabled,
            visible: true,
        }
    }

    pub fn page_icon(icon: Icon) -> Self {
        Self {
            icon,
            icon_mode: IconMode::Normal,
            tooltip: None,
            enabled: true,
            visible: true,
        }
    }

    /// Shown only while the page's load-plugins action is enabled.
    pub fn plugins(action_enabled: bool) -> Self {
        Self {
            icon: Icon::named("preferences-plugin"),
            icon_mode: IconMode::Normal,
            tooltip: Some(LOAD_PLUGINS_TOOLTIP.to_string()),
            enabled: action_enabled,
            visible: action_enabled,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecorationSlot {
    pub kind: DecorationKind,
    pub look: SlotLook,
    /// `None` while the slot is not visible.
    pub rect: Option<Rect>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMargins {
    pub left: f32,
    pub right: f32,
}

impl Default for TextMargins {
    fn default() -> Self {
        Self {
            left: LEFT_INSET_DEFAULT,
            right: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct DecorationController {
    bookmark: Option<DecorationSlot>,
    page_icon: Option<DecorationSlot>,
    plugins: Option<DecorationSlot>,
    field_size: Vec2,
    margins: TextMargins,
}

impl DecorationController {
    pub fn new(field_size: Vec2) -> Self {
        Self {
            bookmark: None,
            page_icon: None,
            plugins: None,
            field_size,
            margins: TextMargins::default(),
        }
    }

    pub fn slot(&self, kind: DecorationKind) -> Option<&DecorationSlot> {
        match kind {
            DecorationKind::Bookmark => self.bookmark.as_ref(),
            DecorationKind::PageIcon => self.page_icon.as_ref(),
            DecorationKind::PluginsIndicator => self.plugins.as_ref(),
        }
    }

    pub fn is_present(&self, kind: DecorationKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn text_margins(&self) -> TextMargins {
        self.margins
    }

    /// Absent -> Present with the given look; a present slot just takes the
    /// new look. Returns `true` if the slot was created.
    pub fn show(&mut self, kind: DecorationKind, look: SlotLook) -> bool {
        let entry = self.entry(kind);
        let created = entry.is_none();
        let slot = entry.get_or_insert_with(|| DecorationSlot {
            kind,
            look: look.clone(),
            rect: None,
        });
        slot.look = look;
        if created {
            log::debug!(target: "address_field.decorations", "{kind:?} slot created");
        }
        self.relayout();
        created
    }

    /// Present -> Absent. Returns `true` if a slot was destroyed.
    pub fn hide(&mut self, kind: DecorationKind) -> bool {
        let destroyed = self.entry(kind).take().is_some();
        if destroyed {
            log::debug!(target: "address_field.decorations", "{kind:?} slot destroyed");
            self.relayout();
        }
        destroyed
    }

    /// Refresh the look of a present slot. Absent slots stay absent.
    pub fn update(&mut self, kind: DecorationKind, look: SlotLook) {
        let Some(slot) = self.entry(kind).as_mut() else {
            return;
        };
        if slot.look == look {
            return;
        }
        let visibility_changed = slot.look.visible != look.visible;
        slot.look = look;
        if visibility_changed {
            self.relayout();
        }
    }

    pub fn resize(&mut self, field_size: Vec2) {
        if self.field_size != field_size {
            self.field_size = field_size;
            self.relayout();
        }
    }

    /// The visible slot under `pos`, if any.
    pub fn slot_at(&self, pos: Pos2) -> Option<DecorationKind> {
        DecorationKind::ALL.into_iter().find(|kind| {
            self.slot(*kind)
                .and_then(|slot| slot.rect)
                .is_some_and(|rect| rect.contains(pos))
        })
    }

    fn entry(&mut self, kind: DecorationKind) -> &mut Option<DecorationSlot> {
        match kind {
            DecorationKind::Bookmark => &mut self.bookmark,
            DecorationKind::PageIcon => &mut self.page_icon,
            DecorationKind::PluginsIndicator => &mut self.plugins,
        }
    }

    fn relayout(&mut self) {
        let Vec2 { x: width, y: height } = self.field_size;
        let top = ((height - ICON_SIZE) / 2.0).max(0.0);
        let icon_rect = |x: f32| Rect::from_min_size(pos2(x, top), vec2(ICON_SIZE, ICON_SIZE));

        // Right-hand stack, packed from the right edge.
        let mut right = width;
        for slot in [&mut self.bookmark, &mut self.plugins].into_iter().flatten() {
            if slot.look.visible {
                right -= SLOT_FOOTPRINT;
                slot.rect = Some(icon_rect(right));
            } else {
                slot.rect = None;
            }
        }

        let mut left = LEFT_INSET_DEFAULT;
        if let Some(slot) = self.page_icon.as_mut() {
            slot.rect = slot.look.visible.then(|| icon_rect(PAGE_ICON_X));
            left = LEFT_INSET_WITH_PAGE_ICON;
        }

        self.margins = TextMargins {
            left,
            right: width - right,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(400.0, 28.0);

    fn x_of(controller: &DecorationController, kind: DecorationKind) -> Option<f32> {
        controller.slot(kind).and_then(|s| s.rect).map(|r| r.min.x)
    }

    #[test]
    fn bookmark_takes_rightmost_footprint() {
        let mut c = DecorationController::new(FIELD);
        c.show(DecorationKind::Bookmark, SlotLook::bookmark(BookmarkState::Unavailable));
        assert_eq!(x_of(&c, DecorationKind::Bookmark), Some(400.0 - 22.0));
        let rect = c.slot(DecorationKind::Bookmark).and_then(|s| s.rect).unwrap();
        assert_eq!(rect.min.y, 6.0);
        assert_eq!(rect.size(), vec2(16.0, 16.0));
    }

    #[test]
    fn plugins_collapse_flush_right_without_bookmark() {
        let mut c = DecorationController::new(FIELD);
        c.show(DecorationKind::PluginsIndicator, SlotLook::plugins(true));
        assert_eq!(x_of(&c, DecorationKind::PluginsIndicator), Some(378.0));

        c.show(DecorationKind::Bookmark, SlotLook::bookmark(BookmarkState::Unavailable));
        assert_eq!(x_of(&c, DecorationKind::Bookmark), Some(378.0));
        assert_eq!(x_of(&c, DecorationKind::PluginsIndicator), Some(356.0));
        assert_eq!(c.text_margins().right, 44.0);

        c.hide(DecorationKind::Bookmark);
        assert_eq!(x_of(&c, DecorationKind::PluginsIndicator), Some(378.0));
    }

    #[test]
    fn hidden_plugins_slot_takes_no_room() {
        let mut c = DecorationController::new(FIELD);
        c.show(DecorationKind::Bookmark, SlotLook::bookmark(BookmarkState::Unavailable));
        c.show(DecorationKind::PluginsIndicator, SlotLook::plugins(false));
        assert!(c.is_present(DecorationKind::PluginsIndicator));
        assert_eq!(x_of(&c, DecorationKind::PluginsIndicator), None);
        assert_eq!(c.text_margins().right, 22.0);

        c.update(DecorationKind::PluginsIndicator, SlotLook::plugins(true));
        assert_eq!(x_of(&c, DecorationKind::PluginsIndicator), Some(356.0));
    }

    #[test]
    fn page_icon_widens_left_inset() {
        let mut c = DecorationController::new(FIELD);
        assert_eq!(c.text_margins().left, LEFT_INSET_DEFAULT);
        c.show(DecorationKind::PageIcon, SlotLook::page_icon(Icon::named("tab")));
        assert_eq!(c.text_margins().left, LEFT_INSET_WITH_PAGE_ICON);
        assert_eq!(x_of(&c, DecorationKind::PageIcon), Some(PAGE_ICON_X));
        c.hide(DecorationKind::PageIcon);
        assert_eq!(c.text_margins().left, LEFT_INSET_DEFAULT);
    }

    #[test]
    fn slots_never_overlap_each_other_or_text() {
        let mut c = DecorationController::new(FIELD);
        for kind in DecorationKind::ALL {
            let look = match kind {
                DecorationKind::Bookmark => SlotLook::bookmark(BookmarkState::Unavailable),
                DecorationKind::PageIcon => SlotLook::page_icon(Icon::named("tab")),
                DecorationKind::PluginsIndicator => SlotLook::plugins(true),
            };
            c.show(kind, look);
        }
        let rects: Vec<Rect> = DecorationKind::ALL
            .into_iter()
            .filter_map(|k| c.slot(k).and_then(|s| s.rect))
            .collect();
        assert_eq!(rects.len(), 3);
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(*b), "{a:?} overlaps {b:?}");
            }
        }
        let margins = c.text_margins();
        let text = Rect::from_min_max(pos2(margins.left, 0.0), pos2(400.0 - margins.right, 28.0))
            .shrink(0.5);
        assert!(rects.iter().all(|r| !r.intersects(text)));
    }

    #[test]
    fn showing_twice_keeps_a_single_slot() {
        let mut c = DecorationController::new(FIELD);
        assert!(c.show(DecorationKind::Bookmark, SlotLook::bookmark(BookmarkState::Unavailable)));
        assert!(!c.show(
            DecorationKind::Bookmark,
            SlotLook::bookmark(BookmarkState::Available { bookmarked: true })
        ));
        let slot = c.slot(DecorationKind::Bookmark).unwrap();
        assert_eq!(slot.look.tooltip.as_deref(), Some(REMOVE_BOOKMARK_TOOLTIP));
    }

    #[test]
    fn update_ignores_absent_slots() {
        let mut c = DecorationController::new(FIELD);
        c.update(DecorationKind::PageIcon, SlotLook::page_icon(Icon::named("star")));
        assert!(!c.is_present(DecorationKind::PageIcon));
        assert!(!c.hide(DecorationKind::PageIcon));
    }

    #[test]
    fn hit_testing_finds_visible_slots() {
        let mut c = DecorationController::new(FIELD);
        c.show(DecorationKind::Bookmark, SlotLook::bookmark(BookmarkState::Unavailable));
        assert_eq!(c.slot_at(pos2(385.0, 14.0)), Some(DecorationKind::Bookmark));
        assert_eq!(c.slot_at(pos2(100.0, 14.0)), None);
    }
}
