// context.rs — collaborator interfaces and the per-event UI context

use qmenu_common::cvar::CvarStore;
use qmenu_common::q_shared::{ClipRect, Color, Rect, CHAR_HEIGHT, CHAR_WIDTH};

// ============================================================
// Layout constants
// ============================================================

pub const RCOLUMN_OFFSET: i32 = 16;
pub const LCOLUMN_OFFSET: i32 = -16;

/// Vertical pitch of stacked menu items.
pub const MENU_SPACING: i32 = 12;

pub const SLIDER_RANGE: i32 = 10;

/// Row pitch inside a scrollable list.
pub const MLIST_SPACING: i32 = 10;
/// Horizontal inset of left-aligned cell text.
pub const MLIST_PRESTEP: i32 = 3;
pub const MLIST_SCROLLBAR_WIDTH: i32 = 10;

/// Milliseconds between clicks that still count as a double click.
pub const DOUBLE_CLICK_DELAY: i32 = 300;

pub const COLOR_FIELD: Color = [15, 128, 235, 100];
pub const COLOR_GRAY: Color = [127, 127, 127, 255];
pub const COLOR_STATUS_BAR: Color = [40, 40, 40, 255];

// ============================================================
// Draw flags
// ============================================================

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DrawFlags: u32 {
        const LEFT        = 0x00000001;
        const RIGHT       = 0x00000002;
        const CENTER      = Self::LEFT.bits() | Self::RIGHT.bits();
        const ALT_COLOR   = 0x00000004;
        const DRAW_CURSOR = 0x00000008;
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ClipFlags: u32 {
        const LEFT   = 0x01;
        const RIGHT  = 0x02;
        const TOP    = 0x04;
        const BOTTOM = 0x08;
        const MASK   = Self::LEFT.bits() | Self::RIGHT.bits()
                     | Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

// ============================================================
// Collaborator interfaces
// ============================================================

/// Drawing surface provided by the renderer. Alignment and the
/// alternate-color bit are resolved behind this interface.
pub trait Renderer {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);
    fn draw_string(&mut self, x: i32, y: i32, color: Option<Color>, flags: DrawFlags, text: &str);
    fn draw_char(&mut self, x: i32, y: i32, flags: DrawFlags, glyph: u8);
    /// Empty flags disable clipping.
    fn set_clip_rect(&mut self, flags: ClipFlags, rect: Option<ClipRect>);
}

/// The key-binding table owned by the input layer.
pub trait KeyBindings {
    /// First key >= `start_key` bound to `command`.
    fn enum_bindings(&self, start_key: i32, command: &str) -> Option<i32>;
    /// `None` unbinds the key.
    fn set_binding(&mut self, key: i32, command: Option<&str>);
    fn key_name(&self, key: i32) -> String;
    fn is_down(&self, key: i32) -> bool;
}

/// The screen-stack manager above this layer.
pub trait ScreenStack {
    fn pop_menu(&mut self);
}

/// Text-edit primitive owned by the embedding layer; it keeps its own
/// cursor and buffer.
pub trait EditField {
    fn handle_key(&mut self, key: i32) -> bool;
    fn handle_char(&mut self, ch: i32) -> bool;
    fn draw(&self, x: i32, y: i32, flags: DrawFlags, renderer: &mut dyn Renderer);
    fn text(&self) -> &str;
    fn visible_chars(&self) -> usize;
}

// ============================================================
// UI context
// ============================================================

/// Everything an event or draw pass needs from the surrounding engine,
/// passed explicitly. `realtime` is the injected monotonic clock in
/// milliseconds; `cursor_x`/`cursor_y` are the mouse position in virtual
/// screen coordinates.
pub struct UiContext<'a> {
    pub width: i32,
    pub height: i32,
    pub realtime: i32,
    pub cursor_x: i32,
    pub cursor_y: i32,
    /// Ambient clip window to restore after cell clipping, on backends
    /// that keep one active.
    pub clip: Option<ClipRect>,
    pub renderer: &'a mut dyn Renderer,
    pub bindings: &'a mut dyn KeyBindings,
    pub cvars: &'a mut dyn CvarStore,
    pub screens: &'a mut dyn ScreenStack,
}

impl UiContext<'_> {
    pub fn cursor_in_rect(&self, rect: &Rect) -> bool {
        rect.contains_point(self.cursor_x, self.cursor_y)
    }
}

/// Compute the bounding box of a string drawn at the rect's current
/// position with the given alignment, shifting the anchor for RIGHT and
/// CENTER the same way the renderer will.
pub fn string_dimensions(rect: &mut Rect, flags: DrawFlags, text: &str) {
    rect.height = CHAR_HEIGHT;
    rect.width = text.len() as i32 * CHAR_WIDTH;

    if flags.contains(DrawFlags::CENTER) {
        rect.x -= rect.width / 2;
    } else if flags.intersects(DrawFlags::RIGHT) {
        rect.x -= rect.width;
    }
}

/// One-pixel-style outline used for layout debugging.
pub fn draw_rect_outline(renderer: &mut dyn Renderer, rect: &Rect, border: i32, color: Color) {
    renderer.fill_rect(rect.x, rect.y, rect.width, border, color);
    renderer.fill_rect(rect.x, rect.y + rect.height - border, rect.width, border, color);
    renderer.fill_rect(rect.x, rect.y + border, border, rect.height - border * 2, color);
    renderer.fill_rect(
        rect.x + rect.width - border,
        rect.y + border,
        border,
        rect.height - border * 2,
        color,
    );
}

// ============================================================
// Tests
// ============================================================
