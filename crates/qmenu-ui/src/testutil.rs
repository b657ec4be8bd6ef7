// testutil.rs — mock collaborators shared by the unit tests

use std::collections::BTreeMap;

use qmenu_common::cvar::CvarRegistry;
use qmenu_common::q_shared::{ClipRect, Color};

use crate::context::{ClipFlags, DrawFlags, EditField, KeyBindings, Renderer, ScreenStack, UiContext};

// ============================================================
// Mock renderer
// ============================================================

/// Records every draw call for inspection.
#[derive(Default)]
pub struct MockRenderer {
    pub fills: Vec<(i32, i32, i32, i32, Color)>,
    pub strings: Vec<(i32, i32, DrawFlags, String)>,
    pub string_colors: Vec<Option<Color>>,
    pub chars: Vec<(i32, i32, DrawFlags, u8)>,
    pub clips: Vec<(ClipFlags, Option<ClipRect>)>,
}

impl Renderer for MockRenderer {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.fills.push((x, y, width, height, color));
    }

    fn draw_string(&mut self, x: i32, y: i32, color: Option<Color>, flags: DrawFlags, text: &str) {
        self.strings.push((x, y, flags, text.to_owned()));
        self.string_colors.push(color);
    }

    fn draw_char(&mut self, x: i32, y: i32, flags: DrawFlags, glyph: u8) {
        self.chars.push((x, y, flags, glyph));
    }

    fn set_clip_rect(&mut self, flags: ClipFlags, rect: Option<ClipRect>) {
        self.clips.push((flags, rect));
    }
}

// ============================================================
// Mock key bindings
// ============================================================

#[derive(Default)]
pub struct MockBindings {
    pub bound: BTreeMap<i32, String>,
    pub down: Vec<i32>,
}

impl MockBindings {
    /// All keys currently bound to `command`, in key order.
    pub fn keys_for(&self, command: &str) -> Vec<i32> {
        self.bound
            .iter()
            .filter(|(_, c)| c.as_str() == command)
            .map(|(k, _)| *k)
            .collect()
    }
}

impl KeyBindings for MockBindings {
    fn enum_bindings(&self, start_key: i32, command: &str) -> Option<i32> {
        self.bound
            .range(start_key..)
            .find(|(_, c)| c.as_str() == command)
            .map(|(k, _)| *k)
    }

    fn set_binding(&mut self, key: i32, command: Option<&str>) {
        match command {
            Some(command) => {
                self.bound.insert(key, command.to_owned());
            }
            None => {
                self.bound.remove(&key);
            }
        }
    }

    fn key_name(&self, key: i32) -> String {
        if (33..127).contains(&key) {
            ((key as u8) as char).to_string()
        } else {
            format!("KEY{}", key)
        }
    }

    fn is_down(&self, key: i32) -> bool {
        self.down.contains(&key)
    }
}

// ============================================================
// Mock screen stack
// ============================================================

#[derive(Default)]
pub struct MockStack {
    pub pops: usize,
}

impl ScreenStack for MockStack {
    fn pop_menu(&mut self) {
        self.pops += 1;
    }
}

// ============================================================
// Mock edit field
// ============================================================

/// Consumes printable chars into a buffer and records every key.
pub struct MockEditField {
    pub buffer: String,
    pub keys: Vec<i32>,
    pub consume_keys: bool,
    pub visible: usize,
}

impl Default for MockEditField {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            keys: Vec::new(),
            consume_keys: false,
            visible: 16,
        }
    }
}

impl EditField for MockEditField {
    fn handle_key(&mut self, key: i32) -> bool {
        self.keys.push(key);
        self.consume_keys
    }

    fn handle_char(&mut self, ch: i32) -> bool {
        if (32..127).contains(&ch) {
            self.buffer.push(ch as u8 as char);
            true
        } else {
            false
        }
    }

    fn draw(&self, x: i32, y: i32, flags: DrawFlags, renderer: &mut dyn Renderer) {
        renderer.draw_string(x, y, None, flags, &self.buffer);
    }

    fn text(&self) -> &str {
        &self.buffer
    }

    fn visible_chars(&self) -> usize {
        self.visible
    }
}

// ============================================================
// Test world
// ============================================================

/// Owns one of every collaborator and lends them out as a `UiContext`.
pub struct TestWorld {
    pub renderer: MockRenderer,
    pub bindings: MockBindings,
    pub cvars: CvarRegistry,
    pub screens: MockStack,
    pub width: i32,
    pub height: i32,
    pub realtime: i32,
    pub cursor_x: i32,
    pub cursor_y: i32,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            renderer: MockRenderer::default(),
            bindings: MockBindings::default(),
            cvars: CvarRegistry::new(),
            screens: MockStack::default(),
            width: 640,
            height: 480,
            realtime: 0,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn ctx(&mut self) -> UiContext<'_> {
        UiContext {
            width: self.width,
            height: self.height,
            realtime: self.realtime,
            cursor_x: self.cursor_x,
            cursor_y: self.cursor_y,
            clip: None,
            renderer: &mut self.renderer,
            bindings: &mut self.bindings,
            cvars: &mut self.cvars,
            screens: &mut self.screens,
        }
    }
}
