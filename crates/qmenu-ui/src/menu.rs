// menu.rs — menu container: layout, focus, event routing

use log::debug;

use qmenu_common::keys::{
    K_AUX32, K_BACKSPACE, K_DEL, K_DOWNARROW, K_ENTER, K_ESCAPE, K_JOY1, K_KP_DOWNARROW,
    K_KP_ENTER, K_KP_LEFTARROW, K_KP_RIGHTARROW, K_KP_UPARROW, K_LEFTARROW, K_MOUSE1, K_MOUSE2,
    K_MOUSE3, K_MWHEELDOWN, K_MWHEELUP, K_RIGHTARROW, K_TAB, K_UPARROW,
};
use qmenu_common::cvar::CvarStore;
use qmenu_common::q_shared::CHAR_HEIGHT;

use crate::context::{
    draw_rect_outline, DrawFlags, KeyBindings, Renderer, ScreenStack, UiContext, COLOR_GRAY,
    COLOR_STATUS_BAR, MENU_SPACING,
};
use crate::list::menu_list_key;
use crate::widgets::{
    common_do_enter, field_char, field_key, keybind_push, keybind_remove, slider_do_slide,
    slider_key, slider_pop, slider_push, spincontrol_do_enter, spincontrol_do_slide,
    spincontrol_pop, spincontrol_push, ItemFlags, ItemKind, MenuItem, MenuSound,
};

pub const MAX_MENU_ITEMS: usize = 64;

const KEYWAIT_PROMPT: &str = "Press the desired key, Escape to cancel";

/// Custom layout pass; the default stacks visible items vertically.
pub type MenuSizeFn = fn(&mut MenuFramework, &UiContext);
/// Menu-level key intercept, consulted before any item handler.
pub type MenuKeyFn = fn(&mut MenuFramework, i32, &mut UiContext) -> MenuSound;

/// Ordered collection of heterogeneous items. Insertion order is tab
/// order and draw order.
#[derive(Default)]
pub struct MenuFramework {
    pub name: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    saved_status: Option<String>,
    /// Set while a keybind item is waiting for the next physical key.
    pub keywait: bool,
    pub items: Vec<MenuItem>,
    pub size: Option<MenuSizeFn>,
    pub keydown: Option<MenuKeyFn>,
}

/// An item the cursor may rest on.
fn item_selectable(item: &MenuItem) -> bool {
    if item.generic().flags.intersects(ItemFlags::HIDDEN | ItemFlags::DISABLED) {
        return false;
    }
    !matches!(item.kind(), ItemKind::Static | ItemKind::Separator)
}

impl MenuFramework {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; returns its index.
    pub fn add_item(&mut self, item: MenuItem) -> usize {
        if self.items.len() >= MAX_MENU_ITEMS {
            panic!("add_item: too many items");
        }
        self.items.push(item);
        self.items.len() - 1
    }

    /// Lay out and initialize every item. Focus falls to item 0 unless
    /// the caller pre-assigned it.
    pub fn init(&mut self, ctx: &UiContext) {
        let size = self.size.unwrap_or(Self::default_size);
        size(self, ctx);

        let mut focus = false;
        for item in &mut self.items {
            focus |= item.generic().flags.contains(ItemFlags::HAS_FOCUS);
            item.init();
        }

        if !focus {
            if let Some(first) = self.items.first_mut() {
                first.generic_mut().flags.insert(ItemFlags::HAS_FOCUS);
            }
        }
    }

    /// Default layout: stack visible items at the screen's horizontal
    /// center, vertically centered as a block.
    pub fn default_size(menu: &mut MenuFramework, ctx: &UiContext) {
        let count = menu
            .items
            .iter()
            .filter(|item| !item.generic().flags.contains(ItemFlags::HIDDEN))
            .count() as i32;

        let x = ctx.width / 2;
        let mut y = (ctx.height - MENU_SPACING * count) / 2;

        for item in &mut menu.items {
            if item.generic().flags.contains(ItemFlags::HIDDEN) {
                continue;
            }
            let generic = item.generic_mut();
            generic.x = x;
            generic.y = y;
            y += MENU_SPACING;
        }
    }

    /// Index of the focused item.
    pub fn cursor(&self) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.generic().flags.contains(ItemFlags::HAS_FOCUS))
    }

    pub fn item_at_cursor(&self) -> Option<&MenuItem> {
        self.cursor().map(|index| &self.items[index])
    }

    /// Transfer focus; no-op when the target already holds it. Fires the
    /// focus hooks on both ends of the transfer.
    pub fn set_focus(&mut self, index: usize, ctx: &mut UiContext) {
        if self.items[index].generic().flags.contains(ItemFlags::HAS_FOCUS) {
            return;
        }

        for (i, item) in self.items.iter_mut().enumerate() {
            let generic = item.generic_mut();
            if i == index {
                generic.flags.insert(ItemFlags::HAS_FOCUS);
                if let Some(focus) = generic.focus_changed.as_mut() {
                    focus(ctx, true);
                }
            } else if generic.flags.contains(ItemFlags::HAS_FOCUS) {
                generic.flags.remove(ItemFlags::HAS_FOCUS);
                if let Some(focus) = generic.focus_changed.as_mut() {
                    focus(ctx, false);
                }
            }
        }
    }

    /// Crawl circularly from the focused item for the next selectable
    /// one. Focus is left alone when nothing qualifies.
    pub fn adjust_cursor(&mut self, dir: i32, ctx: &mut UiContext) -> MenuSound {
        if self.items.is_empty() {
            return MenuSound::NotHandled;
        }

        let pos = self.cursor().unwrap_or(0);
        let count = self.items.len();
        let mut cursor = pos;
        loop {
            cursor = if dir > 0 { (cursor + 1) % count } else { (cursor + count - 1) % count };
            if item_selectable(&self.items[cursor]) || cursor == pos {
                break;
            }
        }

        if item_selectable(&self.items[cursor]) {
            self.set_focus(cursor, ctx);
        }

        MenuSound::Move
    }

    /// Activate the focused item.
    pub fn select_item(&mut self, ctx: &mut UiContext) -> MenuSound {
        let index = match self.cursor() {
            Some(index) => index,
            None => return MenuSound::NotHandled,
        };

        if self.items[index].kind() == ItemKind::Keybind {
            return self.begin_keywait();
        }

        match &mut self.items[index] {
            MenuItem::SpinControl(s) => spincontrol_do_enter(s, ctx),
            MenuItem::Field(f) => common_do_enter(&mut f.generic, ctx),
            MenuItem::Action(a) => common_do_enter(&mut a.generic, ctx),
            MenuItem::List(l) => common_do_enter(&mut l.generic, ctx),
            _ => MenuSound::NotHandled,
        }
    }

    /// Slide the focused item's value.
    pub fn slide_item(&mut self, dir: i32, ctx: &mut UiContext) -> MenuSound {
        let index = match self.cursor() {
            Some(index) => index,
            None => return MenuSound::NotHandled,
        };

        match &mut self.items[index] {
            MenuItem::Slider(s) => slider_do_slide(s, dir, ctx),
            MenuItem::SpinControl(s) => spincontrol_do_slide(s, dir, ctx),
            _ => MenuSound::NotHandled,
        }
    }

    /// First visible item under the mouse cursor. Suspended entirely
    /// while a key capture is pending.
    pub fn hit_test(&self, ctx: &UiContext) -> Option<usize> {
        if self.keywait {
            return None;
        }

        self.items.iter().position(|item| {
            let generic = item.generic();
            !generic.flags.contains(ItemFlags::HIDDEN) && ctx.cursor_in_rect(&generic.rect)
        })
    }

    /// Route one key press. Priority: capture mode, menu intercept,
    /// item keydown hook, item kind handler, default table.
    pub fn keydown(&mut self, key: i32, ctx: &mut UiContext) -> MenuSound {
        if self.keywait {
            return self.finish_keywait(key, ctx);
        }

        if let Some(hook) = self.keydown {
            let sound = hook(self, key, ctx);
            if sound != MenuSound::NotHandled {
                return sound;
            }
        }

        if let Some(index) = self.cursor() {
            let sound = self.key_event(index, key, ctx);
            if sound != MenuSound::NotHandled {
                return sound;
            }
        }

        self.default_key(key, ctx)
    }

    fn key_event(&mut self, index: usize, key: i32, ctx: &mut UiContext) -> MenuSound {
        {
            let generic = self.items[index].generic_mut();
            if let Some(hook) = generic.keydown.as_mut() {
                let sound = hook(ctx, key);
                if sound != MenuSound::NotHandled {
                    return sound;
                }
            }
        }

        if key == K_BACKSPACE || key == K_DEL {
            let cmd = match &self.items[index] {
                MenuItem::Keybind(k) => Some(k.cmd.clone()),
                _ => None,
            };
            if let Some(cmd) = cmd {
                keybind_remove(ctx.bindings, &cmd);
                self.refresh_bindings(ctx);
                return MenuSound::In;
            }
        }

        match &mut self.items[index] {
            MenuItem::Field(f) => field_key(f, key),
            MenuItem::List(l) => menu_list_key(l, key, ctx),
            MenuItem::Slider(s) => slider_key(s, key),
            _ => MenuSound::NotHandled,
        }
    }

    fn default_key(&mut self, key: i32, ctx: &mut UiContext) -> MenuSound {
        // vi-style aliases
        let key = match key {
            k if k == 'h' as i32 => K_LEFTARROW,
            k if k == 'j' as i32 => K_DOWNARROW,
            k if k == 'k' as i32 => K_UPARROW,
            k if k == 'l' as i32 => K_RIGHTARROW,
            k => k,
        };

        match key {
            K_ESCAPE => {
                ctx.screens.pop_menu();
                MenuSound::Out
            }

            K_UPARROW | K_KP_UPARROW => self.adjust_cursor(-1, ctx),

            K_DOWNARROW | K_KP_DOWNARROW | K_TAB => self.adjust_cursor(1, ctx),

            K_LEFTARROW | K_KP_LEFTARROW | K_MWHEELDOWN => self.slide_item(-1, ctx),

            K_RIGHTARROW | K_KP_RIGHTARROW | K_MWHEELUP => self.slide_item(1, ctx),

            K_MOUSE1 | K_MOUSE2 | K_MOUSE3 => match self.hit_test(ctx) {
                None => MenuSound::NotHandled,
                Some(index) => {
                    if self.items[index].generic().flags.contains(ItemFlags::HAS_FOCUS) {
                        self.select_item(ctx)
                    } else {
                        self.set_focus(index, ctx);
                        MenuSound::Silent
                    }
                }
            },

            K_ENTER | K_KP_ENTER => self.select_item(ctx),
            K_JOY1..=K_AUX32 => self.select_item(ctx),

            _ => MenuSound::NotHandled,
        }
    }

    /// Route one printable character to the focused item.
    pub fn char_event(&mut self, ch: i32, ctx: &mut UiContext) -> MenuSound {
        let index = match self.cursor() {
            Some(index) => index,
            None => return MenuSound::NotHandled,
        };

        match &mut self.items[index] {
            MenuItem::Field(f) => field_char(f, ch, ctx),
            _ => MenuSound::NotHandled,
        }
    }

    // ============================================================
    // Keybind capture
    // ============================================================

    fn begin_keywait(&mut self) -> MenuSound {
        self.keywait = true;
        self.saved_status = self.status.take();
        self.status = Some(KEYWAIT_PROMPT.to_owned());
        debug!("keybind capture armed");
        MenuSound::In
    }

    /// Leave capture mode. Any key but Escape becomes the new binding;
    /// when an alternate already exists, the command's bindings are
    /// cleared first so the new key ends up alone.
    fn finish_keywait(&mut self, key: i32, ctx: &mut UiContext) -> MenuSound {
        if key != K_ESCAPE {
            if let Some(index) = self.cursor() {
                if let MenuItem::Keybind(k) = &self.items[index] {
                    if !k.alt_binding.is_empty() {
                        keybind_remove(ctx.bindings, &k.cmd);
                    }
                    ctx.bindings.set_binding(key, Some(k.cmd.as_str()));
                    debug!("bound key {} to {:?}", key, k.cmd);
                }
            }
        }

        self.refresh_bindings(ctx);
        self.keywait = false;
        self.status = self.saved_status.take();
        debug!("keybind capture finished");
        MenuSound::Out
    }

    /// Refresh every keybind item's cached projection from the table.
    pub fn refresh_bindings(&mut self, ctx: &UiContext) {
        for item in &mut self.items {
            if let MenuItem::Keybind(k) = item {
                keybind_push(k, &*ctx.bindings);
            }
        }
    }

    // ============================================================
    // Draw and value synchronization
    // ============================================================

    pub fn draw(&self, ctx: &mut UiContext) {
        if let Some(title) = self.title.as_deref() {
            ctx.renderer.draw_string(
                ctx.width / 2,
                0,
                None,
                DrawFlags::CENTER | DrawFlags::ALT_COLOR,
                title,
            );
        }

        let debug_rects = ctx.cvars.get_integer("ui_debug") != 0;
        for item in &self.items {
            if item.generic().flags.contains(ItemFlags::HIDDEN) {
                continue;
            }
            item.draw(self.keywait, ctx);
            if debug_rects {
                draw_rect_outline(ctx.renderer, &item.generic().rect, 1, COLOR_GRAY);
            }
        }

        if let Some(status) = self.status.as_deref() {
            ctx.renderer.fill_rect(
                0,
                ctx.height - CHAR_HEIGHT,
                ctx.width,
                CHAR_HEIGHT,
                COLOR_STATUS_BAR,
            );
            ctx.renderer.draw_string(
                ctx.width / 2,
                ctx.height - CHAR_HEIGHT,
                None,
                DrawFlags::CENTER,
                status,
            );
        }
    }

    /// Pull bound values into widget display state. Safe to call again.
    pub fn push(&mut self, ctx: &mut UiContext) {
        for item in &mut self.items {
            match item {
                MenuItem::Slider(s) => slider_push(s, &*ctx.cvars),
                MenuItem::SpinControl(s) => spincontrol_push(s, &*ctx.cvars),
                MenuItem::Keybind(k) => keybind_push(k, &*ctx.bindings),
                _ => {}
            }
        }
        debug!("menu {:?} pushed", self.name);
    }

    /// Commit widget display state back to the bound values.
    pub fn pop(&mut self, ctx: &mut UiContext) {
        for item in &mut self.items {
            match item {
                MenuItem::Slider(s) => slider_pop(s, ctx.cvars),
                MenuItem::SpinControl(s) => spincontrol_pop(s, ctx.cvars),
                _ => {}
            }
        }
        debug!("menu {:?} popped", self.name);
    }
}

// ============================================================
// Tests
// ============================================================
