// widgets.rs — menu item model and per-kind behaviors

use log::debug;

use qmenu_common::cvar::{CvarSource, CvarStore};
use qmenu_common::keys::{K_END, K_HOME};
use qmenu_common::q_shared::{Rect, CHAR_HEIGHT, CHAR_WIDTH, Color, MAX_STRING_CHARS};

use crate::context::{
    string_dimensions, DrawFlags, EditField, KeyBindings, Renderer, UiContext, COLOR_FIELD,
    COLOR_GRAY, LCOLUMN_OFFSET, RCOLUMN_OFFSET, SLIDER_RANGE,
};
use crate::list::{menu_list_draw, menu_list_init, MenuList};

/// Blinking focus indicator glyph in the conchars font.
const CURSOR_GLYPH: u8 = 13;

// ============================================================
// Event outcomes
// ============================================================

/// Result of routing one input event; doubles as the feedback sound cue.
/// `In`/`Out` mark entering and leaving a nested interaction mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSound {
    NotHandled,
    Silent,
    Move,
    Beep,
    In,
    Out,
}

// ============================================================
// Common item state
// ============================================================

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ItemFlags: u32 {
        const HIDDEN       = 0x00000001;
        const DISABLED     = 0x00000002;
        const HAS_FOCUS    = 0x00000004;
        const CUSTOM_COLOR = 0x00000008;
        const NUMBERS_ONLY = 0x00000010;
    }
}

/// Value snapshot handed to `change` hooks.
#[derive(Clone, Copy, Debug)]
pub enum ItemValue<'a> {
    Int(i32),
    Text(&'a str),
}

pub type ChangeHook = Box<dyn FnMut(&mut UiContext<'_>, ItemValue<'_>) -> MenuSound>;
pub type ActivateHook = Box<dyn FnMut(&mut UiContext<'_>) -> MenuSound>;
pub type FocusHook = Box<dyn FnMut(&mut UiContext<'_>, bool)>;
pub type KeyHook = Box<dyn FnMut(&mut UiContext<'_>, i32) -> MenuSound>;

/// Shared envelope of every item kind. `x`/`y` is the declared anchor;
/// `rect` is computed by the kind's init, not by the caller.
#[derive(Default)]
pub struct MenuCommon {
    pub name: Option<String>,
    pub x: i32,
    pub y: i32,
    pub rect: Rect,
    pub flags: ItemFlags,
    pub ui_flags: DrawFlags,
    pub color: Color,
    pub change: Option<ChangeHook>,
    pub activate: Option<ActivateHook>,
    pub focus_changed: Option<FocusHook>,
    pub keydown: Option<KeyHook>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Action,
    Static,
    Keybind,
    Field,
    SpinControl,
    List,
    Slider,
    Separator,
}

// ============================================================
// Item kinds
// ============================================================

#[derive(Default)]
pub struct MenuAction {
    pub generic: MenuCommon,
    /// Command string fired by the owning screen's activate hook.
    pub cmd: String,
}

#[derive(Default)]
pub struct MenuStatic {
    pub generic: MenuCommon,
    pub max_chars: usize,
}

#[derive(Default)]
pub struct MenuKeybind {
    pub generic: MenuCommon,
    pub cmd: String,
    /// Cached display projections; the binding table stays authoritative.
    pub binding: String,
    pub alt_binding: String,
}

pub struct MenuField {
    pub generic: MenuCommon,
    pub field: Box<dyn EditField>,
}

impl MenuField {
    pub fn new(field: Box<dyn EditField>) -> Self {
        Self { generic: MenuCommon::default(), field }
    }
}

#[derive(Default)]
pub struct MenuSpinControl {
    pub generic: MenuCommon,
    pub cvar: String,
    pub item_names: Vec<String>,
    pub curvalue: i32,
}

pub struct MenuSlider {
    pub generic: MenuCommon,
    pub cvar: String,
    pub minvalue: i32,
    pub maxvalue: i32,
    pub curvalue: i32,
    /// Scale/offset pair between the stored float value and UI steps:
    /// step = (value + add) * mul.
    pub mul: f32,
    pub add: f32,
}

impl Default for MenuSlider {
    fn default() -> Self {
        Self {
            generic: MenuCommon::default(),
            cvar: String::new(),
            minvalue: 0,
            maxvalue: 0,
            curvalue: 0,
            mul: 1.0,
            add: 0.0,
        }
    }
}

#[derive(Default)]
pub struct MenuSeparator {
    pub generic: MenuCommon,
}

/// The closed set of widget kinds.
pub enum MenuItem {
    Action(MenuAction),
    Static(MenuStatic),
    Keybind(MenuKeybind),
    Field(MenuField),
    SpinControl(MenuSpinControl),
    List(MenuList),
    Slider(MenuSlider),
    Separator(MenuSeparator),
}

impl MenuItem {
    pub fn generic(&self) -> &MenuCommon {
        match self {
            MenuItem::Action(a) => &a.generic,
            MenuItem::Static(s) => &s.generic,
            MenuItem::Keybind(k) => &k.generic,
            MenuItem::Field(f) => &f.generic,
            MenuItem::SpinControl(s) => &s.generic,
            MenuItem::List(l) => &l.generic,
            MenuItem::Slider(s) => &s.generic,
            MenuItem::Separator(s) => &s.generic,
        }
    }

    pub fn generic_mut(&mut self) -> &mut MenuCommon {
        match self {
            MenuItem::Action(a) => &mut a.generic,
            MenuItem::Static(s) => &mut s.generic,
            MenuItem::Keybind(k) => &mut k.generic,
            MenuItem::Field(f) => &mut f.generic,
            MenuItem::SpinControl(s) => &mut s.generic,
            MenuItem::List(l) => &mut l.generic,
            MenuItem::Slider(s) => &mut s.generic,
            MenuItem::Separator(s) => &mut s.generic,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            MenuItem::Action(_) => ItemKind::Action,
            MenuItem::Static(_) => ItemKind::Static,
            MenuItem::Keybind(_) => ItemKind::Keybind,
            MenuItem::Field(_) => ItemKind::Field,
            MenuItem::SpinControl(_) => ItemKind::SpinControl,
            MenuItem::List(_) => ItemKind::List,
            MenuItem::Slider(_) => ItemKind::Slider,
            MenuItem::Separator(_) => ItemKind::Separator,
        }
    }

    pub(crate) fn init(&mut self) {
        match self {
            MenuItem::Action(a) => action_init(a),
            MenuItem::Static(s) => static_init(s),
            MenuItem::Keybind(k) => keybind_init(k),
            MenuItem::Field(f) => field_init(f),
            MenuItem::SpinControl(s) => spincontrol_init(s),
            MenuItem::List(l) => menu_list_init(l),
            MenuItem::Slider(s) => slider_init(s),
            MenuItem::Separator(s) => separator_init(s),
        }
    }

    pub(crate) fn draw(&self, keywait: bool, ctx: &mut UiContext) {
        match self {
            MenuItem::Action(a) => action_draw(a, ctx),
            MenuItem::Static(s) => static_draw(s, ctx),
            MenuItem::Keybind(k) => keybind_draw(k, keywait, ctx),
            MenuItem::Field(f) => field_draw(f, ctx),
            MenuItem::SpinControl(s) => spincontrol_draw(s, ctx),
            MenuItem::List(l) => menu_list_draw(l, ctx),
            MenuItem::Slider(s) => slider_draw(s, ctx),
            MenuItem::Separator(s) => separator_draw(s, ctx),
        }
    }
}

/// Activate fallback shared by kinds without special enter behavior.
pub fn common_do_enter(generic: &mut MenuCommon, ctx: &mut UiContext) -> MenuSound {
    if let Some(activate) = generic.activate.as_mut() {
        let sound = activate(ctx);
        if sound != MenuSound::NotHandled {
            return sound;
        }
    }
    MenuSound::Silent
}

// ============================================================
// Action
// ============================================================

pub fn action_init(a: &mut MenuAction) {
    let name = match a.generic.name.as_deref() {
        Some(name) => name,
        None => panic!("action_init: missing name"),
    };

    a.generic.rect.x = a.generic.x;
    a.generic.rect.y = a.generic.y;
    string_dimensions(&mut a.generic.rect, a.generic.ui_flags, name);
}

pub fn action_draw(a: &MenuAction, ctx: &mut UiContext) {
    let mut flags = a.generic.ui_flags;
    if a.generic.flags.contains(ItemFlags::HAS_FOCUS) {
        flags |= DrawFlags::ALT_COLOR;
    }

    if let Some(name) = a.generic.name.as_deref() {
        ctx.renderer.draw_string(a.generic.x, a.generic.y, None, flags, name);
    }
}

// ============================================================
// Static text
// ============================================================

pub fn static_init(s: &mut MenuStatic) {
    if s.generic.name.is_none() {
        panic!("static_init: missing name");
    }
    if s.max_chars == 0 {
        s.max_chars = MAX_STRING_CHARS;
    }

    s.generic.rect.x = s.generic.x;
    s.generic.rect.y = s.generic.y;
    let name = s.generic.name.as_deref().unwrap_or_default();
    string_dimensions(&mut s.generic.rect, s.generic.ui_flags, name);
}

pub fn static_draw(s: &MenuStatic, ctx: &mut UiContext) {
    if let Some(name) = s.generic.name.as_deref() {
        let color = if s.generic.flags.contains(ItemFlags::CUSTOM_COLOR) {
            Some(s.generic.color)
        } else {
            None
        };
        ctx.renderer.draw_string(s.generic.x, s.generic.y, color, s.generic.ui_flags, name);
    }
}

// ============================================================
// Keybind
// ============================================================

pub fn keybind_init(k: &mut MenuKeybind) {
    if k.generic.name.is_none() {
        panic!("keybind_init: missing name");
    }

    k.generic.ui_flags.remove(DrawFlags::CENTER);

    k.generic.rect.x = k.generic.x + LCOLUMN_OFFSET;
    k.generic.rect.y = k.generic.y;
    let name = k.generic.name.as_deref().unwrap_or_default();
    string_dimensions(&mut k.generic.rect, k.generic.ui_flags | DrawFlags::RIGHT, name);

    let text_width = keybind_text(k).len() as i32 * CHAR_WIDTH;
    k.generic.rect.width += (RCOLUMN_OFFSET - LCOLUMN_OFFSET) + text_width;
}

/// Display projection of the cached binding state.
pub fn keybind_text(k: &MenuKeybind) -> String {
    if !k.alt_binding.is_empty() {
        format!("{} or {}", k.binding, k.alt_binding)
    } else if !k.binding.is_empty() {
        k.binding.clone()
    } else {
        "???".to_owned()
    }
}

/// Refresh the cached projections from the binding table.
pub fn keybind_push(k: &mut MenuKeybind, bindings: &dyn KeyBindings) {
    k.binding.clear();
    k.alt_binding.clear();

    if let Some(key) = bindings.enum_bindings(0, &k.cmd) {
        k.binding = bindings.key_name(key);
        if let Some(alt) = bindings.enum_bindings(key + 1, &k.cmd) {
            k.alt_binding = bindings.key_name(alt);
        }
    }
}

/// Remove every binding of `cmd` from the table.
pub fn keybind_remove(bindings: &mut dyn KeyBindings, cmd: &str) {
    let mut start = 0;
    while let Some(key) = bindings.enum_bindings(start, cmd) {
        bindings.set_binding(key, None);
        start = key + 1;
    }
    debug!("cleared bindings for {:?}", cmd);
}

pub fn keybind_draw(k: &MenuKeybind, keywait: bool, ctx: &mut UiContext) {
    let mut color = None;
    let mut flags = DrawFlags::ALT_COLOR;
    let focused = k.generic.flags.contains(ItemFlags::HAS_FOCUS);
    let blink = (ctx.realtime >> 8) & 1 == 1;

    if focused {
        if !keywait && blink {
            ctx.renderer.draw_char(
                k.generic.x + RCOLUMN_OFFSET / 2,
                k.generic.y,
                k.generic.ui_flags | DrawFlags::RIGHT,
                CURSOR_GLYPH,
            );
        }
    } else if keywait {
        // Everything but the capturing widget is grayed out.
        color = Some(COLOR_GRAY);
        flags = DrawFlags::empty();
    }

    if let Some(name) = k.generic.name.as_deref() {
        ctx.renderer.draw_string(
            k.generic.x + LCOLUMN_OFFSET,
            k.generic.y,
            color,
            k.generic.ui_flags | DrawFlags::RIGHT | flags,
            name,
        );
    }

    if keywait && focused {
        if blink {
            ctx.renderer.draw_char(
                k.generic.x + RCOLUMN_OFFSET,
                k.generic.y,
                k.generic.ui_flags | DrawFlags::LEFT,
                CURSOR_GLYPH,
            );
        }
    } else {
        let text = keybind_text(k);
        ctx.renderer.draw_string(
            k.generic.x + RCOLUMN_OFFSET,
            k.generic.y,
            color,
            k.generic.ui_flags | DrawFlags::LEFT,
            &text,
        );
    }
}

// ============================================================
// Field
// ============================================================

pub fn field_init(f: &mut MenuField) {
    let width = f.field.visible_chars() as i32 * CHAR_WIDTH;

    f.generic.ui_flags.remove(DrawFlags::CENTER);

    if f.generic.name.is_some() {
        f.generic.rect.x = f.generic.x + LCOLUMN_OFFSET;
        f.generic.rect.y = f.generic.y;
        let name = f.generic.name.as_deref().unwrap_or_default();
        string_dimensions(&mut f.generic.rect, f.generic.ui_flags | DrawFlags::RIGHT, name);
        f.generic.rect.width += RCOLUMN_OFFSET + width;
    } else {
        f.generic.rect = Rect {
            x: f.generic.x - width / 2,
            y: f.generic.y,
            width,
            height: CHAR_HEIGHT,
        };
    }
}

pub fn field_draw(f: &MenuField, ctx: &mut UiContext) {
    let mut flags = f.generic.ui_flags;
    if f.generic.flags.contains(ItemFlags::HAS_FOCUS) {
        flags |= DrawFlags::DRAW_CURSOR;
    }

    if let Some(name) = f.generic.name.as_deref() {
        ctx.renderer.draw_string(
            f.generic.x + LCOLUMN_OFFSET,
            f.generic.y,
            None,
            f.generic.ui_flags | DrawFlags::RIGHT | DrawFlags::ALT_COLOR,
            name,
        );

        ctx.renderer.fill_rect(
            f.generic.x + RCOLUMN_OFFSET,
            f.generic.y - 1,
            f.field.visible_chars() as i32 * CHAR_WIDTH,
            CHAR_HEIGHT + 2,
            COLOR_FIELD,
        );
        f.field.draw(f.generic.x + RCOLUMN_OFFSET, f.generic.y, flags, ctx.renderer);
    } else {
        ctx.renderer.fill_rect(
            f.generic.rect.x,
            f.generic.rect.y - 1,
            f.generic.rect.width,
            CHAR_HEIGHT + 2,
            COLOR_FIELD,
        );
        f.field.draw(f.generic.rect.x, f.generic.rect.y, flags, ctx.renderer);
    }
}

pub fn field_key(f: &mut MenuField, key: i32) -> MenuSound {
    if f.field.handle_key(key) {
        MenuSound::Silent
    } else {
        MenuSound::NotHandled
    }
}

pub fn field_char(f: &mut MenuField, ch: i32, ctx: &mut UiContext) -> MenuSound {
    if f.generic.flags.contains(ItemFlags::NUMBERS_ONLY) && !(ch >= '0' as i32 && ch <= '9' as i32)
    {
        return MenuSound::Beep;
    }

    let consumed = f.field.handle_char(ch);

    if let Some(change) = f.generic.change.as_mut() {
        change(ctx, ItemValue::Text(f.field.text()));
    }

    if consumed {
        MenuSound::Silent
    } else {
        MenuSound::NotHandled
    }
}

// ============================================================
// Spin control
// ============================================================

pub fn spincontrol_init(s: &mut MenuSpinControl) {
    if s.generic.name.is_none() {
        panic!("spincontrol_init: missing name");
    }

    s.generic.ui_flags.remove(DrawFlags::CENTER);

    s.generic.rect.x = s.generic.x + LCOLUMN_OFFSET;
    s.generic.rect.y = s.generic.y;
    let name = s.generic.name.as_deref().unwrap_or_default();
    string_dimensions(&mut s.generic.rect, s.generic.ui_flags | DrawFlags::RIGHT, name);

    let max_length = s.item_names.iter().map(|n| n.len()).max().unwrap_or(0) as i32;
    s.generic.rect.width += (RCOLUMN_OFFSET - LCOLUMN_OFFSET) + max_length * CHAR_WIDTH;
}

pub fn spincontrol_do_enter(s: &mut MenuSpinControl, ctx: &mut UiContext) -> MenuSound {
    if s.item_names.is_empty() {
        return MenuSound::NotHandled;
    }

    s.curvalue += 1;
    if s.curvalue >= s.item_names.len() as i32 {
        s.curvalue = 0;
    }

    let cur = s.curvalue;
    if let Some(change) = s.generic.change.as_mut() {
        change(ctx, ItemValue::Int(cur));
    }

    MenuSound::Move
}

pub fn spincontrol_do_slide(s: &mut MenuSpinControl, dir: i32, ctx: &mut UiContext) -> MenuSound {
    if s.item_names.is_empty() {
        return MenuSound::NotHandled;
    }

    s.curvalue += dir;
    if s.curvalue < 0 {
        s.curvalue = s.item_names.len() as i32 - 1;
    } else if s.curvalue >= s.item_names.len() as i32 {
        s.curvalue = 0;
    }

    let cur = s.curvalue;
    if let Some(change) = s.generic.change.as_mut() {
        change(ctx, ItemValue::Int(cur));
    }

    MenuSound::Move
}

pub fn spincontrol_push(s: &mut MenuSpinControl, cvars: &dyn CvarStore) {
    if s.item_names.is_empty() {
        s.curvalue = 0;
        return;
    }
    let value = cvars.get_integer(&s.cvar);
    s.curvalue = value.clamp(0, s.item_names.len() as i32 - 1);
}

pub fn spincontrol_pop(s: &MenuSpinControl, cvars: &mut dyn CvarStore) {
    cvars.set_integer(&s.cvar, s.curvalue, CvarSource::Console);
}

pub fn spincontrol_draw(s: &MenuSpinControl, ctx: &mut UiContext) {
    if let Some(name) = s.generic.name.as_deref() {
        ctx.renderer.draw_string(
            s.generic.x + LCOLUMN_OFFSET,
            s.generic.y,
            None,
            s.generic.ui_flags | DrawFlags::RIGHT | DrawFlags::ALT_COLOR,
            name,
        );
    }

    if s.generic.flags.contains(ItemFlags::HAS_FOCUS) && (ctx.realtime >> 8) & 1 == 1 {
        ctx.renderer.draw_char(
            s.generic.x + RCOLUMN_OFFSET / 2,
            s.generic.y,
            s.generic.ui_flags | DrawFlags::RIGHT,
            CURSOR_GLYPH,
        );
    }

    if s.curvalue < 0 || s.curvalue >= s.item_names.len() as i32 {
        return;
    }
    ctx.renderer.draw_string(
        s.generic.x + RCOLUMN_OFFSET,
        s.generic.y,
        None,
        s.generic.ui_flags,
        &s.item_names[s.curvalue as usize],
    );
}

// ============================================================
// Slider
// ============================================================

pub fn slider_init(s: &mut MenuSlider) {
    let name = match s.generic.name.as_deref() {
        Some(name) => name,
        None => panic!("slider_init: missing name"),
    };
    let length = name.len() as i32 * CHAR_WIDTH;

    s.generic.rect.x = s.generic.x + LCOLUMN_OFFSET - length;
    s.generic.rect.y = s.generic.y;
    s.generic.rect.width = 32 + length + (SLIDER_RANGE + 2) * CHAR_WIDTH;
    s.generic.rect.height = CHAR_HEIGHT;

    s.curvalue = s.curvalue.clamp(s.minvalue, s.maxvalue.max(s.minvalue));
}

pub fn slider_key(s: &mut MenuSlider, key: i32) -> MenuSound {
    match key {
        K_END => {
            s.curvalue = s.maxvalue;
            MenuSound::Move
        }
        K_HOME => {
            s.curvalue = s.minvalue;
            MenuSound::Move
        }
        _ => MenuSound::NotHandled,
    }
}

pub fn slider_do_slide(s: &mut MenuSlider, dir: i32, ctx: &mut UiContext) -> MenuSound {
    s.curvalue = (s.curvalue + dir).clamp(s.minvalue, s.maxvalue.max(s.minvalue));

    let cur = s.curvalue;
    if let Some(change) = s.generic.change.as_mut() {
        let sound = change(ctx, ItemValue::Int(cur));
        if sound != MenuSound::NotHandled {
            return sound;
        }
    }

    MenuSound::Silent
}

pub fn slider_push(s: &mut MenuSlider, cvars: &dyn CvarStore) {
    let value = ((cvars.get_value(&s.cvar) + s.add) * s.mul) as i32;
    s.curvalue = value.clamp(s.minvalue, s.maxvalue.max(s.minvalue));
}

pub fn slider_pop(s: &MenuSlider, cvars: &mut dyn CvarStore) {
    cvars.set_value(&s.cvar, s.curvalue as f32 / s.mul - s.add, CvarSource::Console);
}

pub fn slider_draw(s: &MenuSlider, ctx: &mut UiContext) {
    let flags = s.generic.ui_flags.difference(DrawFlags::CENTER);

    if s.generic.flags.contains(ItemFlags::HAS_FOCUS) && (ctx.realtime >> 8) & 1 == 1 {
        ctx.renderer.draw_char(
            s.generic.x + RCOLUMN_OFFSET / 2,
            s.generic.y,
            s.generic.ui_flags | DrawFlags::RIGHT,
            CURSOR_GLYPH,
        );
    }

    if let Some(name) = s.generic.name.as_deref() {
        ctx.renderer.draw_string(
            s.generic.x + LCOLUMN_OFFSET,
            s.generic.y,
            None,
            flags | DrawFlags::RIGHT | DrawFlags::ALT_COLOR,
            name,
        );
    }

    // Track: left cap, body, right cap, then the thumb.
    ctx.renderer.draw_char(s.generic.x + RCOLUMN_OFFSET, s.generic.y, flags | DrawFlags::LEFT, 128);
    for i in 0..SLIDER_RANGE {
        ctx.renderer.draw_char(
            RCOLUMN_OFFSET + s.generic.x + i * CHAR_WIDTH + CHAR_WIDTH,
            s.generic.y,
            flags | DrawFlags::LEFT,
            129,
        );
    }
    ctx.renderer.draw_char(
        RCOLUMN_OFFSET + s.generic.x + SLIDER_RANGE * CHAR_WIDTH + CHAR_WIDTH,
        s.generic.y,
        flags | DrawFlags::LEFT,
        130,
    );

    let pos = if s.maxvalue <= s.minvalue {
        0.0
    } else {
        ((s.curvalue - s.minvalue) as f32 / (s.maxvalue - s.minvalue) as f32).clamp(0.0, 1.0)
    };

    ctx.renderer.draw_char(
        CHAR_WIDTH
            + RCOLUMN_OFFSET
            + s.generic.x
            + ((SLIDER_RANGE - 1) as f32 * CHAR_WIDTH as f32 * pos) as i32,
        s.generic.y,
        flags | DrawFlags::LEFT,
        131,
    );
}

// ============================================================
// Separator
// ============================================================

pub fn separator_init(s: &mut MenuSeparator) {
    // Parked far off-screen so hit-testing can never reach it.
    s.generic.rect.x = 999999;
    s.generic.rect.y = 999999;
    s.generic.rect.width = -999999;
    s.generic.rect.height = -999999;
}

pub fn separator_draw(s: &MenuSeparator, ctx: &mut UiContext) {
    if let Some(name) = s.generic.name.as_deref() {
        ctx.renderer.draw_string(s.generic.x, s.generic.y, None, DrawFlags::RIGHT, name);
    }
}

// ============================================================
// Tests
// ============================================================
