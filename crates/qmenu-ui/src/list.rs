// list.rs — scrollable multi-column list widget

use std::cmp::Ordering;

use qmenu_common::keys::{
    K_ALT, K_CTRL, K_DOWNARROW, K_END, K_HOME, K_KP_DOWNARROW, K_KP_END, K_KP_HOME, K_KP_PGDN,
    K_KP_PGUP, K_KP_UPARROW, K_LEFTARROW, K_MOUSE1, K_MOUSE2, K_MWHEELDOWN, K_MWHEELUP, K_PGDN,
    K_PGUP, K_RIGHTARROW, K_UPARROW,
};
use qmenu_common::q_shared::{ClipRect, Rect};

use crate::context::{
    ClipFlags, DrawFlags, KeyBindings, Renderer, UiContext, COLOR_FIELD, DOUBLE_CLICK_DELAY,
    MLIST_PRESTEP, MLIST_SCROLLBAR_WIDTH, MLIST_SPACING,
};
use crate::widgets::{ItemFlags, ItemValue, MenuCommon, MenuSound};

// ============================================================
// Rows and columns
// ============================================================

/// Typed accessor over one caller-owned row. Columns the row has no
/// value for read as "".
pub trait ListRow {
    fn column(&self, col: usize) -> &str;
}

impl ListRow for Vec<String> {
    fn column(&self, col: usize) -> &str {
        self.get(col).map(String::as_str).unwrap_or("")
    }
}

pub struct ListColumn {
    pub name: Option<String>,
    pub width: i32,
    pub ui_flags: DrawFlags,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ListFlags: u32 {
        const HIDE_HEADER          = 0x01;
        const HIDE_SCROLLBAR       = 0x02;
        const HIDE_SCROLLBAR_EMPTY = 0x04;
        const HIDE_BACKGROUND      = 0x08;
    }
}

/// Row ordering for one sort column.
pub type RowCmp = Box<dyn Fn(&dyn ListRow, &dyn ListRow, usize) -> Ordering>;

#[derive(Default)]
pub struct MenuList {
    pub generic: MenuCommon,
    pub items: Vec<Box<dyn ListRow>>,
    pub columns: Vec<ListColumn>,
    /// Declared pixel height; the visible row count is derived from it.
    pub height: i32,
    pub ml_flags: ListFlags,
    pub curvalue: i32,
    /// Index of the first visible row.
    pub prestep: i32,
    pub max_items: i32,
    pub sortcol: i32,
    /// 0 disables sorting; otherwise the direction sign.
    pub sortdir: i32,
    pub cmp: Option<RowCmp>,
    pub click_time: i32,
    // Dormant type-ahead buffer; cleared on every key, never consulted.
    scratch: String,
}

impl MenuList {
    pub fn num_items(&self) -> i32 {
        self.items.len() as i32
    }
}

fn row_ptr(row: &dyn ListRow) -> *const () {
    row as *const dyn ListRow as *const ()
}

fn default_cmp(a: &dyn ListRow, b: &dyn ListRow, col: usize) -> Ordering {
    let a = a.column(col).bytes().map(|c| c.to_ascii_lowercase());
    let b = b.column(col).bytes().map(|c| c.to_ascii_lowercase());
    a.cmp(b)
}

// ============================================================
// Windowing
// ============================================================

/// Clamp the scroll window inside the row set.
pub fn menu_list_validate_prestep(l: &mut MenuList) {
    if l.prestep > l.num_items() - l.max_items {
        l.prestep = l.num_items() - l.max_items;
    }
    if l.prestep < 0 {
        l.prestep = 0;
    }
}

/// Minimal scroll keeping the selection visible.
pub fn menu_list_adjust_prestep(l: &mut MenuList) {
    if l.num_items() > l.max_items {
        if l.prestep > l.curvalue {
            l.prestep = l.curvalue;
        } else if l.prestep < l.curvalue - l.max_items + 1 {
            l.prestep = l.curvalue - l.max_items + 1;
        }
    } else {
        l.prestep = 0;
    }
}

pub fn menu_list_init(l: &mut MenuList) {
    let mut height = l.height;
    if !l.ml_flags.contains(ListFlags::HIDE_HEADER) {
        height -= MLIST_SPACING;
    }
    l.max_items = height / MLIST_SPACING;

    l.curvalue = l.curvalue.clamp(0, (l.num_items() - 1).max(0));
    menu_list_validate_prestep(l);

    l.generic.rect.x = l.generic.x;
    l.generic.rect.y = l.generic.y;
    l.generic.rect.width = l.columns.iter().map(|c| c.width).sum();
    l.generic.rect.height = l.height;

    if l.sortdir != 0 {
        menu_list_sort(l);
    }
}

pub fn menu_list_set_value(l: &mut MenuList, value: i32, ctx: &mut UiContext) {
    let value = value.clamp(0, (l.num_items() - 1).max(0));

    if value != l.curvalue {
        l.curvalue = value;
        if let Some(change) = l.generic.change.as_mut() {
            change(ctx, ItemValue::Int(value));
        }
    }

    menu_list_adjust_prestep(l);
}

// ============================================================
// Sorting
// ============================================================

/// Re-sort the rows; the selected row is tracked by identity, not index.
pub fn menu_list_sort(l: &mut MenuList) {
    if l.items.is_empty() {
        return;
    }

    let col = l.sortcol.max(0) as usize;
    let dir = l.sortdir;
    let selected = l.items.get(l.curvalue as usize).map(|row| row_ptr(row.as_ref()));

    let cmp = l.cmp.take();
    l.items.sort_by(|a, b| {
        let ord = match &cmp {
            Some(f) => f(a.as_ref(), b.as_ref(), col),
            None => default_cmp(a.as_ref(), b.as_ref(), col),
        };
        if dir < 0 {
            ord.reverse()
        } else {
            ord
        }
    });
    l.cmp = cmp;

    if let Some(selected) = selected {
        if let Some(idx) = l.items.iter().position(|row| row_ptr(row.as_ref()) == selected) {
            l.curvalue = idx as i32;
        }
    }

    menu_list_adjust_prestep(l);
}

/// Pick the sort column: same column flips direction, a new column
/// starts ascending.
pub fn menu_list_set_column(l: &mut MenuList, col: i32) -> MenuSound {
    if l.sortcol == col {
        l.sortdir = -l.sortdir;
    } else {
        l.sortcol = col;
        l.sortdir = 1;
    }
    menu_list_sort(l);
    MenuSound::Silent
}

// ============================================================
// Input
// ============================================================

pub fn menu_list_click(l: &mut MenuList, ctx: &mut UiContext) -> MenuSound {
    if l.items.is_empty() {
        return MenuSound::Silent;
    }

    let mut rect = Rect {
        x: l.generic.rect.x,
        y: l.generic.rect.y,
        width: l.generic.rect.width,
        height: MLIST_SPACING,
    };

    if !l.ml_flags.contains(ListFlags::HIDE_HEADER) {
        if l.sortdir != 0 && ctx.cursor_in_rect(&rect) {
            for col in 0..l.columns.len() {
                rect.width = l.columns[col].width;
                if ctx.cursor_in_rect(&rect) {
                    return menu_list_set_column(l, col as i32);
                }
                rect.x += l.columns[col].width;
            }
            return MenuSound::Silent;
        }
        rect.y += MLIST_SPACING;
    }

    let last = l.num_items().min(l.prestep + l.max_items);
    for i in l.prestep..last {
        if ctx.cursor_in_rect(&rect) {
            if l.curvalue == i && ctx.realtime - l.click_time < DOUBLE_CLICK_DELAY {
                if let Some(activate) = l.generic.activate.as_mut() {
                    return activate(ctx);
                }
                return MenuSound::Silent;
            }
            l.click_time = ctx.realtime;
            l.curvalue = i;
            if let Some(change) = l.generic.change.as_mut() {
                return change(ctx, ItemValue::Int(i));
            }
            return MenuSound::Silent;
        }
        rect.y += MLIST_SPACING;
    }

    MenuSound::Silent
}

pub fn menu_list_key(l: &mut MenuList, key: i32, ctx: &mut UiContext) -> MenuSound {
    if l.items.is_empty() {
        return MenuSound::NotHandled;
    }

    if ctx.bindings.is_down(K_ALT) && (key >= '0' as i32 && key <= '9' as i32) {
        let col = if key == '0' as i32 { 9 } else { key - '0' as i32 - 1 };
        if l.sortdir != 0 && col < l.columns.len() as i32 {
            return menu_list_set_column(l, col);
        }
        return MenuSound::NotHandled;
    }

    l.scratch.clear();

    // vi-style aliases
    let key = match key {
        k if k == 'h' as i32 => K_LEFTARROW,
        k if k == 'j' as i32 => K_DOWNARROW,
        k if k == 'k' as i32 => K_UPARROW,
        k if k == 'l' as i32 => K_RIGHTARROW,
        k => k,
    };

    match key {
        K_LEFTARROW if l.sortdir != 0 => {
            let col = if l.sortcol > 0 { l.sortcol - 1 } else { l.columns.len() as i32 - 1 };
            menu_list_set_column(l, col)
        }

        K_RIGHTARROW if l.sortdir != 0 => {
            let col = if l.sortcol < l.columns.len() as i32 - 1 { l.sortcol + 1 } else { 0 };
            menu_list_set_column(l, col)
        }

        K_UPARROW | K_KP_UPARROW => {
            if l.curvalue > 0 {
                l.curvalue -= 1;
                let cur = l.curvalue;
                if let Some(change) = l.generic.change.as_mut() {
                    change(ctx, ItemValue::Int(cur));
                }
                menu_list_adjust_prestep(l);
                MenuSound::Move
            } else {
                MenuSound::Beep
            }
        }

        K_DOWNARROW | K_KP_DOWNARROW => {
            if l.curvalue < l.num_items() - 1 {
                l.curvalue += 1;
                let cur = l.curvalue;
                if let Some(change) = l.generic.change.as_mut() {
                    change(ctx, ItemValue::Int(cur));
                }
                menu_list_adjust_prestep(l);
                MenuSound::Move
            } else {
                MenuSound::Beep
            }
        }

        K_HOME | K_KP_HOME => {
            l.prestep = 0;
            l.curvalue = 0;
            if let Some(change) = l.generic.change.as_mut() {
                change(ctx, ItemValue::Int(0));
            }
            MenuSound::Move
        }

        K_END | K_KP_END => {
            if l.num_items() > l.max_items {
                l.prestep = l.num_items() - l.max_items;
            }
            l.curvalue = l.num_items() - 1;
            let cur = l.curvalue;
            if let Some(change) = l.generic.change.as_mut() {
                change(ctx, ItemValue::Int(cur));
            }
            MenuSound::Move
        }

        K_MWHEELUP => {
            l.prestep -= if ctx.bindings.is_down(K_CTRL) { 4 } else { 2 };
            menu_list_validate_prestep(l);
            MenuSound::Silent
        }

        K_MWHEELDOWN => {
            l.prestep += if ctx.bindings.is_down(K_CTRL) { 4 } else { 2 };
            menu_list_validate_prestep(l);
            MenuSound::Silent
        }

        K_PGUP | K_KP_PGUP => {
            l.prestep -= l.max_items;
            menu_list_validate_prestep(l);
            MenuSound::Silent
        }

        K_PGDN | K_KP_PGDN => {
            l.prestep += l.max_items;
            menu_list_validate_prestep(l);
            MenuSound::Silent
        }

        K_MOUSE1 | K_MOUSE2 => menu_list_click(l, ctx),

        _ => MenuSound::NotHandled,
    }
}

// ============================================================
// Drawing
// ============================================================

/// Draw one cell clipped to its column, anchored per the column's
/// alignment flags.
fn menu_list_draw_cell(
    ctx: &mut UiContext,
    x: i32,
    y: i32,
    flags: DrawFlags,
    column: &ListColumn,
    text: &str,
) {
    let clip = ClipRect { left: x, top: 0, right: x + column.width - 1, bottom: 0 };

    let x = if column.ui_flags.contains(DrawFlags::CENTER) {
        x + column.width / 2
    } else if column.ui_flags.intersects(DrawFlags::RIGHT) {
        x + column.width - MLIST_PRESTEP
    } else {
        x + MLIST_PRESTEP
    };

    ctx.renderer.set_clip_rect(ClipFlags::LEFT | ClipFlags::RIGHT, Some(clip));
    ctx.renderer.draw_string(x, y + 1, None, column.ui_flags | flags, text);
    match ctx.clip {
        Some(ambient) => ctx.renderer.set_clip_rect(ClipFlags::MASK, Some(ambient)),
        None => ctx.renderer.set_clip_rect(ClipFlags::empty(), None),
    }
}

pub fn menu_list_draw(l: &MenuList, ctx: &mut UiContext) {
    let x = l.generic.rect.x;
    let mut y = l.generic.rect.y;
    let width = l.generic.rect.width;
    let mut height = l.generic.rect.height;

    if !l.ml_flags.contains(ListFlags::HIDE_HEADER) {
        let mut xx = x;
        for (col, column) in l.columns.iter().enumerate() {
            ctx.renderer.fill_rect(xx, y, column.width - 1, MLIST_SPACING - 1, COLOR_FIELD);
            if let Some(name) = column.name.as_deref() {
                let flags = if l.sortcol == col as i32 && l.sortdir != 0 {
                    DrawFlags::empty()
                } else {
                    DrawFlags::ALT_COLOR
                };
                menu_list_draw_cell(ctx, xx, y, flags, column, name);
            }
            xx += column.width;
        }
        y += MLIST_SPACING;
        height -= MLIST_SPACING;
    }

    if !l.ml_flags.contains(ListFlags::HIDE_SCROLLBAR)
        && (!l.ml_flags.contains(ListFlags::HIDE_SCROLLBAR_EMPTY) || l.num_items() > l.max_items)
    {
        let bar_height = height - MLIST_SPACING * 2;
        let yy = y + MLIST_SPACING;

        if !l.ml_flags.contains(ListFlags::HIDE_BACKGROUND) {
            ctx.renderer.fill_rect(x + width, yy, MLIST_SCROLLBAR_WIDTH - 1, bar_height, COLOR_FIELD);
        }

        let (page_frac, prestep_frac) = if l.num_items() > l.max_items {
            (
                l.max_items as f32 / l.num_items() as f32,
                l.prestep as f32 / l.num_items() as f32,
            )
        } else {
            (1.0, 0.0)
        };

        // Thumb
        ctx.renderer.fill_rect(
            x + width,
            yy + (bar_height as f32 * prestep_frac).round() as i32,
            MLIST_SCROLLBAR_WIDTH - 1,
            (bar_height as f32 * page_frac).round() as i32,
            COLOR_FIELD,
        );
    }

    let mut xx = x;
    for column in &l.columns {
        ctx.renderer.fill_rect(xx, y, column.width - 1, height, COLOR_FIELD);
        xx += column.width;
    }

    let mut yy = y;
    let last = l.num_items().min(l.prestep + l.max_items);
    for i in l.prestep..last {
        if !l.generic.flags.contains(ItemFlags::DISABLED) && i == l.curvalue {
            ctx.renderer.fill_rect(x, yy, width - 1, MLIST_SPACING, COLOR_FIELD);
        }

        let row = l.items[i as usize].as_ref();
        let mut xx = x;
        for (col, column) in l.columns.iter().enumerate() {
            let text = row.column(col);
            if text.is_empty() {
                break;
            }
            menu_list_draw_cell(ctx, xx, yy, DrawFlags::empty(), column, text);
            xx += column.width;
        }

        yy += MLIST_SPACING;
    }
}

// ============================================================
// Tests
// ============================================================
