pub mod context;
pub mod list;
pub mod menu;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testutil;

pub use context::{
    ClipFlags, DrawFlags, EditField, KeyBindings, Renderer, ScreenStack, UiContext,
    DOUBLE_CLICK_DELAY, LCOLUMN_OFFSET, MENU_SPACING, MLIST_PRESTEP, MLIST_SCROLLBAR_WIDTH,
    MLIST_SPACING, RCOLUMN_OFFSET, SLIDER_RANGE,
};
pub use list::{ListColumn, ListFlags, ListRow, MenuList};
pub use menu::{MenuFramework, MAX_MENU_ITEMS};
pub use widgets::{
    ItemFlags, ItemKind, ItemValue, MenuAction, MenuCommon, MenuField, MenuItem, MenuKeybind,
    MenuSeparator, MenuSlider, MenuSound, MenuSpinControl, MenuStatic,
};
