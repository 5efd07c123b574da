//! Context menu for the system tray.

use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};

/// Menu item IDs
pub const MENU_ID_SHOW_SETUP: &str = "show_setup";
pub const MENU_ID_EXIT: &str = "exit";

/// Creates the context menu for the system tray.
pub fn create_tray_menu() -> Menu {
    let menu = Menu::new();

    let show_setup = MenuItem::with_id(MenuId::new(MENU_ID_SHOW_SETUP), "Show Setup", true, None);
    let separator = PredefinedMenuItem::separator();
    let exit = MenuItem::with_id(MenuId::new(MENU_ID_EXIT), "Exit", true, None);

    let _ = menu.append(&show_setup);
    let _ = menu.append(&separator);
    let _ = menu.append(&exit);

    menu
}
