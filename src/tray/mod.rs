//! System tray surface for the resident listener.
//!
//! The tool sits in the tray between replays. The context menu can print
//! the planned setup to the console or shut the listener down.

pub mod icon;
pub mod menu;

pub use icon::*;
pub use menu::*;

use crate::profile::CarProfile;
use crate::winapi_utils::post_quit_message;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tray_icon::menu::MenuEvent;
use tray_icon::{TrayIcon, TrayIconBuilder};

/// Sets up the tray icon and menu.
///
/// Keep the returned `TrayIcon` alive for the icon to remain visible.
pub fn setup_tray(
    shutdown: Arc<AtomicBool>,
    profile: Arc<CarProfile>,
) -> Result<TrayIcon, Box<dyn std::error::Error>> {
    let icon = create_tray_icon()?;
    let menu = create_tray_menu();

    let tray = TrayIconBuilder::new()
        .with_tooltip(format!("ProTune - {}", profile.car))
        .with_icon(icon)
        .with_menu(Box::new(menu))
        .build()?;

    spawn_menu_handler(shutdown, profile);

    tracing::info!("System tray initialized");
    Ok(tray)
}

/// Spawns a thread to handle menu events.
fn spawn_menu_handler(shutdown: Arc<AtomicBool>, profile: Arc<CarProfile>) {
    std::thread::spawn(move || {
        let receiver = MenuEvent::receiver();

        loop {
            if let Ok(event) = receiver.try_recv() {
                handle_menu_event(&event.id.0, &shutdown, &profile);
            }

            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    });
}

/// Handles a menu item click.
fn handle_menu_event(menu_id: &str, shutdown: &Arc<AtomicBool>, profile: &CarProfile) {
    match menu_id {
        "show_setup" => {
            print_setup(profile);
        }
        "exit" => {
            tracing::info!("Exit requested from tray menu");
            shutdown.store(true, Ordering::SeqCst);
            post_quit_message(0);
        }
        _ => {
            tracing::debug!(menu_id, "Unknown menu event");
        }
    }
}

/// Prints the planned setup to the console.
fn print_setup(profile: &CarProfile) {
    println!();
    println!("════════════════════════════════════════");
    println!("🔧 {} - planned setup", profile.car);
    println!("════════════════════════════════════════");
    for setting in &profile.settings {
        if setting.presses == 0 {
            println!("   {:<22} (unchanged)", setting.name);
        } else {
            println!(
                "   {:<22} {:>3}x {:?}",
                setting.name, setting.presses, setting.key
            );
        }
    }
    if !profile.skipped.is_empty() {
        println!("   Not on this car: {}", profile.skipped.join(", "));
    }
    println!("   Key events per replay: {}", profile.total_events());
    println!("════════════════════════════════════════");
    println!();
}
