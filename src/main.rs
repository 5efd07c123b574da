//! ProTune - replays a car's pro tuning setup into The Crew Motorfest.
//!
//! Loads a profile of target setting values, plans the arrow-key sequence
//! the tuning menu needs, and replays it into the focused window whenever
//! the global hotkey fires. `--apply` replays once and exits instead.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "protune")]
#[command(about = "Applies pro tuning setups in The Crew Motorfest by replaying arrow-key input")]
struct Cli {
    /// Profile file with the car's target settings.
    #[arg(long, default_value = "profile.json")]
    profile: PathBuf,

    /// Milliseconds between consecutive key events.
    #[arg(long, default_value_t = protune::config::DEFAULT_INTER_KEY_DELAY_MS)]
    delay: u64,

    /// Global trigger, e.g. "ctrl+alt+s" or "ctrl+shift+f8".
    #[arg(long, default_value = protune::config::DEFAULT_HOTKEY)]
    hotkey: String,

    /// Profile settings to leave untouched, e.g. "final_drive".
    #[arg(long, num_args = 1.., value_name = "SETTING")]
    skip_settings: Vec<String>,

    /// Replay once right away and exit instead of waiting for the hotkey.
    #[arg(long)]
    apply: bool,

    /// Print the supported settings in menu order and exit.
    #[arg(long)]
    list_settings: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("protune=info")),
        )
        .init();

    if cli.list_settings {
        print_catalog();
        return Ok(());
    }

    run(cli)
}

fn print_catalog() {
    println!("Settings in menu order:");
    for spec in protune::profile::catalog::MENU_ORDER.iter() {
        match spec.menu_start {
            Some(start) => println!(
                "  {:<22} {}%/press, slider starts at {}% (Right lowers it)",
                spec.name, spec.increment, start
            ),
            None => println!(
                "  {:<22} {}/press, signed delta from the car default",
                spec.name, spec.increment
            ),
        }
    }
}

#[cfg(not(windows))]
fn run(_cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    Err("protune drives the Windows input queue and only runs on Windows".into())
}

#[cfg(windows)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use protune::config::{resolve_profile_path, KeyCombo};
    use protune::profile::load_profile_skipping;
    use protune::replay::{ReplayEngine, RunOutcome};
    use protune::tray::setup_tray;
    use protune::winapi_utils::{
        post_quit_message, run_hotkey_loop, show_info, show_warning, HotkeyGuard,
        SendInputEmitter, HOTKEY_ID,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    let combo: KeyCombo = cli.hotkey.parse()?;

    let profile_path = resolve_profile_path(&cli.profile);
    let profile = Arc::new(load_profile_skipping(&profile_path, &cli.skip_settings)?);
    tracing::info!(
        path = %profile_path.display(),
        car = %profile.car,
        settings = profile.settings.len(),
        skipped = profile.skipped.len(),
        key_events = profile.total_events(),
        "Profile loaded"
    );

    let mut engine = ReplayEngine::new(SendInputEmitter, Duration::from_millis(cli.delay));

    if cli.apply {
        // One-shot mode: a short beat for the shell to settle, then replay
        // and exit without a dialog.
        std::thread::sleep(Duration::from_millis(100));
        log_replay_target();
        engine.run(&profile);
        println!(
            "Applied {} ({} key events).",
            profile.car,
            profile.total_events()
        );
        return Ok(());
    }

    // Only one resident listener may own the hotkey.
    let Some(_lock) = acquire_instance_lock()? else {
        show_warning(
            "ProTune - Already Running",
            "ProTune is already running.\n\nCheck the system tray for the icon.",
        );
        return Ok(());
    };

    print_banner(&profile, &combo, cli.delay);

    let shutdown = Arc::new(AtomicBool::new(false));

    let _tray = match setup_tray(Arc::clone(&shutdown), Arc::clone(&profile)) {
        Ok(tray) => Some(tray),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create system tray, continuing without it");
            None
        }
    };

    // Handle Ctrl+C as backup
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        println!("\n🛑 Shutdown signal received...");
        shutdown_ctrlc.store(true, Ordering::SeqCst);
        post_quit_message(0);
    })?;

    let _hotkey = match HotkeyGuard::register(HOTKEY_ID, &combo) {
        Ok(guard) => guard,
        Err(e) => {
            tracing::error!(error = %e, "Cannot register the trigger hotkey");
            return Err(e.into());
        }
    };

    run_hotkey_loop(HOTKEY_ID, || {
        log_replay_target();
        if let RunOutcome::Completed { keys_sent } = engine.run(&profile) {
            show_info(
                "ProTune",
                &format!(
                    "Settings applied to {}!\n\n{} key events sent.",
                    profile.car, keys_sent
                ),
            );
        }
    });

    // Cleanup
    shutdown.store(true, Ordering::SeqCst);

    let totals = engine.totals();
    println!();
    println!("Replays completed: {}", totals.runs);
    println!("Key events sent:   {}", totals.keys_sent);
    println!("\n👋 ProTune has exited. Goodbye!");
    Ok(())
}

#[cfg(windows)]
fn print_banner(
    profile: &protune::profile::CarProfile,
    combo: &protune::config::KeyCombo,
    delay: u64,
) {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                  ProTune - Setup Replay                    ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("🚗 Car:        {}", profile.car);
    println!(
        "   Settings:   {} tuned, {} not on this car",
        profile.settings.len(),
        profile.skipped.len()
    );
    println!("   Key events: {} per replay", profile.total_events());
    println!("   Delay:      {} ms between events", delay);
    println!();
    println!(
        "🎯 Open the pro settings menu with the cursor on the FIRST row, then press {}.",
        combo
    );
    println!("   The replay is blind: it trusts the cursor position and fresh defaults.");
    println!("   Right-click the tray icon or press Ctrl+C to quit.");
    println!();
}

/// Logs which window the replay is about to type into.
#[cfg(windows)]
fn log_replay_target() {
    use protune::winapi_utils::{get_foreground_window, get_window_text};

    match get_foreground_window() {
        Some(hwnd) => {
            let title = get_window_text(hwnd);
            tracing::info!(window = %title, "Replaying into the focused window");
        }
        None => tracing::warn!("No window has focus, events will go nowhere"),
    }
}

// RAII guard to delete the lock file on exit
#[cfg(windows)]
struct LockFileGuard(PathBuf);

#[cfg(windows)]
impl Drop for LockFileGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Creates the PID lock file, or returns `None` when a live instance
/// already owns it.
#[cfg(windows)]
fn acquire_instance_lock() -> std::io::Result<Option<LockFileGuard>> {
    use protune::winapi_utils::is_process_running;
    use std::fs::{self, OpenOptions};
    use std::io::Write;

    let lock_path = match dirs::config_dir() {
        Some(dir) => dir.join("protune").join("protune.lock"),
        None => PathBuf::from(".").join("protune.lock"),
    };

    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).ok();
    }

    if lock_path.exists() {
        if let Ok(pid_str) = fs::read_to_string(&lock_path) {
            if let Ok(pid) = pid_str.trim().parse::<u32>() {
                if is_process_running(pid) {
                    return Ok(None);
                }
            }
        }
        // Stale lock from a dead process
        let _ = fs::remove_file(&lock_path);
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)?;

    write!(file, "{}", std::process::id())?;

    Ok(Some(LockFileGuard(lock_path)))
}
