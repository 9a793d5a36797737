use log::{error, Level};

mod config;
mod counter;
mod dom;
mod enhance;
mod error;
mod events;
mod load;
mod menu;
mod navbar;
mod parallax;
mod purchase;
mod rate_limit;
mod smooth_scroll;
mod viewport;
mod visibility;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    let _ = console_log::init_with_level(Level::Info);

    if let Err(e) = enhance::start() {
        error!("Page enhancements not started: {}", e);
    }
}
