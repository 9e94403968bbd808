//! Terminal setup and restoration

use tracing::error;

/// Log panics to the log file and hand the terminal back before the
/// default hook prints the message
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Panic: {info}");
        ratatui::restore();
        previous(info);
    }));
}
