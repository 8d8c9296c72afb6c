use tracing::error;

use crate::ui::tui;

/// Put the terminal back before the default hook prints, and keep a copy of
/// the panic in the log file.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();
        error!(%panic_info, "panic");
        hook(panic_info);
    }));
}
