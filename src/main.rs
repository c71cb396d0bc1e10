use pde_client::cli::cli_main::run_interactive_menu;
use pde_client::logging::init_logging;
use pde_client::settings::{ClientSettings, DEFAULT_CONFIG_FILE};

pub fn main() {
    let settings_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let settings = ClientSettings::load_or_default(&settings_file);
    init_logging(&settings);
    run_interactive_menu(settings, &settings_file);
}
