use std::{env, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub menu_path: PathBuf,
    pub clear_cart_on_checkout: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            menu_path: PathBuf::from("menu.toml"),
            clear_cart_on_checkout: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    menu_path: Option<PathBuf>,
    clear_cart_on_checkout: Option<bool>,
}

/// Defaults, then `storefront.toml`, then `APP__*` environment overrides.
/// CLI flags are applied on top by the caller.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("storefront.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = env::var("APP__MENU_PATH") {
        settings.menu_path = PathBuf::from(v);
    }
    if let Ok(v) = env::var("APP__CLEAR_CART_ON_CHECKOUT") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.clear_cart_on_checkout = parsed;
        }
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<FileSettings>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.menu_path {
        settings.menu_path = v;
    }
    if let Some(v) = file_cfg.clear_cart_on_checkout {
        settings.clear_cart_on_checkout = v;
    }
}
