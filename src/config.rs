//! Configuration constants for the RED OS welcome application

/// Application identity
pub mod app {
    /// Application ID
    pub const APP_ID: &str = "ru.red-soft.redos-welcome-gtk";

    /// Human readable application name, also used as the narrow-layout title
    pub const APP_NAME: &str = "RED OS welcome";

    /// Default log filter when RUST_LOG is not set
    pub const DEFAULT_LOG_FILTER: &str = "redos_welcome_gtk=info";
}

/// Desktop settings store keys
pub mod settings {
    /// Schema holding the desktop interface preferences
    pub const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";

    /// Color scheme key inside INTERFACE_SCHEMA
    pub const COLOR_SCHEME_KEY: &str = "color-scheme";

    /// Raw enum values of COLOR_SCHEME_KEY recognised by the binding
    pub const COLOR_SCHEME_LIGHT: i32 = 0;
    pub const COLOR_SCHEME_DARK: i32 = 1;
}

/// Responsive layout configuration
pub mod layout {
    /// Breakpoint below which the top switcher collapses into the bottom bar
    pub const BREAKPOINT_CONDITION: &str = "max-width: 500sp";
}

/// Stylesheet lookup
pub mod style {
    /// Candidate stylesheet locations, first readable one wins
    pub const STYLESHEET_PATHS: &[&str] = &[
        "ui/style.css",
        "/usr/share/redos-welcome-gtk/style.css",
    ];
}

/// Window configuration
pub mod window {
    /// Minimum window height
    pub const MIN_HEIGHT: i32 = 500;

    /// Default window dimensions
    pub const DEFAULT_WIDTH: i32 = 800;
    pub const DEFAULT_HEIGHT: i32 = 600;

    /// Widget spacing
    pub const SECTION_SPACING: i32 = 12;
    pub const MARGIN: i32 = 16;

    /// Maximum width of clamped page content
    pub const CLAMP_MAX_WIDTH: i32 = 600;
}
