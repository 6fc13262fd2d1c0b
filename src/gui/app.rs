use std::rc::Rc;

use adw::prelude::*;
use gtk4::glib;
use tracing::{debug, info, warn};

use crate::config::app::{APP_ID, APP_NAME};
use crate::config::settings::{COLOR_SCHEME_KEY, INTERFACE_SCHEMA};
use crate::config::style::STYLESHEET_PATHS;
use crate::config::window::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_HEIGHT};
use crate::gui::dialogs::show_about_dialog;
use crate::gui::widgets::{
    PageHost, WindowChrome, create_hello_page, create_installation_page, create_main_menu_button,
    create_resources_page, create_settings_page,
};
use crate::layout::{BreakpointCondition, LayoutResponder, LengthUnit, WidthBound};
use crate::pages::PAGES;
use crate::settings::{ColorScheme, GioSettingsStore, MemoryStore, SettingsStore};
use crate::style::install_stylesheet;

pub fn run_gui(condition: BreakpointCondition) -> glib::ExitCode {
    glib::set_application_name(APP_NAME);

    let app = adw::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_startup(|app| {
        install_stylesheet(STYLESHEET_PATHS);
        setup_app_actions(app);
    });

    app.connect_activate(move |app| build_window(app, condition));

    // The application takes no command line options.
    app.run_with_args::<&str>(&[])
}

fn setup_app_actions(app: &adw::Application) {
    let about = gio::ActionEntry::builder("about")
        .activate(|app: &adw::Application, _, _| {
            show_about_dialog(app.active_window().as_ref());
        })
        .build();
    app.add_action_entries([about]);
}

/// Open the desktop interface settings, or an in-memory store for this
/// session when they are unavailable.
fn open_color_scheme_store() -> Rc<dyn SettingsStore> {
    match GioSettingsStore::open(INTERFACE_SCHEMA) {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!(error = %e, "desktop settings unavailable, color scheme changes are kept for this session only");
            let store = MemoryStore::with_value(COLOR_SCHEME_KEY, ColorScheme::DEFAULT.value());
            follow_in_style_manager(&store);
            Rc::new(store)
        }
    }
}

/// Style manager scheme matching the dark mode switch for a stored value
pub fn style_scheme_for(value: i32) -> adw::ColorScheme {
    if ColorScheme::from_raw(value).is_dark() {
        adw::ColorScheme::ForceDark
    } else {
        adw::ColorScheme::ForceLight
    }
}

/// Without the desktop store nobody else applies the preference, so mirror
/// it into the application's own style manager, starting from the current value.
fn follow_in_style_manager(store: &dyn SettingsStore) {
    let current = store
        .get_enum(COLOR_SCHEME_KEY)
        .unwrap_or(ColorScheme::DEFAULT.value());
    adw::StyleManager::default().set_color_scheme(style_scheme_for(current));

    store.connect_changed(
        COLOR_SCHEME_KEY,
        Box::new(|value| {
            adw::StyleManager::default().set_color_scheme(style_scheme_for(value));
        }),
    );
}

fn adw_condition(condition: &BreakpointCondition) -> adw::BreakpointCondition {
    let bound = match condition.bound {
        WidthBound::MaxWidth => adw::BreakpointConditionLengthType::MaxWidth,
        WidthBound::MinWidth => adw::BreakpointConditionLengthType::MinWidth,
    };
    let unit = match condition.unit {
        LengthUnit::Px => adw::LengthUnit::Px,
        LengthUnit::Pt => adw::LengthUnit::Pt,
        LengthUnit::Sp => adw::LengthUnit::Sp,
    };
    adw::BreakpointCondition::new_length(bound, condition.limit, unit)
}

fn build_pages(store: Rc<dyn SettingsStore>) -> PageHost {
    let host = PageHost::new();
    let contents: [gtk4::Widget; 4] = [
        create_hello_page().upcast(),
        create_installation_page().upcast(),
        create_settings_page(store).upcast(),
        create_resources_page().upcast(),
    ];
    for (content, page) in contents.into_iter().zip(PAGES) {
        if let Err(e) = host.add_page(&content, &page) {
            warn!(error = %e, "skipping page");
        }
    }
    debug!(current = ?host.current(), "pages ready");
    host
}

fn build_window(app: &adw::Application, condition: BreakpointCondition) {
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    let store = open_color_scheme_store();
    let host = build_pages(store);

    let view = adw::ToolbarView::new();
    view.set_content(Some(host.stack()));

    let switcher = adw::ViewSwitcher::builder()
        .stack(host.stack())
        .policy(adw::ViewSwitcherPolicy::Wide)
        .build();
    let header = adw::HeaderBar::builder()
        .title_widget(&switcher)
        .build();
    header.pack_end(&create_main_menu_button());
    view.add_top_bar(&header);

    let bottom_bar = adw::ViewSwitcherBar::builder()
        .stack(host.stack())
        .build();
    view.add_bottom_bar(&bottom_bar);

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(APP_NAME)
        .content(&view)
        .default_width(DEFAULT_WIDTH)
        .default_height(DEFAULT_HEIGHT)
        .height_request(MIN_HEIGHT)
        .build();

    let chrome = WindowChrome::new(header, switcher, adw::WindowTitle::new(APP_NAME, ""), bottom_bar);
    let responder = Rc::new(LayoutResponder::new(chrome, condition));

    let breakpoint = adw::Breakpoint::new(adw_condition(&condition));
    let responder_apply = responder.clone();
    breakpoint.connect_apply(move |_| {
        responder_apply.breakpoint_changed(true);
    });
    breakpoint.connect_unapply(move |_| {
        responder.breakpoint_changed(false);
    });
    window.add_breakpoint(breakpoint);

    info!(condition = %condition, "main window ready");
    window.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{COLOR_SCHEME_DARK, COLOR_SCHEME_LIGHT};

    #[test]
    fn style_scheme_follows_switch_projection() {
        assert_eq!(style_scheme_for(COLOR_SCHEME_DARK), adw::ColorScheme::ForceDark);
        assert_eq!(style_scheme_for(COLOR_SCHEME_LIGHT), adw::ColorScheme::ForceLight);
        assert_eq!(style_scheme_for(2), adw::ColorScheme::ForceLight);
    }

    #[test]
    fn seeded_fallback_value_maps_to_light() {
        let store = MemoryStore::with_value(COLOR_SCHEME_KEY, ColorScheme::DEFAULT.value());
        let seeded = store.get_enum(COLOR_SCHEME_KEY).unwrap();
        assert_eq!(style_scheme_for(seeded), adw::ColorScheme::ForceLight);
    }
}
