// Widget creation functions (pages, page host, window chrome)

use std::cell::RefCell;
use std::rc::Rc;

use adw::prelude::*;
use gtk4::{Box as GtkBox, LinkButton, ListBox, Orientation, ScrolledWindow, SelectionMode};
use tracing::debug;

use crate::bridge::{BindFlags, BindingBridge, Toggle};
use crate::config::settings::COLOR_SCHEME_KEY;
use crate::config::window::{CLAMP_MAX_WIDTH, MARGIN, SECTION_SPACING};
use crate::error::WelcomeResult;
use crate::layout::Chrome;
use crate::pages::{PageOrder, PageSpec};
use crate::settings::SettingsStore;

/// Installation status rows: component and state
const INSTALLATION_STATUS: &[(&str, &str)] = &[
    ("Base system", "Installed"),
    ("Desktop environment", "Installed"),
    ("Network configuration", "Configured"),
    ("System updates", "Check for updates in the software center"),
    ("Office suite", "Available in the software center"),
    ("Multimedia codecs", "Available in the software center"),
];

/// Documentation links: title, subtitle, uri
const RESOURCES: &[(&str, &str, &str)] = &[
    ("RED OS website", "News and downloads", "https://redos.red-soft.ru"),
    ("Documentation", "Administrator and user guides", "https://redos.red-soft.ru/base/"),
    ("Support", "Contact technical support", "https://red-soft.ru/ru/support/"),
];

impl Toggle for adw::SwitchRow {
    fn is_on(&self) -> bool {
        self.is_active()
    }

    fn set_on(&self, on: bool) {
        self.set_active(on);
    }

    fn connect_toggled(&self, handler: Box<dyn Fn()>) {
        self.connect_active_notify(move |_| handler());
    }
}

/// Header bar title and switcher bars swapped by the layout responder
pub struct WindowChrome {
    header: adw::HeaderBar,
    switcher: adw::ViewSwitcher,
    plain_title: adw::WindowTitle,
    bottom_bar: adw::ViewSwitcherBar,
}

impl WindowChrome {
    pub fn new(
        header: adw::HeaderBar,
        switcher: adw::ViewSwitcher,
        plain_title: adw::WindowTitle,
        bottom_bar: adw::ViewSwitcherBar,
    ) -> Self {
        Self {
            header,
            switcher,
            plain_title,
            bottom_bar,
        }
    }
}

impl Chrome for WindowChrome {
    fn show_top_switcher(&self, visible: bool) {
        if visible {
            self.header.set_title_widget(Some(&self.switcher));
        } else {
            self.header.set_title_widget(Some(&self.plain_title));
        }
    }

    fn reveal_bottom_switcher(&self, visible: bool) {
        self.bottom_bar.set_reveal(visible);
    }
}

/// View stack with an ordered, uniquely named set of pages
pub struct PageHost {
    stack: adw::ViewStack,
    order: Rc<RefCell<PageOrder>>,
}

impl PageHost {
    pub fn new() -> Self {
        let stack = adw::ViewStack::new();
        let order = Rc::new(RefCell::new(PageOrder::new()));

        let order_clone = order.clone();
        stack.connect_visible_child_name_notify(move |stack| {
            if let Some(name) = stack.visible_child_name() {
                if order_clone.borrow_mut().select(&name) {
                    debug!(page = %name, "page selected");
                }
            }
        });

        Self { stack, order }
    }

    pub fn stack(&self) -> &adw::ViewStack {
        &self.stack
    }

    /// Append a page; duplicate names are rejected before touching the stack
    pub fn add_page(&self, content: &impl IsA<gtk4::Widget>, page: &PageSpec) -> WelcomeResult<()> {
        self.order.borrow_mut().push(page.name)?;
        self.stack
            .add_titled_with_icon(content, Some(page.name), page.title, page.icon);
        Ok(())
    }

    pub fn current(&self) -> Option<String> {
        self.order.borrow().current().map(str::to_string)
    }
}

impl Default for PageHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a scrolled, width-clamped boxed list
pub fn create_clamped_list() -> (ScrolledWindow, ListBox) {
    let list_box = ListBox::builder()
        .selection_mode(SelectionMode::None)
        .css_classes(["boxed-list"])
        .build();

    let vbox = GtkBox::new(Orientation::Vertical, SECTION_SPACING);
    vbox.set_margin_top(MARGIN);
    vbox.set_margin_bottom(MARGIN);
    vbox.set_margin_start(MARGIN);
    vbox.set_margin_end(MARGIN);
    vbox.append(&list_box);

    let clamp = adw::Clamp::builder()
        .maximum_size(CLAMP_MAX_WIDTH)
        .child(&vbox)
        .build();
    let scroll = ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .vexpand(true)
        .child(&clamp)
        .build();

    (scroll, list_box)
}

/// Create greeting page
pub fn create_hello_page() -> adw::StatusPage {
    adw::StatusPage::builder()
        .icon_name("start-here-symbolic")
        .title("Hi!")
        .description("Welcome to RED OS. Use the tabs to check the installation, adjust quick settings and find help.")
        .build()
}

/// Create installation status page
pub fn create_installation_page() -> ScrolledWindow {
    let (scroll, list_box) = create_clamped_list();
    for (component, status) in INSTALLATION_STATUS {
        list_box.append(
            &adw::ActionRow::builder()
                .title(*component)
                .subtitle(*status)
                .build(),
        );
    }
    scroll
}

/// Create the dark color scheme switch bound to `store`
pub fn create_color_scheme_switcher(
    store: Rc<dyn SettingsStore>,
) -> (adw::SwitchRow, Rc<BindingBridge<adw::SwitchRow>>) {
    let theme_switch = adw::SwitchRow::builder()
        .title("Switch to dark color scheme")
        .subtitle("Change UI style")
        .build();
    let bridge = BindingBridge::bind(theme_switch.clone(), store, COLOR_SCHEME_KEY, BindFlags::DEFAULT);
    (theme_switch, bridge)
}

/// Create quick settings page
pub fn create_settings_page(store: Rc<dyn SettingsStore>) -> ScrolledWindow {
    let (scroll, list_box) = create_clamped_list();
    let (theme_switch, _bridge) = create_color_scheme_switcher(store);
    list_box.append(&theme_switch);
    scroll
}

/// Create docs and help page
pub fn create_resources_page() -> ScrolledWindow {
    let (scroll, list_box) = create_clamped_list();
    for (title, subtitle, uri) in RESOURCES {
        let link = LinkButton::with_label(uri, "Open");
        link.set_valign(gtk4::Align::Center);
        let row = adw::ActionRow::builder()
            .title(*title)
            .subtitle(*subtitle)
            .activatable_widget(&link)
            .build();
        row.add_suffix(&link);
        list_box.append(&row);
    }
    scroll
}

/// Create header bar menu button
pub fn create_main_menu_button() -> gtk4::MenuButton {
    let menu = gio::Menu::new();
    menu.append(Some("About"), Some("app.about"));
    gtk4::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .tooltip_text("Main menu")
        .menu_model(&menu)
        .build()
}
