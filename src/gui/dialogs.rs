// Dialog creation functions

use gtk4::prelude::*;

use crate::config::app::{APP_ID, APP_NAME};

/// Show the modal about dialog
pub fn show_about_dialog(parent: Option<&gtk4::Window>) {
    let about = gtk4::AboutDialog::builder()
        .program_name(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .comments("First steps with RED OS")
        .copyright("© RED SOFT")
        .license_type(gtk4::License::Gpl30)
        .website("https://redos.red-soft.ru")
        .website_label("RED OS website")
        .logo_icon_name(APP_ID)
        .modal(true)
        .build();

    if let Some(p) = parent {
        about.set_transient_for(Some(p));
    }

    about.present();
}
