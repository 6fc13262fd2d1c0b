// Application stylesheet lookup and installation

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{WelcomeError, WelcomeResult};

/// Read the first existing stylesheet among `candidates`.
///
/// Candidates that do not exist are skipped; an existing file that cannot be
/// read is an error.
pub fn read_stylesheet<P: AsRef<Path>>(candidates: &[P]) -> WelcomeResult<(PathBuf, String)> {
    for candidate in candidates {
        let path = candidate.as_ref();
        if !path.exists() {
            continue;
        }
        let css = fs::read_to_string(path).map_err(|e| WelcomeError::stylesheet(path, e))?;
        return Ok((path.to_path_buf(), css));
    }
    Err(WelcomeError::StylesheetMissing)
}

/// Load the stylesheet for the default display. Failures leave the default
/// theme in place.
pub fn install_stylesheet(candidates: &[&str]) {
    let (path, css) = match read_stylesheet(candidates) {
        Ok(found) => found,
        Err(e) => {
            warn!(error = %e, "using default styling");
            return;
        }
    };

    let Some(display) = gtk4::gdk::Display::default() else {
        warn!("no display available, stylesheet not applied");
        return;
    };

    let provider = gtk4::CssProvider::new();
    provider.load_from_string(&css);
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
    info!(path = %path.display(), "stylesheet loaded");
}
