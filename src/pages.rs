//! Page descriptors and the ordered registry behind the view switcher

use crate::error::{WelcomeError, WelcomeResult};

/// Identity and switcher presentation of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

pub const HELLO: PageSpec = PageSpec {
    name: "hello_page",
    title: "Hello, World!",
    icon: "media-playback-start-symbolic",
};

pub const INSTALLATION: PageSpec = PageSpec {
    name: "inst",
    title: "Installation",
    icon: "gnome-software-symbolic",
};

pub const QUICK_SETTINGS: PageSpec = PageSpec {
    name: "settings",
    title: "Quick settings",
    icon: "org.gnome.Settings-symbolic",
};

pub const RESOURCES: PageSpec = PageSpec {
    name: "res",
    title: "Docs and help",
    icon: "help-about-symbolic",
};

/// Pages in switcher order; the window builds their content in the same order
pub const PAGES: [PageSpec; 4] = [HELLO, INSTALLATION, QUICK_SETTINGS, RESOURCES];

/// Insertion-ordered set of page identifiers with one current page
#[derive(Debug, Default)]
pub struct PageOrder {
    names: Vec<String>,
    current: usize,
}

impl PageOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name`; identifiers must be unique
    pub fn push(&mut self, name: &str) -> WelcomeResult<()> {
        if self.contains(name) {
            return Err(WelcomeError::DuplicatePage(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Current page, the first inserted until something else is selected
    pub fn current(&self) -> Option<&str> {
        self.names.get(self.current).map(String::as_str)
    }

    /// Make `name` current. Returns false for unknown pages.
    pub fn select(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }
}
