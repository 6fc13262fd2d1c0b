// lib.rs for redos-welcome-gtk
// The settings binding and layout logic live here so they can be tested without a display.

pub mod bridge;
pub mod config;
pub mod error;
pub mod gui;
pub mod layout;
pub mod pages;
pub mod settings;
pub mod style;
