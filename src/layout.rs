//! Width breakpoint that swaps the top view switcher for a bottom switcher bar

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::WelcomeError;

/// Chrome arrangement of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Switcher in the header bar, bottom bar hidden
    Wide,
    /// Plain title in the header bar, bottom switcher bar revealed
    Narrow,
}

/// Dimension a breakpoint compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthBound {
    MaxWidth,
    MinWidth,
}

/// Unit of a breakpoint length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Pt,
    Sp,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Pt => "pt",
            LengthUnit::Sp => "sp",
        }
    }
}

/// Parsed width condition such as `max-width: 500sp`, evaluated by the
/// window's breakpoint. Both bounds are inclusive: `max-width: 500sp`
/// applies at 500sp and below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointCondition {
    pub bound: WidthBound,
    pub limit: f64,
    pub unit: LengthUnit,
}

impl FromStr for BreakpointCondition {
    type Err = WelcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WelcomeError::InvalidBreakpoint(s.to_string());

        let (name, length) = s.split_once(':').ok_or_else(invalid)?;
        let bound = match name.trim() {
            "max-width" => WidthBound::MaxWidth,
            "min-width" => WidthBound::MinWidth,
            _ => return Err(invalid()),
        };

        let length = length.trim();
        let (number, unit) = [LengthUnit::Sp, LengthUnit::Pt, LengthUnit::Px]
            .into_iter()
            .find_map(|unit| length.strip_suffix(unit.suffix()).map(|n| (n, unit)))
            .unwrap_or((length, LengthUnit::Px));

        let limit: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !limit.is_finite() || limit < 0.0 {
            return Err(invalid());
        }

        Ok(Self { bound, limit, unit })
    }
}

impl fmt::Display for BreakpointCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.bound {
            WidthBound::MaxWidth => "max-width",
            WidthBound::MinWidth => "min-width",
        };
        write!(f, "{}: {}{}", name, self.limit, self.unit.suffix())
    }
}

/// The window elements switched by the responder
pub trait Chrome {
    /// Show the view switcher as the header bar title, or a plain title instead
    fn show_top_switcher(&self, visible: bool);

    fn reveal_bottom_switcher(&self, visible: bool);
}

/// Two-state machine flipping the window chrome when the width breakpoint
/// applies or stops applying
pub struct LayoutResponder<C: Chrome> {
    chrome: C,
    condition: BreakpointCondition,
    mode: Cell<LayoutMode>,
}

impl<C: Chrome> LayoutResponder<C> {
    /// Start in the wide layout
    pub fn new(chrome: C, condition: BreakpointCondition) -> Self {
        chrome.reveal_bottom_switcher(false);
        chrome.show_top_switcher(true);
        Self {
            chrome,
            condition,
            mode: Cell::new(LayoutMode::Wide),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode.get()
    }

    /// Follow the breakpoint: narrow while it applies, wide otherwise
    pub fn breakpoint_changed(&self, applied: bool) -> LayoutMode {
        let mode = if applied {
            LayoutMode::Narrow
        } else {
            LayoutMode::Wide
        };
        self.transition(mode);
        mode
    }

    /// Switch chrome to `mode`. The visible switcher is hidden before the
    /// other one is shown.
    pub fn transition(&self, mode: LayoutMode) {
        if self.mode.get() == mode {
            return;
        }
        match mode {
            LayoutMode::Narrow => {
                self.chrome.show_top_switcher(false);
                self.chrome.reveal_bottom_switcher(true);
            }
            LayoutMode::Wide => {
                self.chrome.reveal_bottom_switcher(false);
                self.chrome.show_top_switcher(true);
            }
        }
        self.mode.set(mode);
        debug!(?mode, condition = %self.condition, "layout changed");
    }
}
