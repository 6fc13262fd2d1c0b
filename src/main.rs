use anyhow::Context;
use tracing::error;
use tracing_subscriber::EnvFilter;

use redos_welcome_gtk::config::app::DEFAULT_LOG_FILTER;
use redos_welcome_gtk::config::layout::BREAKPOINT_CONDITION;
use redos_welcome_gtk::gui::run_gui;
use redos_welcome_gtk::layout::BreakpointCondition;

fn main() -> glib::ExitCode {
    init_logging();

    // A malformed breakpoint is an authoring error, refuse to start.
    let condition = match load_breakpoint() {
        Ok(condition) => condition,
        Err(e) => {
            error!("{:#}", e);
            return glib::ExitCode::FAILURE;
        }
    };

    run_gui(condition)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_breakpoint() -> anyhow::Result<BreakpointCondition> {
    BREAKPOINT_CONDITION
        .parse()
        .with_context(|| format!("invalid layout breakpoint {:?}", BREAKPOINT_CONDITION))
}
