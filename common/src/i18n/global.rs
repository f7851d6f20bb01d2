//! Process-wide translator handle.
//!
//! Consumers that cannot thread a [`Translator`] through their call graph
//! (widget builders, worker threads emitting status lines) resolve through
//! [`tr`]. The handle is installed once at startup and torn down explicitly;
//! until then, and after teardown, [`tr`] renders source text.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use log::debug;

use super::{Translator, placeholder};

static GLOBAL: ArcSwapOption<Translator> = ArcSwapOption::const_empty();

/// Install `translator` as the process-wide translator, returning the one it
/// replaces.
pub fn install(translator: Arc<Translator>) -> Option<Arc<Translator>> {
    debug!(
        target: "tslocale::translator",
        "installing process-wide translator ({} active)",
        translator.active_language(),
    );
    GLOBAL.swap(Some(translator))
}

/// The installed translator, if any.
#[must_use]
pub fn current() -> Option<Arc<Translator>> {
    GLOBAL.load_full()
}

/// Remove the installed translator, returning it.
pub fn teardown() -> Option<Arc<Translator>> {
    GLOBAL.swap(None)
}

/// Resolve a message through the installed translator.
///
/// Without an installed translator the source text itself is rendered.
#[must_use]
pub fn tr(context: &str, source_text: &str, args: &[&dyn fmt::Display]) -> String {
    let installed = GLOBAL.load();
    match &*installed {
        Some(translator) => translator.resolve(context, source_text, args),
        None => placeholder::substitute(source_text, args).into_text(),
    }
}
