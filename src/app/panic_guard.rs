//! Panic containment for renderer calls.
//!
//! A panic inside a renderer becomes an internal [`RenderError`]. While a call
//! is contained the process panic hook stays quiet: the message and the
//! backtrace at the panic site go into the error instead of stderr. Panics
//! outside a contained call still reach the previously installed hook.

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::domain::RenderError;

thread_local! {
    static CONTAINED: Cell<bool> = const { Cell::new(false) };
    static PANIC_SITE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CONTAINED.with(Cell::get) {
                tracing::debug!(panic = %info, "contained renderer panic");
                let backtrace = Backtrace::force_capture().to_string();
                PANIC_SITE.with(|site| *site.borrow_mut() = Some(backtrace));
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `call`, turning a panic into an internal [`RenderError`].
pub(crate) fn contain<T>(call: impl FnOnce() -> Result<T, RenderError>) -> Result<T, RenderError> {
    install_hook();

    let outer = CONTAINED.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(call));
    CONTAINED.with(|flag| flag.set(outer));

    result.unwrap_or_else(|payload| {
        let backtrace = PANIC_SITE.with(|site| site.borrow_mut().take());
        let err = RenderError::from_panic(payload.as_ref());
        Err(match backtrace {
            Some(backtrace) => {
                let trace = format!("{}\n\nStack backtrace:\n{backtrace}", err.message());
                RenderError::internal_with_trace(err.message(), trace)
            }
            None => err,
        })
    })
}
