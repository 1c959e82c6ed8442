use anyhow::Result;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{io::logger, log_warn};

pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Shared interrupt state between the Ctrl-C handler and the scan loop.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    interrupted: Arc<AtomicBool>,
    awaiting_input: Arc<AtomicBool>,
}

/// Marks the process as blocked on operator input until dropped.
pub struct InputGuard<'a> {
    awaiting_input: &'a AtomicBool,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn awaiting_input(&self) -> InputGuard<'_> {
        self.awaiting_input.store(true, Ordering::SeqCst);
        InputGuard {
            awaiting_input: &self.awaiting_input,
        }
    }

    fn is_awaiting_input(&self) -> bool {
        self.awaiting_input.load(Ordering::SeqCst)
    }
}

impl Drop for InputGuard<'_> {
    fn drop(&mut self) {
        self.awaiting_input.store(false, Ordering::SeqCst);
    }
}

pub fn initialize_interrupt_handler() -> Result<Interrupt> {
    let interrupt = Interrupt::new();
    let handler_state = interrupt.clone();
    ctrlc::set_handler(move || {
        handler_state.trigger();
        // A blocking stdin read cannot observe the flag, so leave right away.
        if handler_state.is_awaiting_input() {
            logger::clear_line();
            log_warn!("Interrupted by user", true);
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })?;
    Ok(interrupt)
}
