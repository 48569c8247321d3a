//! Pre- and post-write hooks
//!
//! Pre-hooks run before the level check and may rewrite the message.
//! Post-hooks run after a successful write, with the sink lock still held.
//! Both run in the calling thread, in registration order.

use super::logger::Logger;

/// Middleware invoked around the sink write
pub trait Hook: Send + Sync {
    fn run(&self, logger: &Logger, message: &mut String);
}

impl<F> Hook for F
where
    F: Fn(&Logger, &mut String) + Send + Sync,
{
    fn run(&self, logger: &Logger, message: &mut String) {
        self(logger, message)
    }
}

/// Ordered list of hooks
#[derive(Default)]
pub(crate) struct HookChain {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookChain {
    pub(crate) fn push(&mut self, hook: Box<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub(crate) fn run(&self, logger: &Logger, message: &mut String) {
        for hook in &self.hooks {
            hook.run(logger, message);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }
}

/// Prepends a fixed prefix to every message
///
/// ```
/// use loggo::{Level, Logger, PrefixHook, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder(Level::Info)
///     .output(buffer.clone())
///     .template("{Message}")
///     .pre_hook_boxed(Box::new(PrefixHook::new("[worker-1] ")))
///     .build();
///
/// logger.info("started");
/// assert_eq!(buffer.contents(), "[worker-1] started\n");
/// ```
#[derive(Debug, Clone)]
pub struct PrefixHook {
    prefix: String,
}

impl PrefixHook {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Hook for PrefixHook {
    fn run(&self, _logger: &Logger, message: &mut String) {
        message.insert_str(0, &self.prefix);
    }
}
