//! Command handlers

use crate::core::execute::Invocation;
use std::fmt;

/// Work performed when a command is selected
///
/// Closures taking an [`Invocation`] implement this trait, so most hosts
/// never name it directly.
pub trait Handler: Send + Sync {
    /// Run the command
    fn run(&self, invocation: &Invocation<'_>) -> anyhow::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, invocation: &Invocation<'_>) -> anyhow::Result<()> {
        self(invocation)
    }
}

/// Handler attached to a command
#[derive(Default)]
pub enum HandlerSlot {
    /// Does nothing and succeeds
    #[default]
    Noop,
    /// Host supplied handler
    Custom(Box<dyn Handler>),
}

impl HandlerSlot {
    /// Wrap a handler
    pub fn custom<H: Handler + 'static>(handler: H) -> Self {
        Self::Custom(Box::new(handler))
    }

    /// Whether this is the default no-op handler
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }

    /// Run the attached handler, if any
    pub fn run(&self, invocation: &Invocation<'_>) -> anyhow::Result<()> {
        match self {
            Self::Noop => Ok(()),
            Self::Custom(handler) => handler.run(invocation),
        }
    }
}

impl fmt::Debug for HandlerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => f.write_str("Noop"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
