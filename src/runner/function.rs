//! The callable-under-test.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use algoesup_core::Value;

use super::signature::{Arity, Signature};
use super::table::TableError;

/// Why a single case could not produce a value.
///
/// Returned by a function body to signal the equivalent of a raised exception; the executor also builds one
/// from a caught panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A `TypeError`-style failure for an input of the wrong kind.
    pub fn type_error(expected: &str, got: &Value) -> Self {
        Self::new(format!("expected {expected}, got {}", got.type_name()))
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "function panicked".to_string()
        };
        Self { message }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {}

/// Result of invoking a function on one case's inputs.
pub type CallResult = Result<Value, Failure>;

thread_local! {
    static CALLING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the process panic hook so panics raised by a body during [`Function::call`] print nothing.
///
/// The message is still captured from the payload and reported as the case's failure. Panics on other threads,
/// or outside a call, go to the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !calling() {
                previous(info);
            }
        }));
    });
}

/// Whether the current thread is inside a body invoked by [`Function::call`].
fn calling() -> bool {
    CALLING.with(Cell::get)
}

type Body<'f> = Box<dyn Fn(&[Value]) -> CallResult + 'f>;

/// A named function with an (optional) declared signature.
///
/// A function built with [`Function::opaque`] has no signature; the runner refuses to test it because it cannot
/// check the table's input counts.
pub struct Function<'f> {
    name: String,
    signature: Option<Signature>,
    body: Body<'f>,
}

impl<'f> Function<'f> {
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + 'f,
    {
        Self {
            name: name.into(),
            signature: Some(signature),
            body: Box::new(body),
        }
    }

    /// A function taking exactly `count` positional inputs.
    pub fn fixed<F>(name: impl Into<String>, count: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + 'f,
    {
        Self::new(name, Signature::positional(count), body)
    }

    /// A function taking any number of positional inputs.
    pub fn variadic<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + 'f,
    {
        Self::new(name, Signature::variadic(), body)
    }

    /// A function whose parameters cannot be introspected.
    pub fn opaque<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + 'f,
    {
        Self {
            name: name.into(),
            signature: None,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Determine the arity test cases are checked against.
    ///
    /// ## Errors
    /// - `TableError::UnknownArity` for an opaque function.
    pub fn arity(&self) -> Result<Arity, TableError> {
        self.signature
            .as_ref()
            .map(Signature::arity)
            .ok_or_else(|| TableError::UnknownArity {
                function: self.name.clone(),
            })
    }

    /// Invoke the body with `inputs` as positional arguments.
    ///
    /// A panic inside the body is caught and returned as a `Failure`; it never unwinds past this call, and the
    /// panic hook does not print it.
    pub fn call(&self, inputs: &[Value]) -> CallResult {
        install_quiet_hook();
        let outer = CALLING.with(|c| c.replace(true));
        let result = panic::catch_unwind(AssertUnwindSafe(|| (self.body)(inputs)));
        CALLING.with(|c| c.set(outer));
        result.unwrap_or_else(|payload| Err(Failure::from_panic(payload)))
    }
}

impl fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
