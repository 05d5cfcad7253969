//! Process-wide default registry.
//!
//! A convenience for programs that register commands from several places.
//! Everything here delegates to one [`Registry`] behind a lock; pass a
//! registry explicitly wherever you can.

use crate::command::Command;
use crate::error::{DispatchError, Result};
use crate::flags::FlagSet;
use crate::registry::Registry;
use crate::usage::render_usage;
use std::cell::Cell;
use std::sync::{OnceLock, RwLock, RwLockWriteGuard};

fn registry() -> &'static RwLock<Registry> {
    static DEFAULT: OnceLock<RwLock<Registry>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(Registry::new()))
}

fn lock_error<E: std::fmt::Display>(err: E) -> DispatchError {
    DispatchError::LockError(err.to_string())
}

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as holding the default registry's read guard for
/// as long as it is alive.
struct DispatchScope;

impl DispatchScope {
    fn enter() -> Self {
        DISPATCHING.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for DispatchScope {
    fn drop(&mut self) {
        DISPATCHING.with(|flag| flag.set(false));
    }
}

/// A thread already holding the read guard (a command registering from inside
/// its own run) fails instead of waiting on itself.
fn write_registry() -> Result<RwLockWriteGuard<'static, Registry>> {
    if DISPATCHING.with(Cell::get) {
        return Err(DispatchError::LockError(
            "default registry is read-locked by this thread".into(),
        ));
    }
    registry().write().map_err(lock_error)
}

/// Register on the default registry. Last registration of a name wins.
pub fn on<C, I, S>(
    name: impl Into<String>,
    description: impl Into<String>,
    command: C,
    required_flags: I,
) -> Result<()>
where
    C: Command + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut registry = write_registry()?;
    registry.register(name, description, command, required_flags);
    Ok(())
}

/// Register on the default registry with no required flags.
pub fn add<C>(name: impl Into<String>, description: impl Into<String>, command: C) -> Result<()>
where
    C: Command + 'static,
{
    let mut registry = write_registry()?;
    registry.add(name, description, command);
    Ok(())
}

/// Declare global flags on the default registry.
pub fn global_flags<F>(declare: F) -> Result<()>
where
    F: FnOnce(&mut FlagSet),
{
    let mut registry = write_registry()?;
    declare(registry.global_flags_mut());
    Ok(())
}

/// Dispatch on the default registry. Returns the name of the command that ran.
pub fn dispatch<S: AsRef<str>>(args: &[S]) -> Result<String> {
    let registry = registry().read().map_err(lock_error)?;
    let _scope = DispatchScope::enter();
    registry.dispatch(args).map(|entry| entry.name().to_string())
}

/// Top-level usage of the default registry.
pub fn usage(program: &str) -> Result<String> {
    let registry = registry().read().map_err(lock_error)?;
    Ok(render_usage(&registry, program))
}

/// Read access to the default registry.
pub fn with_registry<T, F>(read: F) -> Result<T>
where
    F: FnOnce(&Registry) -> T,
{
    let registry = registry().read().map_err(lock_error)?;
    let _scope = DispatchScope::enter();
    Ok(read(&registry))
}

/// Parse the process arguments, run the matching command and exit.
pub fn parse_and_run() -> ! {
    match registry().read() {
        Ok(registry) => {
            let _scope = DispatchScope::enter();
            crate::cli::run_and_exit(&registry)
        }
        Err(e) => {
            eprintln!("error: {}", lock_error(e));
            std::process::exit(crate::constants::EXIT_FAILURE)
        }
    }
}
