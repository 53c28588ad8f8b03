use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether operations on this thread record graph nodes.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(|g| g.get())
}

fn set_grad_enabled(enabled: bool) {
    GRAD_ENABLED.with(|g| g.set(enabled));
}

/// Sets the gradient mode of the current thread and restores the previous
/// mode when dropped, including during unwinding.
#[must_use = "the previous gradient mode is restored as soon as the guard is dropped"]
pub struct GradModeGuard {
    prev_enabled: bool,
}

impl GradModeGuard {
    pub fn new(enabled: bool) -> Self {
        let prev_enabled = is_grad_enabled();
        set_grad_enabled(enabled);
        Self { prev_enabled }
    }
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        set_grad_enabled(self.prev_enabled);
    }
}

pub fn no_grad_mode() -> GradModeGuard {
    GradModeGuard::new(false)
}

pub fn grad_mode() -> GradModeGuard {
    GradModeGuard::new(true)
}

/// Runs `f` with gradient tracking disabled.
pub fn no_grad<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = no_grad_mode();
    f()
}

/// Disables gradient tracking for the rest of the current lexical scope.
/// When the scope ends, the previous gradient state is restored.
///
/// ### Example
/// ```rust
/// nabla_tensor::no_grad!();
/// assert!(!nabla_tensor::is_grad_enabled());
/// ```
#[macro_export]
macro_rules! no_grad {
    () => {
        let _grad_guard = $crate::no_grad_mode();
    };
}

/// Enables gradient tracking for the rest of the current lexical scope.
/// When the scope ends, the previous gradient state is restored.
///
/// ### Example
/// ```rust
/// let _outer = nabla_tensor::no_grad_mode();
/// {
///     nabla_tensor::with_grad!();
///     assert!(nabla_tensor::is_grad_enabled());
/// }
/// assert!(!nabla_tensor::is_grad_enabled());
/// ```
#[macro_export]
macro_rules! with_grad {
    () => {
        let _grad_guard = $crate::grad_mode();
    };
}
