use tokio_util::sync::CancellationToken;

use super::ExecutorError;

/// Execution context of a query: the cooperative cancellation flag.
///
/// Executors check the flag before every storage suspension point. A
/// cancelled query stops issuing storage operations but does not undo
/// writes already applied.
#[derive(Default)]
pub struct Context {
    token: CancellationToken,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the execution.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Fails with [`ExecutorError::Cancelled`] once the context is cancelled.
    pub(crate) fn check(&self) -> Result<(), ExecutorError> {
        if self.token.is_cancelled() {
            return Err(ExecutorError::Cancelled);
        }
        Ok(())
    }
}
