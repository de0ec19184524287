//! Tick source trait

/// Paces the dispatcher loop
#[allow(async_fn_in_trait)]
pub trait TickSource {
    /// Wait for the next tick
    ///
    /// May return early when shutdown is requested so the loop can notice
    /// it without waiting a full period.
    async fn next_tick(&mut self);
}
