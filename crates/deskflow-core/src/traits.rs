use futures::future::BoxFuture;

use crate::error::Result;

/// Completion service — opaque prompt-in, text-out capability.
///
/// Implementations may call out over the network and can fail (timeout,
/// auth, rate limit). The workflow treats the service as a black box.
pub trait CompletionClient: Send + Sync + 'static {
    /// Send a single prompt and receive the completion text.
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>>;
}
