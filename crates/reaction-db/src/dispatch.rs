//! Background dispatch of store calls
//!
//! Runs a store operation on the tokio runtime and hands the caller a
//! [`StoreChannel`]: a one-shot receiver that yields exactly one result.
//! Callers that are already async can simply `.await` the store directly.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use reaction_core::entities::Reaction;
use reaction_core::error::StoreError;
use reaction_core::traits::{ReactionStore, StoreResult};

const CHANNEL_LOCATION: &str = "StoreChannel.Recv";
const CHANNEL_CLOSED_REASON: &str = "store.channel.closed.app_error";

/// Single-use receiver for the result of a dispatched operation
#[derive(Debug)]
pub struct StoreChannel<T> {
    rx: oneshot::Receiver<StoreResult<T>>,
}

impl<T> Future for StoreChannel<T> {
    type Output = StoreResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // The task was dropped or panicked before producing a result.
            Poll::Ready(Err(_)) => Poll::Ready(Err(StoreError::Cancelled {
                location: CHANNEL_LOCATION,
                reason: CHANNEL_CLOSED_REASON,
            })),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Spawn `operation` and return the channel its result arrives on
///
/// Must be called from within a tokio runtime.
pub fn dispatch<T, F>(operation: F) -> StoreChannel<T>
where
    T: Send + 'static,
    F: Future<Output = StoreResult<T>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        // The receiver may have been dropped; the result is discarded then.
        let _ = tx.send(operation.await);
    });

    StoreChannel { rx }
}

/// Dispatch [`ReactionStore::save`]
pub fn dispatch_save(store: Arc<dyn ReactionStore>, reaction: Reaction) -> StoreChannel<Reaction> {
    dispatch(async move { store.save(reaction).await })
}

/// Dispatch [`ReactionStore::delete`]
pub fn dispatch_delete(
    store: Arc<dyn ReactionStore>,
    reaction: Reaction,
) -> StoreChannel<Reaction> {
    dispatch(async move { store.delete(reaction).await })
}

/// Dispatch [`ReactionStore::list`]
pub fn dispatch_list(store: Arc<dyn ReactionStore>, post_id: String) -> StoreChannel<Vec<Reaction>> {
    dispatch(async move { store.list(&post_id).await })
}
