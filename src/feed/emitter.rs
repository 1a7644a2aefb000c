use event_emitter_rs::EventEmitter;

use super::change::Poll;
use super::FeedError;

/// Extension wrapper that turns a pull-based feed into callback listeners.
///
/// Listeners register per query key; [`CacheEmitter::pump`] drains the feed
/// and fires each change on its key's channel as JSON.
///
/// # Example
///
/// ```ignore
/// use sagip::feed::EmittableFeed;
///
/// let mut emitter = feed.new_subscriber().with_emitter();
///
/// emitter.on("markers", |change_json| {
///     println!("markers changed: {}", change_json);
/// });
///
/// // After cache writes, drain pending changes to fire callbacks
/// emitter.pump(10)?;
/// ```
pub struct CacheEmitter<S> {
    feed: S,
    emitter: EventEmitter,
}

impl<S: Poll> CacheEmitter<S> {
    /// Take ownership of a feed consumer and attach a listener registry.
    pub fn new(feed: S) -> Self {
        Self {
            feed,
            emitter: EventEmitter::new(),
        }
    }

    /// Get a reference to the underlying feed consumer.
    pub fn feed(&self) -> &S {
        &self.feed
    }

    /// Register a listener for changes to one query key.
    ///
    /// The listener receives the change serialized as JSON (payload base64).
    pub fn on<F>(&mut self, key: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(key, listener);
    }

    /// Drain pending changes and fire listeners. Waits up to `timeout_ms`
    /// for the first change, then takes whatever else is already queued.
    /// Returns how many changes were emitted.
    pub fn pump(&mut self, timeout_ms: u64) -> Result<usize, FeedError> {
        let mut emitted = 0;
        let mut wait = timeout_ms;

        while let Some(change) = self.feed.poll(wait)? {
            let json = serde_json::to_string(&change)
                .map_err(|e| FeedError::SerializationFailed(e.to_string()))?;
            self.emitter.emit(change.key.as_str(), json);
            self.feed.ack(&change.id)?;
            emitted += 1;
            wait = 0;
        }

        Ok(emitted)
    }
}

/// Shorthand for attaching a [`CacheEmitter`] to any feed consumer.
pub trait EmittableFeed: Poll + Sized {
    /// Move the consumer into a [`CacheEmitter`].
    fn with_emitter(self) -> CacheEmitter<Self>;
}

impl<S: Poll> EmittableFeed for S {
    fn with_emitter(self) -> CacheEmitter<Self> {
        CacheEmitter::new(self)
    }
}
