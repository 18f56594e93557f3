//! Queue-backed key event delivery for async consumers.
//!
//! Kernel wiring code subscribes the sink half on every keyboard driver it
//! brings up and hands the stream half to an async task. The queue is
//! bounded and lock-free; pushing from the completion path never blocks.

use alloc::sync::Arc;
use core::pin::Pin;
use core::task::{Context, Poll};

use crossbeam_queue::ArrayQueue;
use crossbeam_utils::atomic::AtomicCell;
use futures_util::stream::{Stream, StreamExt};
use futures_util::task::AtomicWaker;

use crate::keymap;
use crate::observer::KeyPushObserver;

/// One key state change, as delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub modifier: u8,
    pub keycode: u8,
    pub press: bool,
}

impl KeyEvent {
    /// ASCII view of the event under its own modifier byte.
    pub fn ascii(&self) -> Option<char> {
        keymap::ascii(self.keycode, self.modifier)
    }

    /// Whether this is the keycode-0 modifier-change notification.
    pub fn is_modifier_change(&self) -> bool {
        self.keycode == 0
    }
}

struct Shared {
    queue: ArrayQueue<KeyEvent>,
    waker: AtomicWaker,
    dropped: AtomicCell<usize>,
}

/// Creates a bounded key-event queue and returns its two halves.
///
/// `capacity` must be nonzero. Several sinks (one per keyboard) may feed
/// the same queue; the stream is the single consumer.
pub fn channel(capacity: usize) -> (KeyEventSink, KeyEventStream) {
    let shared = Arc::new(Shared {
        queue: ArrayQueue::new(capacity),
        waker: AtomicWaker::new(),
        dropped: AtomicCell::new(0),
    });
    (
        KeyEventSink {
            shared: shared.clone(),
        },
        KeyEventStream { shared },
    )
}

/// Producer half; implements `KeyPushObserver` so it subscribes through
/// the normal registry path.
#[derive(Clone)]
pub struct KeyEventSink {
    shared: Arc<Shared>,
}

impl KeyEventSink {
    /// Called from the notification path
    ///
    /// Must not block or allocate
    pub fn push(&self, event: KeyEvent) {
        if let Err(_) = self.shared.queue.push(event) {
            self.shared.dropped.fetch_add(1);
            log::warn!("key event queue full; dropping key event");
        } else {
            self.shared.waker.wake();
        }
    }

    /// Events discarded so far because the queue was full.
    pub fn dropped_events(&self) -> usize {
        self.shared.dropped.load()
    }
}

impl KeyPushObserver for KeyEventSink {
    fn on_key_push(&mut self, modifier: u8, keycode: u8, press: bool) {
        self.push(KeyEvent {
            modifier,
            keycode,
            press,
        });
    }
}

/// Consumer half; never terminates (a keyboard can always produce more).
pub struct KeyEventStream {
    shared: Arc<Shared>,
}

impl Stream for KeyEventStream {
    type Item = KeyEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<KeyEvent>> {
        let shared = &self.shared;

        // fast path
        if let Some(event) = shared.queue.pop() {
            return Poll::Ready(Some(event));
        }

        shared.waker.register(&cx.waker());
        match shared.queue.pop() {
            Some(event) => {
                shared.waker.take();
                Poll::Ready(Some(event))
            }
            None => Poll::Pending,
        }
    }
}

/// Feeds every event from `stream` to `handler`; runs until the hosting
/// task is dropped.
pub async fn dispatch_key_events(mut stream: KeyEventStream, mut handler: impl FnMut(KeyEvent)) {
    log::debug!("key event stream task started");
    while let Some(event) = stream.next().await {
        handler(event);
    }
}
