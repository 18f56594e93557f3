//! Wiring-level behavior: drivers feeding the key-event queue, async side
//! consuming it.

use core::pin::Pin;
use core::task::{Context, Poll};

use futures_util::stream::Stream;
use futures_util::task::noop_waker;
use usbkbd::{events, DriverPool, KeyEvent, KeyEventStream};

fn next(stream: &mut KeyEventStream) -> Poll<Option<KeyEvent>> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    Pin::new(stream).poll_next(&mut cx)
}

fn collect_ready(stream: &mut KeyEventStream) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    while let Poll::Ready(Some(event)) = next(stream) {
        events.push(event);
    }
    events
}

#[test]
fn shift_a_arrives_as_typed_events() {
    let pool = DriverPool::new();
    let (sink, mut stream) = events::channel(16);

    let mut keyboard = pool.allocate(1, 0).unwrap();
    keyboard.subscribe_key_push(sink.clone()).unwrap();

    // left shift down together with 'a', then everything up
    keyboard
        .on_data_received(&[0x02, 0, 4, 0, 0, 0, 0, 0])
        .unwrap();
    keyboard.on_data_received(&[0; 8]).unwrap();

    let events = collect_ready(&mut stream);
    assert_eq!(events.len(), 4);

    assert!(events[0].is_modifier_change());
    assert_eq!(events[0].modifier, 0x02);

    assert_eq!(events[1].keycode, 4);
    assert!(events[1].press);
    assert_eq!(events[1].ascii(), Some('A'));

    assert!(events[2].is_modifier_change());
    assert_eq!(events[2].modifier, 0x00);

    assert_eq!(events[3].keycode, 4);
    assert!(!events[3].press);
    assert_eq!(events[3].ascii(), Some('a'));

    assert_eq!(sink.dropped_events(), 0);
}

#[test]
fn two_keyboards_feed_one_queue() {
    let pool = DriverPool::new();
    let (sink, mut stream) = events::channel(16);

    let mut first = pool.allocate(1, 0).unwrap();
    let mut second = pool.allocate(2, 0).unwrap();
    first.subscribe_key_push(sink.clone()).unwrap();
    second.subscribe_key_push(sink.clone()).unwrap();

    first.on_data_received(&[0, 0, 4, 0, 0, 0, 0, 0]).unwrap();
    second.on_data_received(&[0, 0, 5, 0, 0, 0, 0, 0]).unwrap();
    first.on_data_received(&[0; 8]).unwrap();

    let keycodes: Vec<(u8, bool)> = collect_ready(&mut stream)
        .iter()
        .map(|event| (event.keycode, event.press))
        .collect();
    assert_eq!(keycodes, [(4, true), (5, true), (4, false)]);
}

#[test]
fn overflow_is_counted_not_blocking() {
    let pool = DriverPool::new();
    let (sink, mut stream) = events::channel(1);

    let mut keyboard = pool.allocate(1, 0).unwrap();
    keyboard.subscribe_key_push(sink.clone()).unwrap();

    // modifier change plus key press is two events into a one-slot queue
    keyboard
        .on_data_received(&[0x02, 0, 4, 0, 0, 0, 0, 0])
        .unwrap();
    assert_eq!(sink.dropped_events(), 1);

    let events = collect_ready(&mut stream);
    assert_eq!(events.len(), 1);
    assert!(events[0].is_modifier_change());
}
