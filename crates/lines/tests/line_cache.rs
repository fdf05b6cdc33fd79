// Chunk: docs/chunks/line_model - Line data model + provider interfaces

//! Integration tests for the line cache as a provider.
//!
//! These tests drive the cache the way the editor engine would: declare a
//! height, answer prefetch requests in batches, and deliver styled lines.

use std::cell::RefCell;
use std::rc::Rc;

use rasterview_lines::{
    DirtyLines, Line, LineCache, LineSource, StyleId, StyleSpan, Subscribers,
};

// ==================== Fetch protocol ====================

#[test]
fn test_prefetch_then_fill_round() {
    let mut cache = LineCache::new();
    cache.set_height(100);

    // The renderer asks for the visible window.
    cache.compute_missing(0..26);
    let requests = cache.take_missing_requests();
    assert_eq!(requests, vec![0..26]);

    // The engine answers the request in one batch.
    let updates = Rc::new(RefCell::new(DirtyLines::None));
    let sink = Rc::clone(&updates);
    cache.on_update(move |d| sink.borrow_mut().merge(d.clone()));

    let lines = requests[0]
        .clone()
        .map(|n| Line::new(format!("line {n}")))
        .collect();
    cache.insert_lines(0, lines);

    assert_eq!(*updates.borrow(), DirtyLines::Range { from: 0, to: 26 });
    assert_eq!(cache.get(25).map(Line::text), Some("line 25"));
    assert!(cache.get(26).is_none());

    // A second prefetch over the same window asks for nothing.
    cache.compute_missing(0..26);
    assert!(cache.take_missing_requests().is_empty());
}

#[test]
fn test_shrinking_document_drops_tail() {
    let mut cache = LineCache::from_text_lines((0..20).map(|n| n.to_string()));
    let updates = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&updates);
    cache.on_update(move |d| sink.borrow_mut().push(d.clone()));

    cache.set_height(5);
    assert_eq!(cache.height(), 5);
    assert!(cache.get(5).is_none());
    assert_eq!(*updates.borrow(), vec![DirtyLines::FromLineToEnd(5)]);
}

// ==================== Styled lines ====================

#[test]
fn test_styled_multibyte_line_through_cache() {
    // "let é = 1;" with a keyword span on "let" and a selection over "é".
    let text = "let é = 1;";
    let line = Line::new(text)
        .with_styles(vec![
            StyleSpan::new(StyleId(5), 0, 3),
            StyleSpan::new(StyleId::SELECTION, 4, 2),
        ])
        .and_then(|l| l.with_cursors(vec![5]))
        .unwrap();

    let mut cache = LineCache::new();
    cache.insert(0, line);
    let stored = cache.get(0).unwrap();

    assert_eq!(stored.char_count(), 10);
    let selection = stored.styles()[1];
    assert_eq!(stored.cols_for_bytes(selection.range), 4..5);
    assert_eq!(stored.slice_cols(4..5), "é");
    assert_eq!(stored.cursors(), &[5]);
}

// ==================== Subscriptions ====================

#[test]
fn test_subscribers_unsubscribe_between_updates() {
    let mut cache = LineCache::new();
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    let id = cache.on_update(move |_| *sink.borrow_mut() += 1);

    cache.insert(0, Line::new("a"));
    assert!(cache.unsubscribe(id));
    cache.insert(1, Line::new("b"));

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_standalone_subscribers_deliver_payload() {
    let mut subs: Subscribers<DirtyLines> = Subscribers::default();
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    subs.subscribe(move |d| *sink.borrow_mut() = Some(d.clone()));
    subs.emit(&DirtyLines::all());
    assert_eq!(*seen.borrow(), Some(DirtyLines::FromLineToEnd(0)));
    assert_eq!(subs.len(), 1);
}
