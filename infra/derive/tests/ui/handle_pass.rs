use std::sync::atomic::{AtomicU64, Ordering};

#[resbook_derive::shared_handle]
pub struct Counter {
    hits: AtomicU64,
}

fn main() {
    let counter = Counter::new(CounterInner { hits: AtomicU64::new(0) });
    let other = counter.clone();
    other.hits.fetch_add(1, Ordering::Relaxed);
    assert_eq!(counter.hits.load(Ordering::Relaxed), 1);
    assert!(counter.ptr_eq(&other));
}
