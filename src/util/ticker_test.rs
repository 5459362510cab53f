use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    (count, move || sink.set(sink.get() + 1))
}

#[test]
fn gated_ticks_run_while_active() {
    let ticker = Ticker::every(Duration::from_secs(60), || {});
    let (count, bump) = counter();
    let tick = ticker.gate(bump);

    tick();
    tick();
    assert!(ticker.is_active());
    assert_eq!(count.get(), 2);
}

#[test]
fn no_tick_runs_after_cancel() {
    let mut ticker = Ticker::every(Duration::from_secs(60), || {});
    let (count, bump) = counter();
    let tick = ticker.gate(bump);

    tick();
    ticker.cancel();
    tick();
    ticker.cancel();

    assert!(!ticker.is_active());
    assert_eq!(count.get(), 1);
}

#[test]
fn dropping_the_ticker_cancels_pending_ticks() {
    let ticker = Ticker::every(Duration::from_secs(60), || {});
    let (count, bump) = counter();
    let tick = ticker.gate(bump);

    drop(ticker);
    tick();
    assert_eq!(count.get(), 0);
}
