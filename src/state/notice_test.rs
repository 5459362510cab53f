use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push(NoticeKind::Success, "Login successful!");
    let b = state.push(NoticeKind::Error, "Login failed. Please try again.");
    assert!(b > a);
    assert_eq!(state.items[1].kind, NoticeKind::Error);
}

#[test]
fn dismiss_removes_only_that_notice() {
    let mut state = NoticeState::default();
    let a = state.push(NoticeKind::Info, "one");
    state.push(NoticeKind::Info, "two");
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].text, "two");
}

#[test]
fn queue_drops_oldest_beyond_limit() {
    let mut state = NoticeState::default();
    for i in 0..6 {
        state.push(NoticeKind::Info, format!("n{i}"));
    }
    assert_eq!(state.items.len(), 4);
    assert_eq!(state.items[0].text, "n2");
}
