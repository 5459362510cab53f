#[cfg(not(feature = "csr"))]
#[test]
fn no_position_outside_the_browser() {
    use futures::executor::block_on;

    assert_eq!(block_on(super::current_position()), None);
}
