#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

#[test]
fn test_format_money() {
    assert_eq!(format_money(dec!(0), "INR"), "INR 0.00");
    assert_eq!(format_money(dec!(12.5), "INR"), "INR 12.50");
    assert_eq!(format_money(dec!(1234567.89), "USD"), "USD 1,234,567.89");
    assert_eq!(format_money(dec!(999), "EUR"), "EUR 999.00");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello world", 8), "hello w…");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("héllo wörld", 6), "héllo…");
}

#[test]
fn test_scroll_down_clamps_and_scrolls() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..10 {
        scroll_down(&mut index, &mut scroll, 5, 3);
    }
    assert_eq!(index, 4);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_up_clamps_at_zero() {
    let (mut index, mut scroll) = (1, 1);
    scroll_up(&mut index, &mut scroll);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_jumps() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!(index, 9);
    assert_eq!(scroll, 6);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}
