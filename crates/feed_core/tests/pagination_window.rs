use feed_core::{visible_window, DEFAULT_WINDOW_SIZE};

#[test]
fn window_starts_at_first_page_near_the_start() {
    assert_eq!(visible_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
    assert_eq!(visible_window(3, 10, 5), vec![1, 2, 3, 4, 5]);
}

#[test]
fn window_ends_at_last_page_near_the_end() {
    assert_eq!(visible_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
    assert_eq!(visible_window(8, 10, 5), vec![6, 7, 8, 9, 10]);
}

#[test]
fn window_centers_on_current_page() {
    assert_eq!(visible_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    assert_eq!(visible_window(4, 10, 5), vec![2, 3, 4, 5, 6]);
    assert_eq!(visible_window(7, 10, 5), vec![5, 6, 7, 8, 9]);
}

#[test]
fn window_lists_all_pages_when_they_fit() {
    assert_eq!(visible_window(3, 4, 5), vec![1, 2, 3, 4]);
    assert_eq!(visible_window(5, 5, DEFAULT_WINDOW_SIZE), vec![1, 2, 3, 4, 5]);
}

#[test]
fn window_never_exceeds_its_size() {
    for total in 1..=30 {
        for current in 1..=total {
            let window = visible_window(current, total, 5);
            assert_eq!(window.len() as u32, total.min(5));
            assert!(window.contains(&current), "page {current} of {total}: {window:?}");
            assert!(window.windows(2).all(|pair| pair[1] == pair[0] + 1));
        }
    }
}

#[test]
fn edge_thresholds_do_not_scale_with_window_size() {
    assert_eq!(visible_window(4, 10, 7), vec![2, 3, 4, 5, 6]);
    assert_eq!(visible_window(3, 10, 7), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(visible_window(8, 10, 3), vec![8, 9, 10]);
    assert_eq!(visible_window(2, 10, 3), vec![1, 2, 3]);
    assert_eq!(visible_window(5, 10, 3), vec![3, 4, 5, 6, 7]);
}
