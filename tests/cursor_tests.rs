use segdeque::SegDeque;

fn deque(len: u32) -> SegDeque<u32> {
    // Start mid-buffer so every jump crosses a different boundary.
    let mut d: SegDeque<u32> = SegDeque::new();
    for i in (0..len / 3).rev() {
        d.push_front(i);
    }
    for i in len / 3..len {
        d.push_back(i);
    }
    d
}

#[test]
fn test_dereference_after_jumps() {
    let d = deque(2000);
    let cap = SegDeque::<u32>::buffer_capacity() as isize;
    let begin = d.cursor_front();
    for n in [0, 1, cap - 1, cap, cap + 1, 3 * cap, 1999] {
        assert_eq!((begin + n).get(), Some(&(n as u32)));
    }
}

#[test]
fn test_negative_jumps_across_buffers() {
    let d = deque(2000);
    let cap = SegDeque::<u32>::buffer_capacity() as isize;
    let end = d.cursor_end();
    for n in [1, 2, cap - 1, cap, cap + 1, 2 * cap, 5 * cap + 7, 2000] {
        let it = end - n;
        assert_eq!(it.get(), Some(&(2000 - n as u32)), "end - {n}");
        assert_eq!(it.index(), 2000 - n as usize);
    }
}

#[test]
fn test_arithmetic_symmetry() {
    let d = deque(1500);
    for base in [0isize, 1, 127, 128, 129, 700, 1499] {
        let it = d.cursor_front() + base;
        for n in [-300isize, -129, -128, -1, 0, 1, 128, 129, 300] {
            let target = base + n;
            if !(0..=1500).contains(&target) {
                continue;
            }
            assert_eq!((it + n) - n, it);
            assert_eq!(it + n, n + it);
            assert_eq!((it + n) - it, n);
            let mut moved = it;
            moved += n;
            moved -= n;
            assert_eq!(moved, it);
        }
    }
}

#[test]
fn test_distance_matches_len() {
    for len in [0u32, 1, 127, 128, 129, 1000] {
        let d = deque(len);
        assert_eq!(d.cursor_end() - d.cursor_front(), len as isize);
        assert_eq!(d.cursor_front() - d.cursor_end(), -(len as isize));
    }
}

#[test]
fn test_step_walk_visits_every_element() {
    let d = deque(700);
    let mut it = d.cursor_front();
    let mut expected = 0;
    while let Some(&value) = it.get() {
        assert_eq!(value, expected);
        expected += 1;
        it.move_next();
    }
    assert_eq!(expected, 700);
    assert_eq!(it, d.cursor_end());
    while it != d.cursor_front() {
        it.move_prev();
        expected -= 1;
        assert_eq!(it.get(), Some(&expected));
    }
}

#[test]
fn test_comparisons_order_positions() {
    let d = deque(400);
    let a = d.cursor_at(50);
    let b = d.cursor_at(300);
    assert!(a < b);
    assert!(b > a);
    assert!(d.cursor_end() > b);
    assert_eq!(a.peek(250), b.get());
    assert_eq!(b.peek(-250), a.get());
}

#[test]
fn test_cursor_on_empty_deque() {
    let d: SegDeque<u8> = SegDeque::new();
    let it = d.cursor_front();
    assert_eq!(it, d.cursor_end());
    assert_eq!(it.get(), None);
    assert_eq!(it.peek(0), None);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_jump_past_end_panics() {
    let d = deque(10);
    let _ = d.cursor_front() + 11;
}

#[test]
#[should_panic(expected = "past the end")]
fn test_step_past_end_panics() {
    let d = deque(3);
    let mut it = d.cursor_end();
    it.move_next();
}

#[test]
#[should_panic(expected = "before the front")]
fn test_step_before_front_panics() {
    let d = deque(3);
    let mut it = d.cursor_front();
    it.move_prev();
}

#[test]
fn test_invalidation_is_a_borrow() {
    // Cursors borrow the deque; growth requires them to be gone first.
    let mut d = deque(100);
    let index = {
        let it = d.cursor_at(40);
        it.index()
    };
    for i in 0..10_000 {
        d.push_front(i);
    }
    let fresh = d.cursor_at(index + 10_000);
    assert_eq!(fresh.get(), Some(&40));
}
