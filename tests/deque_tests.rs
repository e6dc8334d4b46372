use segdeque::{segdeque, DequeError, SegDeque};

#[test]
fn test_push_back_twenty() {
    let mut d = SegDeque::new();
    for i in 1..=20 {
        d.push_back(i);
    }
    assert_eq!(d.len(), 20);
    assert_eq!(d[19], 20);
    assert_eq!(d[0], 1);
}

#[test]
fn test_push_both_ends() {
    let mut d: SegDeque<i32> = (1..=20).collect();
    d.push_front(0);
    d.push_back(21);
    assert_eq!(d[0], 0);
    assert_eq!(d[21], 21);
    assert_eq!(d.len(), 22);
}

#[test]
fn test_erase_shifts_following_elements() {
    let mut d: SegDeque<i32> = (0..22).collect();
    let removed = d.remove(5);
    assert_eq!(removed, Some(5));
    assert_eq!(d.len(), 21);
    assert_eq!(d[5], 6);
    let expected: Vec<i32> = (0..5).chain(6..22).collect();
    assert_eq!(d, expected);
}

#[test]
fn test_resize_down() {
    let mut d = segdeque![1, 2, 3, 4, 5];
    d.resize(3, 0);
    assert_eq!(d.len(), 3);
    assert_eq!(d, [1, 2, 3]);
}

#[test]
fn test_resize_up_with_value() {
    let mut d = segdeque![1, 2, 3];
    d.resize(8, 9);
    assert_eq!(d, [1, 2, 3, 9, 9, 9, 9, 9]);
}

#[test]
fn test_alternating_growth_over_two_buffers() {
    let cap = SegDeque::<i32>::buffer_capacity();
    let n = 2 * cap;
    let mut d = SegDeque::new();
    let mut model = std::collections::VecDeque::new();
    for i in 0..n as i32 {
        if i % 2 == 0 {
            d.push_front(i);
            model.push_front(i);
        } else {
            d.push_back(i);
            model.push_back(i);
        }
    }
    assert_eq!(d.len(), n);
    for (index, expected) in model.iter().enumerate() {
        assert_eq!(&d[index], expected, "mismatch at {index}");
    }
    // Evens descend at the front, odds ascend at the back.
    assert_eq!(d[0], n as i32 - 2);
    assert_eq!(d[cap - 1], 0);
    assert_eq!(d[cap], 1);
    assert_eq!(d[n - 1], n as i32 - 1);
}

#[test]
fn test_checked_access() {
    let mut d = segdeque![10, 20, 30];
    assert_eq!(d.at(1), Ok(&20));
    assert_eq!(d.at(3), Err(DequeError::OutOfRange { index: 3, len: 3 }));
    *d.at_mut(0).unwrap() += 1;
    assert_eq!(d.front(), Some(&11));
    assert!(d.get(100).is_none());
    assert!(d.get_mut(3).is_none());
}

#[test]
fn test_empty_ends_return_none() {
    let mut d: SegDeque<String> = SegDeque::new();
    assert_eq!(d.pop_front(), None);
    assert_eq!(d.pop_back(), None);
    assert!(d.front_mut().is_none());
    assert!(d.back_mut().is_none());
    assert_eq!(d.remove(0), None);
}

#[test]
fn test_construction_forms() {
    let filled = SegDeque::from_elem(300, 'x');
    assert_eq!(filled.len(), 300);
    assert!(filled.iter().all(|&c| c == 'x'));

    let defaulted: SegDeque<u64> = SegDeque::with_len(70);
    assert!(defaulted.iter().all(|&x| x == 0));

    let from_vec = SegDeque::from(vec![1, 2, 3]);
    let from_array = SegDeque::from([1, 2, 3]);
    assert_eq!(from_vec, from_array);

    let copy = from_vec.clone();
    assert_eq!(copy, from_vec);

    let moved = copy;
    assert_eq!(moved.len(), 3);

    let with_capacity: SegDeque<u8> = SegDeque::with_capacity(5000);
    assert!(with_capacity.is_empty());
    assert!(with_capacity.buffer_count() >= 5000 / SegDeque::<u8>::buffer_capacity());
}

#[test]
fn test_try_reserve_overflow_leaves_deque_unchanged() {
    let mut d: SegDeque<u32> = (0..100).collect();
    let buffers = d.buffer_count();
    assert_eq!(d.try_reserve_back(usize::MAX), Err(DequeError::CapacityOverflow));
    assert_eq!(d.try_reserve_front(d.max_size()), Err(DequeError::CapacityOverflow));
    assert_eq!(d.buffer_count(), buffers);
    assert!(d.iter().copied().eq(0..100));
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_reserve_overflow_panics() {
    let mut d: SegDeque<u32> = SegDeque::new();
    d.reserve_back(usize::MAX);
}

#[test]
fn test_large_elements_get_one_slot_per_buffer() {
    let mut d: SegDeque<[u8; 600]> = SegDeque::new();
    assert_eq!(SegDeque::<[u8; 600]>::buffer_capacity(), 1);
    for i in 0..20u8 {
        d.push_back([i; 600]);
        d.push_front([i; 600]);
    }
    assert_eq!(d.len(), 40);
    assert_eq!(d[0][0], 19);
    assert_eq!(d[39][599], 19);
    d.insert(20, [99; 600]);
    assert_eq!(d[20][0], 99);
    d.remove_range(5..30);
    assert_eq!(d.len(), 16);
}

#[test]
fn test_extend_variants() {
    let mut d: SegDeque<u32> = SegDeque::new();
    d.extend(0..10);
    d.extend(&[10, 11]);
    d.extend(vec![12].iter());
    assert!(d.iter().copied().eq(0..13));
}

#[test]
fn test_for_each_visits_in_order() {
    let mut d: SegDeque<u64> = (0..1000).collect();
    d.for_each_mut(|x| *x *= 2);
    let mut seen = Vec::new();
    d.for_each(|x| seen.push(*x));
    assert!(seen.into_iter().eq((0..1000).map(|x| x * 2)));
}

#[test]
fn test_index_mut_and_iter_mut() {
    let mut d: SegDeque<i32> = (0..10).collect();
    d[3] = -3;
    for x in &mut d {
        *x += 1;
    }
    assert_eq!(d[3], -2);
    let total: i32 = (&d).into_iter().sum();
    assert_eq!(total, (1..=10).sum::<i32>() - 4 - 2);
}

#[test]
fn test_truncate_and_clear() {
    let mut d: SegDeque<String> = (0..500).map(|i| format!("{i}")).collect();
    d.truncate(600);
    assert_eq!(d.len(), 500);
    d.truncate(10);
    assert_eq!(d.back().map(String::as_str), Some("9"));
    d.clear();
    assert!(d.is_empty());
    assert_eq!(d.buffer_count(), 1);
    d.push_front("x".into());
    assert_eq!(d.len(), 1);
}

#[test]
fn test_long_fifo_run_does_not_leak_buffers() {
    let mut d = SegDeque::new();
    for i in 0..100_000u32 {
        d.push_back(i);
        if i >= 10 {
            assert_eq!(d.pop_front(), Some(i - 10));
        }
    }
    assert_eq!(d.len(), 10);
    assert!(d.buffer_count() <= 2);
}
