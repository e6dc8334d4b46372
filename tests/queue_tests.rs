use segdeque::{FifoSequence, Queue, SegDeque};
use std::collections::VecDeque;

fn check_fifo<S>(mut queue: Queue<u64, S>)
where
    S: FifoSequence<Item = u64>,
{
    let mut next_in = 0u64;
    let mut next_out = 0u64;
    for round in 0..200 {
        for _ in 0..(round % 7 + 1) {
            queue.push(next_in);
            next_in += 1;
        }
        for _ in 0..(round % 5) {
            if let Some(value) = queue.pop() {
                assert_eq!(value, next_out);
                next_out += 1;
            }
        }
        assert_eq!(queue.len() as u64, next_in - next_out);
        assert_eq!(queue.front().copied(), (next_out < next_in).then_some(next_out));
        assert_eq!(queue.back().copied(), (next_out < next_in).then(|| next_in - 1));
    }
    while let Some(value) = queue.pop() {
        assert_eq!(value, next_out);
        next_out += 1;
    }
    assert_eq!(next_out, next_in);
    assert!(queue.is_empty());
}

#[test]
fn test_queue_fifo_over_segdeque() {
    check_fifo(Queue::<u64>::new());
}

#[test]
fn test_queue_fifo_over_vecdeque() {
    check_fifo(Queue::<u64, VecDeque<u64>>::new());
}

#[test]
fn test_queue_from_existing_deque() {
    let d: SegDeque<u64> = (10..20).collect();
    let mut q = Queue::from_sequence(d);
    assert_eq!(q.pop(), Some(10));
    q.push(20);
    let inner = q.into_inner();
    assert!(inner.iter().copied().eq(11..21));
}

#[test]
fn test_queue_clone_is_independent() {
    let mut a: Queue<String> = ["x", "y"].into_iter().map(String::from).collect();
    let b = a.clone();
    a.pop();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 2);
    assert_eq!(format!("{b:?}"), "Queue([\"x\", \"y\"])");
}
