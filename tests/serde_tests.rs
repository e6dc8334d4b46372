use segdeque::{Queue, SegDeque};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Event {
    id: u32,
    name: String,
}

#[test]
fn test_round_trip_across_buffers() {
    let mut d = SegDeque::new();
    for id in 0..300 {
        let event = Event {
            id,
            name: format!("e{id}"),
        };
        if id % 2 == 0 {
            d.push_back(event);
        } else {
            d.push_front(event);
        }
    }
    let json = serde_json::to_string(&d).unwrap();
    let back: SegDeque<Event> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
    assert_eq!(back.front().map(|e| e.id), Some(299));
}

#[test]
fn test_matches_vec_encoding() {
    let d: SegDeque<i64> = (-5..5).collect();
    let v: Vec<i64> = (-5..5).collect();
    assert_eq!(
        serde_json::to_value(&d).unwrap(),
        serde_json::to_value(&v).unwrap()
    );
}

#[test]
fn test_queue_round_trip() {
    let q: Queue<u16> = (0..1000).collect();
    let json = serde_json::to_string(&q).unwrap();
    let mut back: Queue<u16> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), 1000);
    assert_eq!(back.pop(), Some(0));
}

#[test]
fn test_rejects_wrong_element_type() {
    let result: Result<SegDeque<u8>, _> = serde_json::from_str("[1, 2, 300]");
    assert!(result.is_err());
}
