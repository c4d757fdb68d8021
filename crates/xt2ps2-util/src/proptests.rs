use std::collections::VecDeque;

use crate::{MemEeprom, RingQueue, WearLevelStore, EMPTY_SLOT};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8),
    PushFront(u8),
    Remove,
    RemoveN(usize),
    Replace(usize, u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u8>().prop_map(Op::Insert),
        2 => any::<u8>().prop_map(Op::PushFront),
        3 => Just(Op::Remove),
        1 => (0usize..4).prop_map(Op::RemoveN),
        1 => (0usize..10, any::<u8>()).prop_map(|(i, v)| Op::Replace(i, v)),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn ring_queue_matches_vecdeque_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..128),
    ) {
        let mut q = RingQueue::<u8>::with_capacity(capacity);
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    let accepted = q.insert(v).is_ok();
                    prop_assert_eq!(accepted, model.len() < capacity);
                    if accepted {
                        model.push_back(v);
                    }
                }
                Op::PushFront(v) => {
                    let accepted = q.push_front(v).is_ok();
                    prop_assert_eq!(accepted, model.len() < capacity);
                    if accepted {
                        model.push_front(v);
                    }
                }
                Op::Remove => {
                    prop_assert_eq!(q.remove(), model.pop_front());
                }
                Op::RemoveN(n) => {
                    let ok = q.remove_n(n);
                    prop_assert_eq!(ok, n <= model.len());
                    if ok {
                        model.drain(..n);
                    }
                }
                Op::Replace(i, v) => {
                    let ok = q.replace(i, v);
                    prop_assert_eq!(ok, i < model.len());
                    if ok {
                        model[i] = v;
                    }
                }
                Op::Clear => {
                    q.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(q.len(), model.len());
            prop_assert_eq!(q.iter().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());
        }
    }

    #[test]
    fn wear_leveling_reads_back_every_write(
        block_len in 1usize..32,
        values in prop::collection::vec(0u8..EMPTY_SLOT, 1..96),
    ) {
        let mut store = WearLevelStore::open(MemEeprom::new(block_len), 0, block_len).unwrap();
        for (n, value) in values.iter().copied().enumerate() {
            store.write_byte(value).unwrap();
            prop_assert_eq!(store.index(), (n + 1) % block_len);
            prop_assert_eq!(store.read_byte().unwrap(), value);
        }

        let last = *values.last().unwrap();
        let mut reopened = WearLevelStore::open(store.into_inner(), 0, block_len).unwrap();
        prop_assert_eq!(reopened.read_byte().unwrap(), last);
    }
}
