#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use lru_store::policy::lru::LruCore;
use lru_store::traits::{CoreCache, LruCacheTrait, MutableCache};

// Fuzz arbitrary operation sequences on LruCore
//
// First byte picks the capacity (1..=16); each following byte pair is
// (opcode, key). The index/list invariant is checked after every step.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 16) + 1;
    let mut core: LruCore<u8, u32> = LruCore::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let op = pair[0] % 8;
        let key = pair[1] % 32;
        let was_present = core.contains(&key);
        let old_len = core.len();

        match op {
            0 | 1 => {
                // set
                let previous = core.insert(key, Arc::new(step as u32));
                assert_eq!(previous.is_some(), was_present);
                assert_eq!(core.peek(&key).map(|v| **v), Some(step as u32));
                if was_present || old_len < capacity {
                    assert_eq!(core.len(), old_len + usize::from(!was_present));
                } else {
                    assert_eq!(core.len(), capacity);
                }
            }
            2 => {
                // get promotes
                let hit = core.get(&key).is_some();
                assert_eq!(hit, was_present);
                if hit {
                    assert_eq!(core.recency_rank(&key), Some(0));
                }
            }
            3 => {
                // peek leaves order alone
                let before = core.keys_mru();
                let _ = core.peek(&key);
                assert_eq!(core.keys_mru(), before);
            }
            4 => {
                // delete
                let removed = core.remove(&key).is_some();
                assert_eq!(removed, was_present);
                assert!(!core.contains(&key));
            }
            5 => {
                // touch
                assert_eq!(core.touch(&key), was_present);
            }
            6 => {
                // pop_lru
                let expected = core.peek_lru().map(|(k, _)| *k);
                let popped = core.pop_lru().map(|(k, _)| k);
                assert_eq!(popped, expected);
            }
            7 => {
                // clear
                core.clear();
                assert!(core.is_empty());
            }
            _ => unreachable!(),
        }

        assert!(core.len() <= core.capacity());
        if let Err(err) = core.check_invariants() {
            panic!("invariant violated after step {step}: {err}");
        }
    }
});
