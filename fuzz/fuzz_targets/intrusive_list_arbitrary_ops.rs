#![no_main]

use libfuzzer_sys::fuzz_target;
use lru_store::ds::IntrusiveList;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Covers push_front, pop_back, move_to_front, remove, get and clear, and
// validates link structure after each step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                // push_front
                let id = list.push_front(value);
                all_ids.push(id);
                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.front_id(), Some(id));
            }
            1 => {
                // pop_back
                let old_len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            }
            2 => {
                // move_to_front
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            }
            3 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids.swap_remove((value as usize) % all_ids.len());
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            4 => {
                // get (read-only)
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let _ = list.get(id);
                }
            }
            5 => {
                list.clear();
                all_ids.clear();
                assert!(list.is_empty());
                assert_eq!(list.back(), None);
            }
            _ => unreachable!(),
        }

        if let Err(err) = list.validate() {
            panic!("list invariant violated: {err}");
        }
    }
});
