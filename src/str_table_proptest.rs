#![cfg(test)]

// Property tests for StrTable kept inside the crate so they can drive the
// test-only allocation fault hook.

use crate::error::TableError;
use crate::str_table::{fault, StrTable};
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Lookup(usize),
    LookupRaw(String),
    // Insert with the nth allocation of the call forced to fail.
    FailingInsert(usize, i32, usize),
    Iterate,
}

fn arb_ops(pool_len: usize) -> impl Strategy<Value = Vec<OpI>> {
    let idx = 0..pool_len;
    let op = prop_oneof![
        4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
        2 => idx.clone().prop_map(OpI::Lookup),
        1 => "[a-z]{0,5}".prop_map(OpI::LookupRaw),
        1 => (idx, any::<i32>(), 0usize..2).prop_map(|(i, v, n)| OpI::FailingInsert(i, v, n)),
        1 => Just(OpI::Iterate),
    ];
    proptest::collection::vec(op, 1..80)
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (
        1usize..=8,
        proptest::collection::vec("[a-z]{1,5}", 1..=24),
    )
        .prop_flat_map(|(cap, pool)| {
            let len = pool.len();
            (Just(cap), Just(pool), arb_ops(len))
        })
}

// Every key here has djb2 low bits 0b111, so they share a home slot in any
// table of up to 8 slots.
const COLLIDING: [&str; 8] = ["B", "J", "R", "Z", "b", "j", "r", "z"];

fn arb_colliding_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=8, arb_ops(COLLIDING.len())).prop_map(|(cap, ops)| {
        let pool = COLLIDING.iter().map(|s| s.to_string()).collect();
        (cap, pool, ops)
    })
}

fn run_state_machine(cap: usize, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut sut: StrTable<i32> = StrTable::with_capacity(cap).unwrap();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let owned = sut.insert_or_update(k, v).unwrap();
                prop_assert_eq!(owned, k.as_str());
                model.insert(k.clone(), v);
            }
            OpI::Lookup(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.lookup(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::LookupRaw(s) => {
                prop_assert_eq!(sut.lookup(&s), model.get(&s));
            }
            OpI::FailingInsert(i, v, n) => {
                let k = &pool[i];
                let cap_before = sut.capacity();
                fault::fail_nth(n);
                let res = sut.insert_or_update(k, v).map(str::to_owned);
                fault::disarm();
                match res {
                    Ok(owned) => {
                        // The armed allocation was never reached (update, or no growth).
                        prop_assert_eq!(owned, k.clone());
                        model.insert(k.clone(), v);
                    }
                    Err(TableError::AllocationFailure { .. }) => {
                        prop_assert_eq!(sut.capacity(), cap_before, "failed insert must not resize");
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            }
            OpI::Iterate => {
                let seen: HashMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                prop_assert_eq!(&seen, &model);
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Capacity stays a power of two and the load factor at most one half
        prop_assert!(sut.capacity().is_power_of_two());
        prop_assert!(sut.len() * 2 <= sut.capacity());
        // 3) Every modelled key is reachable
        for (k, v) in &model {
            prop_assert_eq!(sut.lookup(k), Some(v));
        }
    }
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - insert_or_update returns the stored key and later lookups see the newest value.
// - Lookups of absent keys report None, including just after a resize.
// - A failed insert leaves size, capacity and contents unchanged.
// - iter yields exactly the model's entries.
// - len parity, power-of-two capacity, and load factor <= 1/2 after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, pool, ops) in arb_scenario()) {
        run_state_machine(cap, &pool, ops)?;
    }
}

// Property: Same invariants under keys that all probe from the same home slot
// while the table is small, so probe chains wrap and interleave.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((cap, pool, ops) in arb_colliding_scenario()) {
        run_state_machine(cap, &pool, ops)?;
    }
}

#[test]
fn colliding_pool_shares_low_bits() {
    for k in COLLIDING {
        assert_eq!(crate::hash::djb2_str(k) & 7, 7, "{k}");
    }
}
