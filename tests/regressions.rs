use probetable::{Error, ProbeTable};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

#[test]
fn five_slots_ten_keys() {
    let mut table = ProbeTable::new(5);
    let mut capacities = vec![table.capacity()];
    for i in 0..10 {
        table.insert(i.to_string(), i);
        if capacities.last() != Some(&table.capacity()) {
            capacities.push(table.capacity());
        }
    }
    assert_eq!(capacities, [5, 7, 11]);
    for i in 0..10 {
        assert_eq!(table.get(&i.to_string()), Ok(&i), "could not find {}", i);
    }

    for i in 0..5 {
        table.delete(&i.to_string()).unwrap();
    }
    for i in 0..10 {
        if i < 5 {
            assert_eq!(table.get(&i.to_string()), Err(Error::KeyNotFound));
        } else {
            assert_eq!(table.get(&i.to_string()), Ok(&i), "could not find {}", i);
        }
    }
}

#[test]
fn never_observably_full() {
    for capacity in 0..40 {
        let mut table = ProbeTable::new(capacity);
        for i in 0..100 {
            table.insert(i.to_string(), ());
            assert!(!table.is_full());
            assert!(table.len() < table.capacity());
        }
    }
}

#[test]
fn fills_all_but_one_slot_before_growing() {
    let mut table = ProbeTable::new(10);
    for i in 0..9 {
        table.insert(i.to_string(), i);
    }
    assert_eq!(table.capacity(), 10);
    table.insert("9", 9);
    assert_eq!(table.capacity(), 11);
}

#[test]
fn capacity_strictly_increases() {
    let mut table = ProbeTable::new(3);
    let mut last = table.capacity();
    let mut growths = 0;
    for i in 0..5000 {
        table.insert(format!("key-{}", i), i);
        if table.capacity() != last {
            assert!(table.capacity() > last);
            last = table.capacity();
            growths += 1;
        }
    }
    assert!(growths >= 2);
    for i in 0..5000 {
        assert_eq!(table.get(&format!("key-{}", i)), Ok(&i));
    }
}

#[test]
fn delete_middle_of_cluster() {
    let mut table = ProbeTable::new(53);
    let home = table.hash("anchor");
    let colliding: Vec<String> = (0..1_000_000)
        .map(|i| format!("k{}", i))
        .filter(|k| table.hash(k) == home)
        .take(8)
        .collect();
    assert_eq!(colliding.len(), 8);

    for (i, key) in colliding.iter().enumerate() {
        table.insert(key.as_str(), i);
    }
    assert_eq!(table.capacity(), 53);

    for victim in [3, 0, 6].iter().copied() {
        table.delete(&colliding[victim]).unwrap();
    }
    for (i, key) in colliding.iter().enumerate() {
        match i {
            0 | 3 | 6 => assert_eq!(table.get(key), Err(Error::KeyNotFound)),
            _ => assert_eq!(table.get(key), Ok(&i)),
        }
    }

    // Put them back; the cluster should be whole again.
    for victim in [3, 0, 6].iter().copied() {
        table.insert(colliding[victim].as_str(), victim);
    }
    for (i, key) in colliding.iter().enumerate() {
        assert_eq!(table.get(key), Ok(&i));
    }
    assert_eq!(table.len(), 8);
}

#[test]
fn delete_merged_clusters() {
    // Two groups of keys with adjacent home slots run together into one cluster. Deleting from
    // the first group must not strand the second.
    let mut table = ProbeTable::new(101);
    let first = table.hash("left");
    let second = (first + 2) % 101;
    let pick = |home: usize, n: usize| -> Vec<String> {
        (0..1_000_000)
            .map(|i| format!("{}", i))
            .filter(|k| table.hash(k) == home)
            .take(n)
            .collect()
    };
    let left = pick(first, 4);
    let right = pick(second, 3);

    for key in left.iter().chain(right.iter()) {
        table.insert(key.as_str(), key.clone());
    }
    table.delete(&left[1]).unwrap();
    table.delete(&left[2]).unwrap();
    for key in right.iter().chain([&left[0], &left[3]].iter().copied()) {
        assert_eq!(table.get(key), Ok(key));
    }
    assert_eq!(table.len(), 5);
}

#[test]
fn random_deletes_keep_count() {
    // Cluster repair takes entries out and puts them back. Make sure that bookkeeping nets out
    // and never triggers growth on a table with lots of long clusters.
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut table = ProbeTable::new(211);
    let mut reference = HashMap::new();
    for round in 0..20_000u32 {
        let key = format!("{}", rng.gen_range(0..300u32));
        if rng.gen_bool(0.55) {
            table.insert(key.as_str(), round);
            reference.insert(key, round);
        } else {
            let capacity = table.capacity();
            let expected = reference.remove(&key).ok_or(Error::KeyNotFound);
            assert_eq!(table.delete(&key), expected);
            assert_eq!(table.capacity(), capacity, "delete must never grow");
        }
        assert_eq!(table.len(), reference.len());
    }
    for (key, value) in &reference {
        assert_eq!(table.get(key), Ok(value));
    }
    assert_eq!(table.iter().count(), reference.len());
}
