use hashbrown::HashMap;
use probetable::ProbeTable;
use std::time::{Duration, Instant};

const N: u32 = 1 << 17;

fn main() {
    let keys: Vec<String> = (0..N).map(|i| format!("key-{}", i)).collect();

    let mut hm = HashMap::new();
    let mut t = Instant::now();
    let mut mx = 0.0f64;
    let mut sum = Duration::new(0, 0);
    for (i, key) in keys.iter().enumerate() {
        hm.insert(key.clone(), i);
        let t2 = Instant::now();
        let took = t2.duration_since(t);
        t = t2;
        mx = mx.max(took.as_secs_f64());
        sum += took;
        println!("{} hashbrown {} ms", i, took.as_secs_f64() * 1000.0);
    }
    eprintln!(
        "hashbrown::HashMap max: {:?}, mean: {:?}",
        Duration::from_secs_f64(mx),
        sum / N
    );

    let mut pt = ProbeTable::default();
    let mut t = Instant::now();
    let mut mx = 0.0f64;
    let mut sum = Duration::new(0, 0);
    for (i, key) in keys.iter().enumerate() {
        pt.insert(key.as_str(), i);
        let t2 = Instant::now();
        let took = t2.duration_since(t);
        t = t2;
        mx = mx.max(took.as_secs_f64());
        sum += took;
        println!("{} probetable {} ms", i, took.as_secs_f64() * 1000.0);
    }
    eprintln!(
        "probetable::ProbeTable max: {:?}, mean: {:?}",
        Duration::from_secs_f64(mx),
        sum / N
    );

    // Deletes repair the cluster they hit, so their cost tracks cluster length.
    let mut t = Instant::now();
    let mut mx = 0.0f64;
    let mut sum = Duration::new(0, 0);
    for (i, key) in keys.iter().enumerate().step_by(2) {
        let _ = pt.delete(key);
        let t2 = Instant::now();
        let took = t2.duration_since(t);
        t = t2;
        mx = mx.max(took.as_secs_f64());
        sum += took;
        println!("{} probetable-delete {} ms", i, took.as_secs_f64() * 1000.0);
    }
    eprintln!(
        "probetable::ProbeTable delete max: {:?}, mean: {:?}",
        Duration::from_secs_f64(mx),
        sum / (N / 2)
    );
}
