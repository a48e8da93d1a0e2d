// Speed tests - wall-clock timings of WeightedList against a plain Vec
//
// Run with `cargo bench --bench speedtest`. Pass test names to run a subset.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use weighted_list::{WeightedItem, WeightedList};

/// One timed operation run `count` times: (baseline, candidate)
type SpeedTest = fn(usize) -> (Duration, Duration);

const SPEED_TESTS: &[(&str, SpeedTest)] = &[
    ("append", test_append),
    ("insert_front", test_insert_front),
    ("index", test_index),
    ("select", test_select),
    ("merge_duplicates", test_merge_duplicates),
];

const COUNTS: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];

fn timed(f: impl FnOnce()) -> Duration {
    let start = Instant::now();
    f();
    start.elapsed()
}

fn unit_list(count: usize) -> WeightedList<u32> {
    WeightedList::from_values(0..count as u32)
}

fn test_append(count: usize) -> (Duration, Duration) {
    let item = WeightedItem::unit("sup");

    let mut items = Vec::new();
    let baseline = timed(|| {
        for _ in 0..count {
            items.push(item.clone());
        }
    });

    let mut list = WeightedList::new();
    let weighted = timed(|| {
        for _ in 0..count {
            list.append(item.clone()).unwrap();
        }
    });

    (baseline, weighted)
}

fn test_insert_front(count: usize) -> (Duration, Duration) {
    // Front inserts are quadratic, keep them bounded
    let count = count.min(10_000);

    let mut items = Vec::new();
    let baseline = timed(|| {
        for value in 0..count {
            items.insert(0, WeightedItem::unit(value));
        }
    });

    let mut list = WeightedList::new();
    let weighted = timed(|| {
        for value in 0..count {
            list.insert(0, WeightedItem::unit(value)).unwrap();
        }
    });

    (baseline, weighted)
}

fn test_index(count: usize) -> (Duration, Duration) {
    let count = count.min(10_000);
    let items: Vec<u32> = (0..count as u32).collect();
    let list = unit_list(count);

    let baseline = timed(|| {
        for index in 0..count {
            std::hint::black_box(&items[index]);
        }
    });
    let weighted = timed(|| {
        for index in 0..count as i64 {
            std::hint::black_box(&list[index]);
        }
    });

    (baseline, weighted)
}

fn test_select(count: usize) -> (Duration, Duration) {
    let list = unit_list(1_000);
    let frozen = list.clone().freeze();
    let mut rng = StdRng::seed_from_u64(42);

    let linear = timed(|| {
        for _ in 0..count {
            std::hint::black_box(list.select(&mut rng).ok());
        }
    });
    let prefix = timed(|| {
        for _ in 0..count {
            std::hint::black_box(frozen.select(&mut rng).ok());
        }
    });

    (linear, prefix)
}

fn test_merge_duplicates(count: usize) -> (Duration, Duration) {
    let count = count.min(100_000);
    let values: Vec<u32> = (0..count as u32).map(|value| value % 100).collect();
    let list = WeightedList::from_values(values.iter().copied());

    let baseline = timed(|| {
        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();
        std::hint::black_box(distinct.len());
    });
    let weighted = timed(|| {
        std::hint::black_box(list.merged_duplicates().len());
    });

    (baseline, weighted)
}

fn main() {
    let filters: Vec<String> = std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with("--"))
        .collect();

    for (name, test) in SPEED_TESTS {
        if !filters.is_empty() && !filters.iter().any(|filter| name.contains(filter.as_str())) {
            continue;
        }

        println!("\n=== {} ===", name);
        for count in COUNTS {
            let (baseline, weighted) = test(count);
            println!(
                "  {:>9}: baseline {:?}, weighted {:?} ({:.2}x)",
                count,
                baseline,
                weighted,
                weighted.as_secs_f64() / baseline.as_secs_f64().max(f64::EPSILON)
            );
        }
    }
}
