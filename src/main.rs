use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotdeck_core::{Handle, HandleError, HandleTable};

const DEFAULT_OPERATIONS: usize = 100_000;
const DEFAULT_SEED: u64 = 42;

#[derive(Debug)]
struct Entity {
    x: i32,
    y: i32,
    health: u16,
}

#[derive(Debug, Default)]
struct ChurnReport {
    inserted: usize,
    removed: usize,
    updated: usize,
    stale_rejected: usize,
}

/// Usage: slotdeck [operations] [seed]
fn main() {
    let mut args = std::env::args().skip(1);
    let operations = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_OPERATIONS);
    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let started = Local::now();
    println!(
        "[{}] churning {} operations (seed {})",
        started.format("%Y-%m-%d %H:%M:%S"),
        operations,
        seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = HandleTable::with_capacity(operations / 4);
    let mut live: Vec<Handle<Entity>> = Vec::new();
    let mut stale: Vec<Handle<Entity>> = Vec::new();
    let mut report = ChurnReport::default();

    for _ in 0..operations {
        match rng.random_range(0..10) {
            0..=4 => {
                let entity = Entity {
                    x: rng.random_range(-500..500),
                    y: rng.random_range(-500..500),
                    health: 100,
                };
                live.push(table.insert(entity));
                report.inserted += 1;
            }
            5..=7 if !live.is_empty() => {
                let handle = live.swap_remove(rng.random_range(0..live.len()));
                match table.remove(handle) {
                    Ok(_) => {
                        report.removed += 1;
                        stale.push(handle);
                    }
                    Err(err) => eprintln!("failed to remove {handle:?}: {err}"),
                }
            }
            8 if !live.is_empty() => {
                let handle = live[rng.random_range(0..live.len())];
                if let Ok(entity) = table.get_mut(handle) {
                    entity.health = entity.health.saturating_sub(rng.random_range(1..20));
                    entity.x += 1;
                    entity.y -= 1;
                    report.updated += 1;
                }
            }
            _ if !stale.is_empty() => {
                let handle = stale[rng.random_range(0..stale.len())];
                match table.get(handle) {
                    Err(HandleError::Expired) => report.stale_rejected += 1,
                    Err(HandleError::Invalid) => eprintln!("{handle:?} was never issued"),
                    Ok(entity) => eprintln!("stale {handle:?} resolved to {entity:?}"),
                }
            }
            _ => {}
        }
    }

    let wounded = table.iter().filter(|entity| entity.health < 100).count();
    let finished = Local::now();

    println!("{report:#?}");
    println!(
        "live: {}, slots: {}, free: {}, capacity: {}, wounded: {}",
        table.len(),
        table.slot_count(),
        table.free_slots(),
        table.capacity(),
        wounded
    );
    println!(
        "[{}] done in {} ms",
        finished.format("%Y-%m-%d %H:%M:%S"),
        (finished - started).num_milliseconds()
    );
}
