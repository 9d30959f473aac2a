use anyhow::{anyhow, bail, Result};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::thread;
use std::time::Instant;

use userlist::{AllocationError, MatchMode, Record, Upsert, UserList};

pub struct StressArgs {
    pub threads: usize,
    pub ops: usize,
    pub keys: usize,
    pub seed: u64,
    pub max_records: Option<usize>,
    pub atomic_upsert: bool,
    pub exact: bool,
    pub json: bool,
    pub progress: bool,
}

#[derive(Debug, Default, Clone, Serialize)]
struct WorkerStats {
    add_head: u64,
    add_tail: u64,
    updated: u64,
    upsert_inserts: u64,
    deletes: u64,
    deleted_nodes: u64,
    finds: u64,
    find_hits: u64,
    alloc_failures: u64,
}

impl WorkerStats {
    fn merge(&mut self, o: &WorkerStats) {
        self.add_head += o.add_head;
        self.add_tail += o.add_tail;
        self.updated += o.updated;
        self.upsert_inserts += o.upsert_inserts;
        self.deletes += o.deletes;
        self.deleted_nodes += o.deleted_nodes;
        self.finds += o.finds;
        self.find_hits += o.find_hits;
        self.alloc_failures += o.alloc_failures;
    }
}

/// Простой прогресс‑репорт на ~10 шагов.
struct Progress {
    name: String,
    total: usize,
    step: usize,
    next: usize,
    start: Instant,
    enabled: bool,
}

impl Progress {
    fn new(name: String, total: usize, enabled: bool) -> Self {
        let step = std::cmp::max(1, total / 10);
        Self {
            name,
            total,
            step,
            next: step,
            start: Instant::now(),
            enabled,
        }
    }

    fn bump(&mut self, cur: usize) {
        if !self.enabled {
            return;
        }
        if cur >= self.next || cur == self.total {
            let pct = (cur as f64 / self.total.max(1) as f64) * 100.0;
            let elapsed = self.start.elapsed().as_secs_f64();
            let tput = if elapsed > 0.0 { cur as f64 / elapsed } else { 0.0 };
            println!(
                "[{:>10}] {:>7} / {:<7} ({:>5.1}%) elapsed={:.2}s, tput={:.0} ops/s",
                self.name, cur, self.total, pct, elapsed, tput
            );
            self.next = cur.saturating_add(self.step);
        }
    }
}

/// true if the insert went through; allocation failures are counted, not fatal.
fn insert_ok(res: Result<()>, st: &mut WorkerStats) -> bool {
    match res {
        Ok(()) => true,
        Err(e) if e.downcast_ref::<AllocationError>().is_some() => {
            st.alloc_failures += 1;
            false
        }
        Err(e) => {
            warn!("stress: insert failed: {:#}", e);
            false
        }
    }
}

fn worker(list: &UserList, args: &StressArgs, t: usize) -> WorkerStats {
    let mut rng = StdRng::seed_from_u64(args.seed ^ (t as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let mut st = WorkerStats::default();
    let mut progress = Progress::new(format!("worker-{}", t), args.ops, args.progress && t == 0);

    for i in 0..args.ops {
        let name = format!("name_{}", rng.gen_range(0..args.keys));
        // мало возрастов => delete по полному значению реально попадает
        let rec = Record::new(&name, rng.gen_range(0..4u8) * 10);

        match rng.gen_range(0..100u32) {
            0..=19 => {
                if insert_ok(list.add_head(rec), &mut st) {
                    st.add_head += 1;
                }
            }
            20..=44 => {
                if insert_ok(list.add_tail(rec), &mut st) {
                    st.add_tail += 1;
                }
            }
            45..=59 => match list.update(rec) {
                Ok(Upsert::Updated(n)) => st.updated += n as u64,
                Ok(Upsert::Inserted) => st.upsert_inserts += 1,
                Err(e) if e.downcast_ref::<AllocationError>().is_some() => st.alloc_failures += 1,
                Err(e) => warn!("stress: update failed: {:#}", e),
            },
            60..=79 => {
                st.deletes += 1;
                st.deleted_nodes += list.delete(&rec) as u64;
            }
            _ => {
                st.finds += 1;
                if list.contains(rec.name_bytes()) {
                    st.find_hits += 1;
                }
            }
        }
        progress.bump(i + 1);
    }
    st
}

pub fn exec(args: StressArgs) -> Result<()> {
    if args.threads == 0 || args.keys == 0 {
        bail!("--threads and --keys must be > 0");
    }

    let mode = if args.exact {
        MatchMode::Exact
    } else {
        MatchMode::Prefix
    };
    let list = UserList::builder()
        .max_records(args.max_records)
        .atomic_upsert(args.atomic_upsert)
        .match_mode(mode)
        .build();
    info!("stress: {} thread(s) × {} op(s), {}", args.threads, args.ops, list.config());

    userlist::metrics_reset();
    let start = Instant::now();

    let per_worker = thread::scope(|s| {
        let handles: Vec<_> = (0..args.threads)
            .map(|t| {
                let list = &list;
                let args = &args;
                s.spawn(move || worker(list, args, t))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<std::result::Result<Vec<_>, _>>()
    })
    .map_err(|_| anyhow!("stress worker panicked"))?;

    let elapsed = start.elapsed().as_secs_f64();
    let mut totals = WorkerStats::default();
    for w in &per_worker {
        totals.merge(w);
    }

    // инвариант длины: счётчик == число узлов, достижимых обходом
    let len = list.len();
    let walked = list.records().len();
    let empty = list.is_empty();
    if len != walked {
        bail!("length invariant broken: len()={} but traversal saw {}", len, walked);
    }
    if empty != (len == 0) {
        bail!("is_empty()={} disagrees with len()={}", empty, len);
    }
    if let Some(max) = args.max_records {
        if len > max {
            bail!("store holds {} records, above max_records={}", len, max);
        }
    }

    let total_ops = (args.threads * args.ops) as f64;
    let tput = if elapsed > 0.0 { total_ops / elapsed } else { 0.0 };

    if args.json {
        let out = serde_json::json!({
            "threads": args.threads,
            "ops_per_thread": args.ops,
            "elapsed_secs": elapsed,
            "ops_per_sec": tput,
            "final_len": len,
            "totals": totals,
            "metrics": userlist::metrics_snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("stress OK: {} op(s) in {:.3}s ({:.0} ops/s)", total_ops, elapsed, tput);
        println!("  final len        = {}", len);
        println!("  inserts head/tail= {}/{}", totals.add_head, totals.add_tail);
        println!(
            "  upserts          = {} node(s) overwritten, {} appended",
            totals.updated, totals.upsert_inserts
        );
        println!(
            "  deletes          = {} call(s), {} node(s) removed",
            totals.deletes, totals.deleted_nodes
        );
        println!("  finds            = {} ({} hit)", totals.finds, totals.find_hits);
        println!("  alloc failures   = {}", totals.alloc_failures);
    }
    Ok(())
}
