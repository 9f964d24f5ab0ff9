use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use roomsched::engine::Engine;

const MINUTE: i64 = 60_000;
/// 2024-01-01 00:00
const DAY: i64 = 1_704_067_200_000;

const ROOMS: usize = 20;
const THREADS: usize = 8;
const REQUESTS_PER_THREAD: usize = 2_000;

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        println!("  {label}: no samples");
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.3}ms, p50={:.3}ms, p95={:.3}ms, p99={:.3}ms, max={:.3}ms",
        latencies.len(),
        avg.as_secs_f64() * 1000.0,
        percentile(latencies, 50.0).as_secs_f64() * 1000.0,
        percentile(latencies, 95.0).as_secs_f64() * 1000.0,
        percentile(latencies, 99.0).as_secs_f64() * 1000.0,
        latencies[latencies.len() - 1].as_secs_f64() * 1000.0,
    );
}

fn main() {
    let engine = Arc::new(Engine::default());
    for r in 0..ROOMS {
        engine
            .add_room(&format!("room{r}"), "Bench Room", 10)
            .expect("add room");
    }

    println!("roomsched stress: {THREADS} threads x {REQUESTS_PER_THREAD} requests over {ROOMS} rooms");
    let started = Instant::now();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let engine = engine.clone();
            thread::spawn(move || {
                let mut booked = Vec::with_capacity(REQUESTS_PER_THREAD);
                let mut rejected = Vec::new();
                let mut checks = Vec::with_capacity(REQUESTS_PER_THREAD);
                for i in 0..REQUESTS_PER_THREAD {
                    let room = format!("room{}", (t + i) % ROOMS);
                    // Half-hour slots; neighbouring threads collide on purpose.
                    let slot = ((i * 7 + t * 3) % 4_000) as i64;
                    let start = DAY + slot * 30 * MINUTE;
                    let end = start + 25 * MINUTE;

                    let q = Instant::now();
                    let _ = engine.check_availability(&room, start, end);
                    checks.push(q.elapsed());

                    let b = Instant::now();
                    let result = engine.make_reservation(&format!("t{t}-{i}"), &room, start, end);
                    let elapsed = b.elapsed();
                    match result {
                        Ok(_) => booked.push(elapsed),
                        Err(_) => rejected.push(elapsed),
                    }
                }
                (booked, rejected, checks)
            })
        })
        .collect();

    let mut booked = Vec::new();
    let mut rejected = Vec::new();
    let mut checks = Vec::new();
    for h in handles {
        let (b, r, c) = h.join().expect("bench thread panicked");
        booked.extend(b);
        rejected.extend(r);
        checks.extend(c);
    }

    let wall = started.elapsed();
    println!(
        "  wall={:.2}s, accepted={}, rejected={}, stored={}",
        wall.as_secs_f64(),
        booked.len(),
        rejected.len(),
        engine.reservation_count()
    );
    print_latency("make_reservation (accepted)", &mut booked);
    print_latency("make_reservation (rejected)", &mut rejected);
    print_latency("check_availability", &mut checks);
}
