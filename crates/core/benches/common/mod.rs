use std::env;
use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, Criterion, Throughput};

use komawari_core::utils::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

impl BenchTier {
    pub fn from_env() -> Self {
        match env::var("KOMAWARI_BENCH_TIER").as_deref() {
            Ok("full") => Self::Full,
            _ => Self::Quick,
        }
    }
}

/// Bench tier and RNG seed, read from `KOMAWARI_BENCH_TIER` and
/// `KOMAWARI_BENCH_SEED`.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub tier: BenchTier,
    pub seed: u64,
}

pub fn bench_config() -> BenchConfig {
    let seed = env::var("KOMAWARI_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);
    BenchConfig {
        tier: BenchTier::from_env(),
        seed,
    }
}

/// Sample count and measurement time for the tier.
pub fn configure_group<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, cfg: &BenchConfig) {
    let (samples, seconds) = match cfg.tier {
        BenchTier::Quick => (10, 3),
        BenchTier::Full => (30, 10),
    };
    group.sample_size(samples);
    group.measurement_time(Duration::from_secs(seconds));
}

pub fn bench_criterion() -> Criterion {
    Criterion::default().configure_from_args()
}

pub fn pages_throughput(pages: usize) -> Throughput {
    Throughput::Elements(pages as u64)
}

#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn gen_i32(&mut self, min: i32, max: i32) -> i32 {
        let span = (max - min).max(1) as u64;
        min + (self.next_u64() % span) as i32
    }
}

fn rect_polygon(x: i32, y: i32, r: i32, b: i32) -> Vec<Point> {
    vec![(x, y), (r, y), (r, b), (x, b)]
}

/// A page of `cols` x `rows` jittered panels, with a speech bubble in every
/// other panel and the outline segments of each frame.
pub fn grid_page(
    rng: &mut XorShift64,
    cols: i32,
    rows: i32,
) -> (u32, u32, Vec<Vec<Point>>, Vec<[Point; 2]>) {
    let (width, height) = (1600, 2400);
    let cell_w = width / cols;
    let cell_h = height / rows;
    let mut polygons = Vec::new();
    let mut segments = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let x = col * cell_w + 10 + rng.gen_i32(0, 6);
            let y = row * cell_h + 10 + rng.gen_i32(0, 6);
            let r = (col + 1) * cell_w - 10 - rng.gen_i32(0, 6);
            let b = (row + 1) * cell_h - 10 - rng.gen_i32(0, 6);
            polygons.push(rect_polygon(x, y, r, b));
            segments.push([(x, y), (r, y)]);
            segments.push([(r, y), (r, b)]);
            segments.push([(r, b), (x, b)]);
            segments.push([(x, b), (x, y)]);

            if (row + col) % 2 == 0 {
                let bx = x + (r - x) / 4;
                let by = y + (b - y) / 4;
                polygons.push(rect_polygon(bx, by, bx + (r - x) / 3, by + (b - y) / 5));
            }
        }
    }

    (width as u32, height as u32, polygons, segments)
}
