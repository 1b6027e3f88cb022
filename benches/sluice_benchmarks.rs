use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use sluice::{deferred_gate, pipe, stage, Invoker, PipeSetup, Stage, StageOutput};
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Helper: Simple Synchronous Stage ---
fn increment_stage() -> Stage<Value> {
  stage(|mut v: Value| {
    let n = v["n"].as_u64().unwrap_or(0);
    v["n"] = json!(n + 1);
    StageOutput::ready(v)
  })
}

// --- Helper: Deferred Stage (ready future, no timer) ---
fn deferred_increment_stage() -> Stage<Value> {
  stage(|mut v: Value| {
    StageOutput::deferred(async move {
      let n = v["n"].as_u64().unwrap_or(0);
      v["n"] = json!(n + 1);
      v
    })
  })
}

fn sync_invoker(num_stages: usize) -> Invoker<Value> {
  let pipeline = pipe(PipeSetup::<Value>::default_config(), vec![]);
  pipeline.through((0..num_stages).map(|_| increment_stage()).collect())
}

fn deferred_invoker(num_stages: usize) -> Invoker<Value> {
  let pipeline = pipe(PipeSetup::<Value>::default_config(), vec![deferred_gate()]);
  pipeline.through((0..num_stages).map(|_| deferred_increment_stage()).collect())
}

// --- Benchmark Functions ---

fn bench_sync_chain(c: &mut Criterion) {
  let rt = Runtime::new().expect("tokio runtime");
  let mut group = c.benchmark_group("sync_chain");
  for num_stages in [1usize, 4, 16, 64] {
    group.throughput(Throughput::Elements(num_stages as u64));
    let invoker = sync_invoker(num_stages);
    group.bench_with_input(BenchmarkId::from_parameter(num_stages), &num_stages, |b, _| {
      b.iter(|| rt.block_on(async { invoker.invoke(json!({"n": 0})).await.expect("settles") }));
    });
  }
  group.finish();
}

fn bench_deferred_chain(c: &mut Criterion) {
  let rt = Runtime::new().expect("tokio runtime");
  let mut group = c.benchmark_group("deferred_chain");
  for num_stages in [1usize, 4, 16] {
    group.throughput(Throughput::Elements(num_stages as u64));
    let invoker = deferred_invoker(num_stages);
    group.bench_with_input(BenchmarkId::from_parameter(num_stages), &num_stages, |b, _| {
      b.iter(|| rt.block_on(async { invoker.invoke(json!({"n": 0})).await.expect("settles") }));
    });
  }
  group.finish();
}

fn bench_short_circuit(c: &mut Criterion) {
  let rt = Runtime::new().expect("tokio runtime");
  // The predicate rejects immediately: only the first of 64 stages ever runs.
  let pipeline = pipe(PipeSetup::with_predicate(|_v: &Value| false), vec![]);
  let invoker = pipeline.through((0..64).map(|_| increment_stage()).collect());
  c.bench_function("short_circuit_after_first_of_64_stages", |b| {
    b.iter(|| rt.block_on(async { invoker.invoke(json!({"n": 0})).await.expect("settles") }));
  });
}

criterion_group!(benches, bench_sync_chain, bench_deferred_chain, bench_short_circuit);
criterion_main!(benches);
