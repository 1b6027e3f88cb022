// demos/basic_pipeline.rs

use serde_json::{json, Value};
use sluice::{pipe, stage, PipeError, PipeSetup, StageOutput};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), PipeError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Basic Pipeline Demo ---");

  // 1. Build the pipeline generator: default predicate (objects and arrays
  //    keep flowing), default middleware.
  let pipeline = pipe(PipeSetup::<Value>::default_config(), vec![]);

  // 2. Combine the ordered stage functions into an invoker.
  let invoker = pipeline.through(vec![
    stage(|mut order: Value| {
      order["subtotal"] = json!(42);
      StageOutput::ready(order)
    }),
    stage(|mut order: Value| {
      let subtotal = order["subtotal"].as_u64().unwrap_or(0);
      order["total"] = json!(subtotal + 8);
      StageOutput::ready(order)
    }),
  ]);

  // 3. Invoke with the initial value and await the settlement.
  let result = invoker.invoke(json!({"id": "A-1001"})).await?;
  info!(%result, "Pipeline settled.");

  assert_eq!(result["total"], json!(50));
  Ok(())
}
