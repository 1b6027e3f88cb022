// demos/short_circuit.rs

use serde_json::{json, Value};
use sluice::{pipe, stage, PipeError, PipeSetup, StageOutput};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), PipeError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Short-Circuit Demo ---");

  // 1. A custom predicate: the pipeline keeps flowing until a stage marks the
  //    order as rejected.
  let pipeline = pipe(
    PipeSetup::with_predicate(|order: &Value| order["status"] != "rejected"),
    vec![],
  );

  // 2. Three stages; the risk check rejects, so fulfillment must never run.
  let invoker = pipeline.through(vec![
    stage(|mut order: Value| {
      info!("Validating order.");
      order["validated"] = json!(true);
      StageOutput::ready(order)
    }),
    stage(|mut order: Value| {
      info!("Risk check failed - rejecting.");
      order["status"] = json!("rejected");
      StageOutput::ready(order)
    }),
    stage(|mut order: Value| {
      // This stage should not be reached
      error!("Fulfillment ran on a rejected order (SHOULD NOT HAPPEN).");
      order["shipped"] = json!(true);
      StageOutput::ready(order)
    }),
  ]);

  // 3. The settlement carries the rejecting stage's raw output.
  let result = invoker.invoke(json!({"id": "A-1002", "status": "new"})).await?;
  info!(%result, "Pipeline settled early.");

  assert_eq!(result["status"], json!("rejected"));
  assert!(result.get("shipped").is_none());
  Ok(())
}
