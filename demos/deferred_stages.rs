// demos/deferred_stages.rs

use serde_json::{json, Value};
use sluice::{deferred_gate, pipe, stage, PipeError, PipeSetup, StageOutput};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), PipeError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Deferred Stages Demo ---");

  // 1. Stages may return deferred values, so install the deferred-aware
  //    middleware; it resolves each deferred output before the predicate runs.
  let pipeline = pipe(PipeSetup::<Value>::default_config(), vec![deferred_gate()]);

  let invoker = pipeline.through(vec![
    stage(|mut req: Value| {
      StageOutput::deferred(async move {
        // Pretend to look something up
        tokio::time::sleep(Duration::from_millis(50)).await;
        req["profile"] = json!({"name": "Ada", "plan": "pro"});
        req
      })
    }),
    stage(|mut req: Value| {
      req["greeting"] = json!(format!(
        "hello, {}",
        req["profile"]["name"].as_str().unwrap_or("stranger")
      ));
      StageOutput::ready(req)
    }),
  ]);

  // 2. The invoker returns the settlement synchronously, before the deferred
  //    lookup has resolved.
  let outcome = invoker.invoke(json!({"user": "ada"}));
  info!("Invoker returned; the pipeline is still running.");

  // 3. Await the settlement for the final value.
  let result = outcome.await?;
  info!(%result, "Pipeline settled.");

  assert_eq!(result["greeting"], json!("hello, Ada"));
  Ok(())
}
