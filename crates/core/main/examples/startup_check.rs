//! Startup check example: verifies an in-memory store against a packaged
//! schema and reports the outcome to an in-memory webhook transport.
//!
//! Run with: cargo run --example startup_check

use schemagate::prelude::*;
use schemagate_adapter_memory::MemoryCatalog;
use std::sync::Arc;

const PACKAGED_SCHEMA: &str = r#"{
    "namespace": "apm",
    "tables": [
        { "name": "traces", "columnFamilies": ["S", "A"] },
        { "name": "agents", "columnFamilies": ["I"] }
    ]
}"#;

#[tokio::main]
async fn main() -> Result<(), SchemaError> {
    let definition = SchemaDefinition::from_json(PACKAGED_SCHEMA)?;

    // The live store has every table, plus one the service does not use
    let catalog = MemoryCatalog::named("live");
    catalog
        .create_table(TableName::new("apm", "traces"), ["S", "A", "T"])
        .await?;
    catalog.create_table(TableName::new("apm", "agents"), ["I"]).await?;
    catalog.create_table(TableName::new("apm", "metrics"), ["M"]).await?;

    let transport = Arc::new(InMemoryTransport::new());
    let notifier = WebhookNotifier::with_config(
        WebhookConfig::new().webhook_id("startup-check"),
        transport.clone(),
    )?;

    let gate = SchemaGate::builder()
        .expected(StaticSchemaSource::from_definition("packaged", &definition))
        .actual(catalog.clone())
        .reporter(notifier)
        .build()?;

    let report = gate.run().await?;
    println!("{}", report.summary());

    // Dropping a column family makes the next check fail
    catalog
        .remove_family(&TableName::new("apm", "agents"), "I")
        .await?;
    match gate.run().await {
        Ok(report) => println!("unexpected success: {}", report.summary()),
        Err(e) => println!("startup aborted: {}", e),
    }

    for response in transport.delivered().await {
        println!("webhook payload: {}", serde_json::to_string(&response)?);
    }

    Ok(())
}
