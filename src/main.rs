// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use evtsel::config::{load_and_validate_config, FailurePolicy};
use evtsel::cuts::{ApplyContext, CutEngine, CutRegistry};
use evtsel::event::{EventParams, MapRecord, ProductValue};
use evtsel::producers::{OutputSchema, ProducerPipeline, ProducerRegistry};
use evtsel::tags::{TagRegistry, Tagger};
use std::env;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <config.yaml> [num_events]", args[0]);
        eprintln!("Example: {} configs/demo.yaml 1000", args[0]);
        std::process::exit(1);
    }

    let config_file = &args[1];
    let num_events: u64 = match args.get(2) {
        Some(n) => n
            .parse()
            .map_err(|_| anyhow::anyhow!("num_events must be an integer, got '{n}'"))?,
        None => 100,
    };

    let start_time = Instant::now();

    let config = load_and_validate_config(config_file)?;

    let producer_registry = ProducerRegistry::with_builtins();
    let cut_registry = CutRegistry::with_builtins();
    let tag_registry = TagRegistry::with_builtins();

    let mut pipeline = ProducerPipeline::from_config(&config.producers, &producer_registry)?;
    let mut engine = CutEngine::from_config(&config.cuts, config.cut_logic.as_deref(), &cut_registry)?;
    let tagger = Tagger::from_config(&config.tags, &tag_registry)?;

    let mut schema = OutputSchema::new();
    pipeline.register_schemas(&mut schema);

    println!("Configuration: {config_file}");
    println!("Producers ({}): {:?}", pipeline.len(), pipeline.execution_order());
    println!("Cuts ({}): {:?}", engine.cut_names().len(), engine.cut_names());
    if !tagger.is_empty() {
        println!("Tags ({}): {:?}", tagger.tag_names().len(), tagger.tag_names());
    }
    println!("Output columns: {}", schema.columns().len());
    println!("Failure policy: {:?}", config.failure_policy);
    println!();

    let mut events_failed = 0u64;
    for event_index in 0..num_events {
        let record = synthetic_event(event_index);
        let params = EventParams::simulated().with_event_index(event_index);

        let ctx = match pipeline.process_event(&record, &params) {
            Ok(ctx) => ctx,
            Err(e) => match config.failure_policy {
                FailurePolicy::Abort => return Err(e.into()),
                FailurePolicy::SkipAndLog => {
                    tracing::warn!(
                        unit = e.unit().unwrap_or("?"),
                        event_index = ?e.event_index(),
                        error = %e,
                        "skipping event after producer failure"
                    );
                    events_failed += 1;
                    continue;
                }
            },
        };

        let outputs = ctx.into_outputs();
        let apply = ApplyContext {
            is_simulated: params.is_simulated,
            dataset_name: params.dataset_name.as_deref(),
            event_index: params.event_index,
            return_on_fail: config.return_on_fail,
            producer_outputs: Some(&outputs),
        };

        match engine.apply(&record, &apply) {
            Ok(selection) => {
                let labels = match tagger.apply(&record, &params) {
                    Ok(labels) => labels,
                    Err(e) => match config.failure_policy {
                        FailurePolicy::Abort => return Err(e.into()),
                        FailurePolicy::SkipAndLog => {
                            tracing::warn!(
                                unit = e.unit().unwrap_or("?"),
                                event_index = ?e.event_index(),
                                error = %e,
                                "dropping labels after tag failure"
                            );
                            Vec::new()
                        }
                    },
                };
                tracing::debug!(
                    event_index,
                    passed = selection.passed,
                    cuts_evaluated = selection.results.len(),
                    tags = ?labels,
                    "event selected"
                );
            }
            Err(e) => match config.failure_policy {
                FailurePolicy::Abort => return Err(e.into()),
                FailurePolicy::SkipAndLog => {
                    tracing::warn!(
                        unit = e.unit().unwrap_or("?"),
                        event_index = ?e.event_index(),
                        error = %e,
                        "skipping event after cut failure"
                    );
                    events_failed += 1;
                }
            },
        }
    }

    pipeline.finalize();

    let stats = engine.stats();
    stats.log_summary(&engine.cut_names());

    println!("Events processed: {}", stats.events_processed);
    println!("Events passed:    {}", stats.events_passed);
    if let Some(efficiency) = stats.efficiency() {
        println!("Efficiency:       {efficiency:.4}");
    }
    if events_failed > 0 {
        println!("Events skipped:   {events_failed}");
    }
    println!("\nStatistics (JSON):");
    println!("{}", serde_json::to_string_pretty(stats)?);
    println!("\nTotal time: {:?}", start_time.elapsed());

    Ok(())
}

/// Deterministic synthetic ntuple row, varied enough to exercise both sides
/// of every builtin cut.
fn synthetic_event(event_index: u64) -> MapRecord {
    let spread = (event_index % 10) as f64;

    MapRecord::new()
        .with_field("run", ProductValue::Int(1))
        .with_field("subrun", ProductValue::Int(4))
        .with_field("event", ProductValue::Int(event_index as i64))
        .with_field("xsecWeight", ProductValue::Float(1.0 + spread * 0.01))
        .with_field(
            "trueNuPDG",
            ProductValue::Int(if event_index % 5 == 0 { 12 } else { 14 }),
        )
        .with_field("trueNuCCNC", ProductValue::Int((event_index % 3 == 0) as i64))
        .with_field(
            "foundVertex",
            ProductValue::Bool(event_index % 7 != 0),
        )
        .with_field("vtxX", ProductValue::Float(5.0 + spread * 25.0))
        .with_field("vtxY", ProductValue::Float(-100.0 + spread * 22.0))
        .with_field("vtxZ", ProductValue::Float(50.0 + spread * 95.0))
        .with_field(
            "trackEnergies",
            ProductValue::List(vec![
                ProductValue::Float(120.0 + spread * 40.0),
                ProductValue::Float(15.0),
            ]),
        )
        .with_field(
            "showerEnergies",
            ProductValue::List(vec![ProductValue::Float(60.0 + spread * 10.0)]),
        )
}
