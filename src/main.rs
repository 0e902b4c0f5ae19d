use xdag::{CallKwargs, DagLayer, DslFormat, ModuleFactoryRegistry};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== xdag ===\n");

    let yaml = r#"
config:
  verbose: true
modules:
  encoder: {type: scale, factor: 2.0}
dag:
  - [encoder, [inputs/audio], [z]]
  - [{type: split, name: halves}, [encoder/z], [low, high]]
  - [{type: add, name: mix}, [halves/low, halves/high], [sum]]
  - [{type: gain, name: amp, gain: 0.5}, [mix/sum]]
  - [{type: stats}, [amp/signal]]
  - [{type: mse, name: recon}, [inputs/target, amp/signal]]
"#;

    let factories = ModuleFactoryRegistry::with_builtins();
    let layer =
        DagLayer::from_dsl(yaml, DslFormat::Yaml, &factories).expect("Failed to build DAG");
    println!(
        "[OK] DAG built ({} nodes, modules: {})",
        layer.dag().len(),
        layer.module_names().join(", ")
    );

    let inputs = serde_json::json!({
        "audio": [0.5, 1.0, 1.5, 2.0],
        "target": [2.0, 3.0],
    });
    let inputs = inputs.as_object().cloned().unwrap_or_default();

    match layer.call(inputs, CallKwargs::new().with("training", false)) {
        Ok(outputs) => {
            println!("[OK] DAG finished\n");
            match serde_json::to_string_pretty(&outputs) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("[ERR] Failed to render outputs: {}", e),
            }
        }
        Err(e) => {
            eprintln!("[ERR] {}", e);
            std::process::exit(1);
        }
    }
}
