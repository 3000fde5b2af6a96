use clap::Parser;
use nagare::flowchart::load_json;
use nagare::prelude::*;
use nagare::tool::samples::sample_registry;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::result::Result;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Walks a flowchart, dispatching each node to the built-in sample tools
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flowchart JSON file, or a `.nagare` artifact
    flowchart_path: PathBuf,

    /// Name of the node to start from (defaults to the first node)
    #[arg(long)]
    start: Option<String>,

    /// Name of the node to stop at (not executed)
    #[arg(long)]
    end: Option<String>,

    /// Seed a variable, e.g. `--var age=20` or `--var name='"Ada"'`
    #[arg(long = "var", value_name = "KEY=JSON")]
    vars: Vec<String>,

    /// Optional engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Step through the flowchart, pausing after every visible node
    #[arg(short, long)]
    step: bool,

    /// Write the loaded flowchart as a `.nagare` artifact
    #[arg(long, value_name = "PATH")]
    save_artifact: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let load_start = Instant::now();
    let mut flowchart = load_flowchart(&cli.flowchart_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flowchart: {}", e)));
    for var in &cli.vars {
        let (name, value) = parse_var(var).unwrap_or_else(|e| exit_with_error(&e));
        flowchart.variables.insert(name, value);
    }
    let load_duration = load_start.elapsed();
    info!(path = %cli.flowchart_path.display(), ?load_duration, "flowchart loaded");

    if let Some(path) = &cli.save_artifact {
        FlowchartArtifact::new(&flowchart)
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save artifact: {}", e)));
        println!("Artifact written to '{}'", path.display());
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };

    let mut engine = Engine::builder(sample_registry())
        .with_config(config)
        .build();
    engine
        .load(flowchart)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid flowchart: {}", e)));

    let run_start = Instant::now();
    let outcome = if cli.step {
        run_stepping(&mut engine, cli.start.as_deref(), cli.end.as_deref(), |node| {
            prompt(&format!("next: {} ({})", node.name, node.node_type))
        })
    } else {
        engine.execute(cli.start.as_deref(), cli.end.as_deref())
    };
    let run_duration = run_start.elapsed();

    println!("\n--- Trace ---");
    println!("{}", TraceFormatter::format_trace(engine.trace()));
    println!("Path: {}", TraceFormatter::format_path(engine.trace()));

    match outcome {
        Ok(Some(response)) => {
            println!("\nRun {} in {:?}", engine.status(), run_duration);
            if let Some(message) = response.message {
                println!("  -> {}", message);
            }
        }
        Ok(None) => println!("\nNothing to run."),
        Err(e) => exit_with_error(&format!("Run failed: {}", e)),
    }
}

/// Calls `next()` until the run ends or the cursor reaches `end`, calling `pause` with the
/// upcoming node between steps.
fn run_stepping(
    engine: &mut Engine,
    start: Option<&str>,
    end: Option<&str>,
    mut pause: impl FnMut(&Node),
) -> Result<Option<NodeResponse>, ExecutionError> {
    if let Some(start) = start {
        if !engine.seed(start) {
            println!("Start node '{}' not found, using the first node.", start);
        }
    }

    let mut last = None;
    loop {
        let Some(response) = engine.next()? else {
            return Ok(last);
        };
        println!("{}", TraceFormatter::format_response(&response));
        match engine.current_node() {
            Some(node) if end == Some(node.name.as_str()) => {
                println!("Reached end node '{}'.", node.name);
                return Ok(Some(response));
            }
            Some(node) if !engine.status().is_terminal() => pause(node),
            _ => return Ok(Some(response)),
        }
        last = Some(response);
    }
}

fn load_flowchart(path: &Path) -> Result<Flowchart, Box<dyn std::error::Error>> {
    if path.extension().is_some_and(|ext| ext == "nagare") {
        return Ok(FlowchartArtifact::from_file(path)?.into_flowchart());
    }
    Ok(load_json(path)?)
}

fn parse_var(var: &str) -> Result<(String, Value), String> {
    let (name, raw) = var
        .split_once('=')
        .ok_or_else(|| format!("Variable '{}' must look like KEY=VALUE", var))?;
    // Bare words that are not valid JSON are taken as text
    let value = serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::Text(raw.to_string()));
    Ok((name.trim().to_string(), value))
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("nagare=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nagare=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn prompt(text: &str) {
    print!("> {} [Enter]", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_engine(age: i64) -> Engine {
        let flowchart = Flowchart::new(
            vec![
                Node::new("start", "start")
                    .with_function("greet")
                    .with_argument("name", "Ada"),
                Node::new("decision", "decision").with_function("check_age"),
                Node::new("adult", "process").with_function("adult_message"),
                Node::new("child", "process").with_function("child_message"),
            ],
            vec![
                Edge::new("start", "decision"),
                Edge::when("decision", "adult", true),
                Edge::when("decision", "child", false),
            ],
        )
        .with_variable("age", age);
        let mut engine = Engine::new(sample_registry());
        engine.load(flowchart).unwrap();
        engine
    }

    #[test]
    fn test_stepping_stops_at_end_node() {
        let mut engine = age_engine(20);
        let mut paused = Vec::new();

        let last = run_stepping(&mut engine, None, Some("adult"), |node| {
            paused.push(node.name.clone())
        })
        .unwrap()
        .unwrap();

        assert_eq!(engine.trace().node_names(), vec!["start", "decision"]);
        assert_eq!(last.condition, Some(true));
        assert!(paused.is_empty());
    }

    #[test]
    fn test_stepping_without_end_runs_to_completion() {
        let mut engine = age_engine(12);
        let mut paused = Vec::new();

        let last = run_stepping(&mut engine, None, None, |node| {
            paused.push(node.name.clone())
        })
        .unwrap()
        .unwrap();

        assert_eq!(engine.trace().node_names(), vec!["start", "decision", "child"]);
        assert_eq!(last.message.as_deref(), Some("You are a child. Trying again."));
        assert_eq!(paused, vec!["child"]);
    }

    #[test]
    fn test_numeric_targets_resolve_through_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.json");
        std::fs::write(
            &path,
            r#"{
                "nodes": [
                    { "id": 1, "name": "start", "type": "start", "function": "greet",
                      "augument": { "name": "Ada" } },
                    { "id": 2, "name": "end", "type": "end", "function": "adult_message" }
                ],
                "edges": [{ "source": "start", "target": 2 }]
            }"#,
        )
        .unwrap();

        let flowchart = load_flowchart(&path).unwrap();

        assert_eq!(flowchart.edges[0].target, "end");
    }
}
