use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dsa_visualiser_core::{
    array, graph, input, list, queue, render_sequence, stack, tree, AppConfig, BinarySearchTree,
    Graph, Highlight, LinkedList, Result, SequenceStyle, SpeedPreset, Step, TextRender,
    Visualizer,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let player = Player {
        speed_ms: cli.speed.unwrap_or(config.animation.speed_ms),
        json: cli.json,
    };

    match run(cli.command, &config, &player) {
        Err(err) if err.is_invalid_input() => {
            tracing::warn!(%err, "operation ignored");
            Ok(())
        }
        outcome => outcome,
    }
}

fn run(command: Commands, config: &AppConfig, player: &Player) -> Result<()> {
    let samples = &config.samples;
    match command {
        Commands::Array { values, op } => {
            let values = match values {
                Some(raw) => input::parse_values(&raw)?,
                None => samples.array.clone(),
            };
            let bars =
                |data: &Vec<i64>, h: &[Highlight]| render_sequence(data, SequenceStyle::Bars, h);
            match op {
                ArrayOp::Sort => player.present(values, |a| Ok(array::bubble_sort_steps(a)), bars),
                ArrayOp::Search { value } => {
                    let target = input::parse_value(&value)?;
                    player.present(values, |a| Ok(array::linear_search_steps(a, target)), bars)
                }
                ArrayOp::Insert { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(values, |a| Ok(array::insert_steps(a, value)), bars)
                }
                ArrayOp::Delete { index } => player.present(
                    values,
                    |a| array::delete_steps(a, input::parse_index(&index, a.len())?),
                    bars,
                ),
            }
        }
        Commands::Stack { op } => {
            let view =
                |data: &Vec<i64>, h: &[Highlight]| render_sequence(data, SequenceStyle::Stack, h);
            let values = samples.stack.clone();
            match op {
                StackOp::Push { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(values, |s| Ok(stack::push_steps(s, value)), view)
                }
                StackOp::Pop => player.present(values, |s| Ok(stack::pop_steps(s)), view),
            }
        }
        Commands::Queue { op } => {
            let view =
                |data: &Vec<i64>, h: &[Highlight]| render_sequence(data, SequenceStyle::Queue, h);
            let values = samples.queue.clone();
            match op {
                QueueOp::Enqueue { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(values, |q| Ok(queue::enqueue_steps(q, value)), view)
                }
                QueueOp::Dequeue => player.present(values, |q| Ok(queue::dequeue_steps(q)), view),
            }
        }
        Commands::List { op } => {
            let linked = LinkedList::from_values(&samples.list);
            match op {
                ListOp::InsertHead { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(
                        linked,
                        |l| Ok(list::insert_head_steps(l, value)),
                        LinkedList::render,
                    )
                }
                ListOp::InsertTail { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(
                        linked,
                        |l| Ok(list::insert_tail_steps(l, value)),
                        LinkedList::render,
                    )
                }
            }
        }
        Commands::Tree { values, op } => {
            let values = match values {
                Some(raw) => input::parse_values(&raw)?,
                None => samples.tree.clone(),
            };
            let bst = BinarySearchTree::from_values(&values);
            match op {
                TreeOp::Insert { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(
                        bst,
                        |t| Ok(tree::insert_steps(t, value)),
                        BinarySearchTree::render,
                    )
                }
                TreeOp::Delete { value } => {
                    let value = input::parse_value(&value)?;
                    player.present(
                        bst,
                        |t| Ok(tree::delete_steps(t, value)),
                        BinarySearchTree::render,
                    )
                }
            }
        }
        Commands::Graph { start, op } => {
            let g = Graph::from_config(&samples.graph)?;
            let start = input::parse_node_label(&start, &g)?;
            match op {
                GraphOp::Bfs => player.present(g, |g| graph::bfs_steps(g, &start), Graph::render),
                GraphOp::Dfs => player.present(g, |g| graph::dfs_steps(g, &start), Graph::render),
                GraphOp::Dijkstra => {
                    player.present(g, |g| graph::dijkstra_steps(g, &start), Graph::render)
                }
            }
        }
        Commands::Speeds => {
            for preset in SpeedPreset::ALL {
                println!("{:<10} {}", preset.millis(), preset.label());
            }
            Ok(())
        }
    }
}

/// Drives one step sequence in real time, or dumps it as JSON.
struct Player {
    speed_ms: u64,
    json: bool,
}

impl Player {
    fn present<T, P, R>(&self, baseline: T, producer: P, render: R) -> Result<()>
    where
        T: Clone + Serialize + 'static,
        P: FnOnce(&T) -> Result<Vec<Step<T>>>,
        R: Fn(&T, &[Highlight]) -> String,
    {
        let mut visualizer = Visualizer::new(baseline, self.speed_ms);
        let total = visualizer.animate(producer)?;
        if self.json {
            let steps = visualizer.engine().steps();
            println!("{}", serde_json::to_string_pretty(steps)?);
            return Ok(());
        }

        tracing::info!(total, speed_ms = self.speed_ms, "playing step sequence");
        visualizer.play();

        let mut drawn = None;
        loop {
            let revision = visualizer.revision();
            if drawn != Some(revision) {
                draw(&visualizer, &render);
                drawn = Some(revision);
            }

            let Some(wait) = visualizer.engine().time_until_next_advance() else {
                break;
            };
            std::thread::sleep(wait);
            visualizer.tick(wait);
        }
        Ok(())
    }
}

fn draw<T, R>(visualizer: &Visualizer<T>, render: &R)
where
    T: Clone + 'static,
    R: Fn(&T, &[Highlight]) -> String,
{
    let status = visualizer.status();
    let scene = visualizer.scene();
    println!(
        "Step {} of {} ({:.0}%)",
        status.current_step + 1,
        status.total_steps,
        status.progress
    );
    println!("{}", status.current_description);
    println!("{}", render(&scene.data, &scene.highlights));
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_speed(raw: &str) -> std::result::Result<u64, String> {
    let preset = match raw.to_ascii_lowercase().as_str() {
        "slow" => Some(SpeedPreset::Slow),
        "normal" => Some(SpeedPreset::Normal),
        "fast" => Some(SpeedPreset::Fast),
        "very-fast" => Some(SpeedPreset::VeryFast),
        _ => None,
    };
    if let Some(preset) = preset {
        return Ok(preset.millis());
    }

    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(format!(
            "`{raw}` is not a preset (slow, normal, fast, very-fast) or a positive delay in ms"
        )),
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Step-by-step data structure visualiser", long_about = None)]
struct Cli {
    /// JSON configuration file overriding speed and sample structures.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Delay between steps: slow, normal, fast, very-fast or milliseconds.
    #[arg(short, long, global = true, value_parser = parse_speed)]
    speed: Option<u64>,
    /// Print the step sequence as JSON instead of playing it.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bubble sort, linear search, insert and delete on an array.
    Array {
        /// Comma separated starting values.
        #[arg(long)]
        values: Option<String>,
        #[command(subcommand)]
        op: ArrayOp,
    },
    /// Push and pop on a stack.
    Stack {
        #[command(subcommand)]
        op: StackOp,
    },
    /// Enqueue and dequeue on a queue.
    Queue {
        #[command(subcommand)]
        op: QueueOp,
    },
    /// Head and tail insertion on a singly linked list.
    List {
        #[command(subcommand)]
        op: ListOp,
    },
    /// Insert into and delete from a binary search tree.
    Tree {
        /// Comma separated values inserted in order to build the tree.
        #[arg(long)]
        values: Option<String>,
        #[command(subcommand)]
        op: TreeOp,
    },
    /// BFS, DFS and Dijkstra on the sample graph.
    Graph {
        /// Label of the node the traversal starts from.
        #[arg(long, default_value = "A")]
        start: String,
        #[command(subcommand)]
        op: GraphOp,
    },
    /// List the speed presets.
    Speeds,
}

#[derive(Subcommand, Debug)]
enum ArrayOp {
    Sort,
    Search { value: String },
    Insert { value: String },
    Delete { index: String },
}

#[derive(Subcommand, Debug)]
enum StackOp {
    Push { value: String },
    Pop,
}

#[derive(Subcommand, Debug)]
enum QueueOp {
    Enqueue { value: String },
    Dequeue,
}

#[derive(Subcommand, Debug)]
enum ListOp {
    InsertHead { value: String },
    InsertTail { value: String },
}

#[derive(Subcommand, Debug)]
enum TreeOp {
    Insert { value: String },
    Delete { value: String },
}

#[derive(Subcommand, Debug)]
enum GraphOp {
    Bfs,
    Dfs,
    Dijkstra,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_speed_presets_and_millis() {
        assert_eq!(parse_speed("fast").unwrap(), 500);
        assert_eq!(parse_speed("Very-Fast").unwrap(), 200);
        assert_eq!(parse_speed("75").unwrap(), 75);
        assert!(parse_speed("0").is_err());
        assert!(parse_speed("warp").is_err());
    }

    #[test]
    fn cli_accepts_nested_commands() {
        let cli = Cli::try_parse_from([
            "dsa-visualiser",
            "--json",
            "graph",
            "--start",
            "B",
            "dijkstra",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Graph { ref start, op: GraphOp::Dijkstra } if start == "B"
        ));
    }

    #[test]
    fn json_export_runs_producers() {
        let player = Player { speed_ms: 1, json: true };
        for args in [
            &["dsa-visualiser", "array", "search", "12"][..],
            &["dsa-visualiser", "tree", "delete", "10"],
            &["dsa-visualiser", "graph", "dfs"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            run(cli.command, &AppConfig::default(), &player).unwrap();
        }
    }

    #[test]
    fn non_numeric_input_is_ignored() {
        let cli = Cli::try_parse_from(["dsa-visualiser", "array", "search", "abc"]).unwrap();
        let player = Player { speed_ms: 1, json: true };
        let err = run(cli.command, &AppConfig::default(), &player).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
