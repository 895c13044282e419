use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use overlap_core::error::OverlapError;
use overlap_core::geometry::Point;
use overlap_core::interaction::Direction;
use overlap_core::session::{LoadOutcome, Session};
use overlap_core::slot::SlotId;

use super::config::load_config;
use crate::summary::{print_layout_summary, print_result_set};

#[derive(Args)]
pub struct ReplayArgs {
    /// Script file, one step per line
    pub script: PathBuf,

    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save results here after every `process` step
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One UI event in text form.
#[derive(Clone, Debug, PartialEq)]
enum Step {
    Load(SlotId, PathBuf),
    Request(SlotId, PathBuf),
    Complete,
    Select(SlotId),
    Move(SlotId, Point),
    Nudge(Direction, u32),
    Press(Point),
    DragTo(Point),
    Release,
    Remove(SlotId),
    Reset,
    Process,
    Show,
}

fn slot_arg(arg: Option<&str>) -> Result<SlotId> {
    let arg = arg.ok_or_else(|| anyhow!("missing slot id"))?;
    Ok(arg.parse::<SlotId>()?)
}

fn point_args<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Point> {
    let x = args.next().ok_or_else(|| anyhow!("missing x"))?.parse::<f32>()?;
    let y = args.next().ok_or_else(|| anyhow!("missing y"))?.parse::<f32>()?;
    Ok(Point::new(x, y))
}

fn path_arg(arg: Option<&str>) -> Result<PathBuf> {
    arg.map(PathBuf::from).ok_or_else(|| anyhow!("missing image path"))
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| anyhow!("empty step"))?;
        let step = match verb.to_ascii_lowercase().as_str() {
            "load" => Step::Load(slot_arg(words.next())?, path_arg(words.next())?),
            "request" => Step::Request(slot_arg(words.next())?, path_arg(words.next())?),
            "complete" => Step::Complete,
            "select" => Step::Select(slot_arg(words.next())?),
            "move" => {
                let slot = slot_arg(words.next())?;
                Step::Move(slot, point_args(&mut words)?)
            }
            "nudge" => {
                let dir = words
                    .next()
                    .ok_or_else(|| anyhow!("missing direction"))?
                    .parse::<Direction>()?;
                let times = words.next().map(str::parse::<u32>).transpose()?.unwrap_or(1);
                Step::Nudge(dir, times)
            }
            "press" => Step::Press(point_args(&mut words)?),
            "drag-to" => Step::DragTo(point_args(&mut words)?),
            "release" => Step::Release,
            "remove" => Step::Remove(slot_arg(words.next())?),
            "reset" => Step::Reset,
            "process" => Step::Process,
            "show" => Step::Show,
            other => bail!("unknown step '{other}'"),
        };
        if let Some(extra) = words.next() {
            bail!("unexpected argument '{extra}'");
        }
        Ok(step)
    }
}

fn parse_script(text: &str) -> Result<Vec<Step>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| line.parse::<Step>().with_context(|| format!("line {n}: '{line}'")))
        .collect()
}

fn report_outcomes(outcomes: &[LoadOutcome]) {
    for outcome in outcomes {
        match outcome {
            LoadOutcome::Placed(id) => println!("Loaded slot {id}"),
            LoadOutcome::Failed { slot, reason } => {
                println!("Slot {slot} left empty: {reason}")
            }
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let steps = parse_script(&text)?;
    let base = args.script.parent().unwrap_or(Path::new("."));

    let mut session = Session::new(load_config(args.config.as_deref())?)?;

    for step in steps {
        apply_step(&mut session, step, base, args.output.as_deref())?;
    }
    Ok(())
}

fn apply_step(session: &mut Session, step: Step, base: &Path, output: Option<&Path>) -> Result<()> {
    match step {
        Step::Load(id, path) => {
            let bytes = std::fs::read(resolve(base, &path))
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            match session.load_image(id, bytes) {
                Some(outcome) => report_outcomes(&[outcome]),
                None => println!("Slot {id} is not available"),
            }
        }
        Step::Request(id, path) => {
            let bytes = std::fs::read(resolve(base, &path))
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            if !session.request_load(id, bytes) {
                println!("Slot {id} is not available");
            }
        }
        Step::Complete => report_outcomes(&session.complete_loads()),
        Step::Select(id) => {
            session.select_slot(id);
        }
        Step::Move(id, p) => {
            session.move_slot(id, p);
        }
        Step::Nudge(dir, times) => {
            for _ in 0..times {
                session.nudge(dir);
            }
        }
        Step::Press(p) => {
            session.pointer_down_at(p);
        }
        Step::DragTo(p) => {
            session.pointer_move(p);
        }
        Step::Release => session.pointer_up(),
        Step::Remove(id) => {
            session.remove_slot(id);
        }
        Step::Reset => session.reset_all(),
        Step::Show => print_layout_summary(session),
        Step::Process => match session.process() {
            Ok(results) => {
                print_result_set("Crops", &results.plain);
                print_result_set("Inverted", &results.inverted);
                if let Some(dir) = output {
                    let written = results.save_all(dir)?;
                    println!("Saved {} image(s) to {}", written.len(), dir.display());
                }
            }
            Err(OverlapError::InsufficientOverlap { .. }) => {
                println!("Images do not overlap sufficiently.");
            }
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_steps() {
        let steps = parse_script(
            "# two images\nload A a.png\nload b b.png\n\nmove B 300 300\nnudge left 3\npress 10 10\ndrag-to 20 5\nrelease\nprocess\n",
        )
        .unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Load(SlotId::A, PathBuf::from("a.png")),
                Step::Load(SlotId::B, PathBuf::from("b.png")),
                Step::Move(SlotId::B, Point::new(300.0, 300.0)),
                Step::Nudge(Direction::Left, 3),
                Step::Press(Point::new(10.0, 10.0)),
                Step::DragTo(Point::new(20.0, 5.0)),
                Step::Release,
                Step::Process,
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("load A a.png\nspin 90\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "got: {err:#}");
        assert!(parse_script("move A 1\n").is_err());
        assert!(parse_script("reset now\n").is_err());
    }
}
