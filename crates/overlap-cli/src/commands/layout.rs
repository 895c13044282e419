use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use overlap_core::geometry::Point;
use overlap_core::interaction::Direction;
use overlap_core::session::{LoadOutcome, Session};
use overlap_core::slot::SlotId;
use tracing::debug;

use super::config::load_config;

/// Absolute position for one slot: `A=120,40`.
#[derive(Clone, Debug)]
pub struct Placement {
    pub slot: SlotId,
    pub position: Point,
}

/// Repeated nudges for one slot: `B=left` or `B=left:3`.
#[derive(Clone, Debug)]
pub struct NudgeRequest {
    pub slot: SlotId,
    pub direction: Direction,
    pub times: u32,
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Image files, loaded into slots A, B, C, D in order
    #[arg(required = true, num_args = 1..=4)]
    pub images: Vec<PathBuf>,

    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas size in display pixels, e.g. 500x500 (overrides config)
    #[arg(long, value_parser = parse_container)]
    pub container: Option<(f32, f32)>,

    /// Place a slot at a display position: ID=X,Y (repeatable)
    #[arg(long = "place", value_parser = parse_placement)]
    pub placements: Vec<Placement>,

    /// Nudge a slot after placement: ID=DIR[:COUNT] (repeatable)
    #[arg(long = "nudge", value_parser = parse_nudge)]
    pub nudges: Vec<NudgeRequest>,
}

/// Build a session, load the images and apply placements and nudges.
pub fn build_session(args: &LayoutArgs) -> Result<Session> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some((w, h)) = args.container {
        config.container_width = w;
        config.container_height = h;
    }
    if args.images.len() > config.slot_count {
        bail!(
            "{} images given but the session has {} slots",
            args.images.len(),
            config.slot_count
        );
    }

    let mut session = Session::new(config)?;

    for (index, path) in args.images.iter().enumerate() {
        let Some(slot) = SlotId::from_index(index) else {
            bail!("Too many images");
        };
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        session.request_load(slot, bytes);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(format!("Decoding {} image(s)...", args.images.len()));
    let outcomes = session.complete_loads();
    pb.finish_and_clear();

    for outcome in outcomes {
        if let LoadOutcome::Failed { slot, reason } = outcome {
            let path = &args.images[slot.index()];
            bail!("Could not load {} into slot {slot}: {reason}", path.display());
        }
    }

    for p in &args.placements {
        debug!(slot = %p.slot, x = p.position.x, y = p.position.y, "Placing slot");
        if !session.move_slot(p.slot, p.position) {
            bail!("Cannot place slot {}: no image loaded", p.slot);
        }
    }

    for n in &args.nudges {
        if !session.select_slot(n.slot) {
            bail!("Cannot nudge slot {}: no image loaded", n.slot);
        }
        for _ in 0..n.times {
            session.nudge(n.direction);
        }
    }

    Ok(session)
}

fn parse_container(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<f32>().map_err(|e| format!("bad width: {e}"))?;
    let h = h.trim().parse::<f32>().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

fn parse_placement(s: &str) -> Result<Placement, String> {
    let (id, coords) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=X,Y, got '{s}'"))?;
    let slot = id.parse::<SlotId>().map_err(|e| format!("{e}"))?;
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y after '=', got '{coords}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y: {e}"))?;
    Ok(Placement {
        slot,
        position: Point::new(x, y),
    })
}

fn parse_nudge(s: &str) -> Result<NudgeRequest, String> {
    let (id, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=DIR[:COUNT], got '{s}'"))?;
    let slot = id.parse::<SlotId>().map_err(|e| format!("{e}"))?;
    let (dir, times) = match rest.split_once(':') {
        Some((dir, n)) => (dir, n.trim().parse::<u32>().map_err(|e| format!("bad count: {e}"))?),
        None => (rest, 1),
    };
    let direction = dir.parse::<Direction>().map_err(|e| format!("{e}"))?;
    Ok(NudgeRequest {
        slot,
        direction,
        times,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container() {
        assert_eq!(parse_container("640x480").unwrap(), (640.0, 480.0));
        assert!(parse_container("640").is_err());
    }

    #[test]
    fn test_parse_placement() {
        let p = parse_placement("b=300,-12.5").unwrap();
        assert_eq!(p.slot, SlotId::B);
        assert_eq!(p.position, Point::new(300.0, -12.5));
        assert!(parse_placement("B=300").is_err());
        assert!(parse_placement("Z=1,2").is_err());
    }

    #[test]
    fn test_parse_nudge() {
        let n = parse_nudge("A=left:3").unwrap();
        assert_eq!((n.slot, n.direction, n.times), (SlotId::A, Direction::Left, 3));
        let n = parse_nudge("C=down").unwrap();
        assert_eq!(n.times, 1);
    }
}
