//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use gridstar_core::{Coord, RaggedPolicy};
use gridstar_paths::{Closing, PathMarking, SearchConfig};
use gridstar_term::GlyphSet;

/// Find the shortest route across a grid board with A*.
#[derive(Parser, Debug)]
#[command(name = "gridstar", version, about)]
pub struct Args {
    /// Board file: one row per line, each cell written as `0,` or `1,`
    #[arg(required_unless_present = "random", conflicts_with = "random")]
    pub board: Option<PathBuf>,

    /// Generate a random board of the given size instead of reading one
    #[arg(long, value_name = "ROWSxCOLS", value_parser = parse_dims)]
    pub random: Option<(i32, i32)>,

    /// Start cell
    #[arg(long, value_name = "ROW,COL", default_value = "0,0")]
    pub start: Coord,

    /// Goal cell
    #[arg(long, value_name = "ROW,COL", default_value = "4,5")]
    pub goal: Coord,

    /// Cut ragged rows down to the shortest row instead of failing
    #[arg(long)]
    pub truncate_ragged: bool,

    /// Mark every expanded cell as the route instead of the parent chain
    #[arg(long)]
    pub trail: bool,

    /// Re-open cells reached again at lower cost (always shortest)
    #[arg(long)]
    pub exact: bool,

    /// Abort after this many expansions
    #[arg(long, value_name = "N")]
    pub max_expansions: Option<usize>,

    /// Draw with ASCII glyphs
    #[arg(long)]
    pub ascii: bool,

    /// Disable colour output
    #[arg(long)]
    pub no_color: bool,

    /// Seed for --random
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Obstacle probability for --random
    #[arg(long, value_name = "F", default_value_t = 0.3, value_parser = parse_density)]
    pub density: f64,

    /// Print the search report as JSON after the board
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn ragged_policy(&self) -> RaggedPolicy {
        if self.truncate_ragged {
            RaggedPolicy::Truncate
        } else {
            RaggedPolicy::Reject
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            marking: if self.trail {
                PathMarking::ExpansionTrail
            } else {
                PathMarking::ShortestRoute
            },
            closing: if self.exact {
                Closing::OnExpand
            } else {
                Closing::OnInsert
            },
            max_expansions: self.max_expansions,
        }
    }

    pub fn glyphs(&self) -> GlyphSet {
        if self.ascii {
            GlyphSet::ASCII
        } else {
            GlyphSet::EMOJI
        }
    }
}

/// Parse `ROWSxCOLS`, e.g. `12x20`.
fn parse_dims(s: &str) -> Result<(i32, i32), String> {
    let (r, c) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got {s:?}"))?;
    let rows: i32 = r.trim().parse().map_err(|e| format!("rows: {e}"))?;
    let cols: i32 = c.trim().parse().map_err(|e| format!("cols: {e}"))?;
    if rows <= 0 || cols <= 0 {
        return Err(format!("board must be at least 1x1, got {rows}x{cols}"));
    }
    Ok((rows, cols))
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=1.0).contains(&d) {
        return Err(format!("density must be within 0..=1, got {d}"));
    }
    Ok(d)
}
