//! gridstar: load (or generate) a board, run A* from start to goal, and
//! draw the result.

mod config;

use std::io::{self, Write};
use std::process;

use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gridstar_core::{BoardGen, Grid, load_board};
use gridstar_paths::{AstarSearch, Manhattan, SearchOutcome, SearchReport};
use gridstar_term::TermRenderer;

use config::Args;

/// Exit status when the goal cannot be reached.
const EXIT_NOT_FOUND: i32 = 2;

fn load_grid(args: &Args) -> Result<Grid, Box<dyn std::error::Error>> {
    if let Some((rows, cols)) = args.random {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!("generating {rows}x{cols} board, density {}, seed {seed}", args.density);
        let grid = BoardGen::new(StdRng::seed_from_u64(seed)).generate(
            rows,
            cols,
            args.density,
            &[args.start, args.goal],
        )?;
        return Ok(grid);
    }

    // clap guarantees one of the two is present.
    let path = args.board.as_deref().ok_or("no board given")?;
    let grid = load_board(path, args.ragged_policy())?;
    info!(
        "loaded {} ({}x{})",
        path.display(),
        grid.dimensions().0,
        grid.dimensions().1
    );
    Ok(grid)
}

fn search(args: &Args, grid: &mut Grid) -> Result<SearchReport, Box<dyn std::error::Error>> {
    let astar =
        AstarSearch::with_config(grid, args.start, args.goal, Manhattan, args.search_config())?;
    Ok(astar.into_report()?)
}

/// Load the board, draw it, search it and draw the result into `out`.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<SearchReport, Box<dyn std::error::Error>> {
    let renderer = TermRenderer::new(args.glyphs()).with_color(!args.no_color);

    let mut grid = load_grid(args)?;
    writeln!(out, "Initial board:")?;
    renderer.draw(out, &grid)?;

    let report = search(args, &mut grid)?;
    match &report.outcome {
        SearchOutcome::Found(route) => {
            info!(
                "route of cost {} found after {} expansions ({} cells discovered)",
                route.cost,
                report.expanded.len(),
                report.discovered
            );
            writeln!(out, "\nFound a route of cost {}:", route.cost)?;
        }
        SearchOutcome::NotFound => {
            warn!(
                "no path found from {} to {} after {} expansions",
                report.start,
                report.goal,
                report.expanded.len()
            );
            writeln!(out, "\nNo path found")?;
        }
    }
    renderer.draw(out, &grid)?;
    Ok(report)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let stdout = io::stdout();
    let report = run(&args, &mut stdout.lock())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if report.outcome == SearchOutcome::NotFound {
        process::exit(EXIT_NOT_FOUND);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let base = ["gridstar", "--ascii", "--no-color"];
        Args::try_parse_from(base.iter().chain(extra).copied()).unwrap()
    }

    fn output(args: &Args) -> (SearchReport, String) {
        let mut buf = Vec::new();
        let report = run(args, &mut buf).unwrap();
        (report, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn board_is_drawn_before_and_after() {
        let (report, out) = output(&args(&["../boards/reference.board"]));
        assert_eq!(report.outcome.route().unwrap().cost, 11);

        let (before, after) = out.split_once("\nFound a route of cost 11:\n").unwrap();
        assert_eq!(
            before,
            "Initial board:\n\
             . # . . . .\n\
             . # . . . .\n\
             . # . . . .\n\
             . # . . . .\n\
             . . . . # .\n"
        );
        assert!(after.starts_with("S # "));
        assert!(after.contains('*'));
        assert_eq!(after.lines().count(), 5);
    }

    #[test]
    fn unreachable_goal_is_reported() {
        let (report, out) = output(&args(&["../boards/enclosed.board"]));
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert!(out.starts_with("Initial board:\n"));
        assert!(out.contains("\nNo path found\n"));
        assert!(!out.contains('*'));
    }

    #[test]
    fn generated_board_is_drawn_twice() {
        let a = args(&["--random", "6x8", "--seed", "3", "--goal", "5,7"]);
        let (_, first) = output(&a);
        let (_, second) = output(&a);
        assert_eq!(first, second);
        // Heading, both boards and the blank line plus verdict between them.
        assert_eq!(first.matches('\n').count(), 1 + 6 + 2 + 6);
    }
}
