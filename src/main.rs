use docopt::Docopt;
use log::{debug, info, warn};
use petgraph::visit::EdgeRef;
use serde_derive::Deserialize;
use mazes::{
    cells::{Cell, Direction},
    generators,
    grid::GridModel,
    navigation::Phase,
    pathing,
    progression::{LevelSizing, ProgressionController},
    units::{Height, Width},
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w> --height=<h>] [--seed=<n>] [--show-path] [--save-edges=<path>]
    mazes_driver play [--seed=<n>] [--base-width=<w> --base-height=<h>] [--step=<n>] [--cap-width=<w> --cap-height=<h>]

Options:
    -h --help              Show this screen.
    --width=<w>            The maze width, odd and at least 3 [default: 31].
    --height=<h>           The maze height, odd and at least 3 [default: 21].
    --seed=<n>             Seed the random maze generation so runs can be repeated.
    --show-path            Mark the shortest route from the top left room to the exit.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#rooms) m(#connections). Line 2+ connection between rooms. Uses 1-based room indices.
    --base-width=<w>       Width of the first level maze [default: 31].
    --base-height=<h>      Height of the first level maze [default: 21].
    --step=<n>             How much each side grows per completed level [default: 2].
    --cap-width=<w>        Largest maze width [default: 41].
    --cap-height=<h>       Largest maze height [default: 31].

Play commands, one per line:
    w a s d or up left down right    move
    h                                show the route to the exit
    r                                back to the start, clock restarted
    n                                a new maze for the same level
    q                                quit
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_play: bool,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_save_edges: String,
    flag_base_width: usize,
    flag_base_height: usize,
    flag_step: usize,
    flag_cap_width: usize,
    flag_cap_height: usize,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

const PLAYER_GLYPH: char = '@';
const EXIT_GLYPH: char = 'E';
const ROUTE_GLYPH: char = '+';

fn main() -> Result<()> {

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.cmd_play {
        play(&args)
    } else {
        render(&args)
    }
}

fn render(args: &MazeArgs) -> Result<()> {

    let maze_grid = generators::generate(Width(args.flag_width), Height(args.flag_height),
                                         args.flag_seed)?;

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let route = if args.flag_show_path {
        let route = pathing::solve(&maze_grid, maze_grid.start_room(), maze_grid.exit_room());
        if route.is_empty() {
            warn!("no route from {:?} to {:?}", maze_grid.start_room(), maze_grid.exit_room());
        }
        route
    } else {
        Vec::new()
    };

    let exit = maze_grid.exit_room();
    println!("{}", maze_grid.to_text_with_overlay(|cell| {
        if cell == exit {
            Some(EXIT_GLYPH)
        } else if route.contains(&cell) {
            Some(ROUTE_GLYPH)
        } else {
            None
        }
    }));

    Ok(())
}

fn play(args: &MazeArgs) -> Result<()> {

    let sizing = LevelSizing::new((Width(args.flag_base_width), Height(args.flag_base_height)),
                                  args.flag_step,
                                  (Width(args.flag_cap_width), Height(args.flag_cap_height)))?;
    let mut game = ProgressionController::new(sizing, args.flag_seed)?;

    print_board(&game, &[]);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim().to_lowercase();

        let mut route = Vec::new();
        match command.as_str() {
            "q" | "quit" => break,
            "h" | "hint" => route = game.hint(),
            "r" | "retry" => game.retry(),
            "n" | "new" => game.new_maze()?,
            other => match parse_direction(other) {
                Some(direction) => {
                    let outcome = game.move_player(direction);
                    if !outcome.moved {
                        debug!("blocked moving {:?}", direction);
                    }
                }
                None => {
                    println!("unknown command '{}'", other);
                    continue;
                }
            },
        }

        if game.phase() == Phase::Won {
            if let Some(report) = game.last_report() {
                println!("level {} complete in {:.1}s (best {:.1}s){}",
                         report.level,
                         report.elapsed.as_secs_f64(),
                         report.best.as_secs_f64(),
                         if report.new_best { ", a new record" } else { "" });
            }
            game.advance()?;
        }

        print_board(&game, &route);
    }

    info!("finished on level {}", game.level());
    Ok(())
}

fn parse_direction(command: &str) -> Option<Direction> {
    match command {
        "w" | "up" => Some(Direction::Up),
        "d" | "right" => Some(Direction::Right),
        "s" | "down" => Some(Direction::Down),
        "a" | "left" => Some(Direction::Left),
        _ => None,
    }
}

fn print_board(game: &ProgressionController, route: &[Cell]) {
    let nav = game.navigation();
    let (width, height) = game.size();
    println!("level {} ({}x{})", game.level(), width, height);
    println!("{}", nav.grid().to_text_with_overlay(|cell| {
        if cell == nav.player() {
            Some(PLAYER_GLYPH)
        } else if cell == nav.exit() {
            Some(EXIT_GLYPH)
        } else if route.contains(&cell) {
            Some(ROUTE_GLYPH)
        } else {
            None
        }
    }));
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &GridModel, file_path: &str) -> Result<()> {

    let graph = maze_grid.room_graph();

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", graph.node_count(), graph.edge_count()));

    for edge in graph.edge_references() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
