//! Headless dealer: generates deals and prints them as JSON lines.
//!
//! `deal [--map NAME] [--seed N] [--count N]`
//!
//! Each line holds the map, the seed, the tile layout and the removal order that
//! clears it. The removal order is replayed before printing.

use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use tui_mahjong::core::{generate_with_limits, Pile, SimpleRng};
use tui_mahjong::engine::replay;
use tui_mahjong::journal::Cell;
use tui_mahjong::settings::Settings;

#[derive(Serialize)]
struct PlacedTile {
    #[serde(flatten)]
    cell: Cell,
    tile: u8,
}

#[derive(Serialize)]
struct DealRecord<'a> {
    map: &'a str,
    seed: u32,
    rows: u8,
    cols: u8,
    tiles: Vec<PlacedTile>,
    removal_order: Vec<[Cell; 2]>,
}

struct Args {
    count: u32,
    rest: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut count = 1;
    let mut rest = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" => {
                let raw = args.next().ok_or_else(|| anyhow!("--count needs a value"))?;
                count = raw
                    .parse()
                    .with_context(|| format!("invalid --count value {raw:?}"))?;
            }
            "--continue" => bail!("--continue is not supported by deal"),
            _ => rest.push(arg),
        }
    }
    Ok(Args { count, rest })
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let settings = Settings::from_env().with_args(args.rest)?;
    let map = settings.load_map(&settings.map)?;

    let seed = settings.seed_or_clock();
    let mut rng = SimpleRng::new(seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for _ in 0..args.count {
        let deal_seed = rng.state();
        let pile = Pile::standard().shuffled(&mut rng);
        let deal = generate_with_limits(&map, &pile, &mut rng, settings.limits())
            .with_context(|| format!("cannot deal map {:?}", map.name()))?;

        let cleared = replay(&deal.board, &deal.removal_order)
            .map_err(|err| anyhow!("removal order does not replay: {err}"))?;
        if cleared.has_playable_tiles() {
            bail!("removal order leaves tiles on the board");
        }

        let mut tiles = Vec::with_capacity(deal.board.tile_count());
        deal.board.for_each_cell(|pos, tile| {
            if !tile.is_empty() {
                tiles.push(PlacedTile {
                    cell: pos.into(),
                    tile: tile.raw(),
                });
            }
        });

        let record = DealRecord {
            map: map.name(),
            seed: deal_seed,
            rows: deal.board.rows(),
            cols: deal.board.cols(),
            tiles,
            removal_order: deal
                .removal_order
                .iter()
                .map(|&[a, b]| [a.into(), b.into()])
                .collect(),
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
