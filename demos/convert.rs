//! Convert osu! beatmap files into a Beat Saber custom song folder.
//!
//! Usage:
//!   cargo run --example convert -- <`beatmap.osu`>... [-o <`output_dir`>]
//!
//! Example:
//!   cargo run --example convert -- song/normal.osu song/insane.osu -o out
//!
//! The beatmap files must belong to the same song and be ordered easiest first.
//! They are assigned the hardest Beat Saber tiers, so a single file becomes the
//! Expert+ beatmap. The song folder still needs its audio and cover files copied
//! in next to the written `.dat` files.

use std::path::PathBuf;

use clap::Parser;

use osu2saber::prelude::*;

/// Configuration parameters
#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(about = "An osu! beatmap to Beat Saber song converter", long_about = None)]
struct Config {
    /// Beatmap `.osu` file paths of one song, easiest first
    #[arg(value_name = "FILE", required = true)]
    beatmap_paths: Vec<PathBuf>,

    /// Directory the song folder is created in
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    output: PathBuf,

    /// Swing the taiko drum with a single hand, without cut directions
    #[arg(long)]
    one_handed: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    if config.beatmap_paths.len() > StageLevel::ALL.len() {
        return Err(format!(
            "at most {} beatmaps fit into one song folder",
            StageLevel::ALL.len()
        )
        .into());
    }

    let sequencer = SaberSequencer {
        two_handed: !config.one_handed,
    };
    let mut batch = Batch::new(sequencer);

    // The last file lands on the hardest tier.
    let first_stage = StageLevel::ALL.len() - config.beatmap_paths.len();
    let stages = StageLevel::ALL
        .get(first_stage..)
        .expect("stage count was checked against the path count");
    for (path, stage) in config.beatmap_paths.iter().zip(stages) {
        let source = std::fs::read_to_string(path)
            .map_err(|error| format!("{}: {}", path.display(), error))?;
        let warnings = batch
            .append(&source, *stage)
            .map_err(|error| format!("{}: {}", path.display(), error))?;
        if !warnings.is_empty() {
            let name = path.display().to_string();
            emit_osu_warnings(&name, &source, &warnings);
        }
        println!("{} -> {}", path.display(), stage.as_str());
    }

    let Some(BatchOutput { folder_name, files }) = batch.finish() else {
        return Err("no beatmap was converted".into());
    };

    let song_dir = config.output.join(folder_name);
    std::fs::create_dir_all(&song_dir)?;
    for MapFile { name, contents } in files {
        let target = song_dir.join(&name);
        std::fs::write(&target, contents)?;
        println!("wrote {}", target.display());
    }
    println!(
        "copy the song audio and cover into {} as Track.ogg and cover.png",
        song_dir.display()
    );

    Ok(())
}
