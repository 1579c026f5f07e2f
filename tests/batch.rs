//! Checks of whole song folder batches and their manifest.

use osu2saber::prelude::*;
use pretty_assertions::assert_eq;
use strict_num_extended::FinF64;

const MANIA_SRC: &str = "\
[General]
AudioFilename: audio.mp3
PreviewTime: 30000
Mode: 3

[Metadata]
Title:Night Drive
Artist:Sample Artist
Creator:charter

[TimingPoints]
0,500,4,2,0,60,1,0

[HitObjects]
64,192,4000,5,0,0:0:0:0:
448,192,4500,1,0,0:0:0:0:
";

const TAIKO_SRC: &str = "\
[General]
AudioFilename: audio.mp3
PreviewTime: 30000
Mode: 1

[Metadata]
Title:Night Drive
Artist:Sample Artist
Creator:charter

[TimingPoints]
0,500,4,2,0,60,1,0

[HitObjects]
256,192,4000,5,0,0:0:0:0:
256,192,4500,1,2,0:0:0:0:
";

#[test]
fn batch_seals_one_song_folder() {
    let mut batch = Batch::new(SaberSequencer::default());
    let warnings = batch
        .append(MANIA_SRC, StageLevel::ExpertPlus)
        .expect("mania source must convert");
    assert_eq!(warnings, vec![]);
    batch
        .append(MANIA_SRC, StageLevel::Expert)
        .expect("mania source must convert");

    let BatchOutput { folder_name, files } =
        batch.finish().expect("an appended batch must finish");
    assert_eq!(folder_name, "Sample Artist - Night Drive (charter)");
    let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["NoArrowsExpertPlus.dat", "NoArrowsExpert.dat", INFO_FILENAME]
    );

    let manifest = files.last().expect("the manifest must be present");
    let info: InfoDat =
        serde_json::from_str(&manifest.contents).expect("the manifest must read back");
    assert_eq!(info.version, MAP_VERSION);
    assert_eq!(info.song_name, "Night Drive");
    assert_eq!(info.song_author_name, "Sample Artist");
    assert_eq!(info.level_author_name, "charter");
    assert_eq!(info.beats_per_minute, FinF64::new(120.0).unwrap());
    assert_eq!(info.preview_start_time, 30);
    assert_eq!(info.song_filename, "Track.ogg");

    // One play style, tiers listed easiest first no matter the append order.
    assert_eq!(info.difficulty_beatmap_sets.len(), 1);
    let set = &info.difficulty_beatmap_sets[0];
    assert_eq!(set.beatmap_characteristic_name, "NoArrows");
    let tiers: Vec<(&str, u8, &str)> = set
        .difficulty_beatmaps
        .iter()
        .map(|beatmap| {
            (
                beatmap.difficulty.as_str(),
                beatmap.difficulty_rank,
                beatmap.beatmap_filename.as_str(),
            )
        })
        .collect();
    assert_eq!(
        tiers,
        vec![
            ("Expert", 7, "NoArrowsExpert.dat"),
            ("ExpertPlus", 9, "NoArrowsExpertPlus.dat"),
        ]
    );
    // Only the hardest tier spawns notes a beat early.
    assert_eq!(set.difficulty_beatmaps[0].note_jump_start_beat_offset, 0);
    assert_eq!(set.difficulty_beatmaps[1].note_jump_start_beat_offset, 1);
}

#[test]
fn mixed_modes_group_by_characteristic() {
    let mut batch = Batch::new(SaberSequencer::default());
    batch
        .append(TAIKO_SRC, StageLevel::Hard)
        .expect("taiko source must convert");
    batch
        .append(MANIA_SRC, StageLevel::Easy)
        .expect("mania source must convert");

    let BatchOutput { files, .. } = batch.finish().expect("an appended batch must finish");
    let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["StandardHard.dat", "NoArrowsEasy.dat", INFO_FILENAME]
    );

    let manifest = files.last().expect("the manifest must be present");
    let info: InfoDat =
        serde_json::from_str(&manifest.contents).expect("the manifest must read back");
    let styles: Vec<&str> = info
        .difficulty_beatmap_sets
        .iter()
        .map(|set| set.beatmap_characteristic_name.as_str())
        .collect();
    assert_eq!(styles, vec!["NoArrows", "Standard"]);
}
