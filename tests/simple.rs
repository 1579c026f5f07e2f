use osu2saber::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn simple() {
    const SRC: &str = "\
osu file format v14

[General]
AudioFilename: audio.mp3
AudioLeadIn: 1500
PreviewTime: 30000
Mode: 3

[Editor]
GridSize: 8

[Metadata]
Title:Night Drive
Artist:Sample Artist
Creator:charter

[TimingPoints]
600,500,4,2,0,60,1,0
30600,-50,4,2,0,60,0,1
60600,500,4,2,0,60,1,0

[HitObjects]
64,192,1600,5,0,0:0:0:0:
192,192,2100,1,8,0:0:0:0:
320,192,2600,128,0,3100:0:0:0:0:
";

    let OsuOutput { beatset, warnings } = parse_osu(SRC).expect("SRC must be parsed");

    assert_eq!(warnings, vec![]);
    assert_eq!(
        beatset,
        Beatset {
            media: Media {
                title: "Night Drive".to_owned(),
                artist: "Sample Artist".to_owned(),
                author: "charter".to_owned(),
                audio_filename: "audio.mp3".to_owned(),
                preview_start_ms: 30000.0,
                average_bpm: 120.0,
            },
            settings: PlaySettings {
                mode: PlayMode::Mania,
                lead_in_ms: 1500.0,
                subdivision: 8,
            },
            events: vec![
                TimingEvent {
                    time_ms: 600.0,
                    beat_period_ms: 500.0,
                    kind: TimingEventKind::Tempo,
                },
                TimingEvent {
                    time_ms: 30600.0,
                    beat_period_ms: 250.0,
                    kind: TimingEventKind::KiaiStart,
                },
                TimingEvent {
                    time_ms: 60600.0,
                    beat_period_ms: 500.0,
                    kind: TimingEventKind::Tempo,
                },
            ],
            hits: vec![
                HitObject {
                    x: 64,
                    y: 192,
                    time_ms: 1600.0,
                    new_combo: true,
                    kind: HitKind::Circle {
                        sound: HitSound::from_bits(0),
                    },
                },
                HitObject {
                    x: 192,
                    y: 192,
                    time_ms: 2100.0,
                    new_combo: false,
                    kind: HitKind::Circle {
                        sound: HitSound::from_bits(HitSound::CLAP),
                    },
                },
                HitObject {
                    x: 320,
                    y: 192,
                    time_ms: 2600.0,
                    new_combo: false,
                    kind: HitKind::Hold { end_ms: 3100.0 },
                },
            ],
        }
    );
}

#[test]
fn files_without_a_tempo_are_rejected() {
    const SRC: &str = "\
[General]
AudioFilename: audio.mp3
Mode: 3

[HitObjects]
192,192,1600,1,0,0:0:0:0:
";

    assert_eq!(parse_osu(SRC), Err(OsuParseError::MissingTempo));
}

#[test]
fn malformed_rows_warn_and_are_dropped() {
    const SRC: &str = "\
[General]
AudioFilename: audio.mp3
Mode: 3

[TimingPoints]
600,500,4,2,0,60,1,0

[HitObjects]
oops,192,1600,1,0,0:0:0:0:
192,192,1600,1,0,0:0:0:0:
";

    let OsuOutput { beatset, warnings } = parse_osu(SRC).expect("SRC must be parsed");

    assert_eq!(beatset.hits.len(), 1);
    assert_eq!(
        warnings,
        vec![OsuWarning::ParseWarning(
            ParseWarning::InvalidNumber {
                value: "oops".to_owned(),
            }
            .into_wrapper_manual(94, 120),
        )]
    );
}
