//! Lighting and laser show derived from the timing section.
//!
//! The light show reacts to the structure of the song: combo starts recolor the side
//! lights (added by the note transforms), tempo changes speed up the laser fans, kiai
//! passages flood the stage in red and plain timing ticks rotate the rings.

use crate::{
    osu::{
        model::{TimingEvent, TimingEventKind},
        timing::PERIOD_EPSILON,
    },
    saber::{EventKind, EventValue, LightEvent, LightValue, SpeedRank},
};

use super::quantize::BeatQuantizer;

/// Earliest beat the back light may return on, to keep it clear of the blackout at beat
/// zero.
const LIGHT_ON_MIN_BEAT: f64 = 3.0;

/// Tracks that start switched off.
const LIGHT_TRACKS: [EventKind; 5] = [
    EventKind::BackLight,
    EventKind::SideLight,
    EventKind::LeftLaser,
    EventKind::RightLaser,
    EventKind::OverheadLight,
];

/// Builds the base light show out of the timing events.
///
/// All light tracks are switched off at beat zero, the back light returns after the
/// lead-in and the side lights on the first playable hit. Each timing event then
/// contributes one group of events at its quantized beat. The returned list is in
/// build order, the caller sorts once all events are collected.
pub fn build_events(
    timing_events: &[TimingEvent],
    lead_in_ms: f64,
    first_hit_ms: f64,
    quantizer: &BeatQuantizer,
) -> Vec<LightEvent> {
    let (back_on_ms, side_on_ms) = if first_hit_ms < lead_in_ms {
        (first_hit_ms, lead_in_ms)
    } else {
        (lead_in_ms, first_hit_ms)
    };

    let mut events = vec![];
    // Every track opens dark, the turn-on events follow in emission order.
    for kind in LIGHT_TRACKS {
        events.push(LightEvent::new(
            0.0,
            kind,
            EventValue::Switch(LightValue::Off),
        ));
    }
    events.push(LightEvent::new(
        quantizer.beats(back_on_ms).max(LIGHT_ON_MIN_BEAT),
        EventKind::BackLight,
        EventValue::Switch(LightValue::BlueOn),
    ));
    // The side light rides the first playable hit, however early that is.
    events.push(LightEvent::new(
        quantizer.beats(side_on_ms),
        EventKind::SideLight,
        EventValue::Switch(LightValue::BlueOn),
    ));

    let mut last_period = 0.0;
    for event in timing_events {
        let beat = quantizer.beats(event.time_ms);
        match event.kind {
            TimingEventKind::Tempo => {
                if PERIOD_EPSILON < (last_period - event.beat_period_ms).abs() {
                    // A real tempo change drives the laser fan speed.
                    let speed = EventValue::Speed(SpeedRank::from_period(event.beat_period_ms));
                    events.push(LightEvent::new(beat, EventKind::LeftLaserSpeed, speed));
                    events.push(LightEvent::new(beat, EventKind::RightLaserSpeed, speed));
                    last_period = event.beat_period_ms;
                } else {
                    // Same tempo means a closing kiai passage, fade the red out.
                    let fade = EventValue::Switch(LightValue::RedFade);
                    events.push(LightEvent::new(beat, EventKind::LeftLaser, fade));
                    events.push(LightEvent::new(beat, EventKind::RightLaser, fade));
                    events.push(LightEvent::new(beat, EventKind::OverheadLight, fade));
                    events.push(LightEvent::new(
                        beat,
                        EventKind::BackLight,
                        EventValue::Switch(LightValue::BlueOn),
                    ));
                    events.push(LightEvent::new(
                        beat,
                        EventKind::RingMotion,
                        EventValue::Neutral,
                    ));
                }
            }
            TimingEventKind::KiaiStart => {
                events.push(LightEvent::new(
                    beat,
                    EventKind::BackLight,
                    EventValue::Switch(LightValue::Off),
                ));
                let red = EventValue::Switch(LightValue::RedOn);
                events.push(LightEvent::new(beat, EventKind::LeftLaser, red));
                events.push(LightEvent::new(beat, EventKind::RightLaser, red));
                events.push(LightEvent::new(beat, EventKind::OverheadLight, red));
                events.push(LightEvent::new(
                    beat,
                    EventKind::RingMotion,
                    EventValue::Neutral,
                ));
            }
            TimingEventKind::Tick => {
                events.push(LightEvent::new(
                    beat,
                    EventKind::RingRotation,
                    EventValue::Neutral,
                ));
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_start_off_and_return_after_the_lead_in() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        let events = build_events(&[], 0.0, 3500.0, &quantizer);

        let off_events: Vec<_> = events
            .iter()
            .filter(|event| event.value == EventValue::Switch(LightValue::Off))
            .collect();
        assert_eq!(off_events.len(), 5);
        assert!(off_events.iter().all(|event| event.beat == 0.0));

        // Lead-in of zero still keeps the back light off until beat three.
        assert!(events.contains(&LightEvent::new(
            3.0,
            EventKind::BackLight,
            EventValue::Switch(LightValue::BlueOn),
        )));
        // The side light waits for the first hit, 3500ms is beat 7.
        assert!(events.contains(&LightEvent::new(
            7.0,
            EventKind::SideLight,
            EventValue::Switch(LightValue::BlueOn),
        )));
    }

    #[test]
    fn first_tempo_event_sets_both_laser_speeds() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        let tempo = TimingEvent {
            time_ms: 4000.0,
            beat_period_ms: 500.0,
            kind: TimingEventKind::Tempo,
        };
        let events = build_events(&[tempo], 0.0, 4000.0, &quantizer);

        let speed = EventValue::Speed(SpeedRank::from_period(500.0));
        assert!(events.contains(&LightEvent::new(8.0, EventKind::LeftLaserSpeed, speed)));
        assert!(events.contains(&LightEvent::new(8.0, EventKind::RightLaserSpeed, speed)));
    }

    #[test]
    fn kiai_passage_floods_red_and_fades_out() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        let timing = [
            TimingEvent {
                time_ms: 4000.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::Tempo,
            },
            TimingEvent {
                time_ms: 8000.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::KiaiStart,
            },
            TimingEvent {
                time_ms: 12000.0,
                beat_period_ms: 500.0,
                kind: TimingEventKind::Tempo,
            },
        ];
        let events = build_events(&timing, 0.0, 4000.0, &quantizer);

        // Kiai kills the back light and turns the lasers red.
        assert!(events.contains(&LightEvent::new(
            16.0,
            EventKind::BackLight,
            EventValue::Switch(LightValue::Off),
        )));
        assert!(events.contains(&LightEvent::new(
            16.0,
            EventKind::LeftLaser,
            EventValue::Switch(LightValue::RedOn),
        )));
        // The closing tempo event fades the red back out.
        assert!(events.contains(&LightEvent::new(
            24.0,
            EventKind::RightLaser,
            EventValue::Switch(LightValue::RedFade),
        )));
        assert!(events.contains(&LightEvent::new(
            24.0,
            EventKind::BackLight,
            EventValue::Switch(LightValue::BlueOn),
        )));
    }

    #[test]
    fn plain_ticks_rotate_the_rings() {
        let quantizer = BeatQuantizer::new(500.0, 8);
        let tick = TimingEvent {
            time_ms: 6000.0,
            beat_period_ms: 500.0,
            kind: TimingEventKind::Tick,
        };
        let events = build_events(&[tick], 0.0, 4000.0, &quantizer);

        assert!(events.contains(&LightEvent::new(
            12.0,
            EventKind::RingRotation,
            EventValue::Neutral,
        )));
    }
}
