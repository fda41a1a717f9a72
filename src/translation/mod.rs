use crate::wiimote_interface::RawGuitarReport;

pub mod messages;

use self::messages::MidiEvent;

pub const BASE_PITCH: u8 = 0x3c; // middle C
pub const NOTE_VELOCITY: u8 = 0x40;
pub const FRET_MASK: u8 = 0x1f;
pub const SEMITONES_PER_OCTAVE: i32 = 12;
pub const BEND_CENTER: u16 = 0x4000; // no pitch bend
pub const BEND_SCALE: u16 = 1024;
pub const WHAMMY_BIAS: u8 = 240;
// Strum axis value with only the strum-down bit pulled low.
pub const STRUM_DOWN_ACTIVE: u8 = 191;

/// Semantic controller snapshot for one polled frame.
///
/// Everything except `pitch_offset` is re-derived from the raw report each
/// frame; the offset accumulates across frames via [`update_pitch_offset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuitarState {
    pub green: bool,
    pub red: bool,
    pub yellow: bool,
    pub blue: bool,
    pub orange: bool,
    pub strum_up: bool,
    pub strum_down: bool,
    pub minus: bool,
    pub plus: bool,
    pub whammy: u8,
    pub pitch_offset: i8,
}

impl GuitarState {
    /// Decode a raw extension record. The bit positions are fixed by the
    /// guitar's report layout; nothing is validated.
    pub fn from_raw(raw: &RawGuitarReport) -> Self {
        GuitarState {
            green: raw.keys >> 4 & 0x01 != 0,
            red: raw.keys >> 6 & 0x01 != 0,
            yellow: raw.keys >> 3 & 0x01 != 0,
            blue: raw.keys >> 5 & 0x01 != 0,
            orange: raw.keys >> 7 & 0x01 != 0,
            strum_up: raw.keys & 0x01 != 0,
            strum_down: raw.strum_axis == STRUM_DOWN_ACTIVE,
            minus: !raw.strum_axis >> 4 & 0x01 != 0,
            plus: !raw.strum_axis >> 2 & 0x01 != 0,
            whammy: raw.whammy.wrapping_sub(WHAMMY_BIAS),
            pitch_offset: 0,
        }
    }

    /// Buttons packed one per bit: green, red, yellow, blue, orange,
    /// strum-up, strum-down from bit 0 up.
    pub fn bits(&self) -> u8 {
        self.green as u8
            | (self.red as u8) << 1
            | (self.yellow as u8) << 2
            | (self.blue as u8) << 3
            | (self.orange as u8) << 4
            | (self.strum_up as u8) << 5
            | (self.strum_down as u8) << 6
    }
}

/// Carry the accumulated pitch offset into the current frame, then apply
/// plus/minus rising edges. Holding a button does not repeat.
pub fn update_pitch_offset(cur: &mut GuitarState, prev: &GuitarState) {
    cur.pitch_offset = prev.pitch_offset;
    if cur.plus && !prev.plus {
        cur.pitch_offset = cur.pitch_offset.wrapping_add(1);
    }
    if cur.minus && !prev.minus {
        cur.pitch_offset = cur.pitch_offset.wrapping_sub(1);
    }
}

pub struct TranslationModel {
    last_pitch: u8,
}

impl TranslationModel {
    pub fn new() -> Self {
        TranslationModel {
            last_pitch: BASE_PITCH,
        }
    }

    /// Diff one frame against the previous one and collect the MIDI events
    /// to send, in order.
    ///
    /// Strum down holds a note until the strum returns to center; strum up
    /// is a one-shot pluck (note on immediately followed by note off); any
    /// whammy movement re-sends the bend amount. The three are independent
    /// and evaluated in that order every frame.
    pub fn handle_frame(&mut self, cur: &GuitarState, prev: &GuitarState) -> Vec<MidiEvent> {
        let mut events = Vec::new();

        if cur.strum_down && !prev.strum_down {
            events.push(self.note_on(cur));
        } else if !cur.strum_down && prev.strum_down {
            events.push(self.note_off());
        }

        if cur.strum_up && !prev.strum_up {
            events.push(self.note_on(cur));
            events.push(self.note_off());
        }

        if cur.whammy != prev.whammy {
            events.push(pitch_bend(cur.whammy));
        }

        events
    }

    fn note_on(&mut self, cur: &GuitarState) -> MidiEvent {
        let pitch = (BASE_PITCH as i32
            + (cur.bits() & FRET_MASK) as i32
            + cur.pitch_offset as i32 * SEMITONES_PER_OCTAVE) as u8;
        self.last_pitch = pitch;
        MidiEvent::NoteOn {
            pitch,
            velocity: NOTE_VELOCITY,
        }
    }

    // Releases whatever pitch the last note on carried, not the current
    // fret state.
    fn note_off(&self) -> MidiEvent {
        MidiEvent::NoteOff {
            pitch: self.last_pitch,
        }
    }
}

fn pitch_bend(whammy: u8) -> MidiEvent {
    let bend = BEND_CENTER.wrapping_add((whammy as u16).wrapping_mul(BEND_SCALE));
    MidiEvent::PitchBend { bend }
}
