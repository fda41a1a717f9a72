pub const NOTE_ON_STATUS: u8 = 0x90; // note on, channel 1
pub const NOTE_OFF_STATUS: u8 = 0x80; // note off, channel 1
pub const PITCH_BEND_STATUS: u8 = 0xe0; // pitch bend, channel 1

/// Outbound MIDI message; always three bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff { pitch: u8 },
    PitchBend { bend: u16 },
}

/// Which status byte a [`MidiEvent::NoteOff`] encodes to.
///
/// Note-on with velocity zero doubles as note-off in MIDI; some synths
/// only honour a true 0x80 status, so that encoding is selectable too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteOffStyle {
    #[default]
    NoteOnZeroVelocity,
    Status80,
}

impl MidiEvent {
    pub fn to_bytes(&self, note_off_style: NoteOffStyle) -> [u8; 3] {
        match *self {
            MidiEvent::NoteOn { pitch, velocity } => [NOTE_ON_STATUS, pitch, velocity],
            MidiEvent::NoteOff { pitch } => match note_off_style {
                NoteOffStyle::NoteOnZeroVelocity => [NOTE_ON_STATUS, pitch, 0x00],
                NoteOffStyle::Status80 => [NOTE_OFF_STATUS, pitch, 0x00],
            },
            MidiEvent::PitchBend { bend } => {
                let [lsb, msb] = bend.to_le_bytes();
                [PITCH_BEND_STATUS, lsb, msb]
            }
        }
    }
}
