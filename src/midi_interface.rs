use anyhow::anyhow;
use log::{debug, info, warn};
use midir::{MidiOutput, MidiOutputConnection};

use crate::translation::messages::{MidiEvent, NoteOffStyle};

pub fn list_midi_ports() -> anyhow::Result<()> {
    let midi_out = MidiOutput::new("wiitar-midi listing output")?;

    for (i, p) in midi_out.ports().iter().enumerate() {
        println!("{}: {}", i, midi_out.port_name(p)?);
    }
    Ok(())
}

/// Open the first MIDI output port whose name contains `preferred`.
pub fn open_midi_output(preferred: &str) -> anyhow::Result<MidiOutputConnection> {
    let midi_out = MidiOutput::new("wiitar-midi output")?;

    let out_ports = midi_out.ports();
    let out_port = match out_ports.len() {
        0 => return Err(anyhow!("no MIDI output port found")),
        _ => out_ports
            .iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .map(|name| name.contains(preferred))
                    .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("no MIDI output port matching \"{}\"", preferred))?,
    };

    let out_port_name = midi_out.port_name(out_port)?;
    let conn = midi_out
        .connect(out_port, "wiitar-midi-out")
        .map_err(|e| anyhow!("failed to connect to \"{}\": {}", out_port_name, e))?;

    info!(
        "MIDI connection open, writing output to '{}'.",
        out_port_name
    );
    Ok(conn)
}

/// Write one event to the port as a raw byte triple. Send failures are
/// logged and otherwise ignored.
pub fn send_event(conn: &mut MidiOutputConnection, event: &MidiEvent, style: NoteOffStyle) {
    let bytes = event.to_bytes(style);
    match conn.send(&bytes) {
        Ok(()) => debug!(
            "{:?} {{ {:02x} {:02x} {:02x} }}",
            event, bytes[0], bytes[1], bytes[2]
        ),
        Err(e) => warn!("MIDI send failed: {}", e),
    }
}
