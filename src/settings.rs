use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long = "loglevel", default_value_t = String::from("info"))]
    pub log_level: String,

    /// Bluetooth address of the wiimote the guitar is plugged into
    #[arg(long = "wiimote", required_unless_present = "list_ports")]
    pub wiimote_address: Option<String>,

    /// MIDI output port to write to, matched by name
    #[arg(long = "device", required_unless_present = "list_ports")]
    pub midi_device: Option<String>,

    /// Emit true note-off status bytes instead of note-on with velocity zero
    #[arg(long = "real-note-off")]
    pub real_note_off: bool,

    /// List the available MIDI output ports and exit
    #[arg(long = "list-ports")]
    pub list_ports: bool,
}
