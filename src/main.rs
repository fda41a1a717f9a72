use clap::Parser;
use env_logger::Env;
use log::{info, trace, warn};
use settings::Cli;
use translation::messages::NoteOffStyle;
use translation::{update_pitch_offset, GuitarState, TranslationModel};
use wiimote_interface::Wiimote;

mod midi_interface;
mod settings;
mod translation;
mod wiimote_interface;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    if cli.list_ports {
        return midi_interface::list_midi_ports();
    }

    let address = cli.wiimote_address.expect("required unless --list-ports");
    let device = cli.midi_device.expect("required unless --list-ports");

    let note_off_style = if cli.real_note_off {
        NoteOffStyle::Status80
    } else {
        NoteOffStyle::NoteOnZeroVelocity
    };

    let mut wiimote = Wiimote::open(&address)?;
    let mut midi_out = midi_interface::open_midi_output(&device)?;

    let mut model = TranslationModel::new();
    let mut prev = GuitarState::default();

    while wiimote.is_open() {
        let raw = match wiimote.update() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}", e);
                break;
            }
        };

        let mut cur = GuitarState::from_raw(&raw);
        update_pitch_offset(&mut cur, &prev);
        trace!("{:?}", cur);

        for event in model.handle_frame(&cur, &prev) {
            midi_interface::send_event(&mut midi_out, &event, note_off_style);
        }

        wiimote.set_leds([cur.green, cur.red, cur.yellow, cur.blue], cur.orange);

        prev = cur;
    }

    info!("Wiimote connection closed; exiting");
    Ok(())
}
