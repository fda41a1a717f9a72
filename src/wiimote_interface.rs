use anyhow::{anyhow, Context};
use hidapi::{HidApi, HidDevice};
use log::{debug, info};

/// Nintendo's USB vendor id.
pub const WIIMOTE_VENDOR_ID: u16 = 0x057e;
/// Product ids for the original (RVL-003) and Plus (RVL-036) wiimotes.
pub const WIIMOTE_PRODUCT_IDS: [u16; 2] = [0x0306, 0x0330];

// Output report ids.
const REPORT_LEDS: u8 = 0x11;
const REPORT_MODE: u8 = 0x12;
const REPORT_WRITE_MEMORY: u8 = 0x16;

// Input report ids.
const REPORT_STATUS: u8 = 0x20;
const REPORT_ACK: u8 = 0x22;
const REPORT_CORE_EXT8: u8 = 0x32;

// Extension registers; 0x04 selects the register address space.
const EXT_INIT_ADDR: [u8; 4] = [0x04, 0xa4, 0x00, 0xf0];
const EXT_MODE_ADDR: [u8; 4] = [0x04, 0xa4, 0x00, 0xfb];

/// Raw guitar extension record, one per polled frame.
///
/// The layout is fixed by the extension's report format: byte 5 carries the
/// fret and strum-up keys (active low on the wire, stored inverted here),
/// byte 3 the whammy axis and byte 4 the strum-down/plus/minus group
/// (active low, stored as read).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawGuitarReport {
    pub keys: u8,
    pub whammy: u8,
    pub strum_axis: u8,
}

impl RawGuitarReport {
    pub fn parse(ext: &[u8; 8]) -> Self {
        RawGuitarReport {
            keys: !ext[5],
            whammy: ext[3],
            strum_axis: ext[4],
        }
    }
}

pub struct Wiimote {
    device: HidDevice,
    open: bool,
}

impl Wiimote {
    /// Find the wiimote paired under `address` and set it up for guitar
    /// polling.
    pub fn open(address: &str) -> anyhow::Result<Self> {
        let api = HidApi::new().context("hidapi init failed")?;

        info!("Waiting for wiimote {}... (press 1 + 2)", address);

        let device_info = api
            .device_list()
            .find(|dev| {
                dev.vendor_id() == WIIMOTE_VENDOR_ID
                    && WIIMOTE_PRODUCT_IDS.contains(&dev.product_id())
                    && dev
                        .serial_number()
                        .map(|serial| serial.eq_ignore_ascii_case(address))
                        .unwrap_or(false)
            })
            .ok_or_else(|| {
                anyhow!(
                    "no wiimote with address {} found (pair it and press 1 + 2 first)",
                    address
                )
            })?;

        let device = device_info
            .open_device(&api)
            .with_context(|| format!("failed to open wiimote {}", address))?;

        let mut wiimote = Wiimote { device, open: true };
        wiimote.init_extension()?;
        wiimote.set_report_mode()?;

        info!("Connected to wiimote {}.", address);
        Ok(wiimote)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Block until the next guitar extension report arrives.
    ///
    /// A status report means the extension was (re-)plugged, which also
    /// resets the reporting mode, so both are negotiated again before
    /// carrying on. A failed read marks the handle closed.
    pub fn update(&mut self) -> anyhow::Result<RawGuitarReport> {
        let mut buf = [0u8; 22];
        loop {
            let len = match self.device.read(&mut buf) {
                Ok(len) => len,
                Err(e) => {
                    self.open = false;
                    return Err(e).context("wiimote read failed");
                }
            };
            if len == 0 {
                continue;
            }
            match buf[0] {
                REPORT_CORE_EXT8 if len >= 11 => {
                    let mut ext = [0u8; 8];
                    ext.copy_from_slice(&buf[3..11]);
                    return Ok(RawGuitarReport::parse(&ext));
                }
                REPORT_STATUS => {
                    debug!("wiimote status report; renegotiating extension");
                    self.init_extension()?;
                    self.set_report_mode()?;
                }
                REPORT_ACK => {}
                other => debug!("ignoring report {:#04x} ({} bytes)", other, len),
            }
        }
    }

    /// Mirror fret state onto the player LEDs and the rumble motor.
    /// Fire-and-forget; a failed write is dropped.
    pub fn set_leds(&mut self, leds: [bool; 4], rumble: bool) {
        let _ = self.device.write(&[REPORT_LEDS, led_byte(leds, rumble)]);
    }

    // Unencrypted init handshake for the extension controller.
    fn init_extension(&mut self) -> anyhow::Result<()> {
        self.write_register(EXT_INIT_ADDR, 0x55)?;
        self.write_register(EXT_MODE_ADDR, 0x00)
    }

    fn set_report_mode(&mut self) -> anyhow::Result<()> {
        self.device
            .write(&[REPORT_MODE, 0x00, REPORT_CORE_EXT8])
            .context("failed to set reporting mode")?;
        Ok(())
    }

    fn write_register(&mut self, addr: [u8; 4], value: u8) -> anyhow::Result<()> {
        let mut report = [0u8; 22];
        report[0] = REPORT_WRITE_MEMORY;
        report[1..5].copy_from_slice(&addr);
        report[5] = 0x01; // payload size
        report[6] = value;
        self.device
            .write(&report)
            .context("wiimote register write failed")?;
        Ok(())
    }
}

fn led_byte(leds: [bool; 4], rumble: bool) -> u8 {
    rumble as u8
        | (leds[0] as u8) << 4
        | (leds[1] as u8) << 5
        | (leds[2] as u8) << 6
        | (leds[3] as u8) << 7
}
