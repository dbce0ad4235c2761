//! One complete open → handshake → transfer → close cycle against a device.
//!
//! Every failure is logged where it's detected, the session is closed if it
//! was opened, and the failing [`Status`] becomes the scenario's outcome.

use crate::clock;
use crate::device::{
    region_buffer, DeviceResult, DeviceSession, Driver, HANDSHAKE_SIZE, MEMORY_DATA_SIZE,
    MEMORY_USER_SIZE,
};
use crate::log_sink::LogSink;
use crate::status::Status;

use chrono::Utc;
use crc::{Crc, CRC_16_IBM_3740};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Write;
use std::path::Path;

// CRC-16/CCITT-FALSE: poly 0x1021, seed 0xffff, no reflection or final xor
const CRC_CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// The device-specific step of a scenario, with the artifact destination for
/// the two transfers that produce one.
#[derive(Debug, Clone, Copy)]
pub enum Transfer<'a> {
    MemoryData(&'a Path),
    MemoryUser(&'a Path),
    Dives,
}

impl Transfer<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Transfer::MemoryData(_) => "test_dump_memory_data",
            Transfer::MemoryUser(_) => "test_dump_memory_user",
            Transfer::Dives => "test_dump_memory_dives",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Transfer::MemoryData(_) | Transfer::MemoryUser(_) => "Cannot read memory.",
            Transfer::Dives => "Cannot read dives.",
        }
    }
}

pub fn run_scenario<D, W>(
    driver: &D,
    name: &str,
    transfer: Transfer<'_>,
    sink: &mut LogSink<W>,
) -> Status
where
    D: Driver,
    W: Write,
{
    sink.message("reefnet_sensusultra_device_open");
    let mut session = match driver.open(name) {
        Ok(session) => session,
        Err(status) => {
            report_failure(sink, "Error opening serial port.", status);
            return status;
        }
    };

    sink.message("device_handshake");
    let mut handshake = region_buffer(HANDSHAKE_SIZE);
    if let Err(status) = session.handshake(&mut handshake) {
        report_failure(sink, "Cannot read handshake.", status);
        close_after_failure(session);
        return status;
    }

    sink.message(&clock::time_line(&Utc::now()));

    if let Err(status) = run_transfer(&mut session, transfer, sink) {
        report_failure(sink, transfer.failure_message(), status);
        close_after_failure(session);
        return status;
    }

    sink.message("device_close");
    if let Err(status) = session.close() {
        report_failure(sink, "Cannot close device.", status);
        return status;
    }

    Status::Success
}

fn run_transfer<S, W>(
    session: &mut S,
    transfer: Transfer<'_>,
    sink: &mut LogSink<W>,
) -> DeviceResult<()>
where
    S: DeviceSession,
    W: Write,
{
    match transfer {
        Transfer::MemoryData(destination) => {
            sink.message("device_dump");
            let mut data = region_buffer(MEMORY_DATA_SIZE);
            let len = session.dump(&mut data)?;
            if len > data.len() {
                warn!("device reported {} bytes for a {} byte buffer", len, data.len());
                return Err(Status::Memory);
            }
            sink.message("Dumping data");
            persist_best_effort(destination, &data[..len]);
        }
        Transfer::MemoryUser(destination) => {
            sink.message("reefnet_sensusultra_device_read_user");
            let mut data = region_buffer(MEMORY_USER_SIZE);
            session.read_user(&mut data)?;
            sink.message("Dumping data");
            persist_best_effort(destination, &data);
        }
        Transfer::Dives => {
            // No visitor: this only checks that the device can enumerate.
            sink.message("device_foreach");
            session.foreach(None)?;
        }
    }
    Ok(())
}

/// Writes `bytes` to `destination`, replacing any previous contents. A
/// destination that can't be created or written is skipped; it never changes
/// the outcome of the scenario. Returns whether the artifact was written.
pub fn persist_best_effort(destination: &Path, bytes: &[u8]) -> bool {
    let mut file = match File::create(destination) {
        Ok(file) => file,
        Err(err) => {
            debug!("skipping {:?}: {}", destination, err);
            return false;
        }
    };
    if let Err(err) = file.write_all(bytes) {
        debug!("failed to write {:?}: {}", destination, err);
        return false;
    }
    info!(
        "wrote {} bytes to {:?} (crc {:#06x})",
        bytes.len(),
        destination,
        CRC_CCITT.checksum(bytes)
    );
    true
}

#[track_caller]
fn report_failure<W: Write>(sink: &mut LogSink<W>, text: &str, status: Status) {
    warn!("{} ({})", text, status);
    sink.warning(text);
}

fn close_after_failure<S: DeviceSession>(session: S) {
    if let Err(status) = session.close() {
        debug!("close after failed step returned: {}", status);
    }
}
