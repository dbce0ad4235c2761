//! A dive computer replayed from a capture directory, so the harness can run
//! without hardware attached.
//!
//! The device name passed to [`CaptureDriver::open`] is the directory path.
//! Its layout is:
//!
//! ```text
//! handshake.bin   exactly HANDSHAKE_SIZE bytes
//! data.bin        the general memory region, at most the dump capacity
//! user.bin        exactly MEMORY_USER_SIZE bytes
//! dives/          optional, one file per dive record, replayed in name order
//! ```

use crate::device::{DeviceResult, DeviceSession, DiveVisitor, Driver, MEMORY_USER_SIZE};
use crate::status::Status;

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const HANDSHAKE_FILE: &str = "handshake.bin";
pub const DATA_FILE: &str = "data.bin";
pub const USER_FILE: &str = "user.bin";
pub const DIVES_DIR: &str = "dives";

#[derive(Debug, Default)]
pub struct CaptureDriver;

impl Driver for CaptureDriver {
    type Session = CaptureSession;

    fn open(&self, name: &str) -> DeviceResult<CaptureSession> {
        let root = PathBuf::from(name);
        if !root.is_dir() {
            debug!("no capture directory at {:?}", root);
            return Err(Status::IO);
        }
        Ok(CaptureSession { root })
    }
}

pub struct CaptureSession {
    root: PathBuf,
}

impl CaptureSession {
    fn read_file(&self, name: &str) -> DeviceResult<Vec<u8>> {
        read_capture_file(&self.root.join(name))
    }

    fn dive_paths(&self) -> DeviceResult<Vec<PathBuf>> {
        let dir = self.root.join(DIVES_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|err| {
            warn!("failed to list {:?}: {}", dir, err);
            Status::IO
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|_| Status::IO)?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

fn read_capture_file(path: &Path) -> DeviceResult<Vec<u8>> {
    fs::read(path).map_err(|err| {
        debug!("failed to read {:?}: {}", path, err);
        Status::IO
    })
}

impl DeviceSession for CaptureSession {
    fn handshake(&mut self, buf: &mut [u8]) -> DeviceResult<()> {
        let data = self.read_file(HANDSHAKE_FILE)?;
        if data.len() != buf.len() {
            warn!("handshake is {} bytes, expected {}", data.len(), buf.len());
            return Err(Status::Protocol);
        }
        buf.copy_from_slice(&data);
        Ok(())
    }

    fn dump(&mut self, buf: &mut [u8]) -> DeviceResult<usize> {
        let data = self.read_file(DATA_FILE)?;
        if data.len() > buf.len() {
            warn!("memory dump is {} bytes, capacity is {}", data.len(), buf.len());
            return Err(Status::Memory);
        }
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }

    fn read_user(&mut self, buf: &mut [u8]) -> DeviceResult<()> {
        if buf.len() != MEMORY_USER_SIZE {
            return Err(Status::Error);
        }
        let data = self.read_file(USER_FILE)?;
        if data.len() != buf.len() {
            warn!("user memory is {} bytes, expected {}", data.len(), buf.len());
            return Err(Status::Protocol);
        }
        buf.copy_from_slice(&data);
        Ok(())
    }

    fn foreach(&mut self, mut visitor: Option<&mut DiveVisitor<'_>>) -> DeviceResult<()> {
        let paths = self.dive_paths()?;
        let mut visited = 0;
        for path in paths {
            let record = read_capture_file(&path)?;
            visited += 1;
            if let Some(visit) = visitor.as_deref_mut() {
                if !visit(&record) {
                    break;
                }
            }
        }
        debug!("enumerated {} dives from {:?}", visited, self.root);
        Ok(())
    }

    fn close(self) -> DeviceResult<()> {
        Ok(())
    }
}
