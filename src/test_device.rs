//! A scripted device for exercising the session protocol. Every call is
//! recorded so tests can assert on the exact order of operations.

use crate::device::{DeviceResult, DeviceSession, DiveVisitor, Driver};
use crate::status::Status;

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct Script {
    pub open: Option<Status>,
    pub handshake: Option<Status>,
    pub transfer: Option<Status>,
    pub close: Option<Status>,
    pub dump_len: usize,
}

#[derive(Default)]
pub struct ScriptedDriver {
    pub script: Script,
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

impl ScriptedDriver {
    pub fn new(script: Script) -> Self {
        ScriptedDriver { script, calls: Rc::default() }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

pub struct ScriptedSession {
    script: Script,
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl ScriptedSession {
    fn record(&self, call: &'static str, failure: Option<Status>) -> DeviceResult<()> {
        self.calls.borrow_mut().push(call);
        failure.map_or(Ok(()), Err)
    }
}

impl Driver for ScriptedDriver {
    type Session = ScriptedSession;

    fn open(&self, _name: &str) -> DeviceResult<ScriptedSession> {
        self.calls.borrow_mut().push("open");
        if let Some(status) = self.script.open {
            return Err(status);
        }
        Ok(ScriptedSession {
            script: self.script.clone(),
            calls: self.calls.clone(),
        })
    }
}

impl DeviceSession for ScriptedSession {
    fn handshake(&mut self, buf: &mut [u8]) -> DeviceResult<()> {
        self.record("handshake", self.script.handshake)?;
        buf.fill(0x5a);
        Ok(())
    }

    fn dump(&mut self, buf: &mut [u8]) -> DeviceResult<usize> {
        self.record("dump", self.script.transfer)?;
        let len = self.script.dump_len;
        let end = len.min(buf.len());
        buf[..end].fill(0xdd);
        Ok(len)
    }

    fn read_user(&mut self, buf: &mut [u8]) -> DeviceResult<()> {
        self.record("read_user", self.script.transfer)?;
        buf.fill(0x42);
        Ok(())
    }

    fn foreach(&mut self, visitor: Option<&mut DiveVisitor<'_>>) -> DeviceResult<()> {
        assert!(visitor.is_none(), "the harness enumerates without a visitor");
        self.record("foreach", self.script.transfer)
    }

    fn close(self) -> DeviceResult<()> {
        self.record("close", self.script.close)
    }
}
