//! Runs the three scenarios in a fixed order and reports how each one ended.
//!
//! The harness is diagnostic, not a pass/fail gate: a failed scenario never
//! stops the ones after it, and failures only show up in the summary.

use crate::config::Config;
use crate::device::Driver;
use crate::log_sink::LogSink;
use crate::scenario::{run_scenario, Transfer};
use crate::status::Status;

use log::info;
use std::io::Write;
use std::path::PathBuf;

// wide enough for the longest scenario name plus its colon
const SUMMARY_NAME_WIDTH: usize = 27;

pub struct Harness {
    device: String,
    data_path: PathBuf,
    user_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub name: &'static str,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub outcomes: Vec<Outcome>,
}

impl Harness {
    pub fn new<P, Q>(device: &str, data_path: P, user_path: Q) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        Harness {
            device: device.to_string(),
            data_path: data_path.into(),
            user_path: user_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Harness::new(&config.device, &config.data_path, &config.user_path)
    }

    /// Runs every scenario against the device and writes the summary to `sink`.
    pub fn run<D, W>(&self, driver: &D, sink: &mut LogSink<W>) -> Summary
    where
        D: Driver,
        W: Write,
    {
        sink.message(&format!("DEVICE={}", self.device));

        let transfers = [
            Transfer::MemoryData(&self.data_path),
            Transfer::MemoryUser(&self.user_path),
            Transfer::Dives,
        ];
        let outcomes = transfers
            .into_iter()
            .map(|transfer| {
                let status = run_scenario(driver, &self.device, transfer, sink);
                info!("{} finished: {}", transfer.name(), status);
                Outcome { name: transfer.name(), status }
            })
            .collect();

        let summary = Summary { outcomes };
        summary.report(sink);
        summary
    }
}

impl Summary {
    pub fn lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(|outcome| {
                let label = format!("{}:", outcome.name);
                format!("{:<width$}{}", label, outcome.status, width = SUMMARY_NAME_WIDTH)
            })
            .collect()
    }

    pub fn report<W: Write>(&self, sink: &mut LogSink<W>) {
        sink.message("SUMMARY");
        sink.message("-------");
        for line in self.lines() {
            sink.message(&line);
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.status.is_success())
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.outcomes.iter().map(|outcome| outcome.status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_device::{Script, ScriptedDriver};

    fn run(driver: &ScriptedDriver, harness: &Harness) -> (Summary, String) {
        let mut sink = LogSink::new(Vec::new(), false);
        let summary = harness.run(driver, &mut sink);
        (summary, String::from_utf8(sink.finish().unwrap()).unwrap())
    }

    #[test]
    fn test_scenarios_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let harness = Harness::new(
            "/dev/ttyUSB0",
            dir.path().join("data.dmp"),
            dir.path().join("user.dmp"),
        );
        let driver = ScriptedDriver::new(Script { dump_len: 8, ..Script::default() });

        let (summary, transcript) = run(&driver, &harness);

        assert!(summary.all_succeeded());
        let expected = [
            ["open", "handshake", "dump", "close"],
            ["open", "handshake", "read_user", "close"],
            ["open", "handshake", "foreach", "close"],
        ]
        .concat();
        assert_eq!(driver.calls(), expected);
        assert!(transcript.starts_with("DEVICE=/dev/ttyUSB0\n"));
        assert!(transcript.ends_with(concat!(
            "SUMMARY\n",
            "-------\n",
            "test_dump_memory_data:     Success\n",
            "test_dump_memory_user:     Success\n",
            "test_dump_memory_dives:    Success\n",
        )));
    }

    #[test]
    fn test_open_failures_still_summarize() {
        let dir = tempfile::tempdir().unwrap();
        let harness = Harness::new(
            "/nonexistent",
            dir.path().join("data.dmp"),
            dir.path().join("user.dmp"),
        );
        let driver = ScriptedDriver::new(Script { open: Some(Status::IO), ..Script::default() });

        let (summary, _) = run(&driver, &harness);

        assert_eq!(summary.statuses(), vec![Status::IO; 3]);
        assert_eq!(driver.calls(), vec!["open"; 3]);
        let expected = [
            "test_dump_memory_data:     Input/output error",
            "test_dump_memory_user:     Input/output error",
            "test_dump_memory_dives:    Input/output error",
        ];
        assert_eq!(summary.lines(), expected);
    }

    #[test]
    fn test_failed_scenario_does_not_affect_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let harness = Harness::new(
            "/dev/ttyS0",
            dir.path().join("data.dmp"),
            dir.path().join("user.dmp"),
        );
        let driver = ScriptedDriver::new(Script {
            transfer: Some(Status::Unsupported),
            ..Script::default()
        });

        let (summary, _) = run(&driver, &harness);

        assert_eq!(summary.statuses(), vec![Status::Unsupported; 3]);
        assert_eq!(driver.calls().iter().filter(|&&call| call == "close").count(), 3);
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_summary_renders_unknown_status() {
        let summary = Summary {
            outcomes: vec![Outcome {
                name: "test_dump_memory_dives",
                status: Status::Unknown(12),
            }],
        };
        assert_eq!(summary.lines(), vec!["test_dump_memory_dives:    Unknown error"]);
    }
}
