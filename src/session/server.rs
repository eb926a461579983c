//! Line-delimited JSON message loop over stdio
//!
//! Reads one inbound message per line, hands it to the session
//! controller, and writes each outbound message as one JSON line. No
//! single message is fatal: malformed input and lookup failures are
//! answered with an `error` message and the loop keeps going.

use super::controller::Session;
use super::messages::Outbound;
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Write};
use tracing::{debug, error, info};

pub struct MessageServer {
    session: Session,
}

impl MessageServer {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Handle one raw input line, never failing the loop for bad input
    pub fn handle_line(&mut self, line: &str) -> Vec<Outbound> {
        let msg = match serde_json::from_str(line) {
            Ok(msg) => msg,
            Err(e) => {
                error!("unsupported message: {e}");
                return vec![Outbound::Error {
                    error: format!("unsupported message: {e}"),
                }];
            }
        };
        match self.session.handle(msg) {
            Ok(out) => out,
            Err(e) => {
                error!("failed to handle message: {e:#}");
                vec![Outbound::Error {
                    error: e.to_string(),
                }]
            }
        }
    }

    /// Run the loop until stdin closes
    pub fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        info!("compcensus session started");

        for line in reader.lines() {
            let line = line.context("Failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            debug!("received: {line}");

            for outbound in self.handle_line(&line) {
                let serialized = serde_json::to_string(&outbound)?;
                debug!("sending: {serialized}");
                writeln!(stdout, "{serialized}")?;
            }
            stdout.flush()?;
        }

        info!("input closed, session ending");
        Ok(())
    }
}
