use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tokio::sync::mpsc;

// Runs on its own OS thread so a blocked read never holds the runtime open at shutdown.
pub fn spawn_stdin_reader() -> Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("console-input".into())
        .spawn(move || forward_lines(io::stdin().lock(), &tx))
        .context("failed to start console input thread")?;
    Ok(rx)
}

/// Sends every line until EOF or a read error. Bytes that are not UTF-8 are
/// replaced rather than ending the stream.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::UnboundedSender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::warn!(target: "app", error = %err, "failed to read console input");
                break;
            }
        }
    }
}
