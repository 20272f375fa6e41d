//! JSON-lines signal streams.
//!
//! One JSON object per line in, one JSON object per emitted signal out.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use block_core::{Block, Signal};
use tracing::{debug, info};
use uuid_block::{UuidBlock, UuidBlockConfig};

/// Read every signal from `reader`, skipping blank lines.
///
/// # Errors
///
/// Fails on I/O errors, or on the first line that is not a JSON object,
/// naming its line number.
pub fn read_signals<R: BufRead>(reader: R) -> Result<Vec<Signal>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(text) if text.trim().is_empty() => None,
            other => Some((index + 1, other)),
        })
        .map(|(line_no, line)| {
            let text = line.with_context(|| format!("failed to read line {line_no}"))?;
            Signal::from_json_str(&text).with_context(|| format!("line {line_no}: invalid signal"))
        })
        .collect()
}

/// Write each signal as one line of JSON.
///
/// # Errors
///
/// Fails on I/O or serialization errors.
pub fn write_signals<W: Write>(mut writer: W, signals: &[Signal]) -> Result<()> {
    for signal in signals {
        serde_json::to_writer(&mut writer, &signal.to_json())
            .context("failed to serialize signal")?;
        writeln!(writer).context("failed to write output")?;
    }
    writer.flush().context("failed to flush output")
}

/// Run one UUID block over the whole input and write what it emits.
///
/// Returns the number of signals written.
///
/// # Errors
///
/// Fails if the block does not start, the input is malformed, processing
/// hits a fatal error, or the output cannot be written.
pub fn run<R: BufRead, W: Write>(config: UuidBlockConfig, reader: R, writer: W) -> Result<usize> {
    let mut block = UuidBlock::new(config);
    block.start().context("failed to start block")?;

    let signals = read_signals(reader)?;
    debug!(count = signals.len(), "read signals");

    let emitted = block
        .process_signals(&signals)
        .with_context(|| format!("block '{}' failed", block.name()))?;
    block.stop().context("failed to stop block")?;

    write_signals(writer, &emitted)?;
    info!(
        received = signals.len(),
        emitted = emitted.len(),
        "stream processed"
    );
    Ok(emitted.len())
}
