use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log output is stored instead of
/// printed to stderr.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// `io::Write` handle for the tracing subscriber that routes through the
/// buffer while the TUI owns the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrWriter;

impl Write for StderrWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut guard = buffer();
        if let Some(buf) = guard.as_mut() {
            let text = String::from_utf8_lossy(bytes);
            let line = text.trim_end_matches('\n');
            if !line.is_empty() {
                buf.push(line.to_string());
            }
            Ok(bytes.len())
        } else {
            drop(guard);
            io::stderr().write(bytes)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
