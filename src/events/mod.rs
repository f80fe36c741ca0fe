pub mod keyboard;

use std::io::BufRead;

use crossbeam_channel::Receiver;

pub use keyboard::{command_for_key, parse_command, HostCommand};

/// Read commands from stdin on a background thread.
///
/// The thread exits when stdin closes or the receiver is dropped.
pub fn spawn_stdin_reader() -> Receiver<HostCommand> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => log::warn!("[keys] unknown command: {:?}", line.trim()),
            }
        }
    });
    rx
}
