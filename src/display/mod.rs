use crate::shared::Status;
use crate::simulator::Stimulus;
use crossbeam_channel as cbc;
use std::io::BufRead;

/***************************************/
/*          Console display            */
/***************************************/

/// Parses one console command into a stimulus.
///
/// Accepted: `floor <n>` (or just `<n>`), `open`, `close`, `block`, `quit`.
pub fn parse_command(line: &str) -> Option<Stimulus> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_lowercase();

    let stimulus = match command.as_str() {
        "floor" | "f" => Stimulus::FloorButton(words.next()?.parse().ok()?),
        "open" | "o" => Stimulus::OpenButton,
        "close" | "c" => Stimulus::CloseButton,
        "block" | "b" => Stimulus::Block,
        "quit" | "q" | "exit" => Stimulus::Terminate,
        other => Stimulus::FloorButton(other.parse().ok()?),
    };

    if words.next().is_some() {
        return None;
    }
    Some(stimulus)
}

/// Reads commands from `input` until end of input or `quit`, forwarding them
/// as stimuli. End of input also terminates the environment.
pub fn read_commands<R: BufRead>(input: R, stimulus_tx: cbc::Sender<Stimulus>) {
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("Failed to read command: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(stimulus) => {
                if stimulus_tx.send(stimulus).is_err() || stimulus == Stimulus::Terminate {
                    return;
                }
            }
            None => log::warn!(
                "Unknown command '{}', expected: floor <n> | open | close | block | quit",
                line.trim()
            ),
        }
    }

    let _ = stimulus_tx.send(Stimulus::Terminate);
}

/// Prints every status notification as a JSON line until the car stops.
pub fn render_status(status_rx: cbc::Receiver<Status>) {
    for status in status_rx.iter() {
        match serde_json::to_string(&status) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize status: {}", e),
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
