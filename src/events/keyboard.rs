use crate::constants::SEEK_STEP_SEC;

/// Raw transport commands a host can feed into the frame loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostCommand {
    TogglePause,
    SeekBy(f64),
    SeekTo(f64),
    SetSensitivity(f32),
    Quit,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<HostCommand> {
    match key {
        " " | "Space" | "space" | "p" | "P" => Some(HostCommand::TogglePause),
        "ArrowRight" | "+" | "=" => Some(HostCommand::SeekBy(SEEK_STEP_SEC)),
        "ArrowLeft" | "-" | "_" => Some(HostCommand::SeekBy(-SEEK_STEP_SEC)),
        "Home" | "0" => Some(HostCommand::SeekTo(0.0)),
        "q" | "Q" | "Escape" => Some(HostCommand::Quit),
        _ => None,
    }
}

/// Parse one line typed on stdin.
///
/// An empty line (just Enter) toggles pause. Otherwise the line is either a
/// single key (see `command_for_key`) or `seek <sec>` / `sens <value>`.
pub fn parse_command(line: &str) -> Option<HostCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Some(HostCommand::TogglePause);
    }
    let mut parts = trimmed.split_whitespace();
    let head = parts.next()?;
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }
    match (head, arg) {
        ("seek", Some(v)) => v
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .map(HostCommand::SeekTo),
        ("sens" | "sensitivity", Some(v)) => v
            .parse::<f32>()
            .ok()
            .filter(|s| s.is_finite())
            .map(HostCommand::SetSensitivity),
        ("pause" | "play", None) => Some(HostCommand::TogglePause),
        ("quit" | "exit", None) => Some(HostCommand::Quit),
        (key, None) => command_for_key(key),
        _ => None,
    }
}
