/// Inputs to the host loop. Produced by the ticker, the console reader and
/// the signal watcher; consumed by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Wall-clock poll (once a second)
    Tick,

    /// User asked for an immediate refresh
    Refresh,

    /// Toggle the auto-refresh timer
    SetAutoRefresh(bool),

    /// Change the auto-refresh interval (seconds)
    SetInterval(u32),

    /// Print current refresh settings and data
    Status,

    /// Ctrl+C or `quit`
    Shutdown,
}

/// Parse one console line into an event.
///
/// Grammar: `refresh`, `auto on|off`, `interval <secs>`, `status`,
/// `quit`/`exit`. Anything else yields None and the caller prints a hint.
pub fn parse_command(line: &str) -> Option<Event> {
    let mut words = line.split_whitespace();
    match (words.next()?, words.next()) {
        ("refresh", None) => Some(Event::Refresh),
        ("auto", Some("on")) => Some(Event::SetAutoRefresh(true)),
        ("auto", Some("off")) => Some(Event::SetAutoRefresh(false)),
        ("interval", Some(secs)) => secs.parse().ok().map(Event::SetInterval),
        ("status", None) => Some(Event::Status),
        ("quit" | "exit", None) => Some(Event::Shutdown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(parse_command("refresh"), Some(Event::Refresh));
        assert_eq!(parse_command("auto on"), Some(Event::SetAutoRefresh(true)));
        assert_eq!(parse_command("auto off"), Some(Event::SetAutoRefresh(false)));
        assert_eq!(parse_command("interval 30"), Some(Event::SetInterval(30)));
        assert_eq!(parse_command("status"), Some(Event::Status));
        assert_eq!(parse_command("quit"), Some(Event::Shutdown));
        assert_eq!(parse_command("exit"), Some(Event::Shutdown));
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        assert_eq!(parse_command("  refresh  "), Some(Event::Refresh));
        assert_eq!(parse_command("auto   on"), Some(Event::SetAutoRefresh(true)));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("banana"), None);
        assert_eq!(parse_command("auto maybe"), None);
        assert_eq!(parse_command("interval soon"), None);
        assert_eq!(parse_command("refresh now please"), None);
    }
}
