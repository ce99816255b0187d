use flashword_lib::reminders::PendingNotification;
use flashword_lib::words::WordEntry;

/// ANSI color codes
mod color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

fn paint(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", code, text, color::RESET)
    } else {
        text.to_string()
    }
}

/// One word as a card: headline, definition, tags
pub fn render_word(entry: &WordEntry, use_color: bool) -> String {
    let star = if entry.is_marked {
        format!(" {}", paint("\u{2605}", color::YELLOW, use_color))
    } else {
        String::new()
    };

    let mut lines = vec![format!("{}{}", paint(&entry.word, color::BOLD, use_color), star)];
    for line in entry.definition.lines() {
        lines.push(format!("  {}", line));
    }
    if !entry.tags.is_empty() {
        let tags = entry
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("  {}", paint(&tags, color::CYAN, use_color)));
    }
    lines.push(format!("  {}", paint(&entry.id.to_string(), color::GRAY, use_color)));
    lines.join("\n")
}

/// One pending reminder on a single line, in local time
pub fn render_pending(pending: &PendingNotification, use_color: bool) -> String {
    let at = pending
        .request
        .trigger_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M");
    format!(
        "{}  {}  {}",
        paint(&at.to_string(), color::DIM, use_color),
        pending.request.body,
        paint(&pending.request.data.url, color::GRAY, use_color)
    )
}
