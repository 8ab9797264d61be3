use chrono::{DateTime, Utc};
use colored::Colorize;
use thoughts::api::{CmdMessage, MessageLevel};
use thoughts::config::ThoughtsConfig;
use thoughts::index::DisplayThought;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const TAGS_WIDTH: usize = 24;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_full_thoughts(thoughts: &[DisplayThought]) {
    for (i, dt) in thoughts.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}",
            dt.index.to_string().yellow(),
            dt.thought.title.bold()
        );
        println!("--------------------------------");
        println!("{}", dt.thought.body.trim());
        if !dt.thought.tags.is_empty() {
            println!();
            println!("{}", format_tags(&dt.thought.tags).cyan());
        }
    }
}

pub fn print_thoughts(thoughts: &[DisplayThought]) {
    if thoughts.is_empty() {
        println!("No thoughts found.");
        return;
    }

    for dt in thoughts {
        let idx_str = format!("{:>3}. ", dt.index);
        let tags = truncate_to_width(&format_tags(&dt.thought.tags), TAGS_WIDTH);
        let time_ago = format_time_ago(dt.thought.updated_at);

        let fixed = idx_str.width() + TAGS_WIDTH + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let line = preview(&dt.thought.title, &dt.thought.body);
        let shown = truncate_to_width(&line, available);
        let padding = available.saturating_sub(shown.width());
        let tag_padding = TAGS_WIDTH.saturating_sub(tags.width());

        println!(
            "{}{}{} {}{}{}",
            idx_str.yellow(),
            shown,
            " ".repeat(padding),
            tags.cyan(),
            " ".repeat(tag_padding),
            time_ago.dimmed()
        );
    }
}

pub fn print_tags(tags: &[String]) {
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }
    for tag in tags {
        println!("#{}", tag);
    }
}

pub fn print_config(config: &ThoughtsConfig) {
    for key in ThoughtsConfig::KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

fn preview(title: &str, body: &str) -> String {
    let body: String = body
        .trim()
        .chars()
        .take(60)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if body.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", title, body)
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
