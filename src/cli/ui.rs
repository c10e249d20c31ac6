use crate::core::ResultItem;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).green().bold(),
        StyleType::Error => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Renders result items, one title line and one indented subtitle line each.
pub fn format_items(items: &[ResultItem]) -> String {
    items
        .iter()
        .map(|item| {
            let title_style = if item.action.is_some() {
                StyleType::Title
            } else {
                StyleType::Error
            };
            format!(
                "{}\n  {}",
                style_text(&item.title, title_style),
                style_text(&item.subtitle, StyleType::Subtle)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates a spinner shown on stderr while a lookup is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
