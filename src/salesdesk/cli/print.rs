use colored::Colorize;
use salesdesk::api::{CmdMessage, MessageLevel, RecordDetail};
use salesdesk::collection::PageTable;
use salesdesk::model::SelectOption;
use salesdesk::pagination::PageView;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 32;
const COLUMN_GAP: &str = "  ";

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

/// Field errors of a rejected form, one per line, on stderr.
pub fn print_rejections(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("  {} {}", "✗".red(), message.content);
    }
}

pub fn print_table(table: &PageTable) {
    if table.rows.is_empty() {
        return;
    }

    let widths = column_widths(table);
    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(title, width)| pad_to_width(title, *width))
        .collect();
    println!("{}", header.join(COLUMN_GAP).bold());

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_to_width(&truncate_to_width(cell, *width), *width))
            .collect();
        println!("{}", cells.join(COLUMN_GAP).trim_end());
    }

    println!();
    println!("{}", page_footer(&table.page));
}

pub fn print_record(record: &RecordDetail) {
    println!("{}", record.title.bold());
    let label_width = record
        .fields
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    for (label, value) in &record.fields {
        println!(
            "  {} {}",
            pad_to_width(&format!("{}:", label), label_width + 1).dimmed(),
            value
        );
    }
}

pub fn print_options(options: &[SelectOption]) {
    for option in options {
        println!("{:>5}  {}", option.key.to_string().yellow(), option.text);
    }
}

pub fn print_config(entries: &[(String, String)]) {
    for (key, value) in entries {
        println!("{} = {}", key, value);
    }
}

/// `Page 2 of 3   ‹ 1 [2] 3 ›`, with disabled arrows dimmed.
fn page_footer(page: &PageView) -> String {
    let arrow = |symbol: &str, disabled: bool| {
        if disabled {
            symbol.dimmed().to_string()
        } else {
            symbol.bold().to_string()
        }
    };
    let numbers: Vec<String> = page
        .page_numbers()
        .map(|n| {
            if n == page.current_page {
                format!("[{}]", n).yellow().to_string()
            } else {
                n.to_string()
            }
        })
        .collect();

    format!(
        "{}   {} {} {}",
        format!("Page {} of {}", page.current_page, page.page_count).dimmed(),
        arrow("‹", page.previous_disabled),
        numbers.join(" "),
        arrow("›", page.next_disabled)
    )
}

fn column_widths(table: &PageTable) -> Vec<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, title)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(title.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
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
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdesk::pagination::Pager;

    fn table(rows: Vec<Vec<&str>>) -> PageTable {
        PageTable {
            columns: &["Id", "Name"],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            page: Pager::default().view(1),
        }
    }

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate_to_width("Alice", 10), "Alice");
    }

    #[test]
    fn truncate_marks_cut_values() {
        assert_eq!(truncate_to_width("Alexandria", 6), "Alexa…");
        assert_eq!(truncate_to_width("東京都庁舎", 6), "東京…");
    }

    #[test]
    fn widths_fit_header_and_cells() {
        let widths = column_widths(&table(vec![vec!["12", "Bo"]]));
        assert_eq!(widths, vec![2, 4]);
    }

    #[test]
    fn widths_are_capped() {
        let long = "x".repeat(80);
        let widths = column_widths(&table(vec![vec!["1", long.as_str()]]));
        assert_eq!(widths[1], MAX_CELL_WIDTH);
    }
}
