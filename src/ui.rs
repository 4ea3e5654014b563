use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::{DirectoryListing, NavigationState, Volume},
    controller::{Status, StatusKind},
    fs_utils::format_gib,
    mode::Mode,
};

const MENU_HINT: &str = "↑/↓ select  Enter open  q quit";
const DIRECTORY_HINT: &str =
    "Enter open  Esc back  Ins new folder  Del delete  q quit";

pub fn ui<B: Backend>(f: &mut Frame<B>, state: &NavigationState, status: Option<&Status>) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let header = Paragraph::new(Spans::from(vec![
        Span::styled(
            "箪笥",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled("tansu", Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let hint = match state.mode() {
        Mode::RootMenu => {
            draw_root_menu(f, chunks[1], state);
            MENU_HINT
        }
        Mode::DirectoryView => {
            draw_directory(f, chunks[1], state);
            DIRECTORY_HINT
        }
    };

    if let Some(status) = status {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        };
        let line = Paragraph::new(Spans::from(Span::styled(
            status.text.as_str(),
            Style::default().fg(color),
        )));
        f.render_widget(line, chunks[2]);
    }

    let footer = Paragraph::new(Spans::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(footer, chunks[3]);
}

fn draw_root_menu<B: Backend>(f: &mut Frame<B>, area: Rect, state: &NavigationState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let items: Vec<ListItem> = state
        .volumes()
        .iter()
        .map(|volume| ListItem::new(volume.mount_point.display().to_string()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Volumes "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");
    let mut list_state = ListState::default();
    if !state.volumes().is_empty() {
        list_state.select(Some(state.selected()));
    }
    f.render_stateful_widget(list, columns[0], &mut list_state);

    let details = state
        .selected_volume()
        .map(volume_details)
        .unwrap_or_default();
    let info = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title(" Volume info "))
        .wrap(Wrap { trim: true });
    f.render_widget(info, columns[1]);
}

fn volume_details(volume: &Volume) -> Vec<Spans<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let row = |name: &'static str, value: String| {
        Spans::from(vec![Span::styled(format!("{name:<8}"), label), Span::raw(value)])
    };
    let mut rows = vec![row("Name", volume.mount_point.display().to_string())];
    if !volume.label.is_empty() {
        rows.push(row("Label", volume.label.clone()));
    }
    if !volume.kind.is_empty() {
        rows.push(row("Type", volume.kind.clone()));
    }
    if !volume.file_system.is_empty() {
        rows.push(row("FS", volume.file_system.clone()));
    }
    if volume.total_space > 0 {
        rows.push(row("Total", format_gib(volume.total_space)));
        rows.push(row("Free", format_gib(volume.available_space)));
    }
    rows
}

fn draw_directory<B: Backend>(f: &mut Frame<B>, area: Rect, state: &NavigationState) {
    let Some(listing) = state.directory() else {
        return;
    };
    let path = state
        .current_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let title = format!(" {} ", truncate_left(&path, area.width.saturating_sub(4) as usize));
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));

    if listing.is_empty() {
        let empty = Paragraph::new(Spans::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(listing_items(listing))
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected()));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Folders first, then files, in flat-index order.
fn listing_items(listing: &DirectoryListing) -> Vec<ListItem<'_>> {
    let folders = listing.subdirs.iter().map(|entry| {
        ListItem::new(Spans::from(vec![
            Span::styled("[DIR]  ", Style::default().fg(Color::Blue)),
            Span::styled(
                entry.name.as_str(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
        ]))
    });
    let files = listing.files.iter().map(|entry| {
        let style = if entry.name.starts_with('.') {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        ListItem::new(Spans::from(vec![
            Span::raw("[FILE] "),
            Span::styled(entry.name.as_str(), style),
        ]))
    });
    folders.chain(files).collect()
}

/// Full-screen text prompt used for folder names.
pub fn draw_prompt<B: Backend>(f: &mut Frame<B>, prompt: &str, buffer: &str) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(size);
    let block = Block::default().borders(Borders::ALL).title(prompt);
    let text = Spans::from(vec![
        Span::raw(buffer),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    f.render_widget(Paragraph::new(text).block(block), chunks[0]);
    let hint = Paragraph::new(Spans::from(Span::styled(
        "Enter create  Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hint, chunks[1]);
}

pub fn draw_popup<B: Backend>(f: &mut Frame<B>, title: &str, message: &str) {
    let popup = centered_rect(60, 30, f.size());
    let block = Block::default().title(title).borders(Borders::ALL);
    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Keep the tail of `text` so it fits in `width` columns.
fn truncate_left(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut start = text.len();
    for (i, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start = i;
    }
    format!("…{}", &text[start..])
}

/// Middle `percent_x` by `percent_y` of `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical_chunks[1]);
    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Entry;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol.as_str()).collect()
    }

    #[test]
    fn truncate_keeps_tail() {
        assert_eq!(truncate_left("/short", 20), "/short");
        assert_eq!(truncate_left("/very/long/path", 6), "…/path");
    }

    #[test]
    fn directory_view_lists_folders_before_files() {
        let mut state = NavigationState::new(Vec::new());
        let entry = |name: &str| Entry {
            name: name.to_string(),
            path: PathBuf::from("/p").join(name),
        };
        state.show_directory(
            PathBuf::from("/p"),
            DirectoryListing {
                subdirs: vec![entry("zdir")],
                files: vec![entry("afile")],
            },
        );
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| ui(f, &state, None)).unwrap();

        let text = buffer_text(&terminal);
        let dir_at = text.find("zdir").unwrap();
        let file_at = text.find("afile").unwrap();
        assert!(dir_at < file_at);
        assert!(text.contains("/p"));
    }

    #[test]
    fn root_menu_shows_volumes_and_status() {
        let state = NavigationState::new(vec![Volume::bare("C:"), Volume::bare("D:")]);
        let status = Status {
            kind: StatusKind::Error,
            text: "cannot read D:".to_string(),
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| ui(f, &state, Some(&status))).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Volumes"));
        assert!(text.contains("C:"));
        assert!(text.contains("cannot read D:"));
    }
}
