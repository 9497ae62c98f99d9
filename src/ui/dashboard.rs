use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::model::filter::{CategoryTab, TimeWindow, TokenFilters};

pub struct StatusBar<'a> {
    pub filters: TokenFilters,
    pub fetch_label: &'a str,
    pub source_label: &'a str,
    pub api_listening: bool,
    pub update_count: u64,
    pub tracked: usize,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fetch_color = match self.fetch_label {
            "LIVE" => Color::Green,
            "LOADING" => Color::Yellow,
            "ERROR" => Color::Red,
            _ => Color::DarkGray,
        };
        let api_status = if self.api_listening {
            Span::styled("API ON", Style::default().fg(Color::Green))
        } else {
            Span::styled("API OFF", Style::default().fg(Color::DarkGray))
        };

        let line = Line::from(vec![
            Span::styled(
                " token-pulse ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} {}", self.filters.tab, self.filters.time),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.fetch_label,
                Style::default().fg(fetch_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("tokens: {}  updates: {}", self.tracked, self.update_count),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("src: {}", self.source_label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            api_status,
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Category tabs on the left, time windows on the right of the same row.
pub struct FilterBar {
    pub filters: TokenFilters,
}

impl Widget for FilterBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
        let idle = Style::default().fg(Color::Gray);

        let mut spans = vec![Span::raw(" ")];
        for tab in CategoryTab::ALL {
            let style = if tab == self.filters.tab { active } else { idle };
            spans.push(Span::styled(format!(" {} ", tab.label()), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("   ", idle));
        for window in TimeWindow::ALL {
            let style = if window == self.filters.time { active } else { idle };
            spans.push(Span::styled(format!(" {} ", window.label()), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(" Filter ", Style::default().fg(Color::Gray).bg(Color::Black)));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" System Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner_height = block.inner(area).height as usize;

        let visible: Vec<Line> = self
            .messages
            .iter()
            .rev()
            .take(inner_height)
            .rev()
            .map(|msg| {
                let color = if msg.contains("[ERR]") {
                    Color::Red
                } else if msg.contains("[WARN]") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
            })
            .collect();

        Paragraph::new(visible).block(block).render(area, buf);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" [Q]", Style::default().fg(Color::Yellow)),
            Span::styled("uit  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[←/→]", Style::default().fg(Color::Yellow)),
            Span::styled(" tab  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[T]", Style::default().fg(Color::Yellow)),
            Span::styled("ime  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[↑/↓]", Style::default().fg(Color::Yellow)),
            Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[B]", Style::default().fg(Color::Yellow)),
            Span::styled("uy  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[R]", Style::default().fg(Color::Yellow)),
            Span::styled("eload", Style::default().fg(Color::DarkGray)),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
