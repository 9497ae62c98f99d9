use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};

use crate::flash::{Direction, FlashBoard, FlashField, FlashState};
use crate::format::{percent, signed_percent, usd};
use crate::model::token::{DynamicRecord, TokenRecord};
use crate::store::Snapshot;

use super::sparkline::{sparkline, trend_color};

pub const HEADERS: [&str; 7] = [
    "Pair Info",
    "Market Cap",
    "Liquidity",
    "Volume",
    "TXNS",
    "Token Info",
    "Action",
];

const SKELETON_ROWS: usize = 5;
const ROW_HEIGHT: u16 = 3;

fn widths() -> [Constraint; 7] {
    [
        Constraint::Min(26),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(18),
        Constraint::Length(8),
    ]
}

fn header_row() -> Row<'static> {
    Row::new(HEADERS.iter().map(|h| {
        Cell::from(h.to_ascii_uppercase()).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
    }))
}

fn block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub fn flash_style(state: FlashState) -> Style {
    match state {
        FlashState::Flash(Direction::Up) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        FlashState::Flash(Direction::Down) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        FlashState::Neutral => Style::default().fg(Color::White),
    }
}

fn signed_color(v: f64) -> Color {
    if v > 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

pub struct TokenTable<'a> {
    tokens: &'a [TokenRecord],
    snapshot: &'a Snapshot,
    flashes: &'a FlashBoard,
    now: Instant,
    selected: Option<usize>,
}

impl<'a> TokenTable<'a> {
    pub fn new(
        tokens: &'a [TokenRecord],
        snapshot: &'a Snapshot,
        flashes: &'a FlashBoard,
        now: Instant,
    ) -> Self {
        Self {
            tokens,
            snapshot,
            flashes,
            now,
            selected: None,
        }
    }

    pub fn selected(mut self, idx: Option<usize>) -> Self {
        self.selected = idx;
        self
    }

    fn row(&self, token: &'a TokenRecord) -> Row<'a> {
        let live = self
            .snapshot
            .get(&token.id)
            .cloned()
            .unwrap_or_else(|| DynamicRecord::from_token(token));
        let flash = |field| flash_style(self.flashes.state(&token.id, field, self.now));

        let mut socials = Vec::new();
        if token.socials.telegram.is_some() {
            socials.push("TG");
        }
        if token.socials.twitter.is_some() {
            socials.push("X");
        }
        if token.socials.website.is_some() {
            socials.push("WEB");
        }
        socials.push("CA");

        let pair = Text::from(vec![
            Line::from(vec![
                Span::styled(
                    token.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(token.ticker.clone(), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled(token.age.clone(), Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                socials.join(" "),
                Style::default().fg(Color::DarkGray),
            )),
        ]);

        let market_cap = Text::from(vec![
            Line::from(Span::styled(usd(live.market_cap), flash(FlashField::MarketCap))),
            Line::from(Span::styled(
                signed_percent(token.market_cap.change_percent),
                Style::default().fg(signed_color(token.market_cap.change_percent)),
            )),
            Line::from(Span::styled(
                sparkline(&live.sparkline),
                Style::default().fg(trend_color(live.is_trending_up())),
            )),
        ]);

        let txns = Text::from(vec![
            Line::from(Span::styled(
                token.transactions.total.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(vec![
                Span::styled(
                    token.transactions.buys.to_string(),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(" / ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    token.transactions.sells.to_string(),
                    Style::default().fg(Color::Red),
                ),
            ]),
        ]);

        let info = &token.token_info;
        let info_style = Style::default().fg(Color::Gray);
        let token_info = Text::from(vec![
            Line::from(Span::styled(
                format!("A {:<8} H {}", percent(info.metric_a), info.holder_count),
                info_style,
            )),
            Line::from(Span::styled(
                format!("B {:<8} {}", percent(info.metric_b), info.status),
                info_style,
            )),
            Line::from(Span::styled(
                format!("T {}", percent(info.team_allocation)),
                info_style,
            )),
        ]);

        Row::new(vec![
            Cell::from(pair),
            Cell::from(market_cap),
            Cell::from(Span::styled(usd(live.liquidity), flash(FlashField::Liquidity))),
            Cell::from(Span::styled(usd(live.volume), flash(FlashField::Volume))),
            Cell::from(txns),
            Cell::from(token_info),
            Cell::from(Span::styled(
                "[ Buy ]",
                Style::default().fg(Color::White).bg(Color::Blue),
            )),
        ])
        .height(ROW_HEIGHT)
    }
}

impl Widget for TokenTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows: Vec<Row> = self.tokens.iter().map(|t| self.row(t)).collect();
        let table = Table::new(rows, widths())
            .header(header_row())
            .block(block(" Pulse "))
            .column_spacing(1)
            .row_highlight_style(Style::default().bg(Color::Rgb(30, 34, 45)));
        let mut state = TableState::default().with_selected(self.selected);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

/// Placeholder rows shown while the listing is in flight.
pub struct SkeletonTable;

impl Widget for SkeletonTable {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bar = |n: usize| Span::styled("░".repeat(n), Style::default().fg(Color::DarkGray));
        let rows: Vec<Row> = (0..SKELETON_ROWS)
            .map(|_| {
                Row::new(vec![
                    Cell::from(Text::from(vec![Line::from(bar(14)), Line::from(bar(8))])),
                    Cell::from(Text::from(vec![Line::from(bar(8)), Line::from(bar(6))])),
                    Cell::from(bar(7)),
                    Cell::from(bar(7)),
                    Cell::from(bar(5)),
                    Cell::from(Text::from(vec![Line::from(bar(14)), Line::from(bar(14))])),
                    Cell::from(bar(6)),
                ])
                .height(ROW_HEIGHT)
            })
            .collect();
        let table = Table::new(rows, widths())
            .header(header_row())
            .block(block(" Pulse (loading) "))
            .column_spacing(1);
        Widget::render(table, area, buf);
    }
}

pub struct FetchErrorPanel<'a> {
    pub message: &'a str,
}

impl Widget for FetchErrorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                "Failed to load tokens",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.message, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("[R]", Style::default().fg(Color::Yellow)),
                Span::styled("eload", Style::default().fg(Color::DarkGray)),
            ]),
        ];
        Paragraph::new(lines)
            .block(block(" Pulse "))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

pub struct EmptyListingPanel;

impl Widget for EmptyListingPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(Span::styled(
            "No tokens listed for this filter.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block(" Pulse "))
        .render(area, buf);
    }
}
