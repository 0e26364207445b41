//! Dashboard rendering: KPI row, tier filter, account table, bar chart.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};
use revenue_core::{
    report::format_currency,
    scoring::{HealthTier, ScoredAccount},
    summary::{tier_counts, TierFilter, TierTotal},
};

use super::{app::App, theme::Theme};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // KPIs
            Constraint::Length(3), // Filter
            Constraint::Min(8),    // Table + side panels
            Constraint::Length(2), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_kpis(f, chunks[1], app);
    render_filter(f, chunks[2], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[3]);

    let view = app.view();
    render_table(f, body[0], &view.rows, app.selected());

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[1]);

    render_chart(f, side[0], &view.breakdown);
    render_detail(f, side[1], app);
    render_footer(f, chunks[4], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Revenue Intelligence Dashboard", Theme::title()),
        Span::styled(" │ churn risk by account", Theme::muted()),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Theme::border()));

    f.render_widget(header, area);
}

fn render_kpis(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.portfolio().summary;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let kpis = [
        ("Total Revenue", format_currency(summary.total_revenue as f64)),
        ("Revenue At Risk", format_currency(summary.revenue_at_risk)),
        ("% Revenue At Risk", summary.percent_label()),
    ];

    for (cell, (label, value)) in cells.iter().zip(kpis) {
        let widget = Paragraph::new(vec![
            Line::from(Span::styled(label, Theme::muted())),
            Line::from(Span::styled(value, Theme::kpi_value())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Theme::border()));
        f.render_widget(widget, *cell);
    }
}

/// Tab title for a filter option, with the number of accounts it covers.
fn filter_title(position: usize, option: TierFilter, counts: &[(HealthTier, usize)], total: usize) -> String {
    let count = match option {
        TierFilter::All => total,
        TierFilter::Tier(tier) => counts
            .iter()
            .find(|(t, _)| *t == tier)
            .map_or(0, |(_, n)| *n),
    };
    format!("{position} {} ({count})", option.label())
}

fn render_filter(f: &mut Frame, area: Rect, app: &App) {
    let accounts = &app.portfolio().accounts;
    let counts = tier_counts(accounts);
    let titles: Vec<Line> = TierFilter::OPTIONS
        .iter()
        .enumerate()
        .map(|(i, option)| Line::from(filter_title(i + 1, *option, &counts, accounts.len())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.filter().index())
        .style(Theme::muted())
        .highlight_style(Theme::active_tab())
        .block(
            Block::default()
                .title(Span::styled(" Filter by Health Tier ", Theme::text()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    f.render_widget(tabs, area);
}

fn render_table(f: &mut Frame, area: Rect, rows: &[&ScoredAccount], selected: Option<usize>) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Account Overview ({}) ", rows.len()),
            Theme::text(),
        ))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if rows.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No accounts in this tier",
            Theme::muted(),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        "Company", "Revenue", "Engage", "Tickets", "Renewal", "Churn p", "At Risk $", "Tier", "Trend",
    ])
    .style(Theme::title());

    let body: Vec<Row> = rows
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.account.company.clone()),
                Cell::from(s.account.monthly_revenue.to_string()),
                Cell::from(s.account.engagement_score.to_string()),
                Cell::from(s.account.support_tickets.to_string()),
                Cell::from(s.account.days_to_renewal.to_string()),
                Cell::from(format!("{:.3}", s.churn_probability)),
                Cell::from(format!("{:.2}", s.revenue_at_risk)),
                Cell::from(s.health_tier.label()).style(Theme::tier(s.health_tier)),
                Cell::from(s.trend_status.label()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(13),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Theme::selected_row())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn render_chart(f: &mut Frame, area: Rect, breakdown: &[TierTotal]) {
    let block = Block::default()
        .title(Span::styled(" Revenue at Risk Distribution ", Theme::text()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if breakdown.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("No data", Theme::muted())))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|t| {
            Bar::default()
                .value(t.revenue_at_risk.round().max(0.0) as u64)
                .label(Line::from(t.tier.label()))
                .text_value(format_currency(t.revenue_at_risk))
                .style(Style::default().fg(Theme::tier_color(t.tier)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(11)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(" Selected Account ", Theme::text()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let Some(s) = app.selected_account() else {
        f.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let drivers = app.drivers(s);
    let a = &s.account;
    let lines = vec![
        Line::from(vec![
            Span::styled(a.company.clone(), Theme::title()),
            Span::styled(format!("  {}", a.contract_status), Theme::muted()),
        ]),
        Line::from(vec![
            Span::styled("Tier: ", Theme::muted()),
            Span::styled(s.health_tier.label(), Theme::tier(s.health_tier)),
            Span::styled(format!("   Trend: {}", s.trend_status), Theme::muted()),
        ]),
        Line::from(Span::styled(
            format!(
                "Engagement {} (prev {}, {:+})",
                a.engagement_score, a.prev_engagement_score, s.engagement_change
            ),
            Theme::text(),
        )),
        Line::from(Span::styled(
            format!("Churn p {:.3} → {} at risk", s.churn_probability, format_currency(s.revenue_at_risk)),
            Theme::text(),
        )),
        Line::from(Span::styled(
            format!(
                "Drivers: engagement {:.2} · support {:.2} · renewal {:.2}",
                drivers.engagement, drivers.support, drivers.renewal
            ),
            Theme::muted(),
        )),
        Line::from(vec![
            Span::styled("Primary driver: ", Theme::muted()),
            Span::styled(drivers.primary_driver(), Theme::kpi_value()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("[Tab/←→] ", Theme::key_hint()),
        Span::styled("Filter ", Theme::muted()),
        Span::styled("[1-4] ", Theme::key_hint()),
        Span::styled("Jump ", Theme::muted()),
        Span::styled("[↑↓] ", Theme::key_hint()),
        Span::styled("Select ", Theme::muted()),
        Span::styled("[e] ", Theme::key_hint()),
        Span::styled("Export CSV ", Theme::muted()),
        Span::styled("[q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::muted()),
    ];
    if let Some(status) = app.status() {
        spans.push(Span::styled(format!("  │ {status}"), Theme::text()));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_style(Theme::border()));
    f.render_widget(footer, area);
}
