use crate::app::AppState;
use crate::theme;
use netpulse::{ConnectivityStatus, WifiSignalLevel};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(5), // status lines
        Constraint::Fill(1),   // access points
        Constraint::Length(1), // help bar
    ])
    .split(area);

    render_title(frame, layout[0], state);
    render_status(frame, layout[1], state);
    render_access_points(frame, layout[2], state);
    render_help(frame, layout[3]);
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState) {
    let observing = if state.observing {
        Span::styled(" observing ", Style::default().fg(theme::GOOD))
    } else {
        Span::styled(" paused ", Style::default().fg(theme::WARN))
    };
    let title = Line::from(vec![
        Span::styled("netpulse", Style::default().fg(theme::ACCENT).bold()),
        Span::raw(" | network state |"),
        observing,
        Span::styled(
            format!("| {} events", state.events_seen),
            Style::default().fg(theme::DIMMED),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let connectivity_style = match state.connectivity {
        ConnectivityStatus::WifiConnected => Style::default().fg(theme::GOOD),
        ConnectivityStatus::MobileConnected => Style::default().fg(theme::WARN),
        ConnectivityStatus::Offline => Style::default().fg(theme::BAD),
        ConnectivityStatus::Unknown => Style::default().fg(theme::DIMMED),
    };

    let internet = match state.internet {
        Some(true) => Span::styled("reachable", Style::default().fg(theme::GOOD)),
        Some(false) => Span::styled("unreachable", Style::default().fg(theme::BAD)),
        None => Span::styled("unknown", Style::default().fg(theme::DIMMED)),
    };

    let shown = state.shown_signal();
    let signal_style = match shown {
        WifiSignalLevel::NoSignal => Style::default().fg(theme::BAD),
        WifiSignalLevel::Poor | WifiSignalLevel::Fair => Style::default().fg(theme::WARN),
        WifiSignalLevel::Good | WifiSignalLevel::Excellent => Style::default().fg(theme::GOOD),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("connectivity: "),
            Span::styled(state.connectivity.description(), connectivity_style),
        ]),
        Line::from(vec![Span::raw("internet:     "), internet]),
        Line::from(vec![
            Span::raw("wifi signal:  "),
            Span::styled(shown.description(), signal_style),
        ]),
    ];

    if let Some(error) = &state.last_error {
        lines.push(Line::from(Span::styled(
            format!("stream error: {error} (press s twice to re-subscribe)"),
            Style::default().fg(theme::BAD),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIMMED));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_access_points(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .access_points
        .iter()
        .map(|ap| {
            ListItem::new(Line::from(vec![
                Span::styled(ap.ssid.clone(), Style::default().fg(theme::FOREGROUND)),
                Span::styled(
                    format!("  {} dBm  {} MHz", ap.rssi_dbm, ap.frequency_mhz),
                    Style::default().fg(theme::DIMMED),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIMMED))
        .title(format!(" access points ({}) ", state.access_points.len()));
    frame.render_widget(List::new(items).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("[s]", Style::default().fg(theme::ACCENT)),
        Span::raw(" start/stop observing  "),
        Span::styled("[q]", Style::default().fg(theme::ACCENT)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(theme::DIMMED)),
        area,
    );
}
