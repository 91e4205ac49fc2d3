use crate::application::{App, CityView, Focus, PLACEHOLDER_LABEL};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub const LOADING_TEXT: &str = "Carregando cidades...";
const TRIGGER_LABEL: &str = "Ok";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    let dropdown_area = render_controls(f, app, chunks[1]);
    render_cities(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if app.dropdown_open {
        render_dropdown_popup(f, app, dropdown_area);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("ufcities - Estados e cidades do Brasil")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(title, area);
}

/// Draws the dropdown and the trigger; returns the dropdown's area so the
/// option popup can be anchored under it.
fn render_controls(f: &mut Frame, app: &App, area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(8)])
        .split(area);

    let focused = Style::default().fg(Color::Yellow);
    let selection = app
        .selected_state_name()
        .or(app.selected_state())
        .unwrap_or(PLACEHOLDER_LABEL);
    let selection_style = if app.selected_state().is_some() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let dropdown = Paragraph::new(Line::from(vec![
        Span::styled(selection, selection_style),
        Span::raw(" ▾"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Estado")
            .border_style(if app.focus == Focus::Dropdown {
                focused
            } else {
                Style::default()
            }),
    );
    f.render_widget(dropdown, chunks[0]);

    let trigger_style = if !app.can_confirm() {
        Style::default().fg(Color::DarkGray)
    } else if app.focus == Focus::Trigger {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let trigger = Paragraph::new(TRIGGER_LABEL)
        .alignment(Alignment::Center)
        .style(trigger_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if app.focus == Focus::Trigger {
                    focused
                } else {
                    Style::default()
                }),
        );
    f.render_widget(trigger, chunks[1]);

    chunks[0]
}

fn render_dropdown_popup(f: &mut Frame, app: &App, anchor: Rect) {
    let screen = f.area();
    let top = anchor.y.saturating_add(anchor.height);
    let options = app.options();
    let wanted = options.len() as u16 + 2;
    let popup_area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height: wanted.min(screen.height.saturating_sub(top)),
    };
    if popup_area.height < 3 {
        return;
    }

    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let style = if option.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(option.label).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Estados"))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.highlighted));

    f.render_widget(Clear, popup_area);
    f.render_stateful_widget(list, popup_area, &mut state);
}

fn render_cities(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    match app.city_view() {
        CityView::Loading => {
            let loading = Paragraph::new(LOADING_TEXT)
                .style(Style::default().fg(Color::Yellow))
                .block(block.title("Cidades"));
            f.render_widget(loading, area);
        }
        CityView::Cities(cities) => {
            let label = Style::default().add_modifier(Modifier::BOLD);
            let items: Vec<ListItem> = cities
                .iter()
                .skip(app.city_scroll)
                .map(|city| {
                    ListItem::new(Line::from(vec![
                        Span::styled("Cidade: ", label),
                        Span::raw(city.name.as_str()),
                        Span::raw("  "),
                        Span::styled("Microrregião: ", label),
                        Span::raw(city.micro_region_name()),
                    ]))
                })
                .collect();
            let block = block.title(format!("Cidades ({})", cities.len()));
            f.render_widget(List::new(items).block(block), area);
        }
        CityView::Empty => f.render_widget(block.title("Cidades"), area),
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.dropdown_open {
        "↑↓/jk: choose | Enter: select | Esc: close"
    } else {
        "Tab: switch control | Enter: open / confirm | o: Ok | ↑↓/PgUp/PgDn: scroll | q: quit"
    };

    let status = Paragraph::new(hints)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(if app.is_loading() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    f.render_widget(status, area);
}
