use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::LoadStatus;

pub fn draw(frame: &mut Frame, app: &App) {
    // Main horizontal split: article list left, details right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query + preferences
            Constraint::Min(0),    // Article list
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Article title
            Constraint::Min(0),    // Details
            Constraint::Length(1), // Link hint
        ])
        .split(main_chunks[1]);

    render_header(frame, app, left_chunks[0]);
    render_article_list(frame, app, left_chunks[1]);
    render_left_status(frame, app, left_chunks[2]);

    render_article_title(frame, app, right_chunks[0]);
    render_details(frame, app, right_chunks[1]);
    render_right_status(frame, app, right_chunks[2]);

    if app.search_input_active {
        render_search_input(frame, app);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.query.as_deref() {
        Some(q) => format!(" News: \"{q}\" "),
        None => " News ".to_string(),
    };
    let prefs = format!(
        " {} stories | order: {} | section: {} | max: {}",
        app.articles.len(),
        app.config.order_by,
        app.config.section,
        app.config.max_results
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(prefs).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_article_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    if app.articles.is_empty() {
        let paragraph = Paragraph::new(app.empty_message())
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|article| {
            let mut spans = Vec::new();
            if !article.section_name.is_empty() {
                spans.push(Span::styled(
                    format!("[{}] ", article.section_name),
                    Style::default().fg(Color::Blue),
                ));
            }
            spans.push(Span::styled(
                article.title.as_str(),
                Style::default().fg(Color::White),
            ));

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_left_status(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.refresh.is_active() {
        "Refreshing...".to_string()
    } else if let Some(message) = &app.status_message {
        message.clone()
    } else if app.load_status == LoadStatus::Loading {
        "Loading...".to_string()
    } else {
        "/:search  r:refresh  o:open  O/S/N:prefs  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_article_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .selected_article()
        .map(|a| a.title.as_str())
        .unwrap_or("No article selected");

    let block = Block::default()
        .title(" Article ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(title)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let Some(article) = app.selected_article() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let width = block.inner(area).width as usize;

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Section: ", label),
            Span::raw(article.section_name.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Author:  ", label),
            Span::raw(article.author.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Date:    ", label),
            Span::raw(article.display_date()),
        ]),
        Line::from(""),
    ];
    lines.extend(
        article
            .summary_text(width)
            .lines()
            .map(|l| Line::from(l.to_string())),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_right_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.selected_article() {
        Some(article) if article.has_link() => article.url.clone(),
        Some(_) => "No link available".to_string(),
        None => String::new(),
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_search_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.area());

    let block = Block::default()
        .title(" Search news (empty for latest) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let input_text = format!("> {}_", app.search_input);
    let paragraph = Paragraph::new(input_text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = [
        "",
        " Navigation:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   g / G    Top / bottom",
        "",
        " Actions:",
        "   /        Search",
        "   r        Refresh",
        "   o        Open in browser",
        "",
        " Preferences:",
        "   O        Cycle order",
        "   S        Cycle section",
        "   N        Cycle max results",
        "",
        " General:",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
