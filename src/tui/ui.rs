use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, Screen, View};
use crate::editor::DraftField;
use crate::models::{AiStatus, Article, Category};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Feed => draw_feed(frame, app),
        Screen::Admin => draw_admin(frame, app),
    }

    if let Some(mode) = app.input_mode {
        render_input(frame, mode.prompt(), &app.input);
    }

    if app.show_help {
        render_help(frame, app.screen);
    }
}

fn draw_feed(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs
            Constraint::Length(1), // Breaking ticker
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    // Main horizontal split: 1/3 left, 2/3 right
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(rows[2]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Headline
            Constraint::Min(0),    // Body
        ])
        .split(panes[1]);

    render_tabs(frame, app, rows[0]);
    render_ticker(frame, app, rows[1]);
    render_article_list(frame, app, panes[0]);
    render_headline(frame, app, right_chunks[0]);
    render_detail(frame, app, right_chunks[1]);
    render_status(frame, app, rows[3]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match &app.view {
        View::Category(category) => Category::TABS.iter().position(|c| c == category),
        _ => None,
    };

    let title = match &app.view {
        View::Category(_) => " বঙ্গ সংবাদ ".to_string(),
        other => format!(" বঙ্গ সংবাদ [{}] ", other.label()),
    };

    let tabs = Tabs::new(Category::TABS.iter().map(|c| c.label()))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_ticker(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.hero() {
        Some(hero) => Line::from(vec![
            Span::styled(
                " BREAKING ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(hero.headline.as_str(), Style::default().fg(Color::Red)),
        ]),
        None => Line::from(Span::styled(
            format!(" {} Stories", app.visible.len()),
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_article_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|article| {
            let marker = if article.sponsored() { "$ " } else { "  " };
            let place = article
                .location
                .as_deref()
                .unwrap_or(article.category.label());

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(format!("[{place}] "), Style::default().fg(Color::Blue)),
                Span::styled(article.headline.as_str(), Style::default().fg(Color::White)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let title = format!(" {} ", app.view.label());
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select((!app.visible.is_empty()).then_some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_headline(frame: &mut Frame, app: &App, area: Rect) {
    let headline = match (app.selected_article(), &app.view) {
        (Some(article), _) => article.headline.as_str(),
        (None, View::Bookmarks) => "No saved articles yet",
        (None, View::Search(_)) => "No results found",
        (None, View::Category(_)) => "No news in this category",
    };

    let block = Block::default()
        .title(" Article ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(headline)
        .block(block)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let Some(article) = app.selected_article() else {
        frame.render_widget(block, area);
        return;
    };

    let opened = app.opened_article().is_some();
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(meta_line(article), dim)),
        Line::from(engagement_line(app, article)),
        Line::default(),
    ];

    if opened {
        lines.extend(article.content.lines().map(Line::from));
    } else {
        lines.push(Line::from(article.preview_text.as_str()));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Press Enter to read more", dim)));
    }

    if let Some(affiliate) = &article.affiliate {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", affiliate.text),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::styled("  o: open link", dim),
        ]));
    }

    if opened {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Comments ({})", article.comments.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if article.comments.is_empty() {
            lines.push(Line::from(Span::styled("No comments yet. Be the first!", dim)));
        }
        for comment in &article.comments {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", comment.user), Style::default().fg(Color::Cyan)),
                Span::raw(comment.text.as_str()),
            ]));
        }

        let related = app.related();
        if !related.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Related News",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for item in &related {
                lines.push(Line::from(format!("• {}", item.headline)));
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn meta_line(article: &Article) -> String {
    let mut parts = vec![article.category.label().to_string()];
    if let Some(location) = &article.location {
        parts.push(location.clone());
    }
    parts.push(time_ago(article));
    if let Some(read_time) = &article.read_time {
        parts.push(read_time.clone());
    }
    if article.sponsored() {
        parts.push("Sponsored".to_string());
    }
    parts.join(" | ")
}

fn engagement_line(app: &App, article: &Article) -> Vec<Span<'static>> {
    let heart = if app.is_liked { "♥" } else { "♡" };
    let saved = if app.is_bookmarked { "🔖 Saved" } else { "" };
    vec![
        Span::styled(
            format!("{heart} {}  ", article.likes),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!("👁 {}  💬 {}  ", article.views, article.comments.len())),
        Span::styled(saved, Style::default().fg(Color::Yellow)),
    ]
}

fn time_ago(article: &Article) -> String {
    let Some(created) = article.created_at_utc() else {
        return String::new();
    };
    let minutes = (Utc::now() - created).num_minutes().max(0);
    match minutes {
        0 => "Just now".to_string(),
        1..=59 => format!("{minutes}m ago"),
        60..=1439 => format!("{}h ago", minutes / 60),
        _ => created.format("%d %b %Y").to_string(),
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.is_refreshing {
        "Refreshing news...".to_string()
    } else if let Some(message) = &app.status {
        message.clone()
    } else {
        "j/k:nav  Tab:category  /:search  l:like  s:save  c:comment  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

const DRAFT_FIELDS: [(char, DraftField); 8] = [
    ('t', DraftField::Topic),
    ('h', DraftField::Headline),
    ('x', DraftField::Content),
    ('p', DraftField::Preview),
    ('l', DraftField::Location),
    ('i', DraftField::ImageUrl),
    ('a', DraftField::AffiliateLink),
    ('b', DraftField::AffiliateText),
];

fn draw_admin(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Form and preview
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let model = app.ai_model.as_deref().unwrap_or("no model");
    let title = Paragraph::new(format!(" AI Drafting ({model})")).block(
        Block::default()
            .title(" Admin Dashboard ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(title, rows[0]);

    render_draft_form(frame, app, columns[0]);
    render_draft_preview(frame, app, columns[1]);

    let status = match (&app.status, app.ai_status) {
        (_, AiStatus::Working) => "⏳ Working...".to_string(),
        (Some(message), _) => message.clone(),
        (None, AiStatus::NoApiKey) => "⚠️  Claude API key not configured".to_string(),
        (None, AiStatus::Failed) => "❌ Failed".to_string(),
        (None, _) => "R:research  H:headline  C:clean  I:image  n:trending  P:publish  Esc:exit"
            .to_string(),
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

fn render_draft_form(frame: &mut Frame, app: &App, area: Rect) {
    let draft = &app.editor.draft;
    let key_style = Style::default().fg(Color::Cyan);

    let mut lines: Vec<Line> = DRAFT_FIELDS
        .iter()
        .map(|(key, field)| {
            let value = draft.field(*field);
            let shown: String = value.chars().take(60).collect();
            Line::from(vec![
                Span::styled(format!("{key} "), key_style),
                Span::styled(
                    format!("{}: ", field.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(shown),
            ])
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled("g ", key_style),
        Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(draft.category.label()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("s ", key_style),
        Span::styled("Sponsored: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(if draft.sponsored { "yes" } else { "no" }),
    ]));

    if !app.trending_topics.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Trending now",
            Style::default().fg(Color::Yellow),
        )));
        for (i, topic) in app.trending_topics.iter().take(3).enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", i + 1), key_style),
                Span::raw(topic.as_str()),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Draft ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_draft_preview(frame: &mut Frame, app: &App, area: Rect) {
    let draft = &app.editor.draft;
    let mut lines = vec![Line::from(Span::styled(
        draft.headline.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::default());
    lines.extend(draft.content.lines().map(Line::from));

    if !draft.sources.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Sources",
            Style::default().fg(Color::Green),
        )));
        for source in &draft.sources {
            lines.push(Line::from(Span::styled(
                source.as_str(),
                Style::default().fg(Color::Blue),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, prompt: &str, input: &str) {
    let area = centered_rect(60, 20, frame.area());

    let block = Block::default()
        .title(format!(" {prompt} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    // Clear the area first
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let input_text = format!("> {input}_");
    let paragraph = Paragraph::new(input_text)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame, screen: Screen) {
    let area = centered_rect(50, 70, frame.area());

    let help_text: &[&str] = match screen {
        Screen::Feed => &[
            "",
            " Navigation:",
            "   j / ↓    Move down",
            "   k / ↑    Move up",
            "   Enter    Read article",
            "   Esc      Back to preview",
            "   Tab / f  Next category",
            "   B        Bookmarks",
            "   /        Search",
            "",
            " Actions:",
            "   l        Like / unlike",
            "   s        Save / unsave",
            "   c        Comment",
            "   o        Open link",
            "   r        Refresh news",
            "   A        Admin",
            "",
            " General:",
            "   ?        Toggle this help",
            "   q        Quit",
            "",
            " Press any key to close",
        ],
        Screen::Admin => &[
            "",
            " Fields:",
            "   t h x p  Topic, headline, content, preview",
            "   l i a b  Location, image, affiliate link/text",
            "   g        Cycle category",
            "   s        Toggle sponsored",
            "",
            " AI:",
            "   R        Research topic and draft",
            "   H        Generate headline",
            "   C        Clean text",
            "   I        Generate image",
            "   n        Trending topics (1-3 to use)",
            "",
            "   P        Publish",
            "   Esc      Leave admin",
            "",
            " Press any key to close",
        ],
    };

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
