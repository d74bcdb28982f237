//! UI rendering for the TUI.
//!
//! Handles layout and widget rendering using ratatui.

use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{
    AppMode, ChannelField, GeneratorField, PostField, TaskField, View,
};
use crate::model::Task;
use crate::schedule::{bucket_tasks, ScheduleBucket};
use crate::App;

/// Draw the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let banner_height = u16::from(!app.ai_available());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Header with tabs
            Constraint::Length(banner_height), // AI banner (when unconfigured)
            Constraint::Min(8),                // Main content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    if banner_height > 0 {
        draw_ai_banner(frame, app, chunks[1]);
    }

    match app.view {
        View::Dashboard => draw_dashboard(frame, app, chunks[2]),
        View::Tasks => draw_tasks(frame, app, chunks[2]),
        View::Schedule => draw_schedule(frame, app, chunks[2]),
        View::Channels => draw_channels(frame, app, chunks[2]),
        View::Posts => draw_posts(frame, app, chunks[2]),
        View::Generator => draw_generator(frame, app, chunks[2]),
    }

    draw_status_bar(frame, app, chunks[3]);

    match app.mode {
        AppMode::TaskForm => draw_task_form(frame, app),
        AppMode::ChannelForm => draw_channel_form(frame, app),
        AppMode::PostForm => draw_post_form(frame, app),
        AppMode::ConfirmDelete => draw_confirm_dialog(frame, app),
        AppMode::Help => draw_help_overlay(frame, app),
        AppMode::Normal | AppMode::Search => {}
    }
}

/// Draw the header with the app name and view tabs.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut spans = vec![Span::styled(
        " markhub ",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    )];
    for view in View::ALL {
        let style = if view == app.view {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_dim)
        };
        spans.push(Span::styled(format!("  {}  ", view.label()), style));
    }
    if app.ai_in_flight > 0 {
        spans.push(Span::styled(
            format!("  ({} AI request{} in flight)", app.ai_in_flight, plural(app.ai_in_flight)),
            Style::default().fg(theme.accent),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.border));
    frame.render_widget(header, area);
}

/// Persistent banner shown while the AI credential is absent.
fn draw_ai_banner(frame: &mut Frame, app: &App, area: Rect) {
    let banner = Paragraph::new(Line::from(Span::styled(
        " GEMINI_API_KEY is not configured. AI features are unavailable.",
        Style::default().fg(app.theme.warning),
    )));
    frame.render_widget(banner, area);
}

/// Dashboard: collection summaries and the nearest deadlines.
fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let tasks = app.session.tasks();
    let open = tasks.iter().filter(|t| t.status != crate::model::TaskStatus::Done).count();
    let board = bucket_tasks(tasks, Utc::now().date_naive());

    let summary_lines = vec![
        stat_line("Open tasks", open, theme.text),
        stat_line("Overdue", board.overdue.len(), theme.error),
        stat_line("Due today", board.today.len(), theme.warning),
        stat_line("Channels", app.session.channels().len(), theme.text),
        stat_line("Social posts", app.session.posts().len(), theme.text),
        stat_line("Generated pieces", app.session.generated().len(), theme.text),
    ];
    let summary = Paragraph::new(summary_lines).block(bordered_block("Overview", theme));
    frame.render_widget(summary, chunks[0]);

    let mut upcoming: Vec<Line> = Vec::new();
    for bucket in [ScheduleBucket::Overdue, ScheduleBucket::Today, ScheduleBucket::Tomorrow] {
        for task in board.bucket(bucket) {
            upcoming.push(Line::from(vec![
                Span::styled(
                    format!("{:<10}", bucket.label()),
                    Style::default().fg(match bucket {
                        ScheduleBucket::Overdue => theme.error,
                        ScheduleBucket::Today => theme.warning,
                        _ => theme.text_dim,
                    }),
                ),
                Span::styled(task.title.clone(), Style::default().fg(theme.text)),
            ]));
        }
    }
    if upcoming.is_empty() {
        upcoming.push(Line::from(Span::styled(
            "Nothing urgent. Nice.",
            Style::default().fg(theme.text_muted),
        )));
    }
    let deadlines = Paragraph::new(upcoming).block(bordered_block("Needs attention", theme));
    frame.render_widget(deadlines, chunks[1]);
}

/// Task manager: filter line, task list, and detail panel.
fn draw_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(chunks[0]);

    // Filter line
    let search_style = if app.mode == AppMode::Search {
        Style::default().fg(theme.primary)
    } else {
        Style::default().fg(theme.text_dim)
    };
    let mut filter_spans = vec![
        Span::styled(" / ", search_style),
        Span::styled(app.query.search.clone(), Style::default().fg(theme.text)),
    ];
    if app.mode == AppMode::Search {
        filter_spans.push(Span::styled("█", Style::default().fg(theme.primary)));
    }
    if let Some(priority) = app.query.priority {
        filter_spans.push(badge(format!(" priority:{} ", priority.label()), theme.accent));
    }
    if let Some(status) = app.query.status {
        filter_spans.push(badge(format!(" status:{} ", status.label()), theme.accent));
    }
    if let Some(ref channel_id) = app.query.channel_id {
        let name = app.session.channel_name(channel_id).unwrap_or("?");
        filter_spans.push(badge(format!(" channel:{} ", name), theme.accent));
    }
    filter_spans.push(Span::styled(
        format!("  sort:{}", app.query.sort.label()),
        Style::default().fg(theme.text_muted),
    ));
    frame.render_widget(Paragraph::new(Line::from(filter_spans)), left[0]);

    // Task list
    let visible = app.visible_tasks();
    let items: Vec<ListItem> = visible.iter().map(|task| task_list_item(app, task)).collect();
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.tasks_selected.min(visible.len() - 1)));
    }
    let list = List::new(items)
        .block(bordered_block(&format!("Tasks ({})", visible.len()), theme))
        .highlight_style(Style::default().bg(theme.selected_bg).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, left[1], &mut state);

    // Detail panel
    let detail = match app.selected_task() {
        Some(task) => task_detail_lines(app, task),
        None => vec![Line::from(Span::styled(
            "No task selected",
            Style::default().fg(theme.text_muted),
        ))],
    };
    let panel = Paragraph::new(detail).wrap(Wrap { trim: false }).block(bordered_block("Detail", theme));
    frame.render_widget(panel, chunks[1]);
}

fn task_list_item<'a>(app: &App, task: &'a Task) -> ListItem<'a> {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(
            format!("[{}] ", &task.priority.label()[..1]),
            Style::default().fg(theme.priority_color(task.priority)),
        ),
        Span::styled(task.title.clone(), Style::default().fg(theme.text)),
    ];
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!("  due {}", due.format("%Y-%m-%d")),
            Style::default().fg(theme.text_dim),
        ));
    }
    if let Some(ref channel_id) = task.channel_id {
        if let Some(name) = app.session.channel_name(channel_id) {
            spans.push(Span::styled(format!("  @{}", name), Style::default().fg(theme.secondary)));
        }
    }
    spans.push(Span::styled(
        format!("  {}", task.status.label()),
        Style::default().fg(theme.task_status_color(task.status)),
    ));
    ListItem::new(Line::from(spans))
}

fn task_detail_lines<'a>(app: &App, task: &'a Task) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(theme.text_dim)),
            Span::styled(task.priority.label(), Style::default().fg(theme.priority_color(task.priority))),
            Span::styled("   Status: ", Style::default().fg(theme.text_dim)),
            Span::styled(task.status.label(), Style::default().fg(theme.task_status_color(task.status))),
        ]),
    ];
    if let Some(due) = task.due_date {
        lines.push(Line::from(vec![
            Span::styled("Due: ", Style::default().fg(theme.text_dim)),
            Span::styled(due.format("%Y-%m-%d").to_string(), Style::default().fg(theme.text)),
        ]));
    }
    if let Some(ref channel_id) = task.channel_id {
        let name = app.session.channel_name(channel_id).unwrap_or("(deleted)");
        lines.push(Line::from(vec![
            Span::styled("Channel: ", Style::default().fg(theme.text_dim)),
            Span::styled(name.to_string(), Style::default().fg(theme.secondary)),
        ]));
    }
    if let Some(ref description) = task.description {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(description.clone(), Style::default().fg(theme.text_dim))));
    }
    if !task.content_ideas.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Content ideas:",
            Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD),
        )));
        for idea in &task.content_ideas {
            lines.push(Line::from(Span::styled(format!("- {}", idea), Style::default().fg(theme.text))));
        }
    }
    lines
}

/// Schedule board grouped by bucket.
fn draw_schedule(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let board = bucket_tasks(app.session.tasks(), Utc::now().date_naive());

    let mut lines: Vec<Line> = Vec::new();
    if board.is_empty() {
        lines.push(Line::from(Span::styled(
            "No open tasks scheduled.",
            Style::default().fg(theme.text_muted),
        )));
    }
    for bucket in ScheduleBucket::ALL {
        let tasks = board.bucket(bucket);
        // Always show the near-term buckets so an empty day is visible
        let always = matches!(
            bucket,
            ScheduleBucket::Overdue | ScheduleBucket::Today | ScheduleBucket::Tomorrow
        );
        if tasks.is_empty() && !always {
            continue;
        }
        let header_color = match bucket {
            ScheduleBucket::Overdue => theme.error,
            ScheduleBucket::Today => theme.warning,
            _ => theme.primary,
        };
        lines.push(Line::from(Span::styled(
            format!("{} ({})", bucket.label(), tasks.len()),
            Style::default().fg(header_color).add_modifier(Modifier::BOLD),
        )));
        if tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No tasks for this period.",
                Style::default().fg(theme.text_muted),
            )));
        }
        for task in tasks {
            let mut spans = vec![
                Span::styled(
                    format!("  [{}] ", &task.priority.label()[..1]),
                    Style::default().fg(theme.priority_color(task.priority)),
                ),
                Span::styled(task.title.clone(), Style::default().fg(theme.text)),
            ];
            if let Some(due) = task.due_date {
                spans.push(Span::styled(
                    format!("  {}", due.format("%a %Y-%m-%d")),
                    Style::default().fg(theme.text_dim),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }

    let scroll = app.schedule_scroll.min(lines.len().saturating_sub(1)) as u16;
    let paragraph = Paragraph::new(lines)
        .block(bordered_block("Task Schedule", theme))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Channel manager list.
fn draw_channels(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let channels = app.session.channels();

    let items: Vec<ListItem> = channels
        .iter()
        .map(|channel| {
            let mut spans = vec![
                Span::styled(channel.name.clone(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  [{}]", channel.channel_type.label()),
                    Style::default().fg(theme.secondary),
                ),
            ];
            if let Some(ref platform) = channel.platform {
                spans.push(Span::styled(format!("  {}", platform), Style::default().fg(theme.text_dim)));
            }
            if let Some(ref description) = channel.description {
                spans.push(Span::styled(
                    format!("  — {}", description),
                    Style::default().fg(theme.text_muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    if !channels.is_empty() {
        state.select(Some(app.channels_selected.min(channels.len() - 1)));
    }
    let list = List::new(items)
        .block(bordered_block(&format!("Channels ({})", channels.len()), theme))
        .highlight_style(Style::default().bg(theme.selected_bg).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Social post scheduler: list plus detail panel.
fn draw_posts(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let posts = app.session.posts();
    let items: Vec<ListItem> = posts
        .iter()
        .map(|post| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<12}", post.platform.label()),
                    Style::default().fg(theme.secondary),
                ),
                Span::styled(
                    post.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
                    Style::default().fg(theme.text_dim),
                ),
                Span::styled(
                    format!("  {}", post.status.label()),
                    Style::default().fg(theme.post_status_color(post.status)),
                ),
            ];
            if post.over_limit() {
                spans.push(Span::styled("  over limit", Style::default().fg(theme.error)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    if !posts.is_empty() {
        state.select(Some(app.posts_selected.min(posts.len() - 1)));
    }
    let list = List::new(items)
        .block(bordered_block(&format!("Social Posts ({})", posts.len()), theme))
        .highlight_style(Style::default().bg(theme.selected_bg).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let detail = match app.selected_post() {
        Some(post) => {
            let limit = post.platform.char_limit();
            let used = post.text_content.chars().count();
            vec![
                Line::from(Span::styled(
                    format!("{} — {}", post.platform.label(), post.status.label()),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} / {} chars", used, limit),
                    Style::default().fg(if used > limit { theme.error } else { theme.text_dim }),
                )),
                Line::default(),
                Line::from(Span::styled(post.text_content.clone(), Style::default().fg(theme.text))),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No post selected",
            Style::default().fg(theme.text_muted),
        ))],
    };
    let panel = Paragraph::new(detail).wrap(Wrap { trim: false }).block(bordered_block("Preview", theme));
    frame.render_widget(panel, chunks[1]);
}

/// Content generator: input fields on the left, output on the right.
fn draw_generator(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let form = &app.generator;
    let mut lines = Vec::new();
    for field in GeneratorField::ALL {
        let focused = form.field == field;
        let value = match field {
            GeneratorField::Prompt => form.prompt.clone(),
            GeneratorField::Platform => form
                .platform
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| "Free-form ideas".to_string()),
            GeneratorField::Topic => form.topic.clone(),
            GeneratorField::Tone => form.tone.clone(),
            GeneratorField::Keywords => form.keywords.clone(),
        };
        lines.push(form_field_line(field.label(), &value, focused, theme));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter: generate   Tab: next field   ◂/▸: platform   Esc: back",
        Style::default().fg(theme.text_muted),
    )));
    let inputs = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(bordered_block("Content Generator", theme));
    frame.render_widget(inputs, chunks[0]);

    let output = match (&form.output, app.ai_in_flight > 0) {
        (_, true) => "Generating...".to_string(),
        (Some(text), false) => text.clone(),
        (None, false) => "Generated content appears here and is saved to history.".to_string(),
    };
    let panel = Paragraph::new(output)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(theme.text))
        .block(bordered_block("Output", theme));
    frame.render_widget(panel, chunks[1]);
}

/// Draw the status bar: message or contextual hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let text = match (&app.status_message, app.mode) {
        (Some(message), _) => message.clone(),
        (None, AppMode::Search) => "typing filters tasks — Enter/Esc to finish".to_string(),
        (None, _) => match app.view {
            View::Dashboard => "Tab: switch view   ?: help   q: quit".to_string(),
            View::Tasks => {
                "a:add e:edit d:delete space:status /:search p/s/c:filters o:sort i:ideas".to_string()
            }
            View::Schedule => "j/k: scroll   Tab: switch view".to_string(),
            View::Channels => "a:add e:edit d:delete".to_string(),
            View::Posts => "a:add e:edit d:delete space:status".to_string(),
            View::Generator => "Enter: generate   Esc: back".to_string(),
        },
    };
    let style = if app.status_message.is_some() {
        Style::default().fg(theme.warning)
    } else {
        Style::default().fg(theme.text_muted)
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(format!(" {}", text), style))), area);
}

// --- Modals ---

fn draw_task_form(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let form = &app.task_form;
    let title = if form.editing.is_some() { "Edit Task" } else { "Add Task" };

    let mut lines = Vec::new();
    for field in TaskField::ALL {
        let focused = form.field == field;
        let value = match field {
            TaskField::Title => form.title.clone(),
            TaskField::Description => form.description.clone(),
            TaskField::DueDate => form.due_date.clone(),
            TaskField::Priority => form.priority.label().to_string(),
            TaskField::Status => form.status.label().to_string(),
            TaskField::Channel => form
                .channel_index
                .and_then(|idx| app.session.channels().get(idx))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "None".to_string()),
        };
        lines.push(form_field_line(field.label(), &value, focused, theme));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter: save   Esc: cancel   ▴/▾: field   ◂/▸: cycle   Ctrl+P: suggest priority",
        Style::default().fg(theme.text_muted),
    )));

    render_modal(frame, title, lines, theme, 60, 14);
}

fn draw_channel_form(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let form = &app.channel_form;
    let title = if form.editing.is_some() { "Edit Channel" } else { "Add Channel" };

    let mut lines = Vec::new();
    for field in ChannelField::ALL {
        let focused = form.field == field;
        let value = match field {
            ChannelField::Name => form.name.clone(),
            ChannelField::Type => form.channel_type.label().to_string(),
            ChannelField::Platform => form.platform.clone(),
            ChannelField::Description => form.description.clone(),
        };
        lines.push(form_field_line(field.label(), &value, focused, theme));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter: save   Esc: cancel   ▴/▾: field   ◂/▸: cycle type",
        Style::default().fg(theme.text_muted),
    )));

    render_modal(frame, title, lines, theme, 60, 12);
}

fn draw_post_form(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let form = &app.post_form;
    let title = if form.editing.is_some() { "Edit Post" } else { "Schedule Post" };

    let mut lines = Vec::new();
    for field in PostField::ALL {
        let focused = form.field == field;
        let value = match field {
            PostField::Platform => form.platform.label().to_string(),
            PostField::Content => form.content.clone(),
            PostField::ScheduledAt => form.scheduled_at.clone(),
            PostField::Status => form.status.label().to_string(),
        };
        lines.push(form_field_line(field.label(), &value, focused, theme));
    }
    let used = form.content.chars().count();
    let limit = form.platform.char_limit();
    lines.push(Line::from(Span::styled(
        format!("{} / {} chars", used, limit),
        Style::default().fg(if used > limit { theme.error } else { theme.text_muted }),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter: save   Esc: cancel   ▴/▾: field   ◂/▸: cycle",
        Style::default().fg(theme.text_muted),
    )));

    render_modal(frame, title, lines, theme, 64, 13);
}

fn draw_confirm_dialog(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let message = app
        .pending_delete
        .as_ref()
        .map(|p| p.describe())
        .unwrap_or_else(|| "Delete?".to_string());

    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(theme.text))),
        Line::default(),
        Line::from(Span::styled("y: delete   n/Esc: cancel", Style::default().fg(theme.text_muted))),
    ];
    render_modal(frame, "Confirm", lines, theme, 54, 7);
}

fn draw_help_overlay(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key = |k: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), Style::default().fg(theme.primary)),
            Span::styled(action.to_string(), Style::default().fg(theme.text_dim)),
        ])
    };
    let lines = vec![
        Line::from(Span::styled("Global", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
        key("Tab / S-Tab", "next / previous view"),
        key("1-6", "jump to view"),
        key("q / Ctrl+C", "quit"),
        key("?", "toggle this help"),
        Line::default(),
        Line::from(Span::styled("Tasks", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
        key("a / e / d", "add / edit / delete task"),
        key("space", "cycle task status"),
        key("/", "search; p/s/c cycle filters; x clears"),
        key("o", "cycle sort (created, due date, priority)"),
        key("i", "AI content ideas for the selected task"),
        Line::default(),
        Line::from(Span::styled("Forms", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
        key("arrows", "move between fields, cycle choices"),
        key("Ctrl+P", "AI priority suggestion (task form)"),
        key("Enter / Esc", "save / cancel"),
    ];
    render_modal(frame, "Help", lines, theme, 64, 22);
}

// --- Helpers ---

fn bordered_block<'a>(title: &str, theme: &crate::tui::Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ))
}

fn form_field_line<'a>(
    label: &'a str,
    value: &str,
    focused: bool,
    theme: &crate::tui::Theme,
) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_dim)
    };
    let mut spans = vec![
        Span::styled(format!("{:<36} ", label), label_style),
        Span::styled(value.to_string(), Style::default().fg(theme.text)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(theme.primary)));
    }
    Line::from(spans)
}

fn stat_line(label: &str, count: usize, color: ratatui::style::Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<18}", label), Style::default().fg(color)),
        Span::raw(count.to_string()),
    ])
}

fn badge(text: String, color: ratatui::style::Color) -> Span<'static> {
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn render_modal(
    frame: &mut Frame,
    title: &str,
    lines: Vec<Line>,
    theme: &crate::tui::Theme,
    width_percent: u16,
    height: u16,
) {
    let area = centered_rect(width_percent, height, frame.area());
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left)
        .block(bordered_block(title, theme));
    frame.render_widget(paragraph, area);
}

/// Centered rect with a percentage width and fixed height.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height.min(r.height))
}
