//! Input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{
    AppMode, ChannelField, GeneratorField, PendingDelete, PostField, TaskField, View,
};
use crate::model::{ChannelType, Priority, SocialPlatform, SocialPostStatus, TaskStatus};

use crate::App;

/// Handle a key event based on the current mode.
pub fn handle_events(key: KeyEvent, app: &mut App) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Any keypress clears a stale status message unless a new one replaces it
    if app.mode == AppMode::Normal {
        app.status_message = None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Normal => handle_normal(key, app),
        AppMode::Search => handle_search(key, app),
        AppMode::TaskForm => handle_task_form(key, app),
        AppMode::ChannelForm => handle_channel_form(key, app),
        AppMode::PostForm => handle_post_form(key, app),
        AppMode::ConfirmDelete => handle_confirm(key, app),
        AppMode::Help => handle_help(key, app),
    }
}

fn handle_normal(key: KeyEvent, app: &mut App) {
    // Global bindings first
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char('?') => {
            app.mode = AppMode::Help;
            return;
        }
        KeyCode::Tab => {
            app.view = app.view.next();
            return;
        }
        KeyCode::BackTab => {
            app.view = app.view.prev();
            return;
        }
        KeyCode::Char(c @ '1'..='6') => {
            let idx = (c as usize) - ('1' as usize);
            app.view = View::ALL[idx];
            return;
        }
        _ => {}
    }

    match app.view {
        View::Dashboard => {}
        View::Tasks => handle_tasks_view(key, app),
        View::Schedule => handle_schedule_view(key, app),
        View::Channels => handle_channels_view(key, app),
        View::Posts => handle_posts_view(key, app),
        View::Generator => handle_generator_view(key, app),
    }
}

fn handle_tasks_view(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.visible_tasks().len();
            if count > 0 && app.tasks_selected + 1 < count {
                app.tasks_selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tasks_selected = app.tasks_selected.saturating_sub(1);
        }
        KeyCode::Char('a') => app.open_task_form(None),
        KeyCode::Char('e') | KeyCode::Enter => {
            let task = app.selected_task().cloned();
            if let Some(ref task) = task {
                app.open_task_form(Some(task));
            }
        }
        KeyCode::Char('d') => {
            if let Some(task) = app.selected_task() {
                app.pending_delete = Some(PendingDelete::Task {
                    id: task.id.clone(),
                    title: task.title.clone(),
                });
                app.mode = AppMode::ConfirmDelete;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(task) = app.selected_task() {
                let id = task.id.clone();
                let next = task.status.next();
                if let Err(e) = app.session.set_task_status(&id, next) {
                    app.status_message = Some(e.to_string());
                }
                app.clamp_selections();
            }
        }
        KeyCode::Char('/') => {
            app.mode = AppMode::Search;
        }
        KeyCode::Char('p') => {
            app.query.priority = cycle_option(app.query.priority, &Priority::ALL);
            app.clamp_selections();
        }
        KeyCode::Char('s') => {
            app.query.status = cycle_option(app.query.status, &TaskStatus::ALL);
            app.clamp_selections();
        }
        KeyCode::Char('c') => {
            cycle_channel_filter(app);
            app.clamp_selections();
        }
        KeyCode::Char('o') => {
            app.query.sort = app.query.sort.next();
        }
        KeyCode::Char('x') => {
            let sort = app.query.sort;
            app.query = crate::query::TaskQuery { sort, ..Default::default() };
            app.clamp_selections();
        }
        KeyCode::Char('i') => {
            if let Some(task) = app.selected_task() {
                let mut prompt = format!("Content ideas for the marketing task: {}", task.title);
                if let Some(ref description) = task.description {
                    if !description.trim().is_empty() {
                        prompt.push_str(&format!(" ({})", description.trim()));
                    }
                }
                let id = task.id.clone();
                app.request_ideas(prompt, Some(id));
            }
        }
        _ => {}
    }
}

fn handle_schedule_view(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.schedule_scroll += 1,
        KeyCode::Char('k') | KeyCode::Up => {
            app.schedule_scroll = app.schedule_scroll.saturating_sub(1);
        }
        KeyCode::Home => app.schedule_scroll = 0,
        _ => {}
    }
}

fn handle_channels_view(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.session.channels().len();
            if count > 0 && app.channels_selected + 1 < count {
                app.channels_selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.channels_selected = app.channels_selected.saturating_sub(1);
        }
        KeyCode::Char('a') => app.open_channel_form(None),
        KeyCode::Char('e') | KeyCode::Enter => {
            let channel = app.selected_channel().cloned();
            if let Some(ref channel) = channel {
                app.open_channel_form(Some(channel));
            }
        }
        KeyCode::Char('d') => {
            if let Some(channel) = app.selected_channel() {
                app.pending_delete = Some(PendingDelete::Channel {
                    id: channel.id.clone(),
                    name: channel.name.clone(),
                });
                app.mode = AppMode::ConfirmDelete;
            }
        }
        _ => {}
    }
}

fn handle_posts_view(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.session.posts().len();
            if count > 0 && app.posts_selected + 1 < count {
                app.posts_selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.posts_selected = app.posts_selected.saturating_sub(1);
        }
        KeyCode::Char('a') => app.open_post_form(None),
        KeyCode::Char('e') | KeyCode::Enter => {
            let post = app.selected_post().cloned();
            if let Some(ref post) = post {
                app.open_post_form(Some(post));
            }
        }
        KeyCode::Char('d') => {
            if let Some(post) = app.selected_post() {
                let summary: String = post.text_content.chars().take(30).collect();
                app.pending_delete =
                    Some(PendingDelete::Post { id: post.id.clone(), summary });
                app.mode = AppMode::ConfirmDelete;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(post) = app.selected_post() {
                let mut updated = post.clone();
                updated.status = cycle_value(updated.status, &SocialPostStatus::ALL, 1);
                if let Err(e) = app.session.update_post(updated) {
                    app.status_message = Some(e.to_string());
                }
            }
        }
        _ => {}
    }
}

fn handle_generator_view(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.view = View::Dashboard;
        }
        KeyCode::Down => {
            app.generator.field = cycle_value(app.generator.field, &GeneratorField::ALL, 1);
        }
        KeyCode::Up => {
            app.generator.field = cycle_value(app.generator.field, &GeneratorField::ALL, -1);
        }
        KeyCode::Left | KeyCode::Right if app.generator.field == GeneratorField::Platform => {
            let forward = key.code == KeyCode::Right;
            app.generator.platform = cycle_platform_option(app.generator.platform, forward);
        }
        KeyCode::Enter => submit_generator(app),
        KeyCode::Backspace => {
            if let Some(text) = generator_text_field(app) {
                text.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = generator_text_field(app) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn generator_text_field(app: &mut App) -> Option<&mut String> {
    match app.generator.field {
        GeneratorField::Prompt => Some(&mut app.generator.prompt),
        GeneratorField::Platform => None,
        GeneratorField::Topic => Some(&mut app.generator.topic),
        GeneratorField::Tone => Some(&mut app.generator.tone),
        GeneratorField::Keywords => Some(&mut app.generator.keywords),
    }
}

fn submit_generator(app: &mut App) {
    if app.ai_in_flight > 0 {
        app.status_message = Some("A request is already running".to_string());
        return;
    }
    match app.generator.platform {
        Some(platform) => {
            let topic = app.generator.topic.trim().to_string();
            if topic.is_empty() {
                app.status_message = Some("Topic is required for platform content".to_string());
                return;
            }
            let prompt = app.generator.prompt.trim().to_string();
            let tone = non_empty(&app.generator.tone);
            let keywords = non_empty(&app.generator.keywords);
            app.request_draft(prompt, platform, topic, tone, keywords);
        }
        None => {
            let prompt = app.generator.prompt.trim().to_string();
            if prompt.is_empty() {
                app.status_message = Some("Prompt is required".to_string());
                return;
            }
            app.request_ideas(prompt, None);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn handle_search(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.mode = AppMode::Normal;
            app.clamp_selections();
        }
        KeyCode::Backspace => {
            app.query.search.pop();
            app.clamp_selections();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.query.search.push(c);
            app.clamp_selections();
        }
        _ => {}
    }
}

fn handle_task_form(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Char('p') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.request_priority_suggestion();
        return;
    }
    match key.code {
        KeyCode::Esc => app.mode = AppMode::Normal,
        KeyCode::Enter => app.save_task_form(),
        KeyCode::Down | KeyCode::Tab => {
            app.task_form.field = cycle_value(app.task_form.field, &TaskField::ALL, 1);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.task_form.field = cycle_value(app.task_form.field, &TaskField::ALL, -1);
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            let step = if forward { 1 } else { -1 };
            match app.task_form.field {
                TaskField::Priority => {
                    app.task_form.priority =
                        cycle_value(app.task_form.priority, &Priority::ALL, step);
                }
                TaskField::Status => {
                    app.task_form.status =
                        cycle_value(app.task_form.status, &TaskStatus::ALL, step);
                }
                TaskField::Channel => {
                    let count = app.session.channels().len();
                    app.task_form.channel_index =
                        cycle_index(app.task_form.channel_index, count, forward);
                }
                _ => {}
            }
        }
        KeyCode::Backspace => {
            if let Some(text) = task_text_field(app) {
                text.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = task_text_field(app) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn task_text_field(app: &mut App) -> Option<&mut String> {
    match app.task_form.field {
        TaskField::Title => Some(&mut app.task_form.title),
        TaskField::Description => Some(&mut app.task_form.description),
        TaskField::DueDate => Some(&mut app.task_form.due_date),
        _ => None,
    }
}

fn handle_channel_form(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.mode = AppMode::Normal,
        KeyCode::Enter => app.save_channel_form(),
        KeyCode::Down | KeyCode::Tab => {
            app.channel_form.field = cycle_value(app.channel_form.field, &ChannelField::ALL, 1);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.channel_form.field = cycle_value(app.channel_form.field, &ChannelField::ALL, -1);
        }
        KeyCode::Left | KeyCode::Right if app.channel_form.field == ChannelField::Type => {
            let step = if key.code == KeyCode::Right { 1 } else { -1 };
            app.channel_form.channel_type =
                cycle_value(app.channel_form.channel_type, &ChannelType::ALL, step);
        }
        KeyCode::Backspace => {
            if let Some(text) = channel_text_field(app) {
                text.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = channel_text_field(app) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn channel_text_field(app: &mut App) -> Option<&mut String> {
    match app.channel_form.field {
        ChannelField::Name => Some(&mut app.channel_form.name),
        ChannelField::Type => None,
        ChannelField::Platform => Some(&mut app.channel_form.platform),
        ChannelField::Description => Some(&mut app.channel_form.description),
    }
}

fn handle_post_form(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.mode = AppMode::Normal,
        KeyCode::Enter => app.save_post_form(),
        KeyCode::Down | KeyCode::Tab => {
            app.post_form.field = cycle_value(app.post_form.field, &PostField::ALL, 1);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.post_form.field = cycle_value(app.post_form.field, &PostField::ALL, -1);
        }
        KeyCode::Left | KeyCode::Right => {
            let step = if key.code == KeyCode::Right { 1 } else { -1 };
            match app.post_form.field {
                PostField::Platform => {
                    app.post_form.platform =
                        cycle_value(app.post_form.platform, &SocialPlatform::ALL, step);
                }
                PostField::Status => {
                    app.post_form.status =
                        cycle_value(app.post_form.status, &SocialPostStatus::ALL, step);
                }
                _ => {}
            }
        }
        KeyCode::Backspace => {
            if let Some(text) = post_text_field(app) {
                text.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = post_text_field(app) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn post_text_field(app: &mut App) -> Option<&mut String> {
    match app.post_form.field {
        PostField::Content => Some(&mut app.post_form.content),
        PostField::ScheduledAt => Some(&mut app.post_form.scheduled_at),
        _ => None,
    }
}

fn handle_confirm(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_delete = None;
            app.mode = AppMode::Normal;
        }
        _ => {}
    }
}

fn handle_help(key: KeyEvent, app: &mut App) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
        app.mode = AppMode::Normal;
    }
}

// --- Cycling helpers ---

/// Step through a fixed option list, wrapping at both ends.
fn cycle_value<T: Copy + PartialEq>(current: T, all: &[T], step: i32) -> T {
    let len = all.len() as i32;
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as i32;
    let next = (idx + step).rem_euclid(len);
    all[next as usize]
}

/// `None -> all[0] -> ... -> all[last] -> None`.
fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|v| *v == value).unwrap_or(0);
            all.get(idx + 1).copied()
        }
    }
}

/// `None -> 0 -> 1 -> ... -> count-1 -> None`, either direction.
fn cycle_index(current: Option<usize>, count: usize, forward: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(count - 1),
        (Some(idx), true) => {
            if idx + 1 < count {
                Some(idx + 1)
            } else {
                None
            }
        }
        (Some(0), false) => None,
        (Some(idx), false) => Some(idx - 1),
    }
}

/// `None (free-form) -> X -> LinkedIn -> Instagram -> None`.
fn cycle_platform_option(
    current: Option<SocialPlatform>,
    forward: bool,
) -> Option<SocialPlatform> {
    let all = SocialPlatform::ALL;
    let idx = current.and_then(|p| all.iter().position(|v| *v == p));
    cycle_index(idx, all.len(), forward).map(|i| all[i])
}

fn cycle_channel_filter(app: &mut App) {
    let ids: Vec<String> = app.session.channels().iter().map(|c| c.id.clone()).collect();
    let current = app
        .query
        .channel_id
        .as_ref()
        .and_then(|id| ids.iter().position(|candidate| candidate == id));
    let next = cycle_index(current, ids.len(), true);
    app.query.channel_id = next.map(|idx| ids[idx].clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_value_wraps_both_directions() {
        assert_eq!(cycle_value(Priority::Low, &Priority::ALL, 1), Priority::High);
        assert_eq!(cycle_value(Priority::High, &Priority::ALL, -1), Priority::Low);
        assert_eq!(cycle_value(Priority::High, &Priority::ALL, 1), Priority::Medium);
    }

    #[test]
    fn cycle_option_returns_to_none() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..=TaskStatus::ALL.len() {
            current = cycle_option(current, &TaskStatus::ALL);
            seen.push(current);
        }
        assert_eq!(seen.len(), TaskStatus::ALL.len() + 1);
        assert_eq!(seen.last(), Some(&None));
    }

    #[test]
    fn cycle_index_handles_empty_and_ends() {
        assert_eq!(cycle_index(None, 0, true), None);
        assert_eq!(cycle_index(None, 3, true), Some(0));
        assert_eq!(cycle_index(Some(2), 3, true), None);
        assert_eq!(cycle_index(None, 3, false), Some(2));
        assert_eq!(cycle_index(Some(0), 3, false), None);
    }

    #[test]
    fn cycle_platform_covers_free_form() {
        assert_eq!(cycle_platform_option(None, true), Some(SocialPlatform::X));
        assert_eq!(cycle_platform_option(Some(SocialPlatform::Instagram), true), None);
        assert_eq!(cycle_platform_option(None, false), Some(SocialPlatform::Instagram));
    }
}
