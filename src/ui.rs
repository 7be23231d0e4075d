use image::imageops::FilterType;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, AppMode};
use crate::catalog::trailer_watch_url;
use crate::display::DisplayMode;
use crate::media::Item;
use crate::poster::BackdropWidget;
use crate::results::LoadStatus;
use crate::theme::Theme;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

/// A centered rect of at most `width` x `height` inside `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let w = width.min(area.width);
  let h = height.min(area.height);
  Rect { x: area.x + (area.width - w) / 2, y: area.y + (area.height - h) / 2, width: w, height: h }
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, input_area, footer_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(3), Constraint::Length(1)])
      .areas(frame.area());

  render_header(frame, theme, header_area);
  render_main(frame, app, main_area);
  render_input(frame, app, input_area);
  render_footer(frame, app, footer_area);

  if app.detail.is_open() {
    render_modal(frame, app, main_area);
  }
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
  let left = Line::from(Span::styled(" ◆ movievault ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  let block = Block::bordered()
    .title(format!(" {} ", app.results.section_title))
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.border));

  let message = match app.results.status {
    LoadStatus::Loading => Some(("Loading…", theme.status)),
    LoadStatus::Error => Some(("Failed to load content. Please try again later.", theme.error)),
    LoadStatus::Empty => Some(("No movies or shows found.", theme.muted)),
    LoadStatus::Success => None,
  };

  if let Some((text, color)) = message {
    let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
      .alignment(Alignment::Center)
      .block(block.padding(Padding::top(area.height.saturating_sub(3) / 2)));
    frame.render_widget(paragraph, area);
    return;
  }

  render_results(frame, app, area, block);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect, block: Block) {
  let theme = app.theme();

  // Inner width: area minus 2 borders minus 2 chars for highlight symbol ("▶ ")
  let inner_w = area.width.saturating_sub(4) as usize;

  let items: Vec<ListItem> = app
    .results
    .items()
    .iter()
    .enumerate()
    .map(|(i, item)| {
      let is_selected = Some(i) == app.list_state.selected();
      let fg = if is_selected { theme.highlight_fg } else { theme.fg };
      let bg = if is_selected {
        theme.highlight_bg
      } else if i % 2 == 1 {
        theme.stripe_bg
      } else {
        theme.bg
      };

      let bookmarked = app.bookmarks.contains(item.key());
      let star = if bookmarked { "★ " } else { "  " };
      let rating = format!("{:.1}", item.vote_average);
      let year = item.release_year().unwrap_or("    ");
      let kind = item.resolved_media_type().path();
      let right = format!("{}  {}  {}", kind, rating, year);

      let right_w = right.chars().count() + star.chars().count();
      let title_max = inner_w.saturating_sub(right_w + 2);
      let title = truncate_str(item.display_title(), title_max);
      let title_w = title.chars().count();
      let gap = inner_w.saturating_sub(title_w + right_w);

      let star_style = if bookmarked { Style::default().fg(theme.star) } else { Style::default().fg(fg) };
      let line = Line::from(vec![
        Span::styled(title, Style::default().fg(fg)),
        Span::raw(" ".repeat(gap)),
        Span::styled(star.to_string(), star_style),
        Span::styled(right, Style::default().fg(theme.muted)),
      ]);

      ListItem::new(line).bg(bg)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_modal(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let Some(item) = app.detail.selected().cloned() else { return };

  let modal_area = centered_rect(area, 72, area.height.saturating_sub(2).max(12));
  frame.render_widget(Clear, modal_area);

  let block = Block::bordered()
    .title(format!(" {} ", truncate_str(item.display_title(), modal_area.width.saturating_sub(6) as usize)))
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.accent))
    .style(Style::default().bg(theme.bg))
    .padding(Padding::horizontal(1));
  let inner = block.inner(modal_area);
  frame.render_widget(block, modal_area);

  // Backdrop on top when there is one and room for it.
  let image_h = if app.detail.backdrop().is_some() { (inner.height / 2).min(12) } else { 0 };
  let [image_area, text_area] =
    Layout::vertical([Constraint::Length(image_h), Constraint::Min(4)]).areas(inner);

  if let Some(image) = app.detail.backdrop()
    && image_area.height > 0
  {
    let key = item.key();
    let needs_resize = match &app.cached_resized_backdrop {
      Some((k, w, h, _)) => *k != key || *w != image_area.width || *h != image_area.height,
      None => true,
    };
    if needs_resize {
      let target_w = image_area.width as u32;
      let target_h = match app.display_mode {
        // Half-block cells pack two pixels per row.
        DisplayMode::Direct => image_area.height as u32 * 2,
        DisplayMode::Ascii => image_area.height as u32,
      };
      let resized = image.resize_to_fill(target_w.max(1), target_h.max(1), FilterType::Lanczos3);
      app.cached_resized_backdrop = Some((key, image_area.width, image_area.height, resized));
    }
    if let Some((_, _, _, ref resized)) = app.cached_resized_backdrop {
      frame.render_widget(BackdropWidget { image: resized, display_mode: app.display_mode }, image_area);
    }
  }

  let mut lines = vec![Line::from(""), meta_line(theme, &item)];
  if !item.genres.is_empty() {
    let genres: Vec<&str> = item.genres.iter().map(|g| g.name.as_str()).collect();
    lines.push(Line::from(Span::styled(genres.join(", "), Style::default().fg(theme.muted))));
  }
  lines.push(Line::from(""));
  if !item.overview.is_empty() {
    lines.push(Line::from(Span::styled(item.overview.clone(), Style::default().fg(theme.fg))));
  }
  lines.push(Line::from(""));
  match app.detail.trailer_key() {
    Some(key) => {
      lines.push(Line::from(vec![
        Span::styled("Trailer  ", Style::default().fg(theme.muted)),
        Span::styled(trailer_watch_url(key), Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED)),
      ]));
    }
    None => {
      lines.push(Line::from(Span::styled("No trailer available.", Style::default().fg(theme.muted))));
    }
  }

  let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
  frame.render_widget(paragraph, text_area);
}

fn meta_line(theme: &Theme, item: &Item) -> Line<'static> {
  let year = item.release_year().unwrap_or("N/A").to_string();
  Line::from(vec![
    Span::styled(year, Style::default().fg(theme.fg)),
    Span::raw("  "),
    Span::styled(format!("★ {:.1}", item.vote_average), Style::default().fg(theme.star)),
  ])
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.mode == AppMode::Input && !app.detail.is_open();
  let border_color = if focused { theme.accent } else { theme.border };
  let input_block = Block::bordered()
    .title(" Search movies & TV ")
    .title_style(Style::default().fg(border_color))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.input, app.cursor_position);

  if cursor_col < app.input_scroll {
    app.input_scroll = cursor_col;
  } else if cursor_col >= app.input_scroll + inner_w {
    app.input_scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let visible: String = app
    .input
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.input_scroll)
    .take_while(|(start, _, _)| *start < app.input_scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(input_block);
  frame.render_widget(paragraph, area);

  if focused {
    let cursor_x = area.x + 2 + (cursor_col - app.input_scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let keys: Vec<(&str, &str)> = if app.detail.is_open() {
    let mut k = vec![("Esc", "Close"), ("b", "Bookmark")];
    if app.detail.trailer_key().is_some() {
      k.push(("o", "Trailer"));
    }
    k
  } else {
    match app.mode {
      AppMode::Input => vec![("Enter", "Search"), ("Esc", "Back"), ("^t", "Theme")],
      AppMode::Results => vec![
        ("/", "Search"),
        ("Enter", "Details"),
        ("Space", "Bookmark"),
        ("t", "Trending"),
        ("b", "Bookmarks"),
        ("j/k", "Navigate"),
        ("q", "Quit"),
      ],
    }
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw(" "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}
