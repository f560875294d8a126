use panorama_core::clipboard::CopyLabel;
use panorama_core::content::{Panel, PanelKind};
use panorama_core::hover::HoverState;
use panorama_core::reveal::RevealVisual;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::scene::{ids, text_width, PanelSlot};
use crate::surface::Projected;
use crate::text::{truncate, wrap};
use crate::theme::blend;

/// Repeating band the parallax layer slides
const PARALLAX_PATTERN: &[char] = &['◆', ' ', '◇', ' ', '·', ' ', '◇', ' '];

/// Renders the panel strip through the container transform
pub struct StripWidget;

impl StripWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.background)),
            area,
        );

        let scene = app.surface.scene();
        for (slot, panel) in scene.panels.iter().zip(&app.portfolio.panels) {
            let projected = app.surface.project(slot.rect);
            let bounds = projected.bounds();
            if bounds.right() < area.x as f64
                || bounds.left() > area.right() as f64
                || bounds.bottom() < area.y as f64
                || bounds.top() > area.bottom() as f64
            {
                continue;
            }

            let width = (projected.width.round().max(4.0) as u16).min(area.width.saturating_mul(4));
            let height = (projected.height.round().max(3.0) as u16).min(area.height.saturating_mul(4));
            let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
            draw_panel(&mut buffer, app, slot, panel, &projected);
            blit(frame.buffer_mut(), &buffer, &projected, area);
        }
    }
}

fn draw_panel(buf: &mut Buffer, app: &App, slot: &PanelSlot, panel: &Panel, projected: &Projected) {
    let theme = &app.theme;
    let area = buf.area;
    let visual = match slot.kind {
        PanelKind::Hero => hero_visual(app),
        _ => app.panel_visual(slot.id),
    };
    let fade = |color| blend(theme.panel, color, visual.opacity);
    let hovered = app.page.hover().state() == HoverState::Hovering(slot.id);

    let border = if hovered { theme.accent } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(fade(border)))
        .style(Style::default().bg(theme.panel))
        .title(Span::styled(
            format!(" {} ", truncate(&panel.title, area.width.saturating_sub(4) as usize)),
            Style::default().fg(fade(theme.accent)).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    block.render(area, buf);

    let text_area = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    let mut lines: Vec<Line> = Vec::new();
    for _ in 0..visual.translate_y.round().max(0.0) as usize {
        lines.push(Line::default());
    }

    match slot.kind {
        PanelKind::Hero => {
            let shown = (app.intro_progress() * panel.title.chars().count() as f64).round() as usize;
            let title: String = panel.title.chars().take(shown).collect();
            lines.push(Line::from(Span::styled(
                title,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
        }
        kind => lines.push(Line::from(Span::styled(
            kind_label(kind),
            Style::default().fg(fade(theme.muted)),
        ))),
    }
    lines.push(Line::default());

    for row in wrap(&panel.body, text_width(area.width as f64)) {
        lines.push(Line::from(Span::styled(row, Style::default().fg(fade(theme.text)))));
    }

    if !panel.tags.is_empty() {
        lines.push(Line::default());
        let tags = panel
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(tags, Style::default().fg(fade(theme.accent)))));
    }
    if let Some(link) = &panel.link {
        lines.push(Line::from(Span::styled(
            truncate(link, text_area.width as usize),
            Style::default()
                .fg(fade(theme.muted))
                .add_modifier(Modifier::UNDERLINED),
        )));
    }

    let mut style = Style::default().bg(theme.panel);
    if visual.blur > 0.3 {
        style = style.add_modifier(Modifier::DIM);
    }
    Paragraph::new(lines).style(style).render(text_area, buf);

    if app.page.refs().parallax_anchor == Some(slot.id) {
        draw_parallax_band(buf, app, inner, visual);
    }
    if slot.kind.is_interactive() {
        draw_copy_button(buf, app, slot, projected, visual);
    }
}

/// Hero panels skip the reveal and fade in with the intro
fn hero_visual(app: &App) -> RevealVisual {
    let t = app.intro_progress();
    let style = app.page.reveal_style();
    RevealVisual {
        opacity: t,
        translate_y: 0.0,
        blur: style.blur * (1.0 - t),
    }
}

fn kind_label(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Hero => "",
        PanelKind::Project => "PROJECT",
        PanelKind::About => "ABOUT",
        PanelKind::Contact => "CONTACT",
    }
}

fn draw_parallax_band(buf: &mut Buffer, app: &App, inner: Rect, visual: RevealVisual) {
    if inner.height < 2 || inner.width == 0 {
        return;
    }
    let offset = app
        .surface
        .translation(ids::PARALLAX_TARGET)
        .map(|(x, _)| x.round() as i64)
        .unwrap_or(0);
    let color = blend(app.theme.panel, app.theme.muted, visual.opacity);
    let y = inner.bottom() - 1;
    let len = PARALLAX_PATTERN.len() as i64;

    for col in 0..inner.width {
        let index = (col as i64 - offset).rem_euclid(len) as usize;
        if let Some(cell) = buf.cell_mut((inner.x + col, y)) {
            cell.set_char(PARALLAX_PATTERN[index]).set_fg(color);
        }
    }
}

fn draw_copy_button(buf: &mut Buffer, app: &App, slot: &PanelSlot, projected: &Projected, visual: RevealVisual) {
    let Some(button) = app.surface.scene().copy_button else {
        return;
    };
    let scale_x = projected.width / slot.rect.width;
    let scale_y = projected.height / slot.rect.height;
    let x = ((button.x - slot.rect.x) * scale_x).round() as u16;
    let y = ((button.y - slot.rect.y) * scale_y).round() as u16;
    let area = buf.area;
    if y >= area.bottom().saturating_sub(1) || x >= area.right() {
        return;
    }

    let copy = app.page.copy_button();
    let label = app.surface.text(ids::COPY_BUTTON).unwrap_or(copy.label());
    let hovered = app.page.hover().state() == HoverState::Hovering(ids::COPY_BUTTON);
    let theme = &app.theme;

    let color = match copy.state() {
        CopyLabel::Confirming => theme.success,
        CopyLabel::Idle => theme.accent,
    };
    let style = if hovered {
        Style::default()
            .fg(theme.panel)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(blend(theme.panel, color, visual.opacity))
            .bg(theme.panel)
    };

    let max = area.right().saturating_sub(x + 1) as usize;
    buf.set_string(x, y, truncate(&format!("[ {} ]", label), max), style);
}

/// Copy a rendered panel into the frame, shearing each row
fn blit(dst: &mut Buffer, src: &Buffer, projected: &Projected, clip: Rect) {
    let origin_x = projected.x.round() as i32;
    let origin_y = projected.y.round() as i32;

    for row in 0..src.area.height {
        let y = origin_y + row as i32;
        if y < clip.y as i32 || y >= clip.bottom() as i32 {
            continue;
        }
        let shift = (projected.shear * row as f64).round() as i32;
        for col in 0..src.area.width {
            let x = origin_x + shift + col as i32;
            if x < clip.x as i32 || x >= clip.right() as i32 {
                continue;
            }
            if let (Some(cell), Some(target)) = (src.cell((col, row)), dst.cell_mut((x as u16, y as u16))) {
                *target = cell.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_clips_and_shears() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 2));
        src.set_string(0, 0, "abc", Style::default());
        src.set_string(0, 1, "def", Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 5, 3));

        let projected = Projected {
            x: -1.0,
            y: 1.0,
            width: 3.0,
            height: 2.0,
            shear: 1.0,
        };
        let area = dst.area;
        blit(&mut dst, &src, &projected, area);

        assert_eq!(dst.cell((0, 1)).unwrap().symbol(), "b");
        assert_eq!(dst.cell((1, 1)).unwrap().symbol(), "c");
        // Second row shifted one column right
        assert_eq!(dst.cell((0, 2)).unwrap().symbol(), "d");
        assert_eq!(dst.cell((2, 2)).unwrap().symbol(), "f");
        assert_eq!(dst.cell((0, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(kind_label(PanelKind::Project), "PROJECT");
        assert_eq!(kind_label(PanelKind::Hero), "");
    }
}
