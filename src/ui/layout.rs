//! Main layout rendering for the TUI.

use crate::app::{App, AppView};
use crate::ui::widgets::document::DocumentWidget;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::pipeline::{PhaseListWidget, SectionListWidget};
use crate::ui::widgets::preview_frame::{PreviewFrameWidget, PreviewToolbarWidget};
use crate::ui::widgets::section_detail::SectionDetailWidget;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const TOOLBAR_HEIGHT: u16 = 1;

/// Header, body and footer of a full-screen view
fn split_screen(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area)
}

/// Area between the header and footer
pub fn body_area(area: Rect) -> Rect {
    split_screen(area)[1]
}

/// Area the preview frame is laid out in, below the toolbar
pub fn preview_viewport(area: Rect) -> Rect {
    let body = body_area(area);
    Rect {
        y: body.y + TOOLBAR_HEIGHT.min(body.height),
        height: body.height.saturating_sub(TOOLBAR_HEIGHT),
        ..body
    }
}

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match &app.view {
        AppView::Phases => draw_phases(frame, app, area),
        AppView::Sections => draw_sections(frame, app, area),
        AppView::SectionDetail(_) => draw_section_detail(frame, app, area),
        AppView::Preview => draw_preview(frame, app, area),
        AppView::Document => draw_document(frame, app, area),
        AppView::Help => draw_help(frame, app, area),
    }

    // Draw error message overlay if present
    if let Some(ref error) = app.error_message {
        draw_error_overlay(frame, error, area);
    } else if let Some(ref msg) = app.status_message {
        draw_status_message(frame, msg, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            "design-tui ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.route(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn draw_footer(frame: &mut Frame, text: &str, area: Rect) {
    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn draw_phases(frame: &mut Frame, app: &App, area: Rect) {
    let [header, body, footer] = split_screen(area);
    draw_header(frame, app, header);
    frame.render_widget(
        PhaseListWidget::new(&app.pipeline, app.selected_phase_index),
        body,
    );
    draw_footer(
        frame,
        " j/k: Navigate | Enter: Open | v: View document | r: Refresh | q: Quit | ?: Help ",
        footer,
    );
}

fn draw_sections(frame: &mut Frame, app: &App, area: Rect) {
    let [header, body, footer] = split_screen(area);
    draw_header(frame, app, header);

    if app.sections.is_empty() {
        let empty_msg = Paragraph::new("No sections found.\n\nAdd them to product/product-roadmap.md.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Sections"))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, body);
    } else {
        frame.render_widget(
            SectionListWidget::new(&app.sections, app.selected_section_index),
            body,
        );
    }

    draw_footer(
        frame,
        " j/k: Navigate | Enter: Open | v: View spec | Esc: Back | q: Quit ",
        footer,
    );
}

fn draw_section_detail(frame: &mut Frame, app: &App, area: Rect) {
    let [header, body, footer] = split_screen(area);
    draw_header(frame, app, header);

    match app.current_section() {
        Some(section) => frame.render_widget(
            SectionDetailWidget::new(section, app.selected_design_index),
            body,
        ),
        None => frame.render_widget(
            Paragraph::new("Section not found")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL)),
            body,
        ),
    }

    draw_footer(
        frame,
        " j/k: Select design | Enter/p: Preview | v: View spec | Esc: Back ",
        footer,
    );
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let [header, body, footer] = split_screen(area);
    draw_header(frame, app, header);

    if let Some(session) = app.preview.as_ref() {
        let toolbar = Rect {
            height: TOOLBAR_HEIGHT.min(body.height),
            ..body
        };
        frame.render_widget(PreviewToolbarWidget::new(session), toolbar);
        frame.render_widget(PreviewFrameWidget::new(session), preview_viewport(area));
    }

    draw_footer(
        frame,
        " 1/2/3: Mobile/Tablet/Desktop | [/]: Resize | drag edge: Resize | Esc: Back ",
        footer,
    );
}

fn draw_document(frame: &mut Frame, app: &App, area: Rect) {
    let [header, body, footer] = split_screen(area);
    draw_header(frame, app, header);

    if let Some(document) = app.document.as_ref() {
        frame.render_widget(
            DocumentWidget::new(document).scroll_offset(app.document_viewer_state.scroll_offset()),
            body,
        );
    }

    draw_footer(frame, " q/Esc: Back | j/k: Scroll | g/G: Top/Bottom ", footer);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(HelpWidget::new(app.help_view_state.scroll_offset()), area);
}

/// Draw a status message at the bottom of the screen
fn draw_status_message(frame: &mut Frame, message: &str, area: Rect) {
    let msg_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(4),
        width: area.width.saturating_sub(4).min(message.len() as u16 + 4),
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, msg_area);

    let status = Paragraph::new(message)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );

    frame.render_widget(status, msg_area);
}

/// Draw error overlay
fn draw_error_overlay(frame: &mut Frame, error: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(error_widget, popup_area);
}

/// Create a centered rectangle
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::buffer_text;
    use crate::services::artifacts::tests::create_test_product;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_preview_viewport_below_toolbar() {
        let viewport = preview_viewport(Rect::new(0, 0, 100, 30));
        assert_eq!(viewport, Rect::new(0, 4, 100, 23));

        // too small to hold anything
        let tiny = preview_viewport(Rect::new(0, 0, 10, 4));
        assert_eq!(tiny.height, 0);
    }

    #[test]
    fn test_draw_phases_with_breadcrumb() {
        let (temp, _probe) = create_test_product();
        let app = App::new(temp.path().to_path_buf()).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("/data-model"));
        assert!(text.contains("Data Model"));
        assert!(text.contains("q: Quit"));
    }
}
