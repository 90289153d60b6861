//! Section detail widget: step statuses, screen designs and screenshots.

use super::pipeline::status_color;
use crate::domain::{PhaseStep, StepStatus};
use crate::services::SectionProgress;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders one section's progress and its previewable screen designs
pub struct SectionDetailWidget<'a> {
    progress: &'a SectionProgress,
    selected_design: usize,
}

impl<'a> SectionDetailWidget<'a> {
    pub fn new(progress: &'a SectionProgress, selected_design: usize) -> Self {
        Self {
            progress,
            selected_design,
        }
    }

    fn step_lines(&self) -> Vec<Line<'a>> {
        self.progress
            .steps
            .iter()
            .map(|step| {
                let optional = if step.step.kind.is_optional() {
                    " (optional)"
                } else {
                    ""
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", step.status.indicator()),
                        Style::default().fg(status_color(step.status)),
                    ),
                    Span::raw(format!("{}{}", step.step.kind.label(), optional)),
                    Span::styled(
                        format!("  {}", step.status.display_name()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    }

    fn next_hint(&self) -> Line<'a> {
        if self.progress.ready {
            let next = PhaseStep::Sections
                .next()
                .map(|p| p.label())
                .unwrap_or("done");
            Line::from(Span::styled(
                format!(" Required steps complete. Next: {}", next),
                Style::default().fg(Color::Green),
            ))
        } else {
            let todo = self
                .progress
                .current_step()
                .map(|s| s.kind.label())
                .unwrap_or("remaining steps");
            Line::from(Span::styled(
                format!(" Complete {} to continue", todo.to_lowercase()),
                Style::default().fg(Color::Yellow),
            ))
        }
    }

    fn design_lines(&self) -> Vec<Line<'a>> {
        if self.progress.screen_designs.is_empty() {
            return vec![Line::from(Span::styled(
                " No screen designs yet",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        self.progress
            .screen_designs
            .iter()
            .enumerate()
            .map(|(idx, design)| {
                let selected = idx == self.selected_design;
                let style = if selected {
                    Style::default()
                        .fg(Color::White)
                        .bg(status_color(StepStatus::Completed))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if selected { ">" } else { " " };
                Line::from(Span::styled(
                    format!("{} {}  {}", marker, design.name, design.route()),
                    style,
                ))
            })
            .collect()
    }

    fn screenshot_lines(&self) -> Vec<Line<'a>> {
        if self.progress.screenshots.is_empty() {
            return vec![Line::from(Span::styled(
                " No screenshots",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        self.progress
            .screenshots
            .iter()
            .map(|shot| Line::from(format!(" {}", shot.name)))
            .collect()
    }
}

impl Widget for SectionDetailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let section = &self.progress.section;

        let mut lines = Vec::new();
        if !section.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(" {}", section.description),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.extend(self.step_lines());
        lines.push(Line::from(""));
        lines.push(self.next_hint());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(lines.len() as u16 + 2),
                Constraint::Min(3),
                Constraint::Length(4),
            ])
            .split(area);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", section.title)),
            )
            .render(chunks[0], buf);

        Paragraph::new(self.design_lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Screen designs "),
            )
            .render(chunks[1], buf);

        Paragraph::new(self.screenshot_lines())
            .block(Block::default().borders(Borders::ALL).title(" Screenshots "))
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::buffer_text;
    use crate::services::artifacts::tests::create_test_product;
    use crate::services::ProgressService;
    use std::sync::Arc;

    fn render(progress: &SectionProgress) -> String {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        SectionDetailWidget::new(progress, 0).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_ready_section() {
        let (_temp, probe) = create_test_product();
        let service = ProgressService::new(Arc::new(probe));
        let text = render(&service.section("incidents").unwrap());
        assert!(text.contains("Incidents"));
        assert!(text.contains("Next: Export"));
        assert!(text.contains("IncidentList"));
        assert!(text.contains("/sections/incidents/screen-designs/IncidentList"));
        assert!(text.contains("No screenshots"));
    }

    #[test]
    fn test_section_with_nothing_done() {
        let (_temp, probe) = create_test_product();
        let service = ProgressService::new(Arc::new(probe));
        let text = render(&service.section("lawyers").unwrap());
        assert!(text.contains("Complete section spec to continue"));
        assert!(text.contains("No screen designs yet"));
    }
}
