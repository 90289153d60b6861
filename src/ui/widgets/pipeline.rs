//! Phase and section list widgets.

use crate::domain::StepStatus;
use crate::services::{PipelineProgress, SectionProgress};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Color for a derived status
pub fn status_color(status: StepStatus) -> Color {
    match status {
        StepStatus::Completed => Color::Green,
        StepStatus::Current => Color::Yellow,
        StepStatus::Upcoming => Color::DarkGray,
    }
}

fn selectable_list<'a>(items: Vec<ListItem<'a>>, title: &'a str) -> List<'a> {
    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ")
}

/// The five global phases with their statuses
pub struct PhaseListWidget<'a> {
    pipeline: &'a PipelineProgress,
    selected_index: usize,
}

impl<'a> PhaseListWidget<'a> {
    pub fn new(pipeline: &'a PipelineProgress, selected_index: usize) -> Self {
        Self {
            pipeline,
            selected_index,
        }
    }

    fn build_items(&self) -> Vec<ListItem<'a>> {
        self.pipeline
            .phases
            .iter()
            .enumerate()
            .map(|(idx, phase)| {
                let color = status_color(phase.status);
                let line = format!(
                    "{} {}. {:<12} {:<10} {}",
                    phase.status.indicator(),
                    idx + 1,
                    phase.step.label(),
                    phase.status.display_name(),
                    phase.step.route_path()
                );

                let style = if idx == self.selected_index {
                    Style::default()
                        .fg(Color::White)
                        .bg(color)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(color)
                };

                ListItem::new(line).style(style)
            })
            .collect()
    }
}

impl Widget for PhaseListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.build_items();

        let mut state = ListState::default();
        state.select(Some(self.selected_index));

        StatefulWidget::render(selectable_list(items, "Phases"), area, buf, &mut state);
    }
}

/// Sections of the product with a summary status each
pub struct SectionListWidget<'a> {
    sections: &'a [SectionProgress],
    selected_index: usize,
}

impl<'a> SectionListWidget<'a> {
    pub fn new(sections: &'a [SectionProgress], selected_index: usize) -> Self {
        Self {
            sections,
            selected_index,
        }
    }

    fn build_items(&self) -> Vec<ListItem<'a>> {
        self.sections
            .iter()
            .enumerate()
            .map(|(idx, progress)| {
                let status = progress.overall_status();
                let color = status_color(status);
                let designs = progress.screen_designs.len();
                let line = format!(
                    "{} {} ({} screen design{})",
                    status.indicator(),
                    progress.section.title,
                    designs,
                    if designs == 1 { "" } else { "s" }
                );

                let style = if idx == self.selected_index {
                    Style::default()
                        .fg(Color::White)
                        .bg(color)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(color)
                };

                ListItem::new(line).style(style)
            })
            .collect()
    }
}

impl Widget for SectionListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.build_items();

        let mut state = ListState::default();
        state.select(Some(self.selected_index));

        StatefulWidget::render(selectable_list(items, "Sections"), area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhaseStep;
    use crate::preview::buffer_text;
    use crate::services::PhaseProgress;

    fn pipeline() -> PipelineProgress {
        let statuses = [
            StepStatus::Completed,
            StepStatus::Current,
            StepStatus::Upcoming,
            StepStatus::Upcoming,
            StepStatus::Upcoming,
        ];
        PipelineProgress {
            phases: PhaseStep::ALL
                .iter()
                .zip(statuses)
                .map(|(&step, status)| PhaseProgress { step, status })
                .collect(),
            current: Some(PhaseStep::DataModel),
        }
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(StepStatus::Completed), Color::Green);
        assert_eq!(status_color(StepStatus::Upcoming), Color::DarkGray);
    }

    #[test]
    fn test_phase_list_renders_routes() {
        let pipeline = pipeline();
        let widget = PhaseListWidget::new(&pipeline, 1);
        assert_eq!(widget.build_items().len(), 5);

        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        PhaseListWidget::new(&pipeline, 1).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Data Model"));
        assert!(text.contains("/data-model"));
        assert!(text.contains("current"));
    }

    #[test]
    fn test_empty_section_list() {
        let widget = SectionListWidget::new(&[], 0);
        assert!(widget.build_items().is_empty());
    }
}
