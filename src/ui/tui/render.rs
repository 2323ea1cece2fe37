use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::app_state::{Group, OptionModel};

const INSTRUCTIONS: &str = "Download [d/y] | Quit [q/n]";
const TIER_SEPARATOR: &str = "  ";

/// One full menu screen, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFrame {
    lines: Vec<Line<'static>>,
}

impl MenuFrame {
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Rows needed to draw the frame, including both horizontal rules.
    pub fn height(&self) -> u16 {
        self.lines.len() as u16 + 2
    }
}

/// Builds the menu frame for the current model.
///
/// Layout, top to bottom: rule, centred URL, blank, video row, audio row, centred
/// instructions, rule. The rules come from the block borders in [`draw_menu`].
pub fn render(model: &OptionModel, video_url: &str) -> MenuFrame {
    let mut lines = Vec::with_capacity(5);

    lines.push(Line::from(format!("Video URL: {}", video_url)).alignment(Alignment::Center));
    lines.push(Line::default());
    lines.push(tier_row(model, Group::Video));
    lines.push(tier_row(model, Group::Audio));
    lines.push(Line::from(INSTRUCTIONS).alignment(Alignment::Center));

    MenuFrame { lines }
}

/// Styles one group's row: the picked tier is reversed when its group has focus and
/// blinks otherwise.
fn tier_row(model: &OptionModel, group: Group) -> Line<'static> {
    let option_group = model.group(group);
    let selected = model.current_index(group);
    let focused = model.current_focus() == group;

    let mut spans = Vec::with_capacity(option_group.len() * 2 + 1);
    spans.push(Span::raw(format!("{}: ", option_group.title())));

    for (i, label) in option_group.labels().iter().enumerate() {
        let style = if i != selected {
            Style::default()
        } else if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::SLOW_BLINK)
        };
        spans.push(Span::styled(*label, style));
        spans.push(Span::raw(TIER_SEPARATOR));
    }

    Line::from(spans)
}

/// Draws a [`MenuFrame`] at the top of the terminal, replacing whatever was there.
pub fn draw_menu(frame: &mut Frame, menu: &MenuFrame) {
    let area = frame.area();
    let menu_area = Rect {
        height: menu.height().min(area.height),
        ..area
    };

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(Text::from(menu.lines().to_vec())).block(block);
    frame.render_widget(paragraph, menu_area);
}
