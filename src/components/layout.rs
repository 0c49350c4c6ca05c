//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard screen layout areas
pub struct DashboardLayout {
    pub header: Rect,
    pub progress: Rect,
    pub distribution: Rect,
    pub timeline: Rect,
    pub tasks: Rect,
    pub activity: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width - width) / 2;
    let popup_y = area.y + (area.height - height) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Calculate dashboard layout
pub fn calculate_dashboard_layout(area: Rect) -> DashboardLayout {
    // Header + overview strip + panels + status line + help bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let overview_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    // Timeline on the left, tasks above activity on the right
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[2]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(body_chunks[1]);

    DashboardLayout {
        header: main_chunks[0],
        progress: overview_chunks[0],
        distribution: overview_chunks[1],
        timeline: body_chunks[0],
        tasks: right_chunks[0],
        activity: right_chunks[1],
        status: main_chunks[3],
        help: main_chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_popup(area, 40, 6);
        assert_eq!(popup, Rect::new(0, 2, 20, 6));
    }

    #[test]
    fn test_dashboard_layout_fills_height() {
        let layout = calculate_dashboard_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.progress.height, 7);
        assert_eq!(layout.help.y, 39);
        assert_eq!(layout.timeline.height, 28);
        assert_eq!(layout.tasks.height + layout.activity.height, 28);
    }
}
