//! UI state - presentation enums shared between components

/// Dashboard panel that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Timeline,
    Tasks,
    Activity,
}

impl Panel {
    pub fn all() -> [Panel; 3] {
        [Panel::Timeline, Panel::Tasks, Panel::Activity]
    }

    pub fn name(&self) -> &str {
        match self {
            Panel::Timeline => "Timeline",
            Panel::Tasks => "Tasks",
            Panel::Activity => "Activity",
        }
    }

    pub fn next(&self) -> Panel {
        let panels = Panel::all();
        let index = panels.iter().position(|p| p == self).unwrap_or(0);
        panels[(index + 1) % panels.len()]
    }

    pub fn previous(&self) -> Panel {
        let panels = Panel::all();
        let index = panels.iter().position(|p| p == self).unwrap_or(0);
        panels[(index + panels.len() - 1) % panels.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_cycle_wraps() {
        assert_eq!(Panel::Timeline.next(), Panel::Tasks);
        assert_eq!(Panel::Activity.next(), Panel::Timeline);
        assert_eq!(Panel::Timeline.previous(), Panel::Activity);
        assert_eq!(Panel::Tasks.previous(), Panel::Timeline);
    }
}
