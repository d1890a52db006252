use crate::rig::{CORNER_COUNT, EDGE_COUNT};

/// Material variant of a rig visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Normal,
    Grabbed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleDisplay {
    pub visible: bool,
    pub appearance: Appearance,
}

impl HandleDisplay {
    pub const HIDDEN: HandleDisplay = HandleDisplay {
        visible: false,
        appearance: Appearance::Normal,
    };

    pub fn shown(visible: bool) -> Self {
        Self {
            visible,
            appearance: Appearance::Normal,
        }
    }
}

/// What an external renderer should draw for the rig right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigDisplay {
    pub corners: [HandleDisplay; CORNER_COUNT],
    pub edges: [HandleDisplay; EDGE_COUNT],
    pub links: [bool; EDGE_COUNT],
    pub box_visible: bool,
    pub box_appearance: Appearance,
}

impl RigDisplay {
    /// Nothing drawn
    pub fn hidden() -> Self {
        Self {
            corners: [HandleDisplay::HIDDEN; CORNER_COUNT],
            edges: [HandleDisplay::HIDDEN; EDGE_COUNT],
            links: [false; EDGE_COUNT],
            box_visible: false,
            box_appearance: Appearance::Normal,
        }
    }

    pub fn visible_corner_count(&self) -> usize {
        self.corners.iter().filter(|c| c.visible).count()
    }

    pub fn visible_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.visible).count()
    }

    pub fn visible_link_count(&self) -> usize {
        self.links.iter().filter(|l| **l).count()
    }

    pub fn any_handle_visible(&self) -> bool {
        self.visible_corner_count() + self.visible_edge_count() > 0
    }
}

impl Default for RigDisplay {
    fn default() -> Self {
        Self::hidden()
    }
}
