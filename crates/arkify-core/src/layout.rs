//! Grid placement for a story's panels.
//!
//! The header spans the whole first row. Every other panel takes one cell,
//! filled left to right and top to bottom in story order. Drawing is left to
//! the renderer; this module only decides where each panel goes.

use crate::config::LayoutConfig;
use crate::types::PanelId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub panel: PanelId,
    pub column: u32,
    pub row: u32,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub placements: Vec<PanelPlacement>,
    /// Panels that did not fit in the grid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overflow: Vec<PanelId>,
}

impl LayoutPlan {
    pub fn build(panel_order: &[PanelId], layout: &LayoutConfig) -> Self {
        let cell_w = layout.panel_width();
        let cell_h = layout.panel_height();
        let mut placements = Vec::with_capacity(panel_order.len());
        let mut overflow = Vec::new();

        if panel_order.contains(&PanelId::Header) {
            placements.push(PanelPlacement {
                panel: PanelId::Header,
                column: 0,
                row: 0,
                rect: Rect {
                    x: 0,
                    y: 0,
                    width: layout.canvas_width,
                    height: cell_h,
                },
            });
        }

        let cells = layout.data_cells();
        let data_panels = panel_order.iter().filter(|p| **p != PanelId::Header);
        for (i, panel) in data_panels.enumerate() {
            if i >= cells {
                overflow.push(*panel);
                continue;
            }
            let column = (i % layout.columns as usize) as u32;
            let row = (i / layout.columns as usize) as u32 + 1;
            placements.push(PanelPlacement {
                panel: *panel,
                column,
                row,
                rect: Rect {
                    x: column * cell_w,
                    y: row * cell_h,
                    width: cell_w,
                    height: cell_h,
                },
            });
        }

        if !overflow.is_empty() {
            tracing::warn!(dropped = ?overflow, cells, "panels do not fit the grid");
        }

        Self {
            canvas_width: layout.canvas_width,
            canvas_height: layout.canvas_height,
            placements,
            overflow,
        }
    }

    pub fn placement(&self, panel: PanelId) -> Option<&PanelPlacement> {
        self.placements.iter().find(|p| p.panel == panel)
    }
}
