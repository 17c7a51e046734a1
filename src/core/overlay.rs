use tracing::debug;

use super::types::{ChartArea, CrosshairLine, PointerEvent, PointerState};

/// Tracks the pointer over the chart and decides whether a vertical
/// crosshair should be drawn.
///
/// The controller never draws; the renderer reads [`PointerState`] (or asks
/// for a [`CrosshairLine`]) right after each event, in the same frame.
#[derive(Debug, Default, Clone)]
pub struct OverlayController {
    state: PointerState,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent, area: ChartArea) -> PointerState {
        let previous = self.state.should_draw_crosshair;
        match event {
            PointerEvent::Move { x, y } => {
                let inside = area.contains(x, y);
                self.state = PointerState {
                    x,
                    y,
                    inside_chart_area: inside,
                    should_draw_crosshair: inside,
                };
            }
            PointerEvent::Leave => {
                self.state.inside_chart_area = false;
                self.state.should_draw_crosshair = false;
            }
        }

        if previous != self.state.should_draw_crosshair {
            debug!(
                x = self.state.x,
                y = self.state.y,
                tracking = self.state.should_draw_crosshair,
                "crosshair state changed"
            );
        }
        self.state
    }

    /// Draw instruction for the current state, `None` while hidden.
    pub fn crosshair(&self, area: ChartArea) -> Option<CrosshairLine> {
        self.state.should_draw_crosshair.then_some(CrosshairLine {
            x: self.state.x,
            from_y: area.bottom,
            to_y: area.top,
        })
    }
}
