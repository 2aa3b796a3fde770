//! Frame Builder - session state to a FrameBuffer plus hit regions.
//!
//! Pure function of its inputs: no signals are read here. The render effect
//! gathers everything into a [`FrameView`] (which is where tracking happens)
//! and hands it to [`build_frame`].
//!
//! # Screen layout
//!
//! ```text
//! row 0      title
//! row 1-2    instructions
//! row 4      index labels
//! row 5..    boxes, with three marker rows under each line of boxes
//!            controls (lt++, i++ | i++ | gt--)
//!            reset button
//!            quick logic guide
//! last row   key help
//! ```

use crate::layout::{ArrayGeometry, Bounds, Marker, string_width, truncate_to_width};
use crate::model::{Action, PointerKind};
use crate::renderer::FrameBuffer;
use crate::state::{HitRegion, HitTarget};
use crate::types::{Attr, BorderStyle, ClipRect, Rgba};

/// Row where the first line of boxes starts.
pub const ARRAY_TOP: u16 = 5;

/// Rows drawn under a box line for markers (arrow, label, index).
const MARKER_ROWS: u16 = 3;

pub const TITLE: &str = "3-Way Partition Interactive Trace";
const STEP_ONE: &str = "Step 1: Click two boxes to swap them.";
const STEP_TWO: &str = "Step 2: Advance pointers using the controls below.";
const KEY_HELP: &str = "a/i/g advance · r reset · ←/→ + space select · q quit";

const CONTROLS: [Action; 3] = [Action::AdvanceLtAndI, Action::AdvanceI, Action::DecrementGt];

/// Everything one frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub width: u16,
    pub height: u16,
    pub values: &'a [char],
    pub selection: Option<usize>,
    /// Keyboard cursor over the boxes.
    pub cursor: Option<usize>,
    /// Markers in paint order.
    pub markers: &'a [Marker],
    /// Zero until the first box has been measured; markers are hidden until then.
    pub box_width: f32,
    pub pivot: char,
    pub geometry: &'a ArrayGeometry,
}

/// A drawn frame and the clickable regions on it.
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub buffer: FrameBuffer,
    pub hit_regions: Vec<HitRegion>,
}

/// Marker colors.
pub fn pointer_color(kind: PointerKind) -> Rgba {
    match kind {
        PointerKind::Lt => Rgba::RED,
        PointerKind::I => Rgba::BLUE,
        PointerKind::Gt => Rgba::GREEN,
    }
}

fn control_color(action: Action) -> Rgba {
    match action {
        Action::AdvanceLtAndI => Rgba::RED,
        Action::AdvanceI => Rgba::BLUE,
        Action::DecrementGt => Rgba::GREEN,
        Action::ClickBox(_) | Action::Reset => Rgba::SLATE,
    }
}

/// Column where text `text_width` cells wide starts when centered on `center`.
fn centered_start(center: f32, text_width: u16) -> u16 {
    (center - text_width as f32 / 2.0).floor().max(0.0) as u16
}

fn cell_rect(bounds: Bounds) -> ClipRect {
    ClipRect::new(
        bounds.x.round().max(0.0) as u16,
        bounds.y.round().max(0.0) as u16,
        bounds.width.round().max(0.0) as u16,
        bounds.height.round().max(0.0) as u16,
    )
}

/// Build one frame.
pub fn build_frame(view: &FrameView<'_>) -> FrameResult {
    let mut buffer = FrameBuffer::new(view.width, view.height);
    let mut hit_regions = Vec::new();
    let width = view.width;

    draw_header(&mut buffer, width);
    draw_boxes(&mut buffer, &mut hit_regions, view);
    if view.box_width > 0.0 {
        draw_markers(&mut buffer, view);
    }

    let array_bottom = view.geometry.content_bottom().round().max(ARRAY_TOP as f32) as u16;
    let controls_top = array_bottom.saturating_add(MARKER_ROWS + 1);
    let after_controls = draw_controls(&mut buffer, &mut hit_regions, width, controls_top);
    let reset_top = after_controls.saturating_add(1);
    let after_reset = draw_reset(&mut buffer, &mut hit_regions, width, reset_top);
    draw_guide(&mut buffer, width, after_reset.saturating_add(1), view.pivot);

    if view.height > 0 {
        let help = truncate_to_width(KEY_HELP, width);
        let y = view.height - 1;
        buffer.draw_text_centered(0, y, width, help, Rgba::SLATE, None, Attr::DIM, None);
    }

    FrameResult { buffer, hit_regions }
}

fn draw_header(buffer: &mut FrameBuffer, width: u16) {
    let lines = [
        (TITLE, Rgba::TERMINAL_DEFAULT, Attr::BOLD),
        (STEP_ONE, Rgba::SLATE_LIGHT, Attr::NONE),
        (STEP_TWO, Rgba::SLATE_LIGHT, Attr::NONE),
    ];
    for (row, (text, fg, attrs)) in (0u16..).zip(lines) {
        let text = truncate_to_width(text, width);
        buffer.draw_text_centered(0, row, width, text, fg, None, attrs, None);
    }
}

fn draw_boxes(buffer: &mut FrameBuffer, hit_regions: &mut Vec<HitRegion>, view: &FrameView<'_>) {
    for (index, bounds) in view.geometry.boxes().iter().enumerate() {
        let Some(&value) = view.values.get(index) else {
            break;
        };
        let rect = cell_rect(*bounds);
        // Boxes are laid out in row order, so everything after this is off-screen too
        if rect.y >= buffer.height() {
            break;
        }
        let selected = view.selection == Some(index);
        let focused = view.cursor == Some(index);

        let (border_style, border_color, bg) = if selected {
            (BorderStyle::Bold, Rgba::YELLOW, Some(Rgba::YELLOW_LIGHT))
        } else if focused {
            (BorderStyle::Rounded, Rgba::INDIGO, None)
        } else {
            (BorderStyle::Rounded, Rgba::SLATE_LIGHT, None)
        };

        if let Some(bg) = bg {
            buffer.fill_rect(rect.x, rect.y, rect.width, rect.height, bg, None);
        }
        buffer.draw_border(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            border_style,
            border_color,
            bg,
            None,
        );

        let mut attrs = Attr::BOLD;
        if focused {
            attrs |= Attr::UNDERLINE;
        }
        let fg = if selected { Rgba::BLACK } else { Rgba::TERMINAL_DEFAULT };
        let mid = rect.y.saturating_add(rect.height / 2);
        let text = value.to_string();
        buffer.draw_text_centered(rect.x, mid, rect.width, &text, fg, bg, attrs, None);

        if rect.y > 0 {
            let label = index.to_string();
            let (x, y, w) = (rect.x, rect.y - 1, rect.width);
            buffer.draw_text_centered(x, y, w, &label, Rgba::SLATE, None, Attr::DIM, None);
        }

        hit_regions.push(HitRegion {
            rect,
            target: HitTarget::Box(index),
        });
    }
}

fn draw_markers(buffer: &mut FrameBuffer, view: &FrameView<'_>) {
    let Some(container) = view.geometry.container() else {
        return;
    };

    for marker in view.markers {
        let center = container.left() + marker.placement.left_offset;
        let top = (container.top() + marker.placement.top_offset).round().max(0.0) as u16;
        if top >= buffer.height() {
            continue;
        }
        let color = pointer_color(marker.kind);

        buffer.draw_text(centered_start(center, 1), top, "▲", color, None, Attr::NONE, None);

        let label = marker.kind.label();
        let label_x = centered_start(center, string_width(label));
        let label_y = top.saturating_add(1);
        buffer.draw_text(label_x, label_y, label, color, None, Attr::BOLD, None);

        let index = format!("({})", marker.index);
        let index_x = centered_start(center, string_width(&index));
        let index_y = top.saturating_add(2);
        buffer.draw_text(index_x, index_y, &index, Rgba::SLATE_LIGHT, None, Attr::NONE, None);
    }
}

/// Draw the three advance controls. Returns the first row below them.
fn draw_controls(
    buffer: &mut FrameBuffer,
    hit_regions: &mut Vec<HitRegion>,
    width: u16,
    top: u16,
) -> u16 {
    const SPACING: u16 = 2;

    let widths_with_hints: Vec<u16> = CONTROLS
        .iter()
        .map(|a| string_width(a.label()).max(string_width(a.hint())) + 4)
        .collect();
    let total_with_hints = widths_with_hints.iter().sum::<u16>() + SPACING * 2;
    let show_hints = total_with_hints <= width;

    let widths: Vec<u16> = if show_hints {
        widths_with_hints
    } else {
        CONTROLS.iter().map(|a| string_width(a.label()) + 4).collect()
    };
    let height = if show_hints { 4 } else { 3 };
    let total = widths.iter().sum::<u16>() + SPACING * 2;

    let mut x = width.saturating_sub(total) / 2;
    for (action, w) in CONTROLS.into_iter().zip(widths) {
        let color = control_color(action);
        buffer.draw_border(x, top, w, height, BorderStyle::Rounded, color, None, None);
        let label_y = top.saturating_add(1);
        buffer.draw_text_centered(x, label_y, w, action.label(), color, None, Attr::BOLD, None);
        if show_hints {
            let hint_y = top.saturating_add(2);
            buffer.draw_text_centered(x, hint_y, w, action.hint(), color, None, Attr::DIM, None);
        }
        hit_regions.push(HitRegion {
            rect: ClipRect::new(x, top, w, height),
            target: HitTarget::Control(action),
        });
        x = x.saturating_add(w + SPACING);
    }

    top.saturating_add(height)
}

/// Draw the reset button. Returns the first row below it.
fn draw_reset(
    buffer: &mut FrameBuffer,
    hit_regions: &mut Vec<HitRegion>,
    width: u16,
    top: u16,
) -> u16 {
    let text = format!("  {}  ", Action::Reset.label());
    let text_width = string_width(&text);
    let x = width.saturating_sub(text_width) / 2;

    buffer.fill_rect(x, top, text_width, 1, Rgba::SLATE_DARK, None);
    buffer.draw_text(x, top, &text, Rgba::WHITE, Some(Rgba::SLATE_DARK), Attr::NONE, None);
    hit_regions.push(HitRegion {
        rect: ClipRect::new(x, top, text_width, 1),
        target: HitTarget::Control(Action::Reset),
    });

    top.saturating_add(1)
}

fn draw_guide(buffer: &mut FrameBuffer, width: u16, top: u16, pivot: char) {
    let lines = [
        format!("Assume pivot is '{pivot}' (original items[0])."),
        "If v < pivot: swap(lt, i), lt++, i++".to_string(),
        "If v > pivot: swap(i, gt), gt--".to_string(),
        "If v == pivot: i++".to_string(),
    ];
    let body_width = lines.iter().map(|l| string_width(l) + 2).max().unwrap_or(0);
    let x = width.saturating_sub(body_width) / 2;

    buffer.draw_text(x, top, "Quick Logic Guide:", Rgba::INDIGO, None, Attr::BOLD, None);
    for (row, line) in (1u16..).zip(&lines) {
        let y = top.saturating_add(row);
        buffer.draw_text(x, y, "•", Rgba::INDIGO, None, Attr::NONE, None);
        buffer.draw_text(x + 2, y, line, Rgba::SLATE_LIGHT, None, Attr::NONE, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MarkerPlacement;

    const VALUES: [char; 4] = ['B', 'A', 'C', 'A'];

    /// Four 5x3 boxes at x = 0, 6, 12, 18 on row ARRAY_TOP.
    fn geometry() -> ArrayGeometry {
        let top = ARRAY_TOP as f32;
        let boxes = (0..4)
            .map(|i| Bounds::new(i as f32 * 6.0, top, 5.0, 3.0))
            .collect();
        ArrayGeometry::from_bounds(Bounds::new(0.0, top, 23.0, 3.0), boxes)
    }

    fn marker(kind: PointerKind, index: usize) -> Marker {
        Marker {
            kind,
            index,
            placement: MarkerPlacement {
                left_offset: index as f32 * 6.0 + 2.5,
                top_offset: 3.0,
            },
        }
    }

    fn view<'a>(geometry: &'a ArrayGeometry, markers: &'a [Marker]) -> FrameView<'a> {
        FrameView {
            width: 80,
            height: 30,
            values: &VALUES,
            selection: None,
            cursor: None,
            markers,
            box_width: 5.0,
            pivot: 'B',
            geometry,
        }
    }

    #[test]
    fn test_header_and_values() {
        let geometry = geometry();
        let frame = build_frame(&view(&geometry, &[]));

        assert!(frame.buffer.row_text(0).contains(TITLE));
        let value_row = frame.buffer.row_text(ARRAY_TOP + 1);
        assert_eq!(value_row.chars().nth(2), Some('B'));
        assert_eq!(value_row.chars().nth(8), Some('A'));
        assert_eq!(value_row.chars().nth(14), Some('C'));
        // Index labels sit above the boxes
        assert_eq!(frame.buffer.row_text(ARRAY_TOP - 1).chars().nth(14), Some('2'));
    }

    #[test]
    fn test_box_hit_regions() {
        let geometry = geometry();
        let frame = build_frame(&view(&geometry, &[]));

        let boxes: Vec<_> = frame
            .hit_regions
            .iter()
            .filter(|r| matches!(r.target, HitTarget::Box(_)))
            .collect();
        assert_eq!(boxes.len(), 4);
        assert_eq!(boxes[3].rect, ClipRect::new(18, ARRAY_TOP, 5, 3));
    }

    #[test]
    fn test_control_hit_regions() {
        let geometry = geometry();
        let frame = build_frame(&view(&geometry, &[]));

        let actions = [Action::AdvanceLtAndI, Action::AdvanceI, Action::DecrementGt, Action::Reset];
        for action in actions {
            assert!(
                frame.hit_regions.iter().any(|r| r.target == HitTarget::Control(action)),
                "missing control {action:?}"
            );
        }
    }

    #[test]
    fn test_markers_under_their_boxes() {
        let geometry = geometry();
        let markers = [
            marker(PointerKind::Gt, 3),
            marker(PointerKind::Lt, 0),
            marker(PointerKind::I, 1),
        ];
        let frame = build_frame(&view(&geometry, &markers));

        let arrow_row = ARRAY_TOP + 3;
        let arrows = frame.buffer.row_text(arrow_row);
        assert_eq!(arrows.chars().nth(2), Some('▲'));
        assert_eq!(arrows.chars().nth(8), Some('▲'));
        assert_eq!(arrows.chars().nth(20), Some('▲'));

        let labels = frame.buffer.row_text(arrow_row + 1);
        assert_eq!(&labels[1..3], "lt");
        assert_eq!(labels.chars().nth(8), Some('i'));

        let indices = frame.buffer.row_text(arrow_row + 2);
        assert!(indices.contains("(0)"));
        assert!(indices.contains("(3)"));
    }

    #[test]
    fn test_top_marker_wins_on_overlap() {
        let geometry = geometry();
        // Paint order: gt, lt, i
        let markers = [
            marker(PointerKind::Gt, 1),
            marker(PointerKind::Lt, 1),
            marker(PointerKind::I, 1),
        ];
        let frame = build_frame(&view(&geometry, &markers));

        let arrow = frame.buffer.get(8, ARRAY_TOP + 3).copied().unwrap_or_default();
        assert_eq!(arrow.fg, pointer_color(PointerKind::I));
    }

    #[test]
    fn test_markers_hidden_before_measurement() {
        let geometry = geometry();
        let markers = [marker(PointerKind::I, 1)];
        let mut view = view(&geometry, &markers);
        view.box_width = 0.0;
        let frame = build_frame(&view);

        assert!(!frame.buffer.row_text(ARRAY_TOP + 3).contains('▲'));
    }

    #[test]
    fn test_selected_box_highlighted() {
        let geometry = geometry();
        let mut view = view(&geometry, &[]);
        view.selection = Some(2);
        let frame = build_frame(&view);

        let cell = frame.buffer.get(14, ARRAY_TOP + 1).copied().unwrap_or_default();
        assert_eq!(cell.bg, Rgba::YELLOW_LIGHT);
        let other = frame.buffer.get(8, ARRAY_TOP + 1).copied().unwrap_or_default();
        assert_ne!(other.bg, Rgba::YELLOW_LIGHT);
    }

    #[test]
    fn test_cursor_underlines_value() {
        let geometry = geometry();
        let mut view = view(&geometry, &[]);
        view.cursor = Some(0);
        let frame = build_frame(&view);

        let cell = frame.buffer.get(2, ARRAY_TOP + 1).copied().unwrap_or_default();
        assert!(cell.attrs.contains(Attr::UNDERLINE));
    }

    #[test]
    fn test_rows_past_the_coordinate_limit_are_skipped() {
        let top = ARRAY_TOP as f32;
        let far = 70_000.0;
        let boxes = vec![
            Bounds::new(0.0, top, 5.0, 3.0),
            Bounds::new(0.0, far, 5.0, 3.0),
            Bounds::new(0.0, far + 4.0, 5.0, 3.0),
            Bounds::new(0.0, far + 8.0, 5.0, 3.0),
        ];
        let geometry = ArrayGeometry::from_bounds(Bounds::new(0.0, top, 6.0, far + 11.0), boxes);
        let mut far_marker = marker(PointerKind::Gt, 3);
        far_marker.placement.top_offset = far + 11.0 - top;
        let markers = [marker(PointerKind::Lt, 0), far_marker];

        let frame = build_frame(&FrameView {
            width: 6,
            height: 24,
            ..view(&geometry, &markers)
        });

        let boxes_drawn: Vec<_> = frame
            .hit_regions
            .iter()
            .filter(|r| matches!(r.target, HitTarget::Box(_)))
            .collect();
        assert_eq!(boxes_drawn.len(), 1);
        assert_eq!(frame.buffer.get(2, ARRAY_TOP + 3).map(|c| c.ch), Some('▲'));
    }

    #[test]
    fn test_guide_names_pivot() {
        let geometry = geometry();
        let frame = build_frame(&view(&geometry, &[]));

        let found =
            (0..frame.buffer.height()).any(|y| frame.buffer.row_text(y).contains("pivot is 'B'"));
        assert!(found);
    }

    #[test]
    fn test_hints_dropped_when_narrow() {
        let geometry = geometry();
        let mut view = view(&geometry, &[]);
        view.width = 30;
        let frame = build_frame(&view);

        let text: String = (0..frame.buffer.height()).map(|y| frame.buffer.row_text(y)).collect();
        assert!(!text.contains("no swap"));
        assert!(text.contains("gt--"));
    }
}
