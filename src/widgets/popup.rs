use ratatui::{Frame, layout::Rect, widgets::Clear};

/// `width` x `height` in the middle of `frame_area`, shrunk to fit.
pub fn centered_popup(frame_area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(frame_area.width);
    let popup_height = height.min(frame_area.height);

    Rect {
        x: frame_area.x + (frame_area.width - popup_width) / 2,
        y: frame_area.y + (frame_area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Box sitting on top of `anchor`, indented by `x_offset` on both sides.
/// Never taller than the space above the anchor.
pub fn popup_above_anchor(anchor: Rect, width: u16, height: u16, x_offset: u16) -> Rect {
    let height = height.min(anchor.y);

    Rect {
        x: anchor.x + x_offset,
        y: anchor.y - height,
        width: width.min(anchor.width.saturating_sub(x_offset * 2)),
        height,
    }
}

/// Blank out whatever was drawn under a popup.
pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_form_on_screen() {
        let popup = centered_popup(Rect::new(0, 0, 80, 24), 50, 13);
        assert_eq!(popup, Rect::new(15, 5, 50, 13));
    }

    #[test]
    fn test_centered_form_on_tiny_terminal() {
        let popup = centered_popup(Rect::new(0, 0, 30, 8), 50, 13);
        assert_eq!(popup, Rect::new(0, 0, 30, 8));
    }

    #[test]
    fn test_centered_respects_offset_area() {
        let popup = centered_popup(Rect::new(10, 4, 20, 10), 10, 4);
        assert_eq!(popup, Rect::new(15, 7, 10, 4));
    }

    #[test]
    fn test_suggestions_above_item_input() {
        let input = Rect::new(28, 20, 72, 3);
        let popup = popup_above_anchor(input, 24, 5, 1);
        assert_eq!(popup, Rect::new(29, 15, 24, 5));
    }

    #[test]
    fn test_clamped_near_top() {
        let input = Rect::new(0, 2, 40, 3);
        let popup = popup_above_anchor(input, 20, 6, 1);
        assert_eq!(popup.y, 0);
        assert_eq!(popup.height, 2);
    }

    #[test]
    fn test_clamped_to_anchor_width() {
        let input = Rect::new(0, 10, 12, 3);
        let popup = popup_above_anchor(input, 30, 4, 1);
        assert_eq!(popup.width, 10);
    }
}
