use ratatui::layout::Rect;

/// 右上角第 `slot` 个通知的位置，超出区域时返回 None
pub fn notification_rect(slot: u16, width: u16, height: u16, area: Rect) -> Option<Rect> {
    let width = width.min(area.width);
    let y = area.y.checked_add(1)?.checked_add(slot.checked_mul(height)?)?;
    if y.checked_add(height)? > area.bottom() {
        return None;
    }

    let x = area.right().saturating_sub(width + 1).max(area.x);
    Some(Rect::new(x, y, width, height))
}
