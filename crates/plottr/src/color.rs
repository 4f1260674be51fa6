/// Plottr's default plotline colors, in the order Plottr hands them out.
pub const LINE_COLORS: [&str; 6] = [
    "#6cace4", // blue
    "#78be20", // green
    "#e5554f", // red
    "#ff7f32", // orange
    "#ffc72c", // yellow
    "#0b1117", // black
];

/// Color for the `n`th plotline (0-based), cycling through the palette.
pub fn color_at(n: usize) -> &'static str {
    LINE_COLORS[n % LINE_COLORS.len()]
}
