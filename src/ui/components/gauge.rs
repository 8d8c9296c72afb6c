use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Block, Widget},
};

/// Single-ratio gauge with sub-cell precision and a centred label cut out of
/// the bar.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CustomGauge<'a> {
    block: Option<Block<'a>>,
    ratio: f64,
    label: Option<Span<'a>>,
    use_unicode: bool,
    filled_style: Style,
    remaining_style: Style,
}

impl<'a> CustomGauge<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Out-of-range and NaN ratios are clamped into `[0, 1]`.
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        self
    }

    pub fn label<T>(mut self, label: T) -> Self
    where
        T: Into<Span<'a>>,
    {
        self.label = Some(label.into());
        self
    }

    pub const fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    pub fn filled_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.filled_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }
}

fn get_unicode_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for CustomGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(ref block) = self.block {
            block.render(area, buf);
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        if inner.is_empty() {
            return;
        }

        self.render_gauge(inner, buf);
    }
}

impl CustomGauge<'_> {
    fn render_gauge(&self, gauge_area: Rect, buf: &mut Buffer) {
        let filled_pos = gauge_area.width as f64 * self.ratio;

        let default_label;
        let label = match self.label.as_ref() {
            Some(label) => label,
            None => {
                default_label = Span::raw(format!("{}%", (self.ratio * 100.0).round() as u16));
                &default_label
            }
        };
        let label_width = (label.width() as u16).min(gauge_area.width);
        let label_col = gauge_area.left() + (gauge_area.width - label_width) / 2;
        let label_row = gauge_area.top() + gauge_area.height / 2;

        for y in gauge_area.top()..gauge_area.bottom() {
            for x in gauge_area.left()..gauge_area.right() {
                let pos = (x - gauge_area.left()) as f64;

                let (mut symbol, mut style) = if pos < filled_pos {
                    let symbol = if self.use_unicode && pos + 1.0 > filled_pos {
                        get_unicode_block(filled_pos - pos)
                    } else {
                        symbols::block::FULL
                    };
                    (symbol, self.filled_style)
                } else {
                    (" ", self.remaining_style)
                };

                if y == label_row && x >= label_col && x < label_col + label_width {
                    symbol = " ";
                    style = style.bg(style.fg.unwrap_or_default());
                }

                buf[(x, y)]
                    .set_symbol(symbol)
                    .set_fg(style.fg.unwrap_or_default())
                    .set_bg(style.bg.unwrap_or_default());
            }
        }

        buf.set_span(label_col, label_row, label, label_width);
    }
}
