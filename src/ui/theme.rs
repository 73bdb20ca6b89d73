use crossterm::style::{Color, StyledContent, Stylize};

pub(crate) const ACCENT: Color = Color::Rgb {
    r: 137,
    g: 180,
    b: 250,
};
pub(crate) const GREEN: Color = Color::Rgb {
    r: 166,
    g: 227,
    b: 161,
};
pub(crate) const RED: Color = Color::Rgb {
    r: 243,
    g: 139,
    b: 168,
};
pub(crate) const YELLOW: Color = Color::Rgb {
    r: 249,
    g: 226,
    b: 175,
};
pub(crate) const TEXT_DIM: Color = Color::Rgb {
    r: 127,
    g: 132,
    b: 156,
};

pub(crate) fn title(text: impl Into<String>) -> StyledContent<String> {
    text.into().with(ACCENT).bold()
}

pub(crate) fn header(text: impl Into<String>) -> StyledContent<String> {
    text.into().bold()
}

pub(crate) fn dim(text: impl Into<String>) -> StyledContent<String> {
    text.into().with(TEXT_DIM)
}

pub(crate) fn good(text: impl Into<String>) -> StyledContent<String> {
    text.into().with(GREEN)
}

pub(crate) fn bad(text: impl Into<String>) -> StyledContent<String> {
    text.into().with(RED)
}

pub(crate) fn caution(text: impl Into<String>) -> StyledContent<String> {
    text.into().with(YELLOW)
}

// ── Messages ─────────────────────────────────────────────────

pub(crate) fn success(message: &str) -> StyledContent<String> {
    good(message).bold()
}

pub(crate) fn warning(message: &str) -> StyledContent<String> {
    caution(message).bold()
}
