//! Theme color tokens shared by every back-end.

/// A named color from the widget theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeColor {
    OnSurface,
    OnSurfaceVariant,
    Primary,
    Error,
    WidgetBackground,
    Surface,
}

impl ThemeColor {
    /// Every known token.
    pub const ALL: [ThemeColor; 6] = [
        Self::OnSurface,
        Self::OnSurfaceVariant,
        Self::Primary,
        Self::Error,
        Self::WidgetBackground,
        Self::Surface,
    ];

    /// Look up a token by name.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }

    /// Token name as written in layouts.
    pub fn token(self) -> &'static str {
        match self {
            Self::OnSurface => "onSurface",
            Self::OnSurfaceVariant => "onSurfaceVariant",
            Self::Primary => "primary",
            Self::Error => "error",
            Self::WidgetBackground => "widgetBackground",
            Self::Surface => "surface",
        }
    }

    /// Preview hex value (dark theme).
    pub fn hex(self) -> &'static str {
        match self {
            Self::OnSurface => "#E6E1E5",
            Self::OnSurfaceVariant => "#CAC4D0",
            Self::Primary => "#D0BCFF",
            Self::Error => "#F2B8B5",
            Self::WidgetBackground => "#1C1B1F",
            Self::Surface => "#2B2930",
        }
    }

    /// Property on `GlanceTheme.colors` and `WidgetColorProvider`.
    pub fn provider_color(self) -> &'static str {
        match self {
            Self::WidgetBackground => "background",
            other => other.token(),
        }
    }
}

/// How a literal color string should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRef<'a> {
    /// `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    Hex(&'a str),
    /// A `data.`/`item.`/`size.` path.
    Path(&'a str),
    /// A theme token or other named color.
    Token(&'a str),
}

/// Classify a literal color string.
pub fn classify_color(value: &str) -> ColorRef<'_> {
    let value = value.trim();
    if value.starts_with('#') {
        ColorRef::Hex(value)
    } else if ["data.", "item.", "size."]
        .iter()
        .any(|prefix| value.starts_with(prefix))
    {
        ColorRef::Path(value)
    } else {
        ColorRef::Token(value)
    }
}

/// Whether a literal color string names a token that needs a variable.
pub fn is_color_token(value: &str) -> bool {
    !value.trim().is_empty()
        && !value.contains("{{")
        && matches!(classify_color(value), ColorRef::Token(_))
}

/// Variable name bound to a token: `onSurface` becomes `colorOnSurface`.
pub fn token_variable(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => format!("color{}{}", first.to_uppercase(), chars.as_str()),
        None => "color".to_string(),
    }
}

/// Parse a CSS hex color into ARGB.
pub fn hex_to_argb(hex: &str) -> Option<u32> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(if expanded.len() == 6 {
        0xFF00_0000 | value
    } else {
        value.rotate_right(8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lookup() {
        assert_eq!(ThemeColor::from_token("primary"), Some(ThemeColor::Primary));
        assert_eq!(ThemeColor::from_token("unknown"), None);
        assert_eq!(ThemeColor::WidgetBackground.provider_color(), "background");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify_color("#fff"), ColorRef::Hex("#fff"));
        assert_eq!(classify_color("data.tint"), ColorRef::Path("data.tint"));
        assert!(is_color_token("onSurfaceVariant"));
        assert!(!is_color_token("{{tint}}"));
        assert!(!is_color_token("#112233"));
    }

    #[test]
    fn test_token_variable() {
        assert_eq!(token_variable("onSurface"), "colorOnSurface");
        assert_eq!(token_variable("primary"), "colorPrimary");
    }

    #[test]
    fn test_hex_to_argb() {
        assert_eq!(hex_to_argb("#112233"), Some(0xFF11_2233));
        assert_eq!(hex_to_argb("#fff"), Some(0xFFFF_FFFF));
        assert_eq!(hex_to_argb("#11223380"), Some(0x8011_2233));
        assert_eq!(hex_to_argb("red"), None);
    }
}
