//! Embed colour parsing.
//!
//! Accepts hex forms (`#0099ff`, `0099ff`, `0x0099ff`, `#09f`), a palette of
//! named colours and `Random`.

use thiserror::Error;

use crate::random::RandomSource;

/// Default embed colour for `webhook-embed`.
pub const DEFAULT_EMBED_COLOR: &str = "#0099ff";

/// Largest valid RGB value.
const MAX_COLOR: u32 = 0xFF_FF_FF;

/// Named colours, matched case-insensitively.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("default", 0x000000),
    ("white", 0xFFFFFF),
    ("aqua", 0x1ABC9C),
    ("green", 0x57F287),
    ("blue", 0x3498DB),
    ("yellow", 0xFEE75C),
    ("purple", 0x9B59B6),
    ("fuchsia", 0xEB459E),
    ("gold", 0xF1C40F),
    ("orange", 0xE67E22),
    ("red", 0xED4245),
    ("grey", 0x95A5A6),
    ("navy", 0x34495E),
    ("blurple", 0x5865F2),
    ("greyple", 0x99AAB5),
    ("darkbutnotblack", 0x2C2F33),
    ("notquiteblack", 0x23272A),
];

/// The colour string could not be turned into an RGB value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}'")]
pub struct ColorError(pub String);

/// Parse a user-supplied colour into an RGB value.
pub fn parse_color(input: &str, random: &dyn RandomSource) -> Result<u32, ColorError> {
    let trimmed = input.trim();
    let invalid = || ColorError(input.to_string());

    if trimmed.eq_ignore_ascii_case("random") {
        return Ok(random.int_in_range(0, i64::from(MAX_COLOR)) as u32);
    }

    if let Some((_, value)) = NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
    {
        return Ok(*value);
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let value = match hex.len() {
        // #rgb shorthand
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?
        }
        6 => u32::from_str_radix(hex, 16).map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if value > MAX_COLOR {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ThreadRandom;

    struct Fixed(i64);

    impl RandomSource for Fixed {
        fn int_in_range(&self, _low: i64, _high: i64) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_hex_forms() {
        let rng = ThreadRandom;
        assert_eq!(parse_color("#0099ff", &rng), Ok(0x0099FF));
        assert_eq!(parse_color("0099FF", &rng), Ok(0x0099FF));
        assert_eq!(parse_color("0x0099ff", &rng), Ok(0x0099FF));
        assert_eq!(parse_color("  #ffffff ", &rng), Ok(0xFFFFFF));
        assert_eq!(parse_color("#09f", &rng), Ok(0x0099FF));
    }

    #[test]
    fn test_default_color_parses() {
        assert_eq!(parse_color(DEFAULT_EMBED_COLOR, &ThreadRandom), Ok(0x0099FF));
    }

    #[test]
    fn test_named_colors() {
        let rng = ThreadRandom;
        assert_eq!(parse_color("Red", &rng), Ok(0xED4245));
        assert_eq!(parse_color("BLURPLE", &rng), Ok(0x5865F2));
        assert_eq!(parse_color("DarkButNotBlack", &rng), Ok(0x2C2F33));
    }

    #[test]
    fn test_random_uses_source() {
        assert_eq!(parse_color("random", &Fixed(0x123456)), Ok(0x123456));
    }

    #[test]
    fn test_rejects_garbage() {
        let rng = ThreadRandom;
        assert!(parse_color("", &rng).is_err());
        assert!(parse_color("#", &rng).is_err());
        assert!(parse_color("blue-ish", &rng).is_err());
        assert!(parse_color("#ggg000", &rng).is_err());
        assert!(parse_color("#1234567", &rng).is_err());
        assert!(parse_color("#1", &rng).is_err());
        assert!(parse_color("#12", &rng).is_err());
        assert!(parse_color("#1234", &rng).is_err());
        assert!(parse_color("#12345", &rng).is_err());
        assert!(parse_color("fff0", &rng).is_err());
        assert_eq!(
            parse_color("not a color", &rng),
            Err(ColorError("not a color".to_string()))
        );
    }
}
