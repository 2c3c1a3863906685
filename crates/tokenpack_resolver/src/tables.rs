use std::collections::HashMap;
use std::sync::LazyLock;

/// Deliberately conspicuous placeholder for unresolvable color tokens.
pub const COLOR_FALLBACK: &str = "#FF00FF";
pub const FONT_FAMILY_FALLBACK: &str = "sans-serif";
pub const FONT_SIZE_FALLBACK: &str = "1em";
pub const FONT_WEIGHT_FALLBACK: &str = "400";
pub const SPACING_FALLBACK: &str = "0px";

/// System color ramp, keyed `family-grade` with a `v` suffix for vivid
/// entries.
static COLOR_RAMP_ENTRIES: &[(&str, &str)] = &[
  ("gray-1", "#fcfcfc"),
  ("gray-2", "#f9f9f9"),
  ("gray-3", "#f6f6f6"),
  ("gray-4", "#f3f3f3"),
  ("gray-5", "#f0f0f0"),
  ("gray-10", "#e6e6e6"),
  ("gray-20", "#c9c9c9"),
  ("gray-30", "#adadad"),
  ("gray-40", "#919191"),
  ("gray-50", "#757575"),
  ("gray-60", "#5c5c5c"),
  ("gray-70", "#454545"),
  ("gray-80", "#2e2e2e"),
  ("gray-90", "#1b1b1b"),
  ("gray-100", "#000000"),
  ("gray-cool-5", "#edeff0"),
  ("gray-cool-10", "#dfe1e2"),
  ("gray-cool-20", "#c6cace"),
  ("gray-cool-30", "#a9aeb1"),
  ("gray-cool-40", "#8d9297"),
  ("gray-cool-50", "#71767a"),
  ("gray-cool-60", "#565c65"),
  ("gray-cool-70", "#3d4551"),
  ("gray-cool-80", "#2d2e2f"),
  ("gray-cool-90", "#1c1d1f"),
  ("blue-5", "#eff6fb"),
  ("blue-10", "#d9e8f6"),
  ("blue-20", "#aacdec"),
  ("blue-30", "#73b3e7"),
  ("blue-40", "#4f97d1"),
  ("blue-50", "#2378c3"),
  ("blue-50v", "#0076d6"),
  ("blue-60", "#2c608a"),
  ("blue-60v", "#005ea2"),
  ("blue-70", "#274863"),
  ("blue-80", "#1f303e"),
  ("blue-90", "#11181d"),
  ("blue-warm-5", "#ecf1f7"),
  ("blue-warm-10", "#e1e7f1"),
  ("blue-warm-20", "#bbcae4"),
  ("blue-warm-30", "#98afd2"),
  ("blue-warm-40", "#7292c7"),
  ("blue-warm-50", "#4a77b4"),
  ("blue-warm-50v", "#0050d8"),
  ("blue-warm-60", "#345d96"),
  ("blue-warm-60v", "#2e6276"),
  ("blue-warm-70", "#2f4668"),
  ("blue-warm-80", "#252f3e"),
  ("blue-warm-90", "#13171f"),
  ("cyan-5", "#e7f6f8"),
  ("cyan-10", "#ccecf2"),
  ("cyan-20", "#99deea"),
  ("cyan-30", "#5dc0d1"),
  ("cyan-40", "#449dac"),
  ("cyan-50", "#168092"),
  ("cyan-60", "#2a646d"),
  ("cyan-70", "#2c4a4e"),
  ("cyan-80", "#203133"),
  ("cyan-90", "#111819"),
  ("mint-5", "#dbf6ed"),
  ("mint-10", "#c7efe2"),
  ("mint-20", "#92d9bb"),
  ("mint-30", "#5abf95"),
  ("mint-40", "#34a37e"),
  ("mint-50", "#2e8367"),
  ("mint-60", "#286846"),
  ("mint-70", "#204e34"),
  ("mint-80", "#193324"),
  ("mint-90", "#0d1a12"),
  ("green-5", "#eaf4dd"),
  ("green-10", "#dfeacd"),
  ("green-20", "#b8d293"),
  ("green-30", "#9bb672"),
  ("green-40", "#7d9b4e"),
  ("green-50", "#607f35"),
  ("green-60", "#4c6424"),
  ("green-70", "#3c4a29"),
  ("green-80", "#293021"),
  ("green-90", "#161814"),
  ("green-cool-5", "#ecf3ec"),
  ("green-cool-10", "#dbebde"),
  ("green-cool-20", "#b4d0b9"),
  ("green-cool-30", "#86b98e"),
  ("green-cool-40", "#5e9f69"),
  ("green-cool-50", "#4d8055"),
  ("green-cool-50v", "#00a91c"),
  ("green-cool-60", "#446443"),
  ("green-cool-70", "#37493b"),
  ("green-cool-80", "#28312a"),
  ("green-cool-90", "#141614"),
  ("yellow-5", "#faf3d1"),
  ("yellow-10", "#f5e6af"),
  ("yellow-20", "#e6c74c"),
  ("yellow-30", "#c9ab48"),
  ("yellow-40", "#a88f48"),
  ("yellow-50", "#8a7237"),
  ("yellow-60", "#6b5a39"),
  ("yellow-70", "#504332"),
  ("yellow-80", "#332d27"),
  ("yellow-90", "#1a1614"),
  ("gold-5", "#f5f0e6"),
  ("gold-10", "#f1e5cd"),
  ("gold-20", "#dec69a"),
  ("gold-30", "#c2a26b"),
  ("gold-40", "#ad8b4e"),
  ("gold-50", "#8e704f"),
  ("gold-60", "#6b5947"),
  ("gold-70", "#4d4438"),
  ("gold-80", "#322d26"),
  ("gold-90", "#191714"),
  ("orange-5", "#f6efe9"),
  ("orange-10", "#f2e4d4"),
  ("orange-20", "#dec5a4"),
  ("orange-30", "#c05600"),
  ("orange-40", "#a86437"),
  ("orange-50", "#8c471c"),
  ("orange-60", "#6f3b1e"),
  ("orange-70", "#523522"),
  ("orange-80", "#332d27"),
  ("orange-90", "#1b1614"),
  ("red-5", "#f9eeee"),
  ("red-10", "#f8e1de"),
  ("red-20", "#f7bbb1"),
  ("red-30", "#f2938c"),
  ("red-40", "#e9695f"),
  ("red-50", "#d83933"),
  ("red-50v", "#e52207"),
  ("red-60", "#a23737"),
  ("red-60v", "#b50909"),
  ("red-70", "#6f3331"),
  ("red-80", "#3e2927"),
  ("red-90", "#1b1616"),
  ("red-warm-5", "#f6efea"),
  ("red-warm-10", "#f4e3db"),
  ("red-warm-20", "#ecc0a7"),
  ("red-warm-30", "#dca081"),
  ("red-warm-40", "#d27a56"),
  ("red-warm-50", "#c3512c"),
  ("red-warm-50v", "#d54309"),
  ("red-warm-60", "#805039"),
  ("red-warm-70", "#524236"),
  ("red-warm-80", "#332d29"),
  ("red-warm-90", "#1f1c18"),
  ("magenta-5", "#f9f0f2"),
  ("magenta-10", "#f6e1e8"),
  ("magenta-20", "#f0bbc9"),
  ("magenta-30", "#e895b3"),
  ("magenta-40", "#e0699f"),
  ("magenta-50", "#c84281"),
  ("magenta-60", "#8b4566"),
  ("magenta-70", "#66364b"),
  ("magenta-80", "#402731"),
  ("magenta-90", "#1b1617"),
  ("violet-5", "#f4f1f9"),
  ("violet-10", "#ebe3f9"),
  ("violet-20", "#d0c3e9"),
  ("violet-30", "#b8a2e3"),
  ("violet-40", "#9d84d2"),
  ("violet-50", "#8168b3"),
  ("violet-60", "#665190"),
  ("violet-70", "#4c3d69"),
  ("violet-80", "#312b3f"),
  ("violet-90", "#18161d"),
  ("indigo-5", "#efeff8"),
  ("indigo-10", "#e5e4fa"),
  ("indigo-20", "#c5c5f3"),
  ("indigo-30", "#a5a8eb"),
  ("indigo-40", "#8889db"),
  ("indigo-50", "#676cc8"),
  ("indigo-60", "#4d52af"),
  ("indigo-70", "#3d4076"),
  ("indigo-80", "#2b2c40"),
  ("indigo-90", "#16171f"),
];

static COLOR_RAMP: LazyLock<HashMap<&'static str, &'static str>> =
  LazyLock::new(|| COLOR_RAMP_ENTRIES.iter().copied().collect());

/// Looks up `family` + `grade` in the color ramp, trying the vivid entry
/// before the plain one.
pub fn color_ramp(family: &str, grade: &str) -> Option<&'static str> {
  let vivid = format!("{family}-{grade}v");
  if let Some(hex) = COLOR_RAMP.get(vivid.as_str()) {
    return Some(hex);
  }
  let plain = format!("{family}-{grade}");
  COLOR_RAMP.get(plain.as_str()).copied()
}

/// Font stacks matched by substring against unresolved family names.
pub static FONT_STACKS: &[(&str, &str)] = &[
  (
    "sans",
    "'Source Sans Pro Web', 'Helvetica Neue', Helvetica, Roboto, Arial, sans-serif",
  ),
  (
    "serif",
    "'Merriweather Web', Georgia, Cambria, 'Times New Roman', Times, serif",
  ),
  (
    "mono",
    "'Roboto Mono Web', 'Bitstream Vera Sans Mono', Consolas, Courier, monospace",
  ),
];

pub fn font_stack(name: &str) -> Option<&'static str> {
  let lowered = name.to_ascii_lowercase();
  FONT_STACKS
    .iter()
    .find(|(needle, _)| lowered.contains(needle))
    .map(|(_, stack)| *stack)
}

/// Semantic size names shared by fontSize and typography tokens.
static FONT_SIZE_ENTRIES: &[(&str, &str)] = &[
  ("3xs", "12px"),
  ("2xs", "13px"),
  ("xs", "14px"),
  ("sm", "15px"),
  ("md", "16px"),
  ("lg", "22px"),
  ("xl", "32px"),
  ("2xl", "40px"),
  ("3xl", "48px"),
];

pub fn font_size(name: &str) -> Option<&'static str> {
  FONT_SIZE_ENTRIES
    .iter()
    .find(|(key, _)| *key == name)
    .map(|(_, value)| *value)
}

static FONT_WEIGHT_ENTRIES: &[(&str, &str)] = &[
  ("thin", "100"),
  ("light", "300"),
  ("normal", "400"),
  ("medium", "500"),
  ("semibold", "600"),
  ("bold", "700"),
  ("heavy", "900"),
];

pub fn font_weight(name: &str) -> Option<&'static str> {
  FONT_WEIGHT_ENTRIES
    .iter()
    .find(|(key, _)| *key == name)
    .map(|(_, value)| *value)
}

/// System spacing scale: half units are written with an inline "05", so "105"
/// reads one-and-a-half units.
static SPACING_ENTRIES: &[(&str, &str)] = &[
  ("0", "0"),
  ("1px", "1px"),
  ("2px", "2px"),
  ("05", "4px"),
  ("1", "8px"),
  ("105", "12px"),
  ("2", "16px"),
  ("205", "20px"),
  ("3", "24px"),
  ("4", "32px"),
  ("5", "40px"),
  ("6", "48px"),
  ("7", "56px"),
  ("8", "64px"),
  ("9", "72px"),
  ("10", "80px"),
  ("15", "120px"),
];

pub fn spacing(key: &str) -> Option<&'static str> {
  SPACING_ENTRIES
    .iter()
    .find(|(name, _)| *name == key)
    .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn color_ramp_prefers_vivid_entries() {
    assert_eq!(color_ramp("blue", "50"), Some("#0076d6"));
    assert_eq!(color_ramp("gray", "50"), Some("#757575"));
  }

  #[test]
  fn color_ramp_accepts_explicit_vivid_grades() {
    assert_eq!(color_ramp("red", "50v"), Some("#e52207"));
  }

  #[test]
  fn color_ramp_misses_return_none() {
    assert_eq!(color_ramp("chartreuse", "50"), None);
  }

  #[test]
  fn font_stacks_match_by_substring() {
    assert_eq!(
      font_stack("public-sans"),
      Some("'Source Sans Pro Web', 'Helvetica Neue', Helvetica, Roboto, Arial, sans-serif")
    );
    assert!(font_stack("merriweather-serif").is_some());
    assert!(font_stack("roboto-mono").is_some());
    assert_eq!(font_stack("comic"), None);
  }

  #[test]
  fn font_sizes_cover_the_semantic_scale() {
    assert_eq!(font_size("3xs"), Some("12px"));
    assert_eq!(font_size("3xl"), Some("48px"));
    assert_eq!(font_size("huge"), None);
  }

  #[test]
  fn font_weights_map_names_to_css_numbers() {
    assert_eq!(font_weight("thin"), Some("100"));
    assert_eq!(font_weight("heavy"), Some("900"));
    assert_eq!(font_weight("bolder"), None);
  }

  #[test]
  fn spacing_scale_uses_system_units() {
    assert_eq!(spacing("05"), Some("4px"));
    assert_eq!(spacing("2"), Some("16px"));
    assert_eq!(spacing("999"), None);
  }
}
