use phf::phf_map;

static FROM_SUPERSCRIPT: phf::Map<char, char> = phf_map! {
  '⁰' => '0',
  '¹' => '1',
  '²' => '2',
  '³' => '3',
  '⁴' => '4',
  '⁵' => '5',
  '⁶' => '6',
  '⁷' => '7',
  '⁸' => '8',
  '⁹' => '9',
  '⁻' => '-',
  '⁺' => '+',
};

pub(crate) fn from_superscript(c: char) -> Option<char> {
  FROM_SUPERSCRIPT.get(&c).copied()
}

pub(crate) fn is_superscript(c: char) -> bool {
  FROM_SUPERSCRIPT.contains_key(&c)
}

/// Replaces superscript glyphs with their ASCII equivalents, leaving
/// every other character alone.
pub(crate) fn normalize(text: &str) -> String {
  text.chars().map(|c| from_superscript(c).unwrap_or(c)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize() {
    assert_eq!(normalize("⁻¹²"), "-12");
    assert_eq!(normalize("3"), "3");
    assert_eq!(normalize("²:³"), "2:3");
  }

  #[test]
  fn test_is_superscript() {
    assert!(is_superscript('²'));
    assert!(is_superscript('⁻'));
    assert!(!is_superscript('2'));
    assert!(!is_superscript('^'));
  }
}
