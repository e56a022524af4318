//! ファイル名グロブ照合モジュール
//!
//! `*`（0文字以上の任意の文字列）と `?`（任意の1文字）のみをサポートする。
//! それ以外の文字はリテラルとして扱い、ファイル名全体が一致した場合のみ真を返す。

/// 大文字小文字の扱い
///
/// プラットフォーム既定に依存させず、呼び出し側が明示的に選ぶ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// ASCIIの大文字小文字を区別しない（デフォルト）
    #[default]
    Insensitive,
    /// 完全一致
    Sensitive,
}

impl CaseSensitivity {
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        }
    }

    fn eq(self, a: char, b: char) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a.eq_ignore_ascii_case(&b),
        }
    }
}

/// ファイル名がパターンに一致するか判定
///
/// 空パターンはどのファイル名にも一致しない（除外パターン未指定を表す）。
pub fn matches(name: &str, pattern: &str, case: CaseSensitivity) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut n, mut p) = (0usize, 0usize);
    // 直前の `*` の位置と、その `*` が吸収を始めた name 側の位置
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, n));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '?' || case.eq(pattern[p], name[n])) {
            n += 1;
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            // `*` にもう1文字吸収させてやり直す
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// パターンの妥当性チェック（カタログ検証用）
///
/// 問題があれば理由を返す。
pub fn check_pattern(pattern: &str) -> Option<&'static str> {
    if pattern.is_empty() {
        return Some("empty pattern");
    }
    if pattern.contains('/') || pattern.contains('\\') {
        return Some("pattern must not contain a path separator");
    }
    if !pattern.chars().all(|c| c.is_ascii_graphic()) {
        return Some("pattern must consist of printable ASCII characters");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: CaseSensitivity = CaseSensitivity::Sensitive;
    const I: CaseSensitivity = CaseSensitivity::Insensitive;

    #[test]
    fn test_star_matches_any_run() {
        assert!(matches("board.gtl", "*.gtl", S));
        assert!(matches(".gtl", "*.gtl", S));
        assert!(!matches("board.gtl.bak", "*.gtl", S));
        assert!(matches("board-F_Cu.gbr", "*-F?Cu*", S));
        assert!(matches("x-NPTH.drl", "*NPTH*", S));
    }

    #[test]
    fn test_question_mark_matches_exactly_one() {
        assert!(matches("a-F_Paste.gbr", "*-F?Paste.*", S));
        assert!(matches("a-F.Paste.gbr", "*-F?Paste.*", S));
        assert!(!matches("a-FPaste.gbr", "*-F?Paste.*", S));
        assert!(!matches("a-F__Paste.gbr", "*-F?Paste.*", S));
    }

    #[test]
    fn test_literal_pattern_is_whole_name() {
        assert!(matches("drl", "drl", S));
        assert!(!matches("board.drl", "drl", S));
        assert!(!matches("to", "tl", S));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        assert!(!matches("", "", S));
        assert!(!matches("board.gtl", "", I));
    }

    #[test]
    fn test_backtracking() {
        assert!(matches("a.b.c.gbr", "*.c.*", S));
        assert!(matches("aaab", "*a?b", S));
        assert!(!matches("abc", "*a*d", S));
        assert!(matches("abc", "***", S));
    }

    #[test]
    fn test_case_sensitivity_flag() {
        assert!(!matches("BOARD.GTL", "*.gtl", S));
        assert!(matches("BOARD.GTL", "*.gtl", I));
        assert!(!matches("board-f_cu.gbr", "*-F?Cu*", S));
        assert!(matches("board-f_cu.gbr", "*-F?Cu*", I));
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(CaseSensitivity::from_flag(true), S);
        assert_eq!(CaseSensitivity::from_flag(false), I);
        assert_eq!(CaseSensitivity::default(), I);
    }

    #[test]
    fn test_check_pattern() {
        assert!(check_pattern("*.gtl").is_none());
        assert!(check_pattern("").is_some());
        assert!(check_pattern("dir/*.gtl").is_some());
        assert!(check_pattern("*.g tl").is_some());
    }
}
