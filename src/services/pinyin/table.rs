//! 拼音读音压缩表
//!
//! 把一条规范化读音压缩为恰好 2 个小写字母的双码：
//! - 声母二合字母重指派：zh->v, ch->i, sh->u
//! - 韵母簇重指派为单字母（按表精确匹配）
//! - 裸元音读音双写（a -> aa），a/o/e 开头的读音另发一个 o 前导变体
//! - j/q/x/y 后的裸 u 另发一个 v 韵变体（ü 写作 u 的场合）
//!
//! 压不到恰好 2 个字母的读音直接丢弃。

use compact_str::CompactString;

const INITIAL_DIGRAPHS: &[(&str, char)] = &[("zh", 'v'), ("ch", 'i'), ("sh", 'u')];

/// 韵母 -> 重指派字母。整段精确匹配，不做前缀替换。
const FINALS: &[(&str, char)] = &[
    ("iang", 'l'),
    ("uang", 'l'),
    ("iong", 's'),
    ("ueng", 'g'),
    ("ang", 'h'),
    ("eng", 'g'),
    ("ing", 'k'),
    ("ong", 'y'),
    ("ian", 'm'),
    ("iao", 'n'),
    ("uan", 'r'),
    ("uai", 'k'),
    ("van", 'r'),
    ("ai", 'd'),
    ("ei", 'w'),
    ("ao", 'c'),
    ("ou", 'z'),
    ("an", 'j'),
    ("en", 'f'),
    ("in", 'b'),
    ("un", 'p'),
    ("er", 'r'),
    ("ia", 'x'),
    ("ie", 'p'),
    ("iu", 'q'),
    ("ua", 'x'),
    ("ui", 'v'),
    ("uo", 'o'),
    ("ue", 't'),
    ("ve", 't'),
    ("vn", 'p'),
];

/// 声调元音折叠到基字母，ü 折到 v，非字母丢弃
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'a'..='z' => c,
        'A'..='Z' => c.to_ascii_lowercase(),
        'ā' | 'á' | 'ǎ' | 'à' => 'a',
        'ē' | 'é' | 'ě' | 'è' | 'ê' => 'e',
        'ī' | 'í' | 'ǐ' | 'ì' => 'i',
        'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
        'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
        'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' | 'ü' => 'v',
        'ń' | 'ň' | 'ǹ' => 'n',
        'ḿ' => 'm',
        _ => return None,
    };
    Some(folded)
}

pub(crate) fn normalize_reading(raw: &str) -> CompactString {
    raw.chars().filter_map(fold_char).collect()
}

fn final_key(cluster: &str) -> Option<char> {
    FINALS
        .iter()
        .find(|(pattern, _)| *pattern == cluster)
        .map(|&(_, key)| key)
}

fn two(a: char, b: char) -> CompactString {
    let mut s = CompactString::default();
    s.push(a);
    s.push(b);
    s
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// 一条原始读音 -> 0..=2 个双码
pub(crate) fn compress(raw: &str) -> Vec<CompactString> {
    let s = normalize_reading(raw);
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };

    let mut out: Vec<CompactString> = Vec::with_capacity(2);

    if is_vowel(first) {
        // 零声母读音：首字母保留，余下整段压缩
        if s.chars().count() == 1 {
            out.push(two(first, first));
            if matches!(first, 'a' | 'o' | 'e') {
                out.push(two('o', first));
            }
        } else if let Some(key) = final_key(&s) {
            out.push(two(first, key));
            if matches!(first, 'a' | 'o' | 'e') {
                out.push(two('o', key));
            }
        }
        out.dedup();
        return out;
    }

    let (initial, rest) = match INITIAL_DIGRAPHS.iter().find(|(d, _)| s.starts_with(d)) {
        Some(&(digraph, mapped)) => (mapped, &s[digraph.len()..]),
        None => (first, &s[first.len_utf8()..]),
    };
    if rest.is_empty() {
        // 呣、嗯 一类单辅音读音压不到两位
        return Vec::new();
    }

    let key = if rest.chars().count() == 1 {
        rest.chars().next()
    } else {
        final_key(rest)
    };
    let Some(key) = key else {
        return Vec::new();
    };

    out.push(two(initial, key));
    if rest == "u" && matches!(first, 'j' | 'q' | 'x' | 'y') {
        out.push(two(initial, 'v'));
    }
    out.dedup();
    out
}
