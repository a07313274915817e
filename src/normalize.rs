//! Filename normalization.
//!
//! Produces filesystem-safe names: Cyrillic and Ukrainian characters are
//! transliterated to Latin through a fixed per-character table, any other
//! character that is not alphanumeric becomes an underscore, and the
//! extension is carried over untouched.

/// Splits a filename into stem and extension at the last `.`.
///
/// The extension includes the leading dot. A name without a dot is all stem.
///
/// # Examples
///
/// ```
/// use sweepdir::normalize::split_name;
///
/// assert_eq!(split_name("report.final.pdf"), ("report.final", ".pdf"));
/// assert_eq!(split_name("README"), ("README", ""));
/// assert_eq!(split_name(".bashrc"), ("", ".bashrc"));
/// ```
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Normalizes a filename for placement in a category folder.
///
/// The stem is transliterated character by character; anything that is not
/// mapped and not alphanumeric is replaced with `_`. The extension (everything
/// from the last dot on) is appended back verbatim — not transliterated, not
/// case-folded. Total over all inputs, including the empty string, and
/// idempotent on already-normalized names.
///
/// # Examples
///
/// ```
/// use sweepdir::normalize::normalize;
///
/// assert_eq!(normalize("фото 1.jpg"), "foto_1.jpg");
/// assert_eq!(normalize("Щука.txt"), "Shchuka.txt");
/// assert_eq!(normalize("report.PDF"), "report.PDF");
/// ```
pub fn normalize(name: &str) -> String {
    let (stem, extension) = split_name(name);

    let mut normalized = String::with_capacity(name.len());
    for character in stem.chars() {
        if let Some(latin) = latin_of(character) {
            normalized.push_str(latin);
        } else if character.is_alphanumeric() {
            normalized.push(character);
        } else {
            normalized.push('_');
        }
    }
    normalized.push_str(extension);
    normalized
}

/// Latin replacement for a single Cyrillic or Ukrainian character.
///
/// Hard and soft signs map to the empty string. Characters outside the table
/// return `None`.
fn latin_of(character: char) -> Option<&'static str> {
    let latin = match character {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // Ukrainian
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "Kh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Shch",
        'Ъ' => "",
        'Ы' => "Y",
        'Ь' => "",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        // Uppercase Ukrainian
        'Є' => "YE",
        'І' => "I",
        'Ї' => "YI",
        'Ґ' => "G",
        _ => return None,
    };
    Some(latin)
}
