//! Extended entity substitution for serialized documents.
//!
//! Offline documentation browsers render bundles with a variety of engines,
//! some of which mishandle raw non-ASCII bytes. After serialization, a fixed
//! catalogue of code points is rewritten to named HTML entities: Greek
//! letters, mathematical operators, typographic punctuation, Latin-1 letters
//! and ligatures, and currency symbols. The markup metacharacters `<`, `>`,
//! `&`, `"` are deliberately absent: the serializer already escaped those,
//! and substituting them again would double-encode.

/// Replace every catalogued code point in `html` with its named entity.
pub fn substitute(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 16);
    for c in html.chars() {
        match named_entity(c) {
            Some(name) => {
                out.push('&');
                out.push_str(name);
                out.push(';');
            }
            None => out.push(c),
        }
    }
    out
}

/// Entity name for a catalogued code point.
fn named_entity(c: char) -> Option<&'static str> {
    let name = match c {
        // Greek
        'Α' => "Alpha",
        'Β' => "Beta",
        'Γ' => "Gamma",
        'Δ' => "Delta",
        'Ε' => "Epsilon",
        'Ζ' => "Zeta",
        'Η' => "Eta",
        'Θ' => "Theta",
        'Ι' => "Iota",
        'Κ' => "Kappa",
        'Λ' => "Lambda",
        'Μ' => "Mu",
        'Ν' => "Nu",
        'Ξ' => "Xi",
        'Ο' => "Omicron",
        'Π' => "Pi",
        'Ρ' => "Rho",
        'Σ' => "Sigma",
        'Τ' => "Tau",
        'Υ' => "Upsilon",
        'Φ' => "Phi",
        'Χ' => "Chi",
        'Ψ' => "Psi",
        'Ω' => "Omega",
        'α' => "alpha",
        'β' => "beta",
        'γ' => "gamma",
        'δ' => "delta",
        'ε' => "epsilon",
        'ζ' => "zeta",
        'η' => "eta",
        'θ' => "theta",
        'ι' => "iota",
        'κ' => "kappa",
        'λ' => "lambda",
        'μ' => "mu",
        'ν' => "nu",
        'ξ' => "xi",
        'ο' => "omicron",
        'π' => "pi",
        'ρ' => "rho",
        'ς' => "sigmaf",
        'σ' => "sigma",
        'τ' => "tau",
        'υ' => "upsilon",
        'φ' => "phi",
        'χ' => "chi",
        'ψ' => "psi",
        'ω' => "omega",

        // Mathematical operators and comparison
        '−' => "minus",
        '×' => "times",
        '÷' => "divide",
        '±' => "plusmn",
        '≤' => "le",
        '≥' => "ge",
        '≠' => "ne",
        '≡' => "equiv",
        '≈' => "asymp",
        '≅' => "cong",
        '∼' => "sim",
        '∞' => "infin",
        '∑' => "sum",
        '∏' => "prod",
        '√' => "radic",
        '∫' => "int",
        '∂' => "part",
        '∇' => "nabla",
        '∀' => "forall",
        '∃' => "exist",
        '∅' => "empty",
        '∈' => "isin",
        '∉' => "notin",
        '∋' => "ni",
        '∩' => "cap",
        '∪' => "cup",
        '⊂' => "sub",
        '⊃' => "sup",
        '⊆' => "sube",
        '⊇' => "supe",
        '⊕' => "oplus",
        '⊗' => "otimes",
        '⊥' => "perp",
        '⋅' => "sdot",
        '∝' => "prop",
        '∠' => "ang",
        '∧' => "and",
        '∨' => "or",
        '¬' => "not",
        '∗' => "lowast",
        '∴' => "there4",
        '′' => "prime",
        '″' => "Prime",
        '⁄' => "frasl",

        // Typographic punctuation and signs
        '\u{00A0}' => "nbsp",
        '–' => "ndash",
        '—' => "mdash",
        '‘' => "lsquo",
        '’' => "rsquo",
        '‚' => "sbquo",
        '“' => "ldquo",
        '”' => "rdquo",
        '„' => "bdquo",
        '†' => "dagger",
        '‡' => "Dagger",
        '•' => "bull",
        '…' => "hellip",
        '‰' => "permil",
        '‹' => "lsaquo",
        '›' => "rsaquo",
        '«' => "laquo",
        '»' => "raquo",
        '¡' => "iexcl",
        '¿' => "iquest",
        '·' => "middot",
        '§' => "sect",
        '¶' => "para",
        '°' => "deg",
        '©' => "copy",
        '®' => "reg",
        '™' => "trade",
        'ª' => "ordf",
        'º' => "ordm",
        '¹' => "sup1",
        '²' => "sup2",
        '³' => "sup3",
        '¼' => "frac14",
        '½' => "frac12",
        '¾' => "frac34",
        'µ' => "micro",
        '\u{00AD}' => "shy",
        '¯' => "macr",
        '‾' => "oline",
        '´' => "acute",
        '¸' => "cedil",
        '¨' => "uml",

        // Latin-1 letters and ligatures
        'À' => "Agrave",
        'Á' => "Aacute",
        'Â' => "Acirc",
        'Ã' => "Atilde",
        'Ä' => "Auml",
        'Å' => "Aring",
        'Æ' => "AElig",
        'Ç' => "Ccedil",
        'È' => "Egrave",
        'É' => "Eacute",
        'Ê' => "Ecirc",
        'Ë' => "Euml",
        'Ì' => "Igrave",
        'Í' => "Iacute",
        'Î' => "Icirc",
        'Ï' => "Iuml",
        'Ð' => "ETH",
        'Ñ' => "Ntilde",
        'Ò' => "Ograve",
        'Ó' => "Oacute",
        'Ô' => "Ocirc",
        'Õ' => "Otilde",
        'Ö' => "Ouml",
        'Ø' => "Oslash",
        'Ù' => "Ugrave",
        'Ú' => "Uacute",
        'Û' => "Ucirc",
        'Ü' => "Uuml",
        'Ý' => "Yacute",
        'Þ' => "THORN",
        'ß' => "szlig",
        'à' => "agrave",
        'á' => "aacute",
        'â' => "acirc",
        'ã' => "atilde",
        'ä' => "auml",
        'å' => "aring",
        'æ' => "aelig",
        'ç' => "ccedil",
        'è' => "egrave",
        'é' => "eacute",
        'ê' => "ecirc",
        'ë' => "euml",
        'ì' => "igrave",
        'í' => "iacute",
        'î' => "icirc",
        'ï' => "iuml",
        'ð' => "eth",
        'ñ' => "ntilde",
        'ò' => "ograve",
        'ó' => "oacute",
        'ô' => "ocirc",
        'õ' => "otilde",
        'ö' => "ouml",
        'ø' => "oslash",
        'ù' => "ugrave",
        'ú' => "uacute",
        'û' => "ucirc",
        'ü' => "uuml",
        'ý' => "yacute",
        'þ' => "thorn",
        'ÿ' => "yuml",
        'Œ' => "OElig",
        'œ' => "oelig",
        'Š' => "Scaron",
        'š' => "scaron",
        'Ÿ' => "Yuml",
        'ƒ' => "fnof",

        // Currency
        '¢' => "cent",
        '£' => "pound",
        '¤' => "curren",
        '¥' => "yen",
        '€' => "euro",

        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_greek_and_math() {
        assert_eq!(substitute("λ ≤ π"), "&lambda; &le; &pi;");
    }

    #[test]
    fn substitutes_punctuation_and_accents() {
        assert_eq!(
            substitute("café — “quoted”"),
            "caf&eacute; &mdash; &ldquo;quoted&rdquo;"
        );
    }

    #[test]
    fn ascii_passes_through_untouched() {
        let plain = "<p class=\"x\">plain &amp; simple</p>";
        assert_eq!(substitute(plain), plain);
    }

    #[test]
    fn markup_escapes_are_not_double_encoded() {
        // The serializer emits these sequences; the pass must leave them be.
        assert_eq!(substitute("&lt;tag&gt; &quot;v&quot;"), "&lt;tag&gt; &quot;v&quot;");
    }

    #[test]
    fn uncatalogued_code_points_survive() {
        assert_eq!(substitute("日本語 →"), "日本語 →");
    }
}
