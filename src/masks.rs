//! Display masks for Brazilian document numbers.
//!
//! All masks are progressive: they keep only the digits of the input and lay
//! out as many of them as are present, so a partially typed value is shaped
//! as far as it goes.

/// Keeps only the ASCII digits.
pub fn unmask(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// `00.000.000/0000-00`
pub fn mask_cnpj(value: &str) -> String {
    let d = unmask(value);
    let n = d.len();

    match n {
        0..=2 => d,
        3..=5 => format!("{}.{}", &d[..2], &d[2..]),
        6..=8 => format!("{}.{}.{}", &d[..2], &d[2..5], &d[5..]),
        9..=12 => format!("{}.{}.{}/{}", &d[..2], &d[2..5], &d[5..8], &d[8..]),
        _ => format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..n.min(14)]
        ),
    }
}

/// `(00) 0000-0000` for landlines, `(00) 00000-0000` for mobiles.
pub fn mask_telefone(value: &str) -> String {
    let d = unmask(value);
    let n = d.len();

    match n {
        0..=2 => d,
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..n.min(11)]),
    }
}

/// `00000-000`
pub fn mask_cep(value: &str) -> String {
    let d = unmask(value);
    let n = d.len();

    match n {
        0..=5 => d,
        _ => format!("{}-{}", &d[..5], &d[5..n.min(8)]),
    }
}
