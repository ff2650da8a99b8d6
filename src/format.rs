/// Display and input formatting shared by the views.
///
/// The CPF masks reproduce the consultation form behavior exactly:
/// progressive punctuation while typing, and a positional substitution
/// for already-complete documents on the receipt page.
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Fallback text for any beneficiary field the lookup did not return.
pub const NAO_INFORMADO: &str = "Não informado";

/// Keep only ASCII digits.
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Progressive CPF mask applied while the user types.
///
/// Strips non-digits and punctuates toward `NNN.NNN.NNN-NN`. Inputs
/// holding more than 11 digits are returned unchanged (no truncation,
/// no check-digit validation).
pub fn format_cpf_progressive(input: &str) -> String {
    let digits = strip_non_digits(input);
    if digits.len() > 11 {
        return input.to_string();
    }
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// Positional CPF substitution for display on the receipt page.
///
/// Expects exactly 11 digits; anything else is rendered unchanged.
pub fn format_cpf(cpf: &str) -> String {
    let re = Regex::new(r"^(\d{3})(\d{3})(\d{3})(\d{2})$").unwrap();
    re.replace(cpf, "$1.$2.$3-$4").into_owned()
}

/// Parse the upstream birth date (`YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`).
pub fn parse_data_nascimento(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split(' ').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Birth date reformatted for display, `DD/MM/YYYY`.
pub fn formatar_data_nascimento(raw: &str) -> Option<String> {
    parse_data_nascimento(raw).map(|d| d.format("%d/%m/%Y").to_string())
}

/// Eligibility cut: birth years strictly after 1970 are treated as
/// having no recoverable value. 1970 itself passes. An unparseable
/// date never blocks, matching the legacy behavior this service
/// replaces.
pub fn nascimento_acima_de_1970(raw: &str) -> bool {
    parse_data_nascimento(raw)
        .map(|d| d.year() > 1970)
        .unwrap_or(false)
}

/// Map the upstream sex code to display text.
pub fn formatar_sexo(sexo: Option<&str>) -> &'static str {
    match sexo {
        Some("M") => "Masculino",
        Some("F") => "Feminino",
        _ => NAO_INFORMADO,
    }
}

/// Brazilian currency rendering: `R$ 1.234,56`.
pub fn formatar_valor_brl(valor: f64) -> String {
    let sinal = if valor < 0.0 { "-" } else { "" };
    let centavos = (valor.abs() * 100.0).round() as u64;
    let inteiro = (centavos / 100).to_string();
    let mut agrupado = String::with_capacity(inteiro.len() + inteiro.len() / 3);
    for (i, c) in inteiro.chars().enumerate() {
        if i > 0 && (inteiro.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    format!("{}R$ {},{:02}", sinal, agrupado, centavos % 100)
}
