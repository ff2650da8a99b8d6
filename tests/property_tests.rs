/// Property-based tests using proptest
/// Tests invariants of the CPF masks, the currency rendering, and the
/// `dados` encode/decode round trip.
use proptest::prelude::*;
use rust_consulta_api::format::{
    format_cpf, format_cpf_progressive, formatar_valor_brl, nascimento_acima_de_1970,
    strip_non_digits,
};

// Property: the masks should never panic
proptest! {
    #[test]
    fn progressive_mask_never_panics(input in "\\PC*") {
        let _ = format_cpf_progressive(&input);
    }

    #[test]
    fn positional_mask_never_panics(input in "\\PC*") {
        let _ = format_cpf(&input);
    }

    #[test]
    fn birth_year_rule_never_panics(input in "\\PC*") {
        let _ = nascimento_acima_de_1970(&input);
    }

    #[test]
    fn currency_rendering_never_panics(valor in proptest::num::f64::ANY) {
        let _ = formatar_valor_brl(valor);
    }
}

// Property: any 11-digit input formats to the canonical pattern
proptest! {
    #[test]
    fn eleven_digits_format_to_canonical_pattern(cpf in "[0-9]{11}") {
        let formatted = format_cpf_progressive(&cpf);
        let expected = format!(
            "{}.{}.{}-{}",
            &cpf[0..3], &cpf[3..6], &cpf[6..9], &cpf[9..11]
        );
        prop_assert_eq!(&formatted, &expected);
        // The positional substitution agrees with the progressive mask
        prop_assert_eq!(format_cpf(&cpf), expected);
    }

    #[test]
    fn noisy_input_with_eleven_digits_still_formats(
        prefix in "[a-zA-Z \\.\\-]{0,6}",
        cpf in "[0-9]{11}",
        suffix in "[a-zA-Z \\.\\-]{0,6}"
    ) {
        let noisy = format!("{}{}{}", prefix, cpf, suffix);
        let formatted = format_cpf_progressive(&noisy);
        let expected = format!(
            "{}.{}.{}-{}",
            &cpf[0..3], &cpf[3..6], &cpf[6..9], &cpf[9..11]
        );
        prop_assert_eq!(formatted, expected);
    }

    #[test]
    fn progressive_mask_preserves_digits(input in "[0-9\\.\\- a-z]{0,16}") {
        let digits = strip_non_digits(&input);
        prop_assume!(digits.len() <= 11);
        let formatted = format_cpf_progressive(&input);
        prop_assert_eq!(strip_non_digits(&formatted), digits);
    }

    #[test]
    fn more_than_eleven_digits_pass_through(input in "[0-9]{12,20}") {
        prop_assert_eq!(format_cpf_progressive(&input), input.clone());
        prop_assert_eq!(format_cpf(&input), input);
    }
}

// Property: integer amounts render with grouped reais and ",00" cents
proptest! {
    #[test]
    fn integer_amounts_round_trip_through_currency(valor in 0u32..=1_000_000u32) {
        let rendered = formatar_valor_brl(valor as f64);
        prop_assert!(rendered.starts_with("R$ "));
        prop_assert!(rendered.ends_with(",00"));
        // Digits survive the grouping: reais followed by two cent digits
        prop_assert_eq!(strip_non_digits(&rendered), format!("{}00", valor));
    }
}

// Property: the dados query parameter encode/decode is the identity
proptest! {
    #[test]
    fn dados_encode_decode_is_identity(
        nome in "\\PC{0,24}",
        cpf in "[0-9]{11}",
        ano in 1900i32..=2010i32
    ) {
        let payload = serde_json::json!({
            "pessoa": {
                "identificacao": {
                    "nome": nome,
                    "cpf": cpf,
                    "data_nascimento": format!("{}-01-01 00:00:00", ano)
                }
            }
        });
        let json = serde_json::to_string(&payload).unwrap();

        // Encode the way the landing submission does
        let encoded: String = url::form_urlencoded::byte_serialize(json.as_bytes()).collect();

        // Decode the way the framework does for the result view
        let query = format!("dados={}", encoded);
        let decoded = url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "dados")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        let round_tripped: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        prop_assert_eq!(round_tripped, payload);
    }
}
