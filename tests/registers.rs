use sisa_rs::operand::parse_register;
use sisa_rs::AssembleError;

#[test]
fn all_eight_registers_parse() {
    for n in 0u8..8 {
        assert_eq!(parse_register(&format!("R{n}")).unwrap(), n);
    }
}

#[test]
fn digits_past_seven_are_out_of_range() {
    assert!(matches!(
        parse_register("R8"),
        Err(AssembleError::RegisterOutOfRange(8))
    ));
    assert!(matches!(
        parse_register("R9"),
        Err(AssembleError::RegisterOutOfRange(9))
    ));
}

#[test]
fn multi_digit_and_non_numeric_forms_are_malformed() {
    for bad in ["R10", "R01", "RX", "R", "r5", "5R", "R 5", "R-1", ""] {
        assert!(
            matches!(parse_register(bad), Err(AssembleError::MalformedOperand(_))),
            "'{bad}' parsed"
        );
    }
}
