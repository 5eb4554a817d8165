use sisa_rs::Assembler;

fn assemble(source: &str) -> (Vec<u8>, usize) {
    let mut asm = Assembler::new(Vec::new());
    asm.assemble(source.lines()).unwrap();
    let errors = asm.errors();
    (asm.into_inner(), errors)
}

#[test]
fn full_line_comments_emit_nothing() {
    let (bytes, errors) = assemble(
        "; this is a full line comment\n\
         ADD R0, R0, R0\n\
         ; this is another full line comment\n",
    );
    assert_eq!(bytes.len(), 2);
    assert_eq!(errors, 0);
}

#[test]
fn inline_comments_are_stripped_before_tokenizing() {
    let (bytes, errors) = assemble("ADD R0, R0, R0 ; this is an inline comment\n");
    assert_eq!((bytes.len(), errors), (2, 0));
}

#[test]
fn blank_and_whitespace_lines_are_skipped() {
    let (bytes, errors) = assemble("\n\n   \nADD R0, R0, R0\n\t\n");
    assert_eq!((bytes.len(), errors), (2, 0));
}

#[test]
fn indented_instructions_still_assemble() {
    let (bytes, errors) = assemble("    ADD R0, R0, R0\n");
    assert_eq!((bytes.len(), errors), (2, 0));
}
