use std::error::Error;
use std::process::Command;

const FILE_NAME: &str = "./demos/div_by_zero.lj";

#[test]
fn fatal_errors_exit_non_zero_and_print_no_partial_output() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_lj")).arg(FILE_NAME).output()?;

    assert!(!output.status.success());
    assert_eq!(std::str::from_utf8(&output.stdout)?, "");
    assert!(!output.stderr.is_empty());

    Ok(())
}
